//! HTTP surface integration tests.
//!
//! Each test starts an axum server on port 0 over a fresh data directory and
//! exercises it with reqwest.
#![cfg(feature = "http")]

mod support;

mod contact;
mod events;
mod gallery;
mod health;
mod news;
