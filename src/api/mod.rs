//! API Client
//!
//! HTTP communication with the Spyglass analytics API.

pub mod client;

pub use client::*;
