//! HTTP networking module
//!
//! Provides the transport used to reach the search backend.

mod client;

pub use client::{HttpClient, HttpMethod, HttpResponse};
