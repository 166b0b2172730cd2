// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides token resolution and the HTTP client for the repository search
//! endpoint.

pub mod auth;
pub mod client;

pub use client::{DEFAULT_BASE_URL, GitHubSearchClient};
