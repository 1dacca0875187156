//! API client module for the SecureVault CLI.
//!
//! Provides the HTTP client with bearer token injection, Keychain token
//! storage, vault and admin operations, and request/response types matching
//! the SecureVault backend API.

pub mod admin;
pub mod auth;
pub mod client;
pub mod error;
pub mod types;
pub mod vault;
