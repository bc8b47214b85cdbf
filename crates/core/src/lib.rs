//! Linden Core - Shared catalog types library.
//!
//! This crate provides the common types used across all Linden components:
//! - `storefront` - Public-facing catalog site
//! - `integration-tests` - End-to-end tests over an in-memory catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog entities, and stock status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
