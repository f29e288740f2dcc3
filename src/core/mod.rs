//! Core components of the `ipocal-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`IpoClient`] and its builder.
//! - The primary [`IpoError`] type.
//! - Shared data models like [`IpoRecord`] and [`Status`].
//! - Internal networking logic.

/// The main client (`IpoClient`), builder, and configuration.
pub mod client;
/// The primary error type (`IpoError`) for the crate.
pub mod error;
/// Shared data models used across multiple modules (e.g., `IpoRecord`, `Status`).
pub mod models;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::IpoClient`
pub use client::{IpoClient, IpoClientBuilder};
pub use error::IpoError;
pub use models::{DEFAULT_LOCKUP, ExpectedDate, IpoRecord, Status};
