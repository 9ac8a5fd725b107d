//! Common utilities for tilepak.
//!
//! This crate provides the foundational types shared by the decoder and the
//! repacker:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`Uuid`] - 16-byte identifiers attached to layers
//! - [`Error`] - The `OutOfBounds` failure every primitive read can produce
//! - [`ErrorKind`] - The error taxonomy shared by all tilepak crates

mod error;
mod reader;
mod uuid;

pub use error::{Error, ErrorKind, Result};
pub use reader::BinaryReader;
pub use uuid::Uuid;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};
