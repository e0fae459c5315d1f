//! # SPR Media
//!
//! Pose media storage and retrieval for the SPR system.
//!
//! This crate owns the one external collaborator the matching engine needs:
//! a directory tree with one subdirectory per pose key, each holding zero or
//! more image files. The store indexes that tree once at startup and serves
//! base64 image payloads per pose afterwards.
//!
//! **No matching concerns**: tokenization, condition lookup, and
//! recommendation assembly belong in `spr-core`.

#![warn(rust_2018_idioms)]

mod store;

pub use store::{MediaPayload, MediaRecord, MediaStore, IMAGE_EXTENSIONS};

/// Errors that can occur when opening a media store.
///
/// Only the store *root* can produce an error: a missing or unreadable pose
/// subdirectory, or a pose with no usable image, is "no image" by contract,
/// never a failure.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("invalid media root directory: {0}")]
    InvalidRoot(String),
    #[error("failed to scan media directory: {0}")]
    Io(#[from] std::io::Error),
}
