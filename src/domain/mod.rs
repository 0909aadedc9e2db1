//! Domain layer for the Memories plugin.
//!
//! Core types with no dependency on Zellij or on the transport: the [`Post`]
//! record, the form's [`PostDraft`], image validation, and the error types.
//!
//! # Organization
//!
//! - [`error`]: `MemoriesError`, `TransportError` and the `Result` alias
//! - [`post`]: the backend's post record and relative-time display
//! - [`draft`]: the edit buffer / request body and tag splitting
//! - [`image`]: size and MIME checks, `data:` URL encoding

pub mod draft;
pub mod error;
pub mod image;
pub mod post;

pub use draft::{split_tags, PostDraft};
pub use error::{MemoriesError, Result, TransportError};
pub use image::ImageRejection;
pub use post::Post;
