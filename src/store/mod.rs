//! Client-side post store.
//!
//! - `events`: the discriminated [`PostEvent`] set
//! - `reducer`: [`PostStore`] and the pure [`reduce`] function

pub mod events;
pub mod reducer;

pub use events::PostEvent;
pub use reducer::{reduce, FetchStatus, PostStore};
