//! Events describing a change to the post collection.
//!
//! Events are produced by the dispatch layer once a backend call succeeds and
//! are the only input the reducer accepts. They serialize with a `kind` tag so
//! an event log can be written out and replayed; any tag this build does not
//! know decodes as [`PostEvent::Unknown`].

use crate::domain::Post;
use serde::{Deserialize, Serialize};

/// A discriminated change to apply to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PostEvent {
    /// The full collection, as returned by the list call.
    Fetched { posts: Vec<Post> },
    /// A post the backend just created.
    Created { post: Post },
    /// The backend's copy of an edited post.
    Updated { post: Post },
    /// The backend's copy of a post after a like.
    Liked { post: Post },
    /// A post was deleted; `id` is the one the request targeted.
    Deleted { id: String },
    /// Any event kind this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl PostEvent {
    /// Short name used in logs and spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fetched { .. } => "Fetched",
            Self::Created { .. } => "Created",
            Self::Updated { .. } => "Updated",
            Self::Liked { .. } => "Liked",
            Self::Deleted { .. } => "Deleted",
            Self::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_kind_decodes_as_unknown() {
        let event: PostEvent = serde_json::from_str(r#"{"kind": "Archived", "id": "1"}"#).unwrap();
        assert_eq!(event, PostEvent::Unknown);
    }

    #[test]
    fn deleted_carries_only_the_id() {
        let json = serde_json::to_value(PostEvent::Deleted { id: "42".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "Deleted", "id": "42"}));
    }
}
