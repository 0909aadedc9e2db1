//! The post store and its reducer.
//!
//! [`PostStore`] is the single source of truth for rendered posts. It only
//! changes through [`reduce`], a pure function from `(store, event)` to the
//! next store. The store is owned by `AppState` and passed explicitly; there
//! is no global instance.

use super::events::PostEvent;
use crate::domain::Post;

/// Whether the collection has been fetched from the backend at least once.
///
/// The list view shows its loading placeholder for any empty collection, so
/// this flag is the only way to tell "not fetched yet" from "fetched, and the
/// backend has no posts".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// No `Fetched` event has been applied yet.
    #[default]
    Pending,
    /// At least one `Fetched` event has been applied.
    Fetched,
}

/// Ordered collection of posts plus fetch status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
    fetch_status: FetchStatus,
}

impl PostStore {
    /// Creates an empty, not-yet-fetched store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts in display order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Looks up a post by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    #[must_use]
    pub const fn fetch_status(&self) -> FetchStatus {
        self.fetch_status
    }

    /// Applies an event in place by running it through [`reduce`].
    pub fn dispatch(&mut self, event: &PostEvent) {
        let current = std::mem::take(self);
        *self = reduce(current, event);
    }
}

/// Computes the store that results from applying `event` to `state`.
///
/// Total over every event: replacing or removing an id that is not in the
/// store leaves it unchanged, and [`PostEvent::Unknown`] is ignored.
///
/// # Examples
///
/// ```
/// use memories::store::{reduce, PostEvent, PostStore};
///
/// let store = reduce(PostStore::new(), &PostEvent::Deleted { id: "missing".into() });
/// assert!(store.is_empty());
/// ```
#[must_use]
pub fn reduce(mut state: PostStore, event: &PostEvent) -> PostStore {
    let _span = tracing::trace_span!("reduce", event = event.kind(), before = state.posts.len()).entered();

    match event {
        PostEvent::Fetched { posts } => {
            state.posts.clone_from(posts);
            state.fetch_status = FetchStatus::Fetched;
        }
        PostEvent::Created { post } => {
            state.posts.push(post.clone());
        }
        PostEvent::Updated { post } | PostEvent::Liked { post } => {
            match state.posts.iter_mut().find(|existing| existing.id == post.id) {
                Some(existing) => existing.clone_from(post),
                None => tracing::debug!(post_id = %post.id, event = event.kind(), "post not in store, ignoring"),
            }
        }
        PostEvent::Deleted { id } => {
            state.posts.retain(|post| &post.id != id);
        }
        PostEvent::Unknown => {
            tracing::debug!("ignoring unknown event kind");
        }
    }

    state
}
