//! The create/edit form.
//!
//! [`FormState`] owns the edit buffer and everything transient around it: the
//! form mode, the image path being typed, and the blocking alert. It never
//! touches the store; the handler reads store records into it (selection and
//! re-seeding) and sends the requests it builds.

use super::modes::{FormField, FormMode};
use crate::domain::{Post, PostDraft, TransportError};
use crate::store::PostStore;
use crate::transport::{ApiRequest, PostsApi};

/// Header shown while no post is selected.
pub const CREATE_TITLE: &str = "Create Memory Photo";

/// Transient state of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,

    /// Unsaved field values; also the request body on submit.
    pub buffer: PostDraft,

    /// Path typed into the image field. Not part of the request body.
    pub image_path: String,

    /// Message of the blocking alert, if one is raised.
    pub alert: Option<String>,

    /// The store record the buffer was last seeded from.
    ///
    /// Compared against the store after every change so the buffer follows
    /// edits, likes and refetches of the selected post.
    seeded_from: Option<Post>,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected post id, if editing.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.mode.selected_id()
    }

    /// Switches to Edit mode for `post` and seeds the buffer from it.
    ///
    /// Selecting the post that is already being edited changes nothing, so
    /// unsaved edits survive. Returns `true` if the selected id changed.
    pub fn select(&mut self, post: &Post) -> bool {
        let changed = self.selected_id() != Some(post.id.as_str());
        tracing::debug!(post_id = %post.id, changed, "selecting post for edit");

        if changed {
            self.mode = FormMode::Edit { id: post.id.clone() };
            self.seed(post);
            self.image_path.clear();
        }
        changed
    }

    /// Resets the buffer and returns to Create mode.
    ///
    /// Returns `true` if a post was selected before.
    pub fn clear(&mut self) -> bool {
        let was_editing = self.selected_id().is_some();
        self.mode = FormMode::Create;
        self.buffer = PostDraft::default();
        self.image_path.clear();
        self.seeded_from = None;
        was_editing
    }

    /// Re-seeds the buffer if the selected post's store record changed.
    ///
    /// A selected post that is no longer in the store leaves the buffer as
    /// it is. Returns `true` if the buffer was replaced.
    pub fn reseed(&mut self, store: &PostStore) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        let Some(post) = store.get(id) else {
            return false;
        };
        if self.seeded_from.as_ref() == Some(post) {
            return false;
        }

        tracing::debug!(post_id = %post.id, "selected post changed in store, reseeding form");
        let post = post.clone();
        self.seed(&post);
        true
    }

    /// Builds the request for the current mode, then clears the form.
    ///
    /// The form is cleared before any response arrives. Returns the request
    /// and whether a post was selected.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if the buffer cannot be serialized;
    /// the form is left unchanged in that case.
    pub fn submit(&mut self, api: &PostsApi) -> Result<(ApiRequest, bool), TransportError> {
        let request = match &self.mode {
            FormMode::Create => api.create_post(&self.buffer)?,
            FormMode::Edit { id } => api.update_post(id, &self.buffer)?,
        };
        let was_editing = self.clear();
        Ok((request, was_editing))
    }

    /// Header text: `Editing "<title>"` or [`CREATE_TITLE`].
    ///
    /// The title comes from the store record of the selected post, falling
    /// back to the buffer if the record has gone.
    #[must_use]
    pub fn header(&self, store: &PostStore) -> String {
        match self.selected_id() {
            None => CREATE_TITLE.to_string(),
            Some(id) => {
                let title = store.get(id).map_or(self.buffer.title.as_str(), |post| post.title.as_str());
                format!("Editing \"{title}\"")
            }
        }
    }

    /// Current text of `field` as the user sees it.
    #[must_use]
    pub fn field_text(&self, field: FormField) -> String {
        match field {
            FormField::Creator => self.buffer.creator.clone(),
            FormField::Title => self.buffer.title.clone(),
            FormField::Message => self.buffer.message.clone(),
            FormField::Tags => self.buffer.tags_text(),
            FormField::Image => self.image_path.clone(),
        }
    }

    /// Appends a character to `field`.
    pub fn push_char(&mut self, field: FormField, c: char) {
        self.edit(field, |text| text.push(c));
    }

    /// Removes the last character of `field`.
    pub fn backspace(&mut self, field: FormField) {
        self.edit(field, |text| {
            text.pop();
        });
    }

    /// Stores a loaded image in the buffer.
    pub fn attach_image(&mut self, data_url: String) {
        self.buffer.selected_file = Some(data_url);
    }

    pub fn raise_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(message = %message, "alert raised");
        self.alert = Some(message);
    }

    /// Dismisses the alert; returns `true` if one was showing.
    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    fn seed(&mut self, post: &Post) {
        self.buffer = PostDraft::from_post(post);
        self.seeded_from = Some(post.clone());
    }

    fn edit(&mut self, field: FormField, apply: impl FnOnce(&mut String)) {
        match field {
            FormField::Creator => apply(&mut self.buffer.creator),
            FormField::Title => apply(&mut self.buffer.title),
            FormField::Message => apply(&mut self.buffer.message),
            FormField::Tags => {
                let mut text = self.buffer.tags_text();
                apply(&mut text);
                self.buffer.set_tags_text(&text);
            }
            FormField::Image => apply(&mut self.image_path),
        }
    }
}
