//! Unsaved post contents held by the form.

use super::Post;
use serde::{Deserialize, Serialize};

/// The edit buffer of the form, and the request body for create/update.
///
/// Serializes as `{creator, title, message, tags, selectedFile}`. A missing
/// image is sent as an empty string, which the backend stores as "no image".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub creator: String,
    pub title: String,
    pub message: String,
    pub tags: Vec<String>,
    #[serde(rename = "selectedFile", with = "file_as_string")]
    pub selected_file: Option<String>,
}

impl PostDraft {
    /// Seeds a draft with the exact field values of a stored post.
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self {
            creator: post.creator.clone(),
            title: post.title.clone(),
            message: post.message.clone(),
            tags: post.tags.clone(),
            selected_file: post.selected_file.clone(),
        }
    }

    /// The tag field as the user sees it: tags joined with commas.
    ///
    /// Splitting this text with [`split_tags`] gives back `self.tags`.
    #[must_use]
    pub fn tags_text(&self) -> String {
        self.tags.join(",")
    }

    /// Replaces the tags from raw tag-field text.
    pub fn set_tags_text(&mut self, text: &str) {
        self.tags = split_tags(text);
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Splits tag-field text on commas without trimming.
///
/// Whitespace is kept so that the field round-trips while typing; trimming
/// only happens when tags are displayed. Empty text is an empty sequence.
///
/// # Examples
///
/// ```
/// use memories::domain::split_tags;
///
/// assert_eq!(split_tags("a,b,c"), vec!["a", "b", "c"]);
/// assert_eq!(split_tags("a, b"), vec!["a", " b"]);
/// assert_eq!(split_tags("a,"), vec!["a", ""]);
/// assert!(split_tags("").is_empty());
/// ```
#[must_use]
pub fn split_tags(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(String::from).collect()
}

mod file_as_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(file: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(file.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let file = Option::<String>::deserialize(d)?;
        Ok(file.filter(|data| !data.is_empty()))
    }
}
