//! Request construction for the five posts operations.
//!
//! [`PostsApi`] knows the backend base path and turns each operation into an
//! [`ApiRequest`]: method, URL, optional JSON body, and the [`ApiCall`] that
//! produced it. Sending is someone else's job; see [`super::curl`].

use crate::domain::{PostDraft, TransportError};
use serde::{Deserialize, Serialize};

/// Base path of the memories backend.
pub const DEFAULT_BACKEND_URL: &str = "https://memories-proj.onrender.com/posts";

/// HTTP methods used by the posts API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which operation a request performs, and on which post.
///
/// Travels with the request and comes back with its completion, so the
/// dispatch layer knows how to decode the reply and which id a delete
/// targeted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiCall {
    ListPosts,
    CreatePost,
    UpdatePost { id: String },
    LikePost { id: String },
    DeletePost { id: String },
}

impl ApiCall {
    /// Operation name used in logs and spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ListPosts => "list_posts",
            Self::CreatePost => "create_post",
            Self::UpdatePost { .. } => "update_post",
            Self::LikePost { .. } => "like_post",
            Self::DeletePost { .. } => "delete_post",
        }
    }

    /// The targeted post id, if the operation has one.
    #[must_use]
    pub fn post_id(&self) -> Option<&str> {
        match self {
            Self::ListPosts | Self::CreatePost => None,
            Self::UpdatePost { id } | Self::LikePost { id } | Self::DeletePost { id } => Some(id),
        }
    }
}

/// A single HTTP call, ready to be sent once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub call: ApiCall,
    pub method: HttpMethod,
    pub url: String,
    /// JSON body; `None` sends no body at all.
    pub body: Option<String>,
}

/// Builder for posts API requests against one base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsApi {
    base_url: String,
}

impl Default for PostsApi {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl PostsApi {
    /// Creates an API builder; a trailing `/` on `base_url` is dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET B`
    #[must_use]
    pub fn list_posts(&self) -> ApiRequest {
        ApiRequest {
            call: ApiCall::ListPosts,
            method: HttpMethod::Get,
            url: self.base_url.clone(),
            body: None,
        }
    }

    /// `POST B` with the draft as body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if the draft cannot be serialized.
    pub fn create_post(&self, draft: &PostDraft) -> Result<ApiRequest, TransportError> {
        Ok(ApiRequest {
            call: ApiCall::CreatePost,
            method: HttpMethod::Post,
            url: self.base_url.clone(),
            body: Some(encode_draft(draft)?),
        })
    }

    /// `PATCH B/{id}` with the draft as body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if the draft cannot be serialized.
    pub fn update_post(&self, id: &str, draft: &PostDraft) -> Result<ApiRequest, TransportError> {
        Ok(ApiRequest {
            call: ApiCall::UpdatePost { id: id.to_string() },
            method: HttpMethod::Patch,
            url: self.post_url(id),
            body: Some(encode_draft(draft)?),
        })
    }

    /// `PATCH B/{id}/likePost`, no body.
    #[must_use]
    pub fn like_post(&self, id: &str) -> ApiRequest {
        ApiRequest {
            call: ApiCall::LikePost { id: id.to_string() },
            method: HttpMethod::Patch,
            url: format!("{}/likePost", self.post_url(id)),
            body: None,
        }
    }

    /// `DELETE B/{id}`
    #[must_use]
    pub fn delete_post(&self, id: &str) -> ApiRequest {
        ApiRequest {
            call: ApiCall::DeletePost { id: id.to_string() },
            method: HttpMethod::Delete,
            url: self.post_url(id),
            body: None,
        }
    }

    fn post_url(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url)
    }
}

fn encode_draft(draft: &PostDraft) -> Result<String, TransportError> {
    serde_json::to_string(draft).map_err(|e| TransportError::Encode(e.to_string()))
}
