//! Decoding backend responses into typed replies.

use super::request::ApiCall;
use crate::domain::{Post, TransportError};

/// Raw HTTP outcome of a request: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Decoded body of a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    /// `list_posts`: the whole collection.
    Posts(Vec<Post>),
    /// `create_post`, `update_post`, `like_post`: the stored record.
    Post(Post),
    /// `delete_post`: nothing worth decoding.
    Deleted,
}

/// Decodes the response to `call`.
///
/// Non-2xx statuses are failures, whatever the body says. Delete replies are
/// not decoded; the backend's confirmation message is ignored.
///
/// # Errors
///
/// - [`TransportError::Status`] for a non-2xx status
/// - [`TransportError::Decode`] if the body is not the expected JSON
pub fn decode_reply(call: &ApiCall, response: &HttpResponse) -> Result<ApiReply, TransportError> {
    if !response.is_success() {
        return Err(TransportError::Status {
            status: response.status,
            body: response.body.clone(),
        });
    }

    let reply = match call {
        ApiCall::ListPosts => ApiReply::Posts(serde_json::from_str(&response.body)?),
        ApiCall::CreatePost | ApiCall::UpdatePost { .. } | ApiCall::LikePost { .. } => {
            ApiReply::Post(serde_json::from_str(&response.body)?)
        }
        ApiCall::DeletePost { .. } => ApiReply::Deleted,
    };

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    const RECORD: &str = r#"{"_id":"1","creator":"A","title":"T","message":"M","tags":["x"],"likeCount":2,"createdAt":"2024-01-01T00:00:00Z"}"#;

    #[test]
    fn list_decodes_an_array() {
        let reply = decode_reply(&ApiCall::ListPosts, &ok(&format!("[{RECORD}]"))).unwrap();
        let ApiReply::Posts(posts) = reply else {
            panic!("expected posts, got {reply:?}");
        };
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].like_count, 2);
    }

    #[test]
    fn single_record_calls_decode_a_post() {
        for call in [
            ApiCall::CreatePost,
            ApiCall::UpdatePost { id: "1".into() },
            ApiCall::LikePost { id: "1".into() },
        ] {
            let reply = decode_reply(&call, &ok(RECORD)).unwrap();
            assert!(matches!(reply, ApiReply::Post(ref p) if p.id == "1"), "{call:?}");
        }
    }

    #[test]
    fn delete_ignores_the_body() {
        let reply = decode_reply(
            &ApiCall::DeletePost { id: "1".into() },
            &ok(r#"{"message":"Post deleted successfully"}"#),
        )
        .unwrap();
        assert_eq!(reply, ApiReply::Deleted);
    }

    #[test]
    fn non_success_status_is_an_error() {
        let response = HttpResponse {
            status: 404,
            body: "No post with that id".to_string(),
        };
        let err = decode_reply(&ApiCall::LikePost { id: "1".into() }, &response).unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let err = decode_reply(&ApiCall::ListPosts, &ok(RECORD)).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
