//! Settling completed backend calls into the store.
//!
//! Every request the plugin sends comes back exactly once, as a command result
//! tagged with its [`RequestTicket`]. [`settle`] turns that completion into a
//! [`PostEvent`] and reduces it into the store. Failures are logged and handed
//! back to the caller; the store is never touched by a failed call and no
//! error state reaches the view.

use crate::domain::TransportError;
use crate::store::{PostEvent, PostStore};
use crate::transport::{decode_reply, parse_command_output, ApiCall, ApiReply, HttpResponse, RequestTicket};

/// Applies the outcome of one call to `store`.
///
/// On success the resulting event has already been dispatched when this
/// returns. Completions are applied in the order they are settled, so two
/// overlapping calls on the same post resolve to whichever finished last.
///
/// # Errors
///
/// Returns the [`TransportError`] that failed the call, after logging it.
pub fn settle(
    store: &mut PostStore,
    ticket: &RequestTicket,
    outcome: Result<HttpResponse, TransportError>,
) -> Result<PostEvent, TransportError> {
    let _span = tracing::debug_span!(
        "settle",
        request_id = ticket.request_id,
        op = ticket.call.name(),
        post_id = ticket.call.post_id()
    )
    .entered();

    let event = match outcome.and_then(|response| decode_reply(&ticket.call, &response)) {
        Ok(reply) => event_for(&ticket.call, reply)?,
        Err(e) => {
            tracing::error!(
                request_id = ticket.request_id,
                op = ticket.call.name(),
                error = %e,
                "request failed"
            );
            return Err(e);
        }
    };

    store.dispatch(&event);
    tracing::debug!(kind = event.kind(), posts = store.len(), "request settled");
    Ok(event)
}

/// Settles a finished host command: parses its raw output, then [`settle`]s.
///
/// # Errors
///
/// Same as [`settle`].
pub fn settle_command(
    store: &mut PostStore,
    ticket: &RequestTicket,
    exit_code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
) -> Result<PostEvent, TransportError> {
    settle(store, ticket, parse_command_output(exit_code, stdout, stderr))
}

fn event_for(call: &ApiCall, reply: ApiReply) -> Result<PostEvent, TransportError> {
    let event = match (call, reply) {
        (ApiCall::ListPosts, ApiReply::Posts(posts)) => PostEvent::Fetched { posts },
        (ApiCall::CreatePost, ApiReply::Post(post)) => PostEvent::Created { post },
        (ApiCall::UpdatePost { .. }, ApiReply::Post(post)) => PostEvent::Updated { post },
        (ApiCall::LikePost { .. }, ApiReply::Post(post)) => PostEvent::Liked { post },
        (ApiCall::DeletePost { id }, ApiReply::Deleted) => PostEvent::Deleted { id: id.clone() },
        (call, reply) => {
            let e = TransportError::Malformed(format!("{} cannot produce {reply:?}", call.name()));
            tracing::error!(error = %e, "request failed");
            return Err(e);
        }
    };
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FetchStatus;

    const RECORD: &str = r#"{"_id":"p1","creator":"Ann","title":"Beach","message":"sun","tags":["sea"],"likeCount":3,"createdAt":"2024-05-01T10:00:00Z"}"#;

    fn ticket(call: ApiCall) -> RequestTicket {
        RequestTicket { request_id: 1, call }
    }

    fn ok(body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    fn fetched_store() -> PostStore {
        let mut store = PostStore::new();
        settle(&mut store, &ticket(ApiCall::ListPosts), ok(&format!("[{RECORD}]"))).unwrap();
        store
    }

    #[test]
    fn list_replaces_the_collection() {
        let store = fetched_store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.fetch_status(), FetchStatus::Fetched);
        assert_eq!(store.get("p1").map(|p| p.like_count), Some(3));
    }

    #[test]
    fn create_appends_the_returned_record() {
        let mut store = PostStore::new();
        let event = settle(&mut store, &ticket(ApiCall::CreatePost), ok(RECORD)).unwrap();
        assert_eq!(event.kind(), "Created");
        assert_eq!(store.posts().len(), 1);
        assert_eq!(store.posts()[0].title, "Beach");
    }

    #[test]
    fn like_replaces_by_id() {
        let mut store = fetched_store();
        let liked = RECORD.replace("\"likeCount\":3", "\"likeCount\":4");
        settle(&mut store, &ticket(ApiCall::LikePost { id: "p1".into() }), ok(&liked)).unwrap();
        assert_eq!(store.get("p1").map(|p| p.like_count), Some(4));
    }

    #[test]
    fn delete_takes_the_id_from_the_ticket() {
        let mut store = fetched_store();
        let event = settle(
            &mut store,
            &ticket(ApiCall::DeletePost { id: "p1".into() }),
            ok(r#"{"message":"Post deleted successfully"}"#),
        )
        .unwrap();
        assert_eq!(event, PostEvent::Deleted { id: "p1".into() });
        assert!(store.is_empty());
    }

    #[test]
    fn failures_leave_the_store_alone() {
        let mut store = fetched_store();
        let before = store.clone();

        let err = settle(
            &mut store,
            &ticket(ApiCall::DeletePost { id: "p1".into() }),
            Ok(HttpResponse {
                status: 500,
                body: "boom".into(),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 500, .. }));

        let err = settle(
            &mut store,
            &ticket(ApiCall::ListPosts),
            Err(TransportError::Command {
                exit_code: Some(7),
                stderr: "connection refused".into(),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, TransportError::Command { .. }));

        assert_eq!(store, before);
    }

    #[test]
    fn command_output_is_parsed_before_settling() {
        let mut store = PostStore::new();
        let stdout = format!("[{RECORD}]\n200");
        settle_command(&mut store, &ticket(ApiCall::ListPosts), Some(0), stdout.as_bytes(), b"").unwrap();
        assert_eq!(store.len(), 1);

        let err = settle_command(&mut store, &ticket(ApiCall::ListPosts), Some(6), b"", b"no host").unwrap_err();
        assert!(matches!(err, TransportError::Command { .. }));
        assert_eq!(store.len(), 1);
    }
}
