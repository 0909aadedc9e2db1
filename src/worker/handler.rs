//! Worker implementation for image loading.
//!
//! Reading a file is the one slow, blocking step of attaching an image, so it
//! runs on the worker thread. The size check uses file metadata and happens
//! before the file is opened; oversized files are never read.

use crate::domain::image::{mime_for_path, to_data_url, validate_image};
use crate::domain::ImageRejection;
use crate::infrastructure::paths;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Worker thread state.
///
/// Stateless apart from what the host serializes; every request is handled
/// on its own.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoriesWorker {}

impl MemoriesWorker {
    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = attach_parent_trace_context(&message);

        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadImage { path, .. } => Self::handle_load_image(path),
        }
    }

    /// Handles a raw JSON payload from the plugin.
    ///
    /// Returns the JSON response to post back, or `None` if nothing can be
    /// sent (the response failed to serialize).
    pub fn on_payload(&mut self, payload: &str) -> Option<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("invalid worker message: {e}"),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }

    fn handle_load_image(path: String) -> WorkerResponse {
        let resolved = paths::resolve_host_path(&path);

        match load_image(&resolved) {
            Ok(data_url) => {
                tracing::debug!(path = %path, encoded_len = data_url.len(), "image loaded");
                WorkerResponse::ImageLoaded { path, data_url }
            }
            Err(reason) => {
                tracing::debug!(path = %path, resolved = %resolved.display(), reason = ?reason, "image rejected");
                WorkerResponse::ImageRejected { path, reason }
            }
        }
    }
}

/// Validates the file at `path` and encodes it as a `data:` URL.
///
/// # Errors
///
/// - [`ImageRejection::Unreadable`] if the file is missing or cannot be read
/// - [`ImageRejection::TooLarge`] / [`ImageRejection::NotAnImage`] from
///   [`validate_image`]
pub fn load_image(path: &Path) -> Result<String, ImageRejection> {
    let unreadable = |e: std::io::Error| ImageRejection::Unreadable { reason: e.to_string() };

    let metadata = std::fs::metadata(path).map_err(unreadable)?;
    if !metadata.is_file() {
        return Err(ImageRejection::Unreadable {
            reason: format!("{} is not a file", paths::strip_host_prefix(&path.to_string_lossy())),
        });
    }

    let mime = mime_for_path(path);
    validate_image(metadata.len(), mime)?;

    let bytes = std::fs::read(path).map_err(unreadable)?;
    Ok(to_data_url(mime, &bytes))
}

/// Re-attaches the caller's trace context so worker spans share its trace.
///
/// The returned guard must be held for the duration of the operation.
fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = message.trace_context()?;
    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

    Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
}
