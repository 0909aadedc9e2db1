//! Sending requests through the host's `curl`.
//!
//! The plugin cannot open sockets itself, so every [`ApiRequest`] is rendered
//! as a `curl` command that the host runs on the plugin's behalf. The command
//! writes the response body followed by a final line holding the HTTP status,
//! which [`parse_command_output`] splits apart again.
//!
//! Bodies never go on the command line. [`stage_body`] writes them to a file
//! that curl reads with `--data-binary @file`, so an image data URL of any
//! size stays clear of the host's argument length limit.
//!
//! A [`RequestTicket`] is attached to each command as context. It comes back
//! with the command result, whatever order results arrive in, and tells the
//! dispatch layer which call completed.

use super::request::{ApiCall, ApiRequest};
use super::response::HttpResponse;
use crate::domain::TransportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Context key under which a serialized [`RequestTicket`] travels.
pub const TICKET_CONTEXT_KEY: &str = "memories_request";

/// `curl -w` format appending the status code on its own line.
const STATUS_WRITE_OUT: &str = "\n%{http_code}";

/// Identifies one in-flight call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTicket {
    /// Monotonic per-session request number, for log correlation.
    pub request_id: u64,
    pub call: ApiCall,
}

impl RequestTicket {
    /// Encodes the ticket as a command context map.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if the ticket cannot be serialized.
    pub fn to_context(&self) -> Result<BTreeMap<String, String>, TransportError> {
        let encoded = serde_json::to_string(self).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(BTreeMap::from([(TICKET_CONTEXT_KEY.to_string(), encoded)]))
    }

    /// Recovers a ticket from a command context map.
    ///
    /// Returns `None` when the context does not belong to a posts request
    /// (for instance a command started by something else).
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let encoded = context.get(TICKET_CONTEXT_KEY)?;
        match serde_json::from_str(encoded) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                tracing::warn!(error = %e, "request context present but unreadable");
                None
            }
        }
    }
}

/// Writes the JSON body of `request` to `path`, creating parent directories.
///
/// Returns `false` without touching the disk when the request has no body.
///
/// # Errors
///
/// Returns [`MemoriesError::Io`](crate::MemoriesError::Io) if the file cannot
/// be written.
pub fn stage_body(request: &ApiRequest, path: &Path) -> crate::Result<bool> {
    let Some(body) = &request.body else {
        return Ok(false);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;

    tracing::debug!(path = %path.display(), body_len = body.len(), "staged request body");
    Ok(true)
}

/// Removes a body file written by [`stage_body`]. A missing file is fine.
pub fn discard_body(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed request body"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove request body"),
    }
}

/// Renders `request` as a `curl` argument vector, program first.
///
/// `body_file` is where [`stage_body`] put the body, as curl will see it. A
/// request without one is sent without data.
///
/// # Examples
///
/// ```
/// use memories::transport::{curl_args, PostsApi};
///
/// let args = curl_args("curl", &PostsApi::new("http://localhost/posts").like_post("7"), None);
/// assert_eq!(args[0], "curl");
/// assert!(args.iter().any(|a| a == "PATCH"));
/// assert_eq!(args.last().map(String::as_str), Some("http://localhost/posts/7/likePost"));
/// ```
#[must_use]
pub fn curl_args(curl_path: &str, request: &ApiRequest, body_file: Option<&Path>) -> Vec<String> {
    let mut args = vec![
        curl_path.to_string(),
        "--silent".to_string(),
        "--show-error".to_string(),
        "--request".to_string(),
        request.method.as_str().to_string(),
        "--header".to_string(),
        "Accept: application/json".to_string(),
    ];

    if let Some(file) = body_file.filter(|_| request.body.is_some()) {
        args.extend([
            "--header".to_string(),
            "Content-Type: application/json".to_string(),
            "--data-binary".to_string(),
            format!("@{}", file.display()),
        ]);
    }

    args.extend([
        "--write-out".to_string(),
        STATUS_WRITE_OUT.to_string(),
        request.url.clone(),
    ]);

    args
}

/// Splits a finished `curl` run into status and body.
///
/// # Errors
///
/// - [`TransportError::Command`] if curl exited non-zero (DNS, connection
///   refused, TLS...) or was killed
/// - [`TransportError::Malformed`] if the trailing status line is missing or
///   not a number (curl prints `000` when no response was received)
pub fn parse_command_output(
    exit_code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
) -> Result<HttpResponse, TransportError> {
    if exit_code != Some(0) {
        return Err(TransportError::Command {
            exit_code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        });
    }

    let output = String::from_utf8_lossy(stdout);
    let (body, status_line) = output
        .rsplit_once('\n')
        .ok_or_else(|| TransportError::Malformed(format!("no status line in {} bytes of output", output.len())))?;

    let status: u16 = status_line
        .trim()
        .parse()
        .map_err(|_| TransportError::Malformed(format!("invalid status line {status_line:?}")))?;

    if status == 0 {
        return Err(TransportError::Malformed("no HTTP response received".to_string()));
    }

    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}
