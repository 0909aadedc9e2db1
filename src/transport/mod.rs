//! Transport layer for the memories REST backend.
//!
//! Requests are plain data: [`PostsApi`] builds them, the plugin shim hands
//! them to the host as `curl` commands, and the command results come back as
//! events. Nothing here blocks or retries; each request is sent exactly once.
//!
//! # Modules
//!
//! - `request`: the five operations and the [`ApiRequest`] they produce
//! - `response`: decoding status and body into an [`ApiReply`]
//! - `curl`: body staging, command rendering, output parsing, and the
//!   [`RequestTicket`] that matches results to calls

pub mod curl;
pub mod request;
pub mod response;

pub use curl::{curl_args, discard_body, parse_command_output, stage_body, RequestTicket, TICKET_CONTEXT_KEY};
pub use request::{ApiCall, ApiRequest, HttpMethod, PostsApi, DEFAULT_BACKEND_URL};
pub use response::{decode_reply, ApiReply, HttpResponse};
