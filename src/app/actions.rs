//! Side effects requested by the event handler.
//!
//! The handler never talks to the host directly. It returns `Action`s, and the
//! plugin shim performs them in order: hiding the pane, running a request
//! command, or posting to the worker.

use crate::transport::{ApiRequest, RequestTicket};
use crate::worker::WorkerMessage;

/// Commands for the plugin runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends one backend request.
    ///
    /// The ticket travels as command context and comes back with the result.
    SendRequest {
        ticket: RequestTicket,
        request: ApiRequest,
    },

    /// Posts a message to the background worker.
    PostToWorker(WorkerMessage),
}

impl Action {
    /// The request being sent, if this is a [`Action::SendRequest`].
    #[must_use]
    pub const fn request(&self) -> Option<&ApiRequest> {
        match self {
            Self::SendRequest { request, .. } => Some(request),
            Self::CloseFocus | Self::PostToWorker(_) => None,
        }
    }
}
