//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the `memories` library and the Zellij
//! plugin system. Everything that calls into `zellij_tile` lives here; the
//! library only sees [`Event`]s and returns [`Action`]s.
//!
//! ```text
//! ┌─────────────────────────────┐
//! │     Zellij Main Thread      │
//! │  ┌───────────────────────┐  │
//! │  │    State (plugin)     │──┼──► run_command(curl … @body)
//! │  └───────────────────────┘  │         │
//! │          │ IPC    ▲         │         ▼
//! │          ▼        │         │   RunCommandResult
//! │  ┌───────────────────────┐  │
//! │  │ MemoriesWorker        │  │  ← image file reads
//! │  │ (worker thread)       │  │
//! │  └───────────────────────┘  │
//! └─────────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `RunCommandResult` carrying a request ticket → `Event::RequestFinished`
//! - `CustomMessage("memories", …)` → `Event::WorkerResponse`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Tab` / `Shift+Tab`: next / previous field (the list comes after Image)
//! - `Ctrl+s`: submit the form
//! - `Ctrl+x`: clear the form
//! - `Ctrl+r`: refetch all posts
//! - `Esc`: dismiss the alert, or clear the form
//! - `Enter`: newline in Message, load the file in Image, edit in the list
//!
//! In the list:
//! - `j`/`Down`, `k`/`Up`: move
//! - `e`: edit, `l`: like, `d`: delete, `r`: refetch
//! - `q`: close the pane

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use memories::infrastructure::{host_command_path, request_body_path};
use memories::transport::{curl_args, discard_body, stage_body, RequestTicket};
use memories::worker::{MemoriesWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use memories::{handle_event, Action, Config, Event, Focus};

register_plugin!(State);
register_worker!(WorkerShim, memories_worker, MEMORIES_WORKER);

/// Plugin state wrapper.
struct State {
    /// Core application state from the library layer.
    app: memories::AppState,

    /// Program run for each HTTP call.
    curl_path: String,

    /// Keeps staged request bodies apart from other instances'.
    plugin_id: u32,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: memories::initialize(&config),
            curl_path: config.curl_path,
            plugin_id: 0,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions and subscribes to events.
    ///
    /// Nothing is fetched until `RunCommands` is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        memories::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = memories::initialize(&config);
        self.curl_path.clone_from(&config.curl_path);
        self.plugin_id = get_plugin_ids().plugin_id;

        request_permission(&[
            PermissionType::RunCommands,
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                match self.map_command_result_event(exit_code, stdout, stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        memories::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard input to application events.
    ///
    /// Letters are commands only while the list has focus; in the form they
    /// are typed into the focused field.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('s') => Some(Event::Submit),
                BareKey::Char('x') => Some(Event::ClearForm),
                BareKey::Char('r') => Some(Event::Refresh),
                _ => None,
            };
        }

        if key.bare_key == BareKey::Tab {
            return Some(if key.has_modifiers(&[KeyModifier::Shift]) {
                Event::FocusPrev
            } else {
                Event::FocusNext
            });
        }

        let in_list = self.app.focus == Focus::List;
        Some(match key.bare_key {
            BareKey::Esc => Event::Escape,
            BareKey::Enter => Event::Enter,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down | BareKey::Char('j') if in_list => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') if in_list => Event::KeyUp,
            BareKey::Char('e') if in_list => Event::EditSelected,
            BareKey::Char('l') if in_list => Event::LikeSelected,
            BareKey::Char('d') if in_list => Event::DeleteSelected,
            BareKey::Char('r') if in_list => Event::Refresh,
            BareKey::Char('q') if in_list => Event::CloseFocus,
            BareKey::Char(c) if !in_list => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps a finished command back to the request it was run for.
    ///
    /// Commands without a request ticket were not started by this plugin.
    /// The request's staged body, if any, is removed.
    fn map_command_result_event(
        &self,
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(ticket) = RequestTicket::from_context(context) else {
            tracing::debug!("ignoring command result without a request ticket");
            return None;
        };

        tracing::debug!(request_id = ticket.request_id, exit_code = ?exit_code, stdout_len = stdout.len(), "request command finished");
        discard_body(&request_body_path(self.plugin_id, ticket.request_id));
        Some(Event::RequestFinished {
            ticket,
            exit_code,
            stdout,
            stderr,
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize worker message"),
        }
    }

    /// Translates library actions to Zellij API calls.
    fn execute_action(&self, action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::SendRequest { ticket, request } => {
                let _span = tracing::debug_span!("send_request", request_id = ticket.request_id, op = ticket.call.name())
                    .entered();

                let context = match ticket.to_context() {
                    Ok(context) => context,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode request ticket");
                        return;
                    }
                };

                let body_path = request_body_path(self.plugin_id, ticket.request_id);
                let staged = match stage_body(&request, &body_path) {
                    Ok(staged) => staged,
                    Err(e) => {
                        tracing::error!(error = %e, path = %body_path.display(), "failed to stage request body");
                        return;
                    }
                };

                let body_file = staged.then(|| host_command_path(&body_path));
                let args = curl_args(&self.curl_path, &request, body_file.as_deref());
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                run_command(&args, context);
            }
            Action::PostToWorker(message) => Self::post_worker_message(&message),
        }
    }
}

/// Set once the worker's own tracing subscriber is installed.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Worker thread entry point.
///
/// Zellij runs this in its own wasm instance, so tracing is set up again on
/// the first message.
#[derive(Default, Serialize, Deserialize)]
struct WorkerShim(MemoriesWorker);

impl ZellijWorker<'_> for WorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            memories::observability::init_tracing(&Config::default());
        }

        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "worker ignoring unknown message");
            return;
        }

        if let Some(response) = self.0.on_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload: response,
                worker_name: None,
            });
        }
    }
}
