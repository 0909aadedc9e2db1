//! Event handling and state transition logic.
//!
//! Every input the plugin receives becomes an [`Event`]: keys already mapped
//! by the shim, finished request commands, worker replies and permission
//! results. [`handle_event`] mutates [`AppState`] and returns whether to
//! re-render along with the [`Action`]s to execute.
//!
//! # Flows
//!
//! - **Submit**: builds a create or update request from the form, clears the
//!   form immediately, and refetches if a post was selected.
//! - **Selection**: every change of the selected post id (edit, clear after
//!   edit, submit in edit mode) also refetches the whole list.
//! - **Completion**: `RequestFinished` is settled into the store, then the
//!   form re-seeds itself if the selected post's record changed.
//! - **Alert**: while an alert is showing, input is ignored until Enter or
//!   Esc dismisses it. Completions and worker replies still apply.
//!
//! # Example
//!
//! ```rust
//! use memories::app::{handle_event, AppState, Event};
//! use memories::transport::PostsApi;
//! use memories::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), PostsApi::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 1); // initial list fetch
//! # Ok::<(), memories::MemoriesError>(())
//! ```

use super::dispatch;
use super::modes::{Focus, FormField};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::transport::RequestTicket;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host command results, or worker replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves focus to the next field (after the last field: the list).
    FocusNext,
    /// Moves focus to the previous field.
    FocusPrev,

    /// Types a character into the focused field.
    Char(char),
    /// Deletes the last character of the focused field.
    Backspace,
    /// Dismisses the alert, or acts on the focused field (newline, load
    /// image, next field, edit selected card).
    Enter,

    /// Submits the form.
    Submit,
    /// Clears the form and selection.
    ClearForm,
    /// Dismisses the alert if one is showing, otherwise clears the form.
    Escape,
    /// Refetches the post list.
    Refresh,

    /// Moves the card cursor down (wraps to top).
    KeyDown,
    /// Moves the card cursor up (wraps to bottom).
    KeyUp,
    /// Loads the card under the cursor into the form.
    EditSelected,
    /// Likes the card under the cursor.
    LikeSelected,
    /// Deletes the card under the cursor.
    DeleteSelected,

    /// Hides the plugin pane.
    CloseFocus,

    /// The user answered the permission request.
    PermissionsResult { granted: bool },

    /// A request command finished; raw output as the host reported it.
    RequestFinished {
        ticket: RequestTicket,
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },

    /// Reply from the background worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for spans; avoids dumping command output into logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FocusNext => "FocusNext",
            Self::FocusPrev => "FocusPrev",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::Enter => "Enter",
            Self::Submit => "Submit",
            Self::ClearForm => "ClearForm",
            Self::Escape => "Escape",
            Self::Refresh => "Refresh",
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::EditSelected => "EditSelected",
            Self::LikeSelected => "LikeSelected",
            Self::DeleteSelected => "DeleteSelected",
            Self::CloseFocus => "CloseFocus",
            Self::PermissionsResult { .. } => "PermissionsResult",
            Self::RequestFinished { .. } => "RequestFinished",
            Self::WorkerResponse(_) => "WorkerResponse",
        }
    }

    /// Whether an open alert swallows this event.
    const fn blocked_by_alert(&self) -> bool {
        !matches!(
            self,
            Self::Enter
                | Self::Escape
                | Self::CloseFocus
                | Self::PermissionsResult { .. }
                | Self::RequestFinished { .. }
                | Self::WorkerResponse(_)
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the shim.
///
/// # Errors
///
/// Returns an error only if a request body cannot be encoded. Failed backend
/// calls are not errors here: they are logged by the dispatch layer and
/// leave the state unchanged.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    if state.form.alert.is_some() && event.blocked_by_alert() {
        tracing::debug!("alert showing, ignoring input");
        return Ok((false, vec![]));
    }

    match event {
        Event::FocusNext => {
            state.focus = state.focus.next();
            Ok((true, vec![]))
        }
        Event::FocusPrev => {
            state.focus = state.focus.prev();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            let Focus::Field(field) = state.focus else {
                return Ok((false, vec![]));
            };
            state.form.push_char(field, *c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            let Focus::Field(field) = state.focus else {
                return Ok((false, vec![]));
            };
            state.form.backspace(field);
            Ok((true, vec![]))
        }
        Event::Enter => {
            if state.form.dismiss_alert() {
                return Ok((true, vec![]));
            }
            match state.focus {
                Focus::Field(FormField::Message) => {
                    state.form.push_char(FormField::Message, '\n');
                    Ok((true, vec![]))
                }
                Focus::Field(FormField::Image) => {
                    let path = state.form.image_path.trim().to_string();
                    if path.is_empty() {
                        return Ok((false, vec![]));
                    }
                    tracing::debug!(path = %path, "loading image");
                    Ok((false, vec![Action::PostToWorker(WorkerMessage::load_image(path))]))
                }
                Focus::Field(_) => {
                    state.focus = state.focus.next();
                    Ok((true, vec![]))
                }
                Focus::List => edit_selected(state),
            }
        }
        Event::Submit => {
            let (request, was_editing) = state.form.submit(&state.api)?;
            tracing::debug!(op = request.call.name(), was_editing, "form submitted");

            let mut actions = vec![state.send(request)];
            if was_editing {
                actions.push(state.refetch());
            }
            Ok((true, actions))
        }
        Event::ClearForm => Ok(clear_form(state)),
        Event::Escape => {
            if state.form.dismiss_alert() {
                return Ok((true, vec![]));
            }
            Ok(clear_form(state))
        }
        Event::Refresh => Ok((false, vec![state.refetch()])),
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::EditSelected => edit_selected(state),
        Event::LikeSelected => {
            let Some(post) = state.selected_post() else {
                return Ok((false, vec![]));
            };
            let request = state.api.like_post(&post.id);
            Ok((false, vec![state.send(request)]))
        }
        Event::DeleteSelected => {
            let Some(post) = state.selected_post() else {
                return Ok((false, vec![]));
            };
            let request = state.api.delete_post(&post.id);
            Ok((false, vec![state.send(request)]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!("permissions granted, fetching posts");
                Ok((false, vec![state.refetch()]))
            } else {
                tracing::warn!("permissions denied, backend requests will fail");
                Ok((false, vec![]))
            }
        }
        Event::RequestFinished {
            ticket,
            exit_code,
            stdout,
            stderr,
        } => match dispatch::settle_command(&mut state.store, ticket, *exit_code, stdout, stderr) {
            Ok(_) => {
                state.clamp_selection();
                state.form.reseed(&state.store);
                Ok((true, vec![]))
            }
            Err(_) => Ok((false, vec![])),
        },
        Event::WorkerResponse(response) => match response {
            WorkerResponse::ImageLoaded { path, data_url } => {
                tracing::debug!(path = %path, "image attached");
                state.form.attach_image(data_url.clone());
                Ok((true, vec![]))
            }
            WorkerResponse::ImageRejected { path, reason } => {
                tracing::debug!(path = %path, reason = ?reason, "image rejected");
                state.form.raise_alert(reason.to_string());
                Ok((true, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                Ok((false, vec![]))
            }
        },
    }
}

fn edit_selected(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(post) = state.selected_post().cloned() else {
        return Ok((false, vec![]));
    };

    let changed = state.form.select(&post);
    state.focus = Focus::default();

    let actions = if changed { vec![state.refetch()] } else { vec![] };
    Ok((true, actions))
}

fn clear_form(state: &mut AppState) -> (bool, Vec<Action>) {
    let was_editing = state.form.clear();
    let actions = if was_editing { vec![state.refetch()] } else { vec![] };
    (true, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::FormMode;
    use crate::domain::ImageRejection;
    use crate::transport::{ApiCall, HttpMethod, PostsApi};
    use crate::ui::Theme;

    fn record(id: &str, title: &str, likes: u64) -> String {
        format!(
            r#"{{"_id":"{id}","creator":"Ann","title":"{title}","message":"m","tags":["a","b","c"],"likeCount":{likes},"createdAt":"2024-01-01T00:00:00Z"}}"#
        )
    }

    fn new_state() -> AppState {
        AppState::new(Theme::default(), PostsApi::new("http://h/posts"))
    }

    fn run(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn ticket_of(action: &Action) -> RequestTicket {
        match action {
            Action::SendRequest { ticket, .. } => ticket.clone(),
            other => panic!("expected a request, got {other:?}"),
        }
    }

    fn finish(state: &mut AppState, action: &Action, body: &str) -> bool {
        let event = Event::RequestFinished {
            ticket: ticket_of(action),
            exit_code: Some(0),
            stdout: format!("{body}\n200").into_bytes(),
            stderr: vec![],
        };
        handle_event(state, &event).unwrap().0
    }

    fn loaded(ids: &[(&str, u64)]) -> AppState {
        let mut state = new_state();
        let fetch = run(&mut state, Event::PermissionsResult { granted: true });
        let body = format!(
            "[{}]",
            ids.iter().map(|(id, likes)| record(id, &format!("Post {id}"), *likes)).collect::<Vec<_>>().join(",")
        );
        finish(&mut state, &fetch[0], &body);
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            run(state, Event::Char(c));
        }
    }

    #[test]
    fn create_round_trip_stores_the_returned_record() {
        let mut state = loaded(&[]);
        state.focus = Focus::Field(FormField::Title);
        type_text(&mut state, "Beach");
        state.focus = Focus::Field(FormField::Tags);
        type_text(&mut state, "a,b,c");
        assert_eq!(state.form.buffer.tags, vec!["a", "b", "c"]);

        let actions = run(&mut state, Event::Submit);
        assert_eq!(actions.len(), 1);
        let request = actions[0].request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Beach");
        assert_eq!(body["tags"], serde_json::json!(["a", "b", "c"]));
        assert!(state.form.buffer.is_empty(), "cleared before the response");

        let created = record("new", "Beach", 0);
        assert!(finish(&mut state, &actions[0], &created));
        let expected: crate::domain::Post = serde_json::from_str(&created).unwrap();
        assert_eq!(state.store.posts(), [expected]);
        let vm = state.compute_viewmodel(40, 80);
        assert_eq!(vm.cards[0].tags, vec!["#a", "#b", "#c"]);
    }

    #[test]
    fn quick_likes_send_two_requests_and_last_completion_wins() {
        let mut state = loaded(&[("p", 0)]);
        state.focus = Focus::List;

        let first = run(&mut state, Event::LikeSelected);
        let second = run(&mut state, Event::LikeSelected);
        assert_eq!(first[0].request().map(|r| r.url.as_str()), Some("http://h/posts/p/likePost"));
        assert_ne!(ticket_of(&first[0]), ticket_of(&second[0]));

        finish(&mut state, &second[0], &record("p", "Post p", 2));
        finish(&mut state, &first[0], &record("p", "Post p", 1));
        assert_eq!(state.store.get("p").map(|p| p.like_count), Some(1));
    }

    #[test]
    fn delete_removes_after_completion_only() {
        let mut state = loaded(&[("a", 0), ("b", 0)]);
        state.focus = Focus::List;
        run(&mut state, Event::KeyDown);

        let actions = run(&mut state, Event::DeleteSelected);
        assert_eq!(ticket_of(&actions[0]).call, ApiCall::DeletePost { id: "b".into() });
        assert_eq!(state.store.len(), 2);

        finish(&mut state, &actions[0], r#"{"message":"Post deleted successfully"}"#);
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn failed_requests_change_nothing() {
        let mut state = loaded(&[("a", 3)]);
        state.focus = Focus::List;
        let before = state.store.clone();

        let actions = run(&mut state, Event::LikeSelected);
        let event = Event::RequestFinished {
            ticket: ticket_of(&actions[0]),
            exit_code: Some(7),
            stdout: vec![],
            stderr: b"Failed to connect".to_vec(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));

        let actions = run(&mut state, Event::Refresh);
        finish(&mut state, &actions[0], "<html>502 Bad Gateway</html>");
        assert_eq!(state.store, before);
        assert!(state.form.alert.is_none());
    }

    #[test]
    fn selection_changes_refetch_the_list() {
        let mut state = loaded(&[("a", 0), ("b", 0)]);
        state.focus = Focus::List;

        let actions = run(&mut state, Event::EditSelected);
        assert_eq!(state.form.mode, FormMode::Edit { id: "a".into() });
        assert_eq!(state.form.buffer.title, "Post a");
        assert_eq!(ticket_of(&actions[0]).call, ApiCall::ListPosts);
        assert_eq!(state.focus, Focus::Field(FormField::Creator));

        state.focus = Focus::List;
        assert!(run(&mut state, Event::EditSelected).is_empty(), "same post again");

        let actions = run(&mut state, Event::ClearForm);
        assert_eq!(ticket_of(&actions[0]).call, ApiCall::ListPosts);
        assert!(run(&mut state, Event::ClearForm).is_empty(), "nothing selected");
    }

    #[test]
    fn editing_the_same_card_again_keeps_typed_changes() {
        let mut state = loaded(&[("a", 0)]);
        state.focus = Focus::List;
        run(&mut state, Event::EditSelected);

        state.focus = Focus::Field(FormField::Title);
        type_text(&mut state, "!");
        state.focus = Focus::List;
        let actions = run(&mut state, Event::EditSelected);

        assert!(actions.is_empty());
        assert_eq!(state.form.buffer.title, "Post a!");
        assert_eq!(state.form.mode, FormMode::Edit { id: "a".into() });
    }

    #[test]
    fn submitting_an_edit_updates_then_refetches() {
        let mut state = loaded(&[("a", 0)]);
        state.focus = Focus::List;
        run(&mut state, Event::EditSelected);

        state.focus = Focus::Field(FormField::Title);
        type_text(&mut state, "!");
        let actions = run(&mut state, Event::Submit);

        assert_eq!(actions.len(), 2);
        let update = actions[0].request().unwrap();
        assert_eq!(update.method, HttpMethod::Patch);
        assert_eq!(update.url, "http://h/posts/a");
        assert_eq!(ticket_of(&actions[1]).call, ApiCall::ListPosts);
        assert_eq!(state.form.mode, FormMode::Create);

        finish(&mut state, &actions[0], &record("a", "Post a!", 0));
        assert_eq!(state.store.get("a").map(|p| p.title.as_str()), Some("Post a!"));
    }

    #[test]
    fn form_follows_store_changes_to_the_selected_post() {
        let mut state = loaded(&[("a", 0)]);
        state.focus = Focus::List;
        run(&mut state, Event::EditSelected);
        state.focus = Focus::List;

        let like = run(&mut state, Event::LikeSelected);
        finish(&mut state, &like[0], &record("a", "Renamed elsewhere", 1));
        assert_eq!(state.form.buffer.title, "Renamed elsewhere");
        assert_eq!(state.form.header(&state.store), "Editing \"Renamed elsewhere\"");
    }

    #[test]
    fn alert_blocks_input_until_dismissed() {
        let mut state = loaded(&[]);
        state.focus = Focus::Field(FormField::Title);

        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ImageRejected {
                path: "big.png".into(),
                reason: ImageRejection::TooLarge { size: 60 * 1024 },
            }),
        );
        assert_eq!(state.form.alert.as_deref(), Some("Max file size 50KB"));
        assert_eq!(state.form.buffer.selected_file, None);

        assert_eq!(handle_event(&mut state, &Event::Char('x')).unwrap(), (false, vec![]));
        assert!(run(&mut state, Event::Submit).is_empty());
        assert_eq!(state.form.buffer.title, "");

        run(&mut state, Event::Escape);
        assert!(state.form.alert.is_none());
        run(&mut state, Event::Char('x'));
        assert_eq!(state.form.buffer.title, "x");
    }

    #[test]
    fn enter_in_image_field_asks_the_worker() {
        let mut state = loaded(&[]);
        state.focus = Focus::Field(FormField::Image);
        assert!(run(&mut state, Event::Enter).is_empty(), "no path typed");

        type_text(&mut state, "~/pics/cat.png");
        let actions = run(&mut state, Event::Enter);
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::LoadImage { path, .. })] if path == "~/pics/cat.png"
        ));

        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ImageLoaded {
                path: "~/pics/cat.png".into(),
                data_url: "data:image/png;base64,AAAA".into(),
            }),
        );
        assert_eq!(state.form.buffer.selected_file.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn enter_moves_on_or_breaks_lines() {
        let mut state = loaded(&[]);
        run(&mut state, Event::Enter);
        assert_eq!(state.focus, Focus::Field(FormField::Title));

        state.focus = Focus::Field(FormField::Message);
        type_text(&mut state, "a");
        run(&mut state, Event::Enter);
        type_text(&mut state, "b");
        assert_eq!(state.form.buffer.message, "a\nb");
    }

    #[test]
    fn list_actions_without_posts_do_nothing() {
        let mut state = loaded(&[]);
        state.focus = Focus::List;
        for event in [Event::EditSelected, Event::LikeSelected, Event::DeleteSelected, Event::Enter] {
            assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        }
    }

    #[test]
    fn denied_permissions_fetch_nothing() {
        let mut state = new_state();
        assert!(run(&mut state, Event::PermissionsResult { granted: false }).is_empty());
    }
}
