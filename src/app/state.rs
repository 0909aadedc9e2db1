//! Application state management and view model computation.
//!
//! [`AppState`] owns everything the plugin knows: the post store, the form,
//! focus and list cursor, the theme, and the request builder. It is mutated
//! only by the event handler; the store inside it only by the reducer.
//!
//! # Layout
//!
//! The screen is a fixed-height form on top and the post list below it. The
//! list shows as many cards as fit, in a window centered on the cursor.
//!
//! ```text
//! row 2       header
//! row 3       border
//! rows 4-10   form title, five fields, attachment line
//! row 11      border
//! rows 12-    post cards (CARD_ROWS each)
//! rows-1      border
//! rows        footer
//! ```

use super::form::FormState;
use super::Action;
use super::modes::{Focus, FormField};
use crate::domain::image::describe_data_url;
use crate::domain::Post;
use crate::store::PostStore;
use crate::transport::{ApiCall, ApiRequest, PostsApi, RequestTicket};
use crate::ui::helpers::{take_width, take_width_end, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AlertInfo, EmptyState, FieldView, FooterInfo, FormView, HeaderInfo, PostCard, UIViewModel,
};
use chrono::{DateTime, Utc};

/// Rows used by everything above the post list (including the blank top row).
pub const LIST_TOP_ROW: usize = 12;

/// Rows at the bottom used by the footer and its border.
const FOOTER_ROWS: usize = 2;

/// Rows per card, including the blank separator.
pub const CARD_ROWS: usize = 5;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client-side copy of the backend's posts.
    pub store: PostStore,

    /// The create/edit form.
    pub form: FormState,

    /// Where keyboard input goes.
    pub focus: Focus,

    /// Index of the card under the cursor, within the store's posts.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Request builder for the configured backend.
    pub api: PostsApi,

    /// Id given to the next outgoing request.
    next_request_id: u64,
}

impl AppState {
    /// Creates state with an empty, not-yet-fetched store.
    #[must_use]
    pub fn new(theme: Theme, api: PostsApi) -> Self {
        Self {
            store: PostStore::new(),
            form: FormState::new(),
            focus: Focus::default(),
            selected_index: 0,
            theme,
            api,
            next_request_id: 1,
        }
    }

    /// Wraps `request` in a ticketed [`Action::SendRequest`].
    pub fn send(&mut self, request: ApiRequest) -> Action {
        let ticket = self.next_ticket(request.call.clone());
        tracing::debug!(
            request_id = ticket.request_id,
            op = ticket.call.name(),
            method = %request.method,
            url = %request.url,
            "queueing request"
        );
        Action::SendRequest { ticket, request }
    }

    /// A full-list refetch.
    pub fn refetch(&mut self) -> Action {
        let request = self.api.list_posts();
        self.send(request)
    }

    fn next_ticket(&mut self, call: ApiCall) -> RequestTicket {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        RequestTicket { request_id, call }
    }

    /// The post under the list cursor, if any.
    #[must_use]
    pub fn selected_post(&self) -> Option<&Post> {
        self.store.posts().get(self.selected_index)
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 { len - 1 } else { self.selected_index - 1 };
    }

    /// Keeps the cursor inside the collection after it shrinks.
    pub fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.store.len().saturating_sub(1));
    }

    /// Computes the view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, Utc::now())
    }

    /// [`Self::compute_viewmodel`] with relative times measured from `now`.
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols, posts = self.store.len()).entered();

        let (cards, empty_state) = if self.store.is_empty() {
            (vec![], Some(Self::loading_state()))
        } else {
            let capacity = Self::visible_cards(rows);
            let (start, end) = self.visible_window(capacity);
            let cards = self.store.posts()[start..end]
                .iter()
                .enumerate()
                .map(|(offset, post)| self.compute_card(post, start + offset, cols, now))
                .collect();
            (cards, None)
        };

        UIViewModel {
            header: HeaderInfo {
                title: format!(" Memories ({}) ", self.store.len()),
            },
            form: self.compute_form_view(cols),
            cards,
            empty_state,
            alert: self.form.alert.as_ref().map(|message| AlertInfo {
                message: message.clone(),
            }),
            footer: self.compute_footer(),
        }
    }

    /// How many cards fit below the form.
    #[must_use]
    pub const fn visible_cards(rows: usize) -> usize {
        rows.saturating_sub(LIST_TOP_ROW - 1 + FOOTER_ROWS) / CARD_ROWS
    }

    /// Start and end of the card window, centered on the cursor.
    fn visible_window(&self, capacity: usize) -> (usize, usize) {
        let len = self.store.len();
        let mut start = self.selected_index.saturating_sub(capacity / 2);
        let end = (start + capacity).min(len);
        if end - start < capacity && len >= capacity {
            start = end.saturating_sub(capacity);
        }
        (start, end)
    }

    /// Loading placeholder, shown for any empty collection.
    ///
    /// An empty collection after a fetch looks the same as one still loading.
    fn loading_state() -> EmptyState {
        EmptyState {
            message: "Loading memories...".to_string(),
            subtitle: "Ctrl+r to refresh".to_string(),
        }
    }

    fn compute_card(&self, post: &Post, index: usize, cols: usize, now: DateTime<Utc>) -> PostCard {
        let width = cols.saturating_sub(4);
        let mut message = post.message.lines().next().unwrap_or_default().to_string();
        if post.message.lines().nth(1).is_some() {
            message.push_str(" …");
        }

        PostCard {
            title: truncate(&post.title, width.saturating_sub(10)),
            byline: truncate(&format!("By {} • {}", post.creator, post.time_ago_at(now)), width),
            message: truncate(&message, width),
            tags: post.tag_badges(),
            likes: post.like_count,
            image: post
                .selected_file
                .as_deref()
                .and_then(describe_data_url)
                .unwrap_or_else(|| "no image".to_string()),
            is_selected: self.focus.is_list() && index == self.selected_index,
            is_editing: self.form.selected_id() == Some(post.id.as_str()),
        }
    }

    fn compute_form_view(&self, cols: usize) -> FormView {
        const LABEL_WIDTH: usize = 12;
        let value_width = cols.saturating_sub(LABEL_WIDTH + 2);

        let fields = FormField::ALL
            .iter()
            .map(|&field| {
                let text = self.form.field_text(field).replace('\n', "↵");
                let is_focused = self.focus == Focus::Field(field);
                // The focused field shows its end, where typing happens.
                let value = if is_focused { truncate_start(&text, value_width) } else { truncate(&text, value_width) };
                FieldView {
                    label: field.label(),
                    value,
                    is_focused,
                }
            })
            .collect();

        let attachment = self.form.buffer.selected_file.as_deref().map_or_else(
            || "No image attached".to_string(),
            |file| format!("Attached: {}", describe_data_url(file).unwrap_or_else(|| "image".to_string())),
        );

        FormView {
            title: self.form.header(&self.store),
            fields,
            attachment,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.form.alert.is_some() {
            "Enter/Esc: dismiss"
        } else {
            match self.focus {
                Focus::List => "j/k: navigate  e: edit  l: like  d: delete  r: refresh  Tab: form  q: quit",
                Focus::Field(FormField::Message) => {
                    "Tab/S-Tab: field  Enter: newline  Ctrl+s: submit  Ctrl+x: clear  Ctrl+r: refresh"
                }
                Focus::Field(FormField::Image) => {
                    "Tab/S-Tab: field  Enter: load image  Ctrl+s: submit  Ctrl+x: clear  Ctrl+r: refresh"
                }
                Focus::Field(_) => "Tab/S-Tab: field  Ctrl+s: submit  Ctrl+x/Esc: clear  Ctrl+r: refresh",
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Cuts `text` to `width` terminal columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    format!("{}…", take_width(text, width.saturating_sub(1)))
}

/// Like [`truncate`], but keeps the end of `text`.
fn truncate_start(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    format!("…{}", take_width_end(text, width.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PostEvent;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn post(id: &str, tags: &[&str]) -> Post {
        Post {
            id: id.to_string(),
            creator: "Ann".into(),
            title: format!("Post {id}"),
            message: "first line\nsecond line".into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            selected_file: None,
            like_count: 2,
            created_at: now() - Duration::minutes(5),
        }
    }

    fn state_with(count: usize) -> AppState {
        let mut state = AppState::new(Theme::default(), PostsApi::default());
        let posts = (0..count).map(|i| post(&i.to_string(), &[])).collect();
        state.store.dispatch(&PostEvent::Fetched { posts });
        state
    }

    #[test]
    fn empty_store_shows_the_loading_placeholder() {
        let state = AppState::new(Theme::default(), PostsApi::default());
        let vm = state.compute_viewmodel_at(40, 80, now());
        assert!(vm.cards.is_empty());
        assert!(vm.empty_state.is_some());

        // Fetched but empty looks the same.
        let state = state_with(0);
        assert!(state.compute_viewmodel_at(40, 80, now()).empty_state.is_some());
    }

    #[test]
    fn cards_carry_byline_badges_and_likes() {
        let mut state = state_with(0);
        state.store.dispatch(&PostEvent::Created {
            post: post("x", &["a", " b", "c "]),
        });

        let vm = state.compute_viewmodel_at(40, 80, now());
        let card = &vm.cards[0];
        assert_eq!(card.byline, "By Ann • 5 minutes ago");
        assert_eq!(card.tags, vec!["#a", "#b", "#c"]);
        assert_eq!(card.likes, 2);
        assert_eq!(card.message, "first line …");
        assert_eq!(card.image, "no image");
    }

    #[test]
    fn window_follows_the_cursor() {
        let mut state = state_with(20);
        state.focus = Focus::List;
        let rows = LIST_TOP_ROW - 1 + FOOTER_ROWS + 3 * CARD_ROWS;
        assert_eq!(AppState::visible_cards(rows), 3);

        state.selected_index = 19;
        let vm = state.compute_viewmodel_at(rows, 80, now());
        assert_eq!(vm.cards.len(), 3);
        assert_eq!(vm.cards[0].title, "Post 17");
        assert!(vm.cards[2].is_selected);
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = state_with(3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 2;
        state.store.dispatch(&PostEvent::Deleted { id: "2".into() });
        state.clamp_selection();
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn tickets_are_numbered_in_order() {
        let mut state = state_with(0);
        let first = state.refetch();
        let second = state.refetch();
        match (first, second) {
            (Action::SendRequest { ticket: a, .. }, Action::SendRequest { ticket: b, .. }) => {
                assert_eq!(b.request_id, a.request_id + 1);
            }
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn focused_field_shows_its_tail() {
        let mut state = state_with(0);
        state.focus = Focus::Field(FormField::Title);
        state.form.buffer.title = "x".repeat(200);
        let vm = state.compute_viewmodel_at(40, 40, now());
        let title = &vm.form.fields[1];
        assert!(title.is_focused);
        assert!(title.value.starts_with('…'));
        assert_eq!(title.value.chars().count(), 40 - 14);
    }

    #[test]
    fn wide_text_is_cut_by_columns() {
        assert_eq!(truncate("日本語の写真", 7), "日本語…");
        assert_eq!(truncate("日本語", 6), "日本語");
        assert_eq!(truncate_start("写真/日本.png", 8), "…本.png");
        assert_eq!(text_width(&truncate("日本語の写真", 8)), 7);
    }

    #[test]
    fn alert_replaces_the_footer_hints() {
        let mut state = state_with(0);
        state.form.raise_alert("Max file size 50KB");
        let vm = state.compute_viewmodel_at(40, 80, now());
        assert_eq!(vm.alert.map(|a| a.message).as_deref(), Some("Max file size 50KB"));
        assert_eq!(vm.footer.keybindings, "Enter/Esc: dismiss");
    }
}
