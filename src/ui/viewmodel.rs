//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings only; no store or form logic
//! happens past this point.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Top title bar.
    pub header: HeaderInfo,

    /// The create/edit form.
    pub form: FormView,

    /// Cards in the visible window of the post list, in store order.
    pub cards: Vec<PostCard>,

    /// Replaces the card list while the collection is empty.
    pub empty_state: Option<EmptyState>,

    /// Blocking alert drawn over everything else.
    pub alert: Option<AlertInfo>,

    /// Keybinding hints for the current focus.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// The form as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// `Editing "<title>"` or `Create Memory Photo`.
    pub title: String,

    /// One entry per field, top to bottom.
    pub fields: Vec<FieldView>,

    /// Description of the attached image, or a note that there is none.
    pub attachment: String,
}

/// A single labelled form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,

    /// Field text on one line; message newlines are shown as `↵`.
    pub value: String,

    pub is_focused: bool,
}

/// A post rendered as a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub title: String,

    /// `By <creator> • <relative time>`
    pub byline: String,

    /// First line of the message.
    pub message: String,

    /// Tag badges, `#tag` each.
    pub tags: Vec<String>,

    pub likes: u64,

    /// Image description or placeholder.
    pub image: String,

    /// Under the list cursor.
    pub is_selected: bool,

    /// The post currently loaded in the form.
    pub is_editing: bool,
}

/// Message shown instead of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Blocking alert contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInfo {
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
