//! Focus and form-mode state types.
//!
//! Focus decides where keys go: one of the form fields, or the post list.
//! Focus cycles through the fields in order and then on to the list:
//!
//! ```text
//! Creator → Title → Message → Tags → Image → List → Creator …
//! ```
//!
//! [`FormMode`] is the form's own state machine: it either creates a new post
//! or edits the post whose id it carries.

/// Editable fields of the form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Creator,
    Title,
    /// Multi-line; Enter inserts a newline.
    Message,
    /// Comma-separated text, split into tags on every keystroke.
    Tags,
    /// Path of an image file to attach; Enter loads it.
    Image,
}

impl FormField {
    /// Every field, top to bottom.
    pub const ALL: [Self; 5] = [Self::Creator, Self::Title, Self::Message, Self::Tags, Self::Image];

    /// Label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Creator => "Creator",
            Self::Title => "Title",
            Self::Message => "Message",
            Self::Tags => "Tags",
            Self::Image => "Image",
        }
    }
}

/// Where keyboard input currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing into a form field.
    Field(FormField),

    /// Navigating the post cards; j/k move, e/l/d act on the selected card.
    List,
}

impl Default for Focus {
    fn default() -> Self {
        Self::Field(FormField::Creator)
    }
}

impl Focus {
    /// The next stop in the focus cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Field(FormField::Creator) => Self::Field(FormField::Title),
            Self::Field(FormField::Title) => Self::Field(FormField::Message),
            Self::Field(FormField::Message) => Self::Field(FormField::Tags),
            Self::Field(FormField::Tags) => Self::Field(FormField::Image),
            Self::Field(FormField::Image) => Self::List,
            Self::List => Self::Field(FormField::Creator),
        }
    }

    /// The previous stop in the focus cycle.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Field(FormField::Creator) => Self::List,
            Self::Field(FormField::Title) => Self::Field(FormField::Creator),
            Self::Field(FormField::Message) => Self::Field(FormField::Title),
            Self::Field(FormField::Tags) => Self::Field(FormField::Message),
            Self::Field(FormField::Image) => Self::Field(FormField::Tags),
            Self::List => Self::Field(FormField::Image),
        }
    }

    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List)
    }
}

/// What submitting the form will do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    /// No post selected; submit creates a new post.
    #[default]
    Create,

    /// Editing an existing post; submit updates it.
    Edit {
        /// Id of the selected post.
        id: String,
    },
}

impl FormMode {
    /// The selected post id, if editing.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Edit { id } => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_every_field_and_the_list() {
        let mut focus = Focus::default();
        let mut seen = vec![focus];
        for _ in 0..5 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(seen.last(), Some(&Focus::List));
        assert_eq!(focus.next(), Focus::default());
        for window in seen.windows(2) {
            assert_eq!(window[1].prev(), window[0]);
        }
    }

    #[test]
    fn only_edit_mode_has_a_selection() {
        assert_eq!(FormMode::Create.selected_id(), None);
        assert_eq!(FormMode::Edit { id: "x".into() }.selected_id(), Some("x"));
    }
}
