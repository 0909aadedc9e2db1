//! Form component renderer.
//!
//! ```text
//!  Create Memory Photo
//!    Creator   Ann
//!  ▸ Title     Beach day▏
//!    Message   Sun↵Sea
//!    Tags      summer,sea
//!    Image     ~/pics/beach.png
//!              Attached: image/png, 12.0 KB
//! ```

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FieldView, FormView};

const LABEL_WIDTH: usize = 10;

/// Renders the form starting at `row` and returns the next free row.
pub fn render_form(row: usize, form: &FormView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!(" ");
    print_padded(&form.title, cols.saturating_sub(1));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for field in &form.fields {
        render_field(current_row, field, theme, cols);
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(LABEL_WIDTH + 4));
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_padded(&form.attachment, cols.saturating_sub(LABEL_WIDTH + 4));
    print!("{}", Theme::reset());

    current_row + 1
}

fn render_field(row: usize, field: &FieldView, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    let (marker, label_color) = if field.is_focused {
        (" ▸ ", &theme.colors.focus_fg)
    } else {
        ("   ", &theme.colors.label_fg)
    };

    print!("{}", Theme::fg(label_color));
    if field.is_focused {
        print!("{}", Theme::bold());
    }
    print!("{marker}");
    print_padded(field.label, LABEL_WIDTH);
    print!("{} ", Theme::reset());

    print!("{}", Theme::fg(&theme.colors.text_normal));
    let cursor = if field.is_focused { "▏" } else { "" };
    print_padded(&format!("{}{cursor}", field.value), cols.saturating_sub(LABEL_WIDTH + 4));
    print!("{}", Theme::reset());
}
