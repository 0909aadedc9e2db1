//! Composable UI component renderers.
//!
//! - [`header`]: title bar
//! - [`form`]: the create/edit form
//! - [`cards`]: post cards
//! - [`empty`]: loading placeholder shown instead of the cards
//! - [`alert`]: blocking alert box
//! - [`footer`]: keybinding hints
//!
//! [`render_layout`] stacks them top to bottom:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Form]
//! [Border]
//! [Cards, or the loading placeholder]
//! [Border]
//! [Footer]
//! ```
//!
//! and the alert, if any, is drawn over the result.

mod alert;
mod cards;
mod empty;
mod footer;
mod form;
mod header;

use crate::ui::helpers::{clear_line, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use alert::render_alert;
use cards::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::render_header;

/// Renders a horizontal border at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout for `vm` into a `rows` x `cols` pane.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_form(current_row, &vm.form, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.saturating_sub(1).max(current_row + 1);
    let border_row = footer_row.saturating_sub(1);

    current_row = match &vm.empty_state {
        Some(empty) => render_empty_state(current_row, empty, theme, cols),
        None => render_cards(current_row, &vm.cards, theme, cols),
    };
    while current_row < border_row {
        clear_line(current_row, cols);
        current_row += 1;
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(alert) = &vm.alert {
        render_alert(alert, theme, rows, cols);
    }
}
