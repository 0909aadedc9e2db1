//! Loading placeholder renderer.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the placeholder that stands in for the card list.
///
/// ```text
/// [blank]
///            Loading memories...
///             Ctrl+r to refresh
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    print_centered(row + 1, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row + 2, &empty.subtitle, &subtitle_style, cols);
    row + 3
}
