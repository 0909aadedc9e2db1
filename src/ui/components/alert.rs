//! Blocking alert renderer.
//!
//! The alert is drawn last, as a box in the middle of the pane on top of
//! whatever else is there.

use crate::ui::helpers::{position_cursor, print_padded, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AlertInfo;

const HINT: &str = "Enter: OK";

/// Renders `alert` centered in a `rows` x `cols` pane.
pub fn render_alert(alert: &AlertInfo, theme: &Theme, rows: usize, cols: usize) {
    let inner = text_width(&alert.message).max(text_width(HINT)) + 4;
    let width = inner.min(cols);
    let left = cols.saturating_sub(width) / 2 + 1;
    let top = (rows / 2).saturating_sub(2).max(1);

    let style = format!(
        "{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.alert_fg),
        Theme::bg(&theme.colors.alert_bg)
    );

    let lines = ["", alert.message.as_str(), "", HINT, ""];
    for (offset, line) in lines.iter().enumerate() {
        let pad = width.saturating_sub(text_width(line)) / 2;
        position_cursor(top + offset, left);
        print!("{style}");
        print!("{}", " ".repeat(pad));
        print_padded(line, width.saturating_sub(pad));
        print!("{}", Theme::reset());
    }
}
