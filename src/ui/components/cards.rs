//! Post card renderer.
//!
//! Each card takes four lines plus a blank separator:
//!
//! ```text
//!  Beach day                                    ♥ 3
//!  By Ann • 2 hours ago
//!  Sun and sea …
//!  #summer #sea                     image/png, 12.0 KB
//! ```

use crate::app::state::CARD_ROWS;
use crate::ui::helpers::{clear_line, position_cursor, print_padded, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PostCard;

/// Renders `cards` from `row` down and returns the next free row.
pub fn render_cards(row: usize, cards: &[PostCard], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        render_card(current_row, card, theme, cols);
        clear_line(current_row + CARD_ROWS - 1, cols);
        current_row += CARD_ROWS;
    }
    current_row
}

fn render_card(row: usize, card: &PostCard, theme: &Theme, cols: usize) {
    let likes = format!("♥ {} ", card.likes);
    let marker = if card.is_editing { "✎ " } else { "" };
    let title_width = cols.saturating_sub(text_width(&likes) + text_width(marker) + 1);

    position_cursor(row, 1);
    if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{} ", Theme::bold());
    if card.is_editing {
        print!("{}{marker}", Theme::fg(&theme.colors.editing_fg));
        if card.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    }
    print_padded(&card.title, title_width);
    if !card.is_selected {
        print!("{}", Theme::fg(&theme.colors.like_fg));
    }
    print!("{likes}");
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}{} ", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_padded(&card.byline, cols.saturating_sub(1));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{} ", Theme::fg(&theme.colors.text_normal));
    print_padded(&card.message, cols.saturating_sub(1));
    print!("{}", Theme::reset());

    let tags = card.tags.join(" ");
    let image_width = text_width(&card.image) + 1;
    position_cursor(row + 3, 1);
    print!("{} ", Theme::fg(&theme.colors.tag_fg));
    print_padded(&tags, cols.saturating_sub(image_width + 1));
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_padded(&card.image, image_width);
    print!("{}", Theme::reset());
}
