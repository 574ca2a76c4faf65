//! Ratatui widgets for the kpidex TUI.

use ratatui::layout::Rect;

pub mod command_bar;
pub mod detail;
pub mod help;
pub mod industry_page;
pub mod results;
pub mod search_bar;
pub mod sidebar;
pub mod tab_bar;
pub mod tree;

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
