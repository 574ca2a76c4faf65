//! Search bar widget: the header text input plus its autocomplete dropdown.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor, `Backspace` deletes before it. Every
//!   edit goes through [`ViewState::set_query`], which refreshes suggestions.
//! - `Nav(Left)` / `Nav(Right)` move the text cursor.
//! - `Nav(Down)` / `Nav(Up)` move the highlight through the dropdown.
//! - `Enter` submits the highlighted suggestion, or the typed text when
//!   nothing is highlighted.
//!
//! The query text itself lives in [`ViewState`]; this state only tracks the
//! cursor and the dropdown highlight.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use kpidex_core::ViewState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// Byte offset of the cursor within the query.
    pub cursor: usize,
    /// Highlighted row of the suggestion dropdown.
    pub highlighted: Option<usize>,
}

impl SearchBarState {
    /// Handle a key event while the search bar is focused. Returns `true`
    /// when a search was submitted.
    pub fn handle(&mut self, event: &AppEvent, view: &mut ViewState<'_>, max_suggestions: usize) -> bool {
        let query = &view.query;
        match event {
            AppEvent::Char(c) => {
                let mut next = query.clone();
                next.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.highlighted = None;
                view.set_query(next);
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = prev_boundary(query, self.cursor);
                    let mut next = query.clone();
                    next.remove(prev);
                    self.cursor = prev;
                    self.highlighted = None;
                    view.set_query(next);
                }
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = prev_boundary(query, self.cursor);
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < query.len() {
                    self.cursor = query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(query.len());
                }
            }
            AppEvent::Nav(Direction::Down) => {
                let shown = view.suggestions.len().min(max_suggestions);
                if shown > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) if i + 1 < shown => i + 1,
                        Some(i) => i,
                        None => 0,
                    });
                }
                tracing::debug!(highlighted = ?self.highlighted, "search: highlight down");
            }
            AppEvent::Nav(Direction::Up) => {
                self.highlighted = match self.highlighted {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                tracing::debug!(highlighted = ?self.highlighted, "search: highlight up");
            }
            AppEvent::Enter => {
                let chosen = self
                    .highlighted
                    .and_then(|i| view.suggestions.get(i).copied());
                let submitted = match chosen {
                    Some(label) => view.submit_suggestion(label),
                    None => view.submit(),
                };
                if submitted {
                    self.cursor = view.query.len();
                    self.highlighted = None;
                }
                return submitted;
            }
            _ => {}
        }
        false
    }

    /// Reset the cursor after the query was replaced from outside the bar.
    pub fn sync(&mut self, view: &ViewState<'_>) {
        self.cursor = view.query.len();
        self.highlighted = None;
    }
}

fn prev_boundary(s: &str, cursor: usize) -> usize {
    s[..cursor]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    query: &'a str,
    cursor: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(view: &'a ViewState<'_>, state: &SearchBarState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            query: &view.query,
            cursor: state.cursor,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.query[..self.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Search")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search KPIs and use cases",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.query)
        };
        Paragraph::new(line).render(inner, buf);
    }
}

/// Dropdown overlay listing the current suggestions below the search bar.
pub struct SuggestionList<'a> {
    suggestions: &'a [&'a str],
    highlighted: Option<usize>,
    theme: &'a Theme,
}

impl<'a> SuggestionList<'a> {
    /// `suggestions` should already be truncated to the display limit.
    pub fn new(suggestions: &'a [&'a str], highlighted: Option<usize>, theme: &'a Theme) -> Self {
        Self {
            suggestions,
            highlighted,
            theme,
        }
    }

    /// Area directly below `bar`, tall enough for every suggestion plus
    /// borders and clipped to `bounds`.
    pub fn area(&self, bar: Rect, bounds: Rect) -> Rect {
        let y = bar.bottom();
        let wanted = self.suggestions.len() as u16 + 2;
        let height = wanted.min(bounds.bottom().saturating_sub(y));
        Rect { x: bar.x, y, width: bar.width, height }
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.suggestions.is_empty() || area.height < 3 {
            return;
        }
        Clear.render(area, buf);
        let block = Block::bordered()
            .title("Suggestions")
            .border_style(self.theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .map(|s| ListItem::new(Line::from(Span::styled(*s, self.theme.suggestion))))
            .collect();
        let list = List::new(items).highlight_style(self.theme.suggestion_highlight);
        let mut list_state = ListState::default().with_selected(self.highlighted);
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use kpidex_core::Dataset;

    fn type_str(bar: &mut SearchBarState, view: &mut ViewState<'_>, s: &str) {
        for c in s.chars() {
            bar.handle(&AppEvent::Char(c), view, 8);
        }
    }

    #[test]
    fn typing_refreshes_suggestions() {
        let ds = Dataset::sample();
        let mut view = ViewState::new(&ds);
        let mut bar = SearchBarState::default();
        type_str(&mut bar, &mut view, "interest");
        assert_eq!(view.query, "interest");
        assert_eq!(bar.cursor, 8);
        assert_eq!(view.suggestions, vec!["Net Interest Margin"]);
    }

    #[test]
    fn backspace_to_empty_clears_suggestions() {
        let ds = Dataset::sample();
        let mut view = ViewState::new(&ds);
        let mut bar = SearchBarState::default();
        type_str(&mut bar, &mut view, "ra");
        assert!(!view.suggestions.is_empty());
        bar.handle(&AppEvent::Backspace, &mut view, 8);
        bar.handle(&AppEvent::Backspace, &mut view, 8);
        assert!(view.query.is_empty());
        assert!(view.suggestions.is_empty());
        // Backspace at start is a no-op
        bar.handle(&AppEvent::Backspace, &mut view, 8);
        assert_eq!(bar.cursor, 0);
    }

    #[test]
    fn insert_in_the_middle() {
        let ds = Dataset::sample();
        let mut view = ViewState::new(&ds);
        let mut bar = SearchBarState::default();
        type_str(&mut bar, &mut view, "mrgin");
        for _ in 0..4 {
            bar.handle(&AppEvent::Nav(Direction::Left), &mut view, 8);
        }
        bar.handle(&AppEvent::Char('a'), &mut view, 8);
        assert_eq!(view.query, "margin");
    }

    #[test]
    fn enter_without_highlight_submits_typed_text() {
        let ds = Dataset::sample();
        let mut view = ViewState::new(&ds);
        let mut bar = SearchBarState::default();
        type_str(&mut bar, &mut view, "rate");
        assert!(bar.handle(&AppEvent::Enter, &mut view, 8));
        assert_eq!(view.submitted.as_deref(), Some("rate"));
        assert!(view.suggestions.is_empty());
    }

    #[test]
    fn enter_with_highlight_submits_suggestion() {
        let ds = Dataset::sample();
        let mut view = ViewState::new(&ds);
        let mut bar = SearchBarState::default();
        type_str(&mut bar, &mut view, "interest");
        bar.handle(&AppEvent::Nav(Direction::Down), &mut view, 8);
        assert_eq!(bar.highlighted, Some(0));
        assert!(bar.handle(&AppEvent::Enter, &mut view, 8));
        assert_eq!(view.query, "Net Interest Margin");
        assert_eq!(bar.cursor, "Net Interest Margin".len());
    }

    #[test]
    fn whitespace_query_is_not_submitted() {
        let ds = Dataset::sample();
        let mut view = ViewState::new(&ds);
        let mut bar = SearchBarState::default();
        type_str(&mut bar, &mut view, "   ");
        assert!(!bar.handle(&AppEvent::Enter, &mut view, 8));
        assert!(view.submitted.is_none());
    }

    #[test]
    fn highlight_is_bounded_by_display_limit() {
        let ds = Dataset::sample();
        let mut view = ViewState::new(&ds);
        let mut bar = SearchBarState::default();
        type_str(&mut bar, &mut view, "e");
        assert!(view.suggestions.len() > 2);
        for _ in 0..10 {
            bar.handle(&AppEvent::Nav(Direction::Down), &mut view, 2);
        }
        assert_eq!(bar.highlighted, Some(1));
        bar.handle(&AppEvent::Nav(Direction::Up), &mut view, 2);
        bar.handle(&AppEvent::Nav(Direction::Up), &mut view, 2);
        assert_eq!(bar.highlighted, None);
    }
}
