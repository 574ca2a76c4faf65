//! Results pane: the matches of the last submitted search, one collapsible
//! group per industry.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `→` / `l` | Expand the industry under the cursor |
//! | `←` / `h` | Collapse the expanded industry |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//! | `Enter` | Expand/collapse an industry, or open a KPI / use case |
//!
//! Only one industry is expanded at a time; expanding another collapses the
//! previous one. The rows are derived from [`ViewState`] on every call so the
//! pane never holds stale copies of the results.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use kpidex_core::{displayables, Displayable, ViewState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One line of the results pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Row<'d> {
    /// Group header for `view.results[index]`.
    Industry(usize),
    /// "Use Cases" / "KPIs" heading inside the expanded group.
    Section(&'static str),
    Item(Displayable<'d>),
}

/// Flatten the results into display rows, opening the expanded group.
pub fn rows<'d>(view: &ViewState<'d>) -> Vec<Row<'d>> {
    let mut out = Vec::new();
    for (index, result) in view.results.iter().enumerate() {
        out.push(Row::Industry(index));
        if view.expanded != Some(index) {
            continue;
        }
        let items = displayables(result);
        let (usecases, kpis): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|item| matches!(item, Displayable::UseCase(_)));
        if !usecases.is_empty() {
            out.push(Row::Section("Use Cases"));
            out.extend(usecases.into_iter().map(Row::Item));
        }
        if !kpis.is_empty() {
            out.push(Row::Section("KPIs"));
            out.extend(kpis.into_iter().map(Row::Item));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultsState {
    /// Index into [`rows`] of the highlighted row.
    pub cursor: usize,
    /// Cached from the last render so paging moves by one screenful.
    last_height: Cell<usize>,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self {
            cursor: 0,
            last_height: Cell::new(20),
        }
    }
}

impl ResultsState {
    fn page(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Call after a new search so the cursor starts at the top.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent, view: &mut ViewState<'_>) {
        let rows = rows(view);
        if rows.is_empty() {
            return;
        }
        let last = rows.len() - 1;
        self.cursor = self.cursor.min(last);

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(last);
            }
            AppEvent::PageUp => {
                self.cursor = self.cursor.saturating_sub(self.page());
            }
            AppEvent::PageDown => {
                self.cursor = (self.cursor + self.page()).min(last);
            }
            AppEvent::Nav(Direction::Right) => {
                if let Row::Industry(index) = rows[self.cursor] {
                    if view.expanded != Some(index) {
                        view.expand(index);
                        self.follow_industry(view, index);
                    }
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(index) = view.expanded {
                    view.expand(index);
                    self.follow_industry(view, index);
                }
            }
            AppEvent::Enter => match rows[self.cursor] {
                Row::Industry(index) => {
                    view.expand(index);
                    self.follow_industry(view, index);
                }
                Row::Item(item) => view.select(item),
                Row::Section(_) => {}
            },
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, expanded = ?view.expanded, "results: cursor moved");
    }

    /// Keep the cursor on the header of `index` after the rows above it
    /// changed shape.
    fn follow_industry(&mut self, view: &ViewState<'_>, index: usize) {
        if let Some(pos) = rows(view)
            .iter()
            .position(|row| *row == Row::Industry(index))
        {
            self.cursor = pos;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsView<'a, 'd> {
    view: &'a ViewState<'d>,
    state: &'a ResultsState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a, 'd> ResultsView<'a, 'd> {
    pub fn new(view: &'a ViewState<'d>, state: &'a ResultsState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            view,
            state,
            focused,
            theme,
        }
    }

    fn landing(&self) -> Vec<Line<'static>> {
        let stats = self.view.dataset().stats();
        vec![
            Line::from(Span::styled(
                "Search KPIs and use cases across industries.",
                self.theme.result_section,
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} domains, {} industries, {} KPIs, {} use cases",
                    stats.domains, stats.industries, stats.kpis, stats.usecases
                ),
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(
                "Press / to type a query, s to browse categories, ? for help.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ]
    }

    fn row_line(&self, row: &Row<'_>) -> Line<'static> {
        match row {
            Row::Industry(index) => {
                let result = &self.view.results[*index];
                let marker = if self.view.expanded == Some(*index) { "− " } else { "+ " };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(result.industry.to_string(), self.theme.result_industry),
                    Span::styled(
                        format!("  ({} matches)", result.match_count()),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ])
            }
            Row::Section(label) => Line::from(Span::styled(
                format!("    {label}"),
                self.theme.result_section,
            )),
            Row::Item(item) => {
                let style = match item {
                    Displayable::Kpi(_) => self.theme.result_kpi,
                    Displayable::UseCase(_) => self.theme.result_usecase,
                };
                let mut spans = vec![Span::styled(format!("      {}", item.title()), style)];
                if let Displayable::Kpi(kpi) = item {
                    spans.push(Span::styled(
                        format!("  {}", kpi.subdepartment),
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                }
                Line::from(spans)
            }
        }
    }
}

impl Widget for ResultsView<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Results")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(query) = self.view.submitted.as_deref() else {
            Paragraph::new(self.landing())
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        };

        if self.view.results.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!("No results found for \"{query}\"."),
                self.theme.result_empty,
            )))
            .render(inner, buf);
            return;
        }

        let header = Line::from(vec![
            Span::raw("Results for "),
            Span::styled(format!("\"{query}\""), self.theme.query),
            Span::raw(":"),
        ]);
        buf.set_line(inner.x, inner.y, &header, inner.width);

        let list_area = Rect {
            y: inner.y.saturating_add(2).min(inner.bottom()),
            height: inner.height.saturating_sub(2),
            ..inner
        };
        self.state.last_height.set(list_area.height as usize);

        let items: Vec<ListItem> = rows(self.view)
            .iter()
            .map(|row| ListItem::new(self.row_line(row)))
            .collect();
        let list = List::new(items).highlight_style(if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, list_area, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
