//! Collapsible tree: shared by the category sidebar and the industry pages.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible list.
//! - `→`/`l` expands the focused node; `←`/`h` collapses it.
//! - `Enter` toggles a parent node, or activates a leaf: [`TreeState::handle`]
//!   then returns the leaf's payload to the caller.

use crate::event::{AppEvent, Direction};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// Tree node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Stable identifier (used for mutations).
    pub id: String,
    /// Human-readable display label.
    pub label: String,
    /// Dimmed text rendered after the label.
    pub hint: Option<String>,
    pub style: Style,
    pub expanded: bool,
    /// Value handed back when the node is activated.
    pub payload: Option<T>,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            hint: None,
            style: Style::default(),
            expanded: true,
            payload: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode<T>>) -> Self {
        self.children = children;
        self
    }

    pub fn with_payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.expanded = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Tree state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TreeState<T> {
    pub nodes: Vec<TreeNode<T>>,
    /// Index into the currently-visible (flattened) list.
    pub cursor: usize,
}

impl<T> Default for TreeState<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            cursor: 0,
        }
    }
}

impl<T: Clone> TreeState<T> {
    pub fn new(nodes: Vec<TreeNode<T>>) -> Self {
        Self { nodes, cursor: 0 }
    }

    /// Return the id of the node at the cursor, if any.
    fn cursor_id(&self) -> Option<String> {
        self.visible()
            .into_iter()
            .nth(self.cursor)
            .map(|(_, n)| n.id.clone())
    }

    /// Flatten the tree into `(depth, &node)` pairs, respecting expanded state.
    pub fn visible(&self) -> Vec<(usize, &TreeNode<T>)> {
        flatten(&self.nodes, 0)
    }

    /// Handle an [`AppEvent`], mutating state as appropriate. Returns the
    /// payload of a leaf activated with `Enter`.
    pub fn handle(&mut self, event: &AppEvent) -> Option<T> {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "tree: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "tree: cursor down");
            }
            AppEvent::Nav(Direction::Right) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: expand");
                    set_expanded(&mut self.nodes, &id, true);
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: collapse");
                    set_expanded(&mut self.nodes, &id, false);
                    self.clamp_cursor();
                }
            }
            AppEvent::Enter => {
                let id = self.cursor_id()?;
                let (is_leaf, payload) = find(&self.nodes, &id)
                    .map(|node| (node.children.is_empty(), node.payload.clone()))?;
                if is_leaf {
                    tracing::debug!(node = %id, "tree: activate leaf");
                    return payload;
                }
                tracing::debug!(node = %id, "tree: toggle expand");
                toggle_expanded(&mut self.nodes, &id);
                self.clamp_cursor();
            }
            _ => {}
        }
        None
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive tree helpers
// ---------------------------------------------------------------------------

fn flatten<T>(nodes: &[TreeNode<T>], depth: usize) -> Vec<(usize, &TreeNode<T>)> {
    let mut out = Vec::new();
    for node in nodes {
        out.push((depth, node));
        if node.expanded {
            out.extend(flatten(&node.children, depth + 1));
        }
    }
    out
}

fn find<'n, T>(nodes: &'n [TreeNode<T>], id: &str) -> Option<&'n TreeNode<T>> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Set the `expanded` flag on the node with `id`. Returns `true` if found.
fn set_expanded<T>(nodes: &mut [TreeNode<T>], id: &str, expanded: bool) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = expanded;
            return true;
        }
        if set_expanded(&mut node.children, id, expanded) {
            return true;
        }
    }
    false
}

/// Flip the `expanded` flag on the node with `id`. Returns `true` if found.
fn toggle_expanded<T>(nodes: &mut [TreeNode<T>], id: &str) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = !node.expanded;
            return true;
        }
        if toggle_expanded(&mut node.children, id) {
            return true;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct TreeView<'a, T> {
    state: &'a TreeState<T>,
    title: &'a str,
    focused: bool,
    theme: &'a crate::theme::Theme,
}

impl<'a, T> TreeView<'a, T> {
    pub fn new(
        state: &'a TreeState<T>,
        title: &'a str,
        focused: bool,
        theme: &'a crate::theme::Theme,
    ) -> Self {
        Self {
            state,
            title,
            focused,
            theme,
        }
    }
}

impl<T: Clone> Widget for TreeView<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title)
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .visible()
            .iter()
            .map(|(depth, node)| {
                let indent = "  ".repeat(*depth);
                let expand = if node.children.is_empty() {
                    "  "
                } else if node.expanded {
                    "▼ "
                } else {
                    "▶ "
                };
                let mut spans = vec![
                    Span::raw(format!("{indent}{expand}")),
                    Span::styled(node.label.clone(), node.style),
                ];
                if let Some(hint) = &node.hint {
                    spans.push(Span::styled(
                        format!("  {hint}"),
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).highlight_style(if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
