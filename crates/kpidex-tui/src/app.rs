//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! The first tab is always the search tab (search bar plus results). Industry
//! pages open as further tabs, labelled with their slug.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        detail::DetailPopup,
        help::HelpPopup,
        industry_page::{self, IndustryPageState},
        results::{ResultsState, ResultsView},
        search_bar::{SearchBar, SearchBarState, SuggestionList},
        sidebar::{self, SidebarState},
        tab_bar::TabBar,
        tree::TreeView,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kpidex_core::{config::Config, Dataset, ViewState};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    /// The main pane of the active tab: results or the industry outline.
    Body,
    Sidebar,
    /// Vim-style `:` command line is active.
    Command,
}

pub enum TabKind<'d> {
    Search,
    Industry {
        slug: String,
        name: &'d str,
        page: IndustryPageState<'d>,
    },
}

pub struct TabState<'d> {
    pub label: String,
    pub kind: TabKind<'d>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState<'d> {
    pub view: ViewState<'d>,
    pub tabs: Vec<TabState<'d>>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub search_bar: SearchBarState,
    pub sidebar: SidebarState,
    pub results: ResultsState,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl<'d> AppState<'d> {
    pub fn new(dataset: &'d Dataset, config: Config) -> Self {
        let theme = Theme::by_name(&config.ui.theme);
        let mut view = ViewState::new(dataset);
        if config.ui.sidebar_open {
            view.toggle_sidebar();
        }
        let sidebar = sidebar::build(dataset, &theme);

        Self {
            view,
            tabs: vec![TabState {
                label: "search".to_string(),
                kind: TabKind::Search,
            }],
            active_tab: 0,
            focus: Focus::Search,
            prev_focus: Focus::Search,
            theme,
            config,
            search_bar: SearchBarState::default(),
            sidebar,
            results: ResultsState::default(),
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    /// Open (or switch to) the page of the industry with `slug`.
    pub fn open_industry(&mut self, slug: &str) -> Result<(), String> {
        self.view.close();
        if let Some(i) = self.tabs.iter().position(|t| {
            matches!(&t.kind, TabKind::Industry { slug: s, .. } if s == slug)
        }) {
            tracing::debug!(slug, tab = i, "switching to open industry tab");
            self.active_tab = i;
            self.focus = Focus::Body;
            return Ok(());
        }

        let Some(industry) = self.view.dataset().industry_by_slug(slug) else {
            tracing::debug!(slug, "no industry for slug");
            return Err(format!("no industry page at /{slug}"));
        };
        tracing::debug!(slug, industry = %industry.name, "opening industry tab");
        self.tabs.push(TabState {
            label: slug.to_string(),
            kind: TabKind::Industry {
                slug: slug.to_string(),
                name: &industry.name,
                page: industry_page::build(industry, &self.theme),
            },
        });
        self.active_tab = self.tabs.len() - 1;
        self.focus = Focus::Body;
        Ok(())
    }

    /// Submit `text` as the query and show its results on the search tab.
    pub fn run_search(&mut self, text: &str) {
        self.view.set_query(text);
        self.search_bar.sync(&self.view);
        if self.view.submit() {
            self.show_results();
        }
    }

    fn show_results(&mut self) {
        self.results.reset();
        self.active_tab = 0;
        self.focus = Focus::Body;
    }

    pub fn home(&mut self) {
        self.view.home();
        self.search_bar.sync(&self.view);
        self.results.reset();
        self.active_tab = 0;
        self.focus = Focus::Search;
    }

    pub fn toggle_sidebar(&mut self) {
        self.view.toggle_sidebar();
        if !self.view.sidebar_open && self.focus == Focus::Sidebar {
            self.focus = Focus::Body;
        }
    }

    /// Close the active industry tab, or quit from the search tab.
    pub fn close_tab(&mut self) {
        if self.active_tab == 0 {
            tracing::debug!("quit");
            self.quit = true;
        } else {
            tracing::debug!(tab = self.active_tab, "closing tab");
            self.tabs.remove(self.active_tab);
            self.active_tab = self.active_tab.saturating_sub(1);
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        // The detail popup is modal too.
        if let Some(item) = self.view.selected {
            match event {
                AppEvent::Escape | AppEvent::Quit => self.view.close(),
                AppEvent::OpenIndustry => {
                    let slug = item.industry_slug();
                    if let Err(msg) = self.open_industry(&slug) {
                        tracing::warn!(%slug, %msg, "industry page missing for item");
                    }
                }
                _ => {}
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command(event);
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            // Enter command mode with `:` (not from the search bar)
            AppEvent::Char(':') if self.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => self.close_tab(),

            AppEvent::Escape => {
                if self.focus == Focus::Search {
                    tracing::debug!("focus: Search -> Body");
                    self.search_bar.highlighted = None;
                    self.focus = Focus::Body;
                }
            }

            // Search → Body → Sidebar (when open) → Search
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Search => Focus::Body,
                    Focus::Body if self.view.sidebar_open => Focus::Sidebar,
                    Focus::Body | Focus::Sidebar | Focus::Command => Focus::Search,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::SearchFocus => {
                tracing::debug!("focus -> Search");
                self.focus = Focus::Search;
            }

            AppEvent::ToggleSidebar => self.toggle_sidebar(),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    fn handle_command(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.clone();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        if let Err(msg) = execute_command(self, cmd) {
                            // Reopen the bar to show the failure
                            self.command_bar.error = Some(msg);
                            self.prev_focus = self.focus;
                            self.focus = Focus::Command;
                        }
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            other => self.command_bar.handle(&other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Search => {
                let max = self.config.ui.max_suggestions;
                if self.search_bar.handle(&event, &mut self.view, max) {
                    self.show_results();
                }
            }
            Focus::Body => match &mut self.tabs[self.active_tab].kind {
                TabKind::Search => self.results.handle(&event, &mut self.view),
                TabKind::Industry { page, .. } => {
                    if let Some(item) = page.handle(&event) {
                        self.view.select(item);
                    }
                }
            },
            Focus::Sidebar => {
                if let Some(slug) = self.sidebar.handle(&event) {
                    if let Err(msg) = self.open_industry(&slug) {
                        tracing::warn!(%slug, %msg, "sidebar pointed at a missing industry");
                    }
                }
            }
            Focus::Command => {} // handled before dispatch
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<'d> {
    state: AppState<'d>,
}

impl<'d> App<'d> {
    pub fn new(dataset: &'d Dataset, config: Config) -> Self {
        App {
            state: AppState::new(dataset, config),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == ct_event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Text widgets take every printable character
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState<'_>) {
    let area = frame.area();

    // Vertical: 1-line tab bar | 3-line search bar | body
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(area);

    let body = if state.view.sidebar_open {
        let pct = state.config.ui.sidebar_width_pct.min(80);
        let horiz = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
            .split(vert[2]);
        frame.render_widget(
            TreeView::new(&state.sidebar, "Categories", state.focus == Focus::Sidebar, &state.theme),
            horiz[0],
        );
        horiz[1]
    } else {
        vert[2]
    };

    frame.render_widget(TabBar::new(&state.tabs, state.active_tab, &state.theme), vert[0]);
    frame.render_widget(
        SearchBar::new(&state.view, &state.search_bar, state.focus == Focus::Search, &state.theme),
        vert[1],
    );

    let body_focused = state.focus == Focus::Body;
    match &state.tabs[state.active_tab].kind {
        TabKind::Search => frame.render_widget(
            ResultsView::new(&state.view, &state.results, body_focused, &state.theme),
            body,
        ),
        TabKind::Industry { name, page, .. } => frame.render_widget(
            TreeView::new(page, name, body_focused, &state.theme),
            body,
        ),
    }

    if state.focus == Focus::Search && !state.view.suggestions.is_empty() {
        let shown = state.view.suggestions.len().min(state.config.ui.max_suggestions);
        let list = SuggestionList::new(
            &state.view.suggestions[..shown],
            state.search_bar.highlighted,
            &state.theme,
        );
        let list_area = list.area(vert[1], area);
        frame.render_widget(list, list_area);
    }

    if let Some(item) = &state.view.selected {
        frame.render_widget(DetailPopup::new(item, &state.theme), area);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Search && state.view.selected.is_none() {
        let bar = SearchBar::new(&state.view, &state.search_bar, true, &state.theme);
        frame.set_cursor_position(bar.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
