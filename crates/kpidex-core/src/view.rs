//! Presentation-facing model: the detail item shown in the modal and the
//! explicit interaction state of the header and results views.
//!
//! [`ViewState`] owns every piece of transient UI state (sidebar visibility,
//! query text, suggestions, results, which industry is expanded, which item
//! is open). It changes only through the transition methods below, and calls
//! into [`crate::search`] for the data it shows. Front ends (TUI, anything
//! else) render from it and never keep their own copies.

use crate::dataset::Dataset;
use crate::search::{self, IndustryResult};
use crate::slug::slugify;
use crate::types::{Kpi, UseCase};

/// Placeholder for a missing descriptive field.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Displayable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiView<'a> {
    pub kpi: &'a Kpi,
    pub subdepartment: &'a str,
    pub industry: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UseCaseView<'a> {
    pub usecase: &'a UseCase,
    pub industry: &'a str,
}

/// An item that can be opened in the detail popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Displayable<'a> {
    Kpi(KpiView<'a>),
    UseCase(UseCaseView<'a>),
}

impl<'a> Displayable<'a> {
    pub fn title(&self) -> &'a str {
        match self {
            Displayable::Kpi(v) => &v.kpi.name,
            Displayable::UseCase(v) => v.usecase.name().unwrap_or(NOT_AVAILABLE),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Displayable::Kpi(_) => "KPI",
            Displayable::UseCase(_) => "Use Case",
        }
    }

    /// Labelled detail rows, with [`NOT_AVAILABLE`] for missing values.
    pub fn fields(&self) -> Vec<(&'static str, &'a str)> {
        let or_na = |v: &'a Option<String>| v.as_deref().unwrap_or(NOT_AVAILABLE);
        match self {
            Displayable::Kpi(v) => vec![
                ("Subdepartment", v.subdepartment),
                ("Formula", or_na(&v.kpi.formula)),
                ("Explanation", or_na(&v.kpi.explanation)),
            ],
            Displayable::UseCase(v) => vec![
                ("Definition", or_na(&v.usecase.definitions)),
                ("Description", or_na(&v.usecase.description)),
                ("Business Impact", or_na(&v.usecase.business_impact)),
            ],
        }
    }

    /// Name of the industry the item belongs to.
    pub fn industry(&self) -> &'a str {
        match self {
            Displayable::Kpi(v) => v.industry,
            Displayable::UseCase(v) => v.industry,
        }
    }

    /// Page identifier of the owning industry.
    pub fn industry_slug(&self) -> String {
        slugify(self.industry())
    }
}

/// Items of one result group in display order: use cases, then KPIs.
pub fn displayables<'a>(result: &IndustryResult<'a>) -> Vec<Displayable<'a>> {
    let usecases = result.matched_usecases.iter().map(|usecase| {
        Displayable::UseCase(UseCaseView {
            usecase,
            industry: result.industry,
        })
    });
    let kpis = result.matched_kpis.iter().map(|m| {
        Displayable::Kpi(KpiView {
            kpi: m.kpi,
            subdepartment: m.subdepartment,
            industry: result.industry,
        })
    });
    usecases.chain(kpis).collect()
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Interaction state of the header and the results view.
#[derive(Debug, Clone)]
pub struct ViewState<'d> {
    dataset: &'d Dataset,
    pub sidebar_open: bool,
    /// Text currently in the search box.
    pub query: String,
    /// Autocomplete labels for `query`.
    pub suggestions: Vec<&'d str>,
    /// The query `results` were computed for; `None` before the first submit.
    pub submitted: Option<String>,
    pub results: Vec<IndustryResult<'d>>,
    /// Index into `results` of the expanded industry.
    pub expanded: Option<usize>,
    /// Item shown in the detail modal.
    pub selected: Option<Displayable<'d>>,
}

impl<'d> ViewState<'d> {
    pub fn new(dataset: &'d Dataset) -> Self {
        Self {
            dataset,
            sidebar_open: false,
            query: String::new(),
            suggestions: Vec::new(),
            submitted: None,
            results: Vec::new(),
            expanded: None,
            selected: None,
        }
    }

    pub fn dataset(&self) -> &'d Dataset {
        self.dataset
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        tracing::debug!(open = self.sidebar_open, "view: sidebar toggled");
    }

    /// Replace the query text and refresh suggestions.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.suggestions = if self.query.trim().is_empty() {
            Vec::new()
        } else {
            search::suggest(&self.query, self.dataset)
        };
        tracing::debug!(
            query = %self.query,
            suggestions = self.suggestions.len(),
            "view: query changed"
        );
    }

    /// Run the full search for the current query. Returns `false` (and
    /// changes nothing) when the query is blank.
    pub fn submit(&mut self) -> bool {
        if self.query.trim().is_empty() {
            return false;
        }
        self.results = search::search(&self.query, self.dataset);
        self.submitted = Some(self.query.clone());
        self.suggestions.clear();
        self.expanded = None;
        self.selected = None;
        tracing::debug!(
            query = %self.query,
            industries = self.results.len(),
            "view: query submitted"
        );
        true
    }

    /// Adopt a suggestion as the query and submit it.
    pub fn submit_suggestion(&mut self, label: &str) -> bool {
        self.query = label.to_string();
        self.submit()
    }

    /// Expand the industry at `index`, or collapse it if it is already the
    /// expanded one. Out-of-range indexes are ignored.
    pub fn expand(&mut self, index: usize) {
        if index >= self.results.len() {
            return;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        tracing::debug!(expanded = ?self.expanded, "view: expansion changed");
    }

    /// Open the detail modal on `item`.
    pub fn select(&mut self, item: Displayable<'d>) {
        tracing::debug!(title = item.title(), kind = item.kind_label(), "view: item selected");
        self.selected = Some(item);
    }

    /// Close the detail modal.
    pub fn close(&mut self) {
        if self.selected.take().is_some() {
            tracing::debug!("view: modal closed");
        }
    }

    /// Back to the landing state: no query, no results. Sidebar visibility
    /// is kept.
    pub fn home(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.submitted = None;
        self.results.clear();
        self.expanded = None;
        self.selected = None;
        tracing::debug!("view: home");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
