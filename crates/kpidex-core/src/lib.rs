//! kpidex-core: dataset model and search engines for kpidex.
//!
//! This crate holds everything that does not depend on a particular front
//! end: the KPI knowledge-base types, dataset loading, the three search
//! traversals, slug derivation and the explicit view state.
//!
//! # Architecture
//!
//! ```text
//! Dataset ──► search::{suggest, search, aggregate_by_domain} ──► ViewState ──► TUI
//!    │                                                             │
//!    └──────────────────────────────► HTTP routes ◄────────────────┘ (shared engines)
//! ```
//!
//! The dataset is loaded once and never mutated; every engine output borrows
//! from it.

pub mod config;
pub mod dataset;
pub mod search;
pub mod slug;
pub mod types;
pub mod view;

pub use dataset::{Dataset, DatasetError};
pub use search::{aggregate_by_domain, search, suggest, DomainGroup, IndustryResult, MatchedKpi};
pub use slug::slugify;
pub use types::{Classification, Department, Domain, Industry, Kpi, Subdepartment, UseCase};
pub use view::{displayables, Displayable, KpiView, UseCaseView, ViewState, NOT_AVAILABLE};
