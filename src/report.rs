//! Plain-text and JSON renderings of the engine outputs, shared by the CLI
//! subcommands and the HTTP routes.

use kpidex_core::{aggregate_by_domain, slugify, Dataset, IndustryResult, NOT_AVAILABLE};
use serde::Serialize;
use std::fmt;

/// One industry entry of the category listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry<'a> {
    pub name: &'a str,
    pub slug: String,
}

/// A domain with its industries, ready for the sidebar-style listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub domain: &'a str,
    pub industries: Vec<CategoryEntry<'a>>,
}

/// Domain groups with the slug of every industry attached.
pub fn categories(dataset: &Dataset) -> Vec<CategoryGroup<'_>> {
    aggregate_by_domain(dataset)
        .into_iter()
        .map(|group| CategoryGroup {
            domain: group.domain,
            industries: group
                .industries
                .iter()
                .map(|industry| CategoryEntry {
                    name: &industry.name,
                    slug: slugify(&industry.name),
                })
                .collect(),
        })
        .collect()
}

/// Text listing of the category groups, one domain heading per group.
pub struct CategoryListing<'r, 'a>(pub &'r [CategoryGroup<'a>]);

impl fmt::Display for CategoryListing<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in self.0 {
            writeln!(f, "{}", group.domain)?;
            for entry in &group.industries {
                writeln!(f, "  {:<32} /{}", entry.name, entry.slug)?;
            }
        }
        Ok(())
    }
}

pub fn categories_text(groups: &[CategoryGroup<'_>]) -> String {
    CategoryListing(groups).to_string()
}

/// One label per line.
pub fn suggestions_text(labels: &[&str]) -> String {
    labels.iter().map(|l| format!("{l}\n")).collect()
}

/// The results view as text: a header, then each industry with its use
/// cases followed by its KPIs.
pub struct ResultsReport<'r, 'a> {
    pub query: &'r str,
    pub results: &'r [IndustryResult<'a>],
}

impl fmt::Display for ResultsReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            return writeln!(f, "No results found for \"{}\".", self.query);
        }

        writeln!(f, "Results for \"{}\":", self.query)?;
        for result in self.results {
            let noun = if result.match_count() == 1 { "match" } else { "matches" };
            writeln!(f, "\n{} ({} {noun})", result.industry, result.match_count())?;
            if !result.matched_usecases.is_empty() {
                writeln!(f, "  Use Cases")?;
                for usecase in &result.matched_usecases {
                    writeln!(f, "    - {}", usecase.name().unwrap_or(NOT_AVAILABLE))?;
                }
            }
            if !result.matched_kpis.is_empty() {
                writeln!(f, "  KPIs")?;
                for matched in &result.matched_kpis {
                    writeln!(f, "    - {} [{}]", matched.kpi.name, matched.subdepartment)?;
                }
            }
        }
        Ok(())
    }
}

pub fn results_text(query: &str, results: &[IndustryResult<'_>]) -> String {
    ResultsReport { query, results }.to_string()
}
