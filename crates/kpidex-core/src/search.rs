//! Search layer: the three traversals over the dataset tree.
//!
//! - [`suggest`] feeds the live autocomplete: distinct labels that contain the
//!   query.
//! - [`search`] feeds the results view: matching KPIs and use cases grouped by
//!   industry.
//! - [`aggregate_by_domain`] feeds the category sidebar.
//!
//! All three are pure functions of their inputs. Results borrow from the
//! dataset instead of cloning records.
//!
//! Matching is a case-insensitive substring test. Only lower-casing is
//! applied; punctuation and whitespace are compared as-is.

use crate::dataset::Dataset;
use crate::types::{Industry, Kpi, UseCase};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A KPI hit, annotated with the subdepartment it was found under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedKpi<'a> {
    #[serde(flatten)]
    pub kpi: &'a Kpi,
    pub subdepartment: &'a str,
}

/// All hits inside one industry. Never empty: industries without hits are
/// not reported at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryResult<'a> {
    pub industry: &'a str,
    #[serde(rename = "matchedKPIs")]
    pub matched_kpis: Vec<MatchedKpi<'a>>,
    #[serde(rename = "matchedUseCases")]
    pub matched_usecases: Vec<&'a UseCase>,
}

impl IndustryResult<'_> {
    pub fn match_count(&self) -> usize {
        self.matched_kpis.len() + self.matched_usecases.len()
    }
}

/// Industries merged under one domain name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainGroup<'a> {
    pub domain: &'a str,
    pub industries: Vec<&'a Industry>,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// A lower-cased query, ready for repeated substring tests.
#[derive(Debug, Clone)]
struct Needle {
    lowered: String,
    ascii: bool,
}

impl Needle {
    /// `None` for an empty query. Whitespace is significant.
    fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        let lowered = query.to_lowercase();
        let ascii = lowered.is_ascii();
        Some(Needle { lowered, ascii })
    }

    /// Like [`Needle::new`], but a whitespace-only query also yields `None`.
    fn non_blank(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            None
        } else {
            Self::new(query)
        }
    }

    fn matches(&self, haystack: &str) -> bool {
        // ASCII labels compare in place; anything else needs full Unicode folding.
        if self.ascii && haystack.is_ascii() {
            let needle = self.lowered.as_bytes();
            return haystack
                .as_bytes()
                .windows(needle.len())
                .any(|window| window.eq_ignore_ascii_case(needle));
        }
        haystack.to_lowercase().contains(&self.lowered)
    }
}

// ---------------------------------------------------------------------------
// Engines
// ---------------------------------------------------------------------------

/// Autocomplete labels for a partial query.
///
/// Industry, department, subdepartment and KPI names are candidates; use-case
/// names are not. Each distinct label appears once, at the position it was
/// first seen in document order.
pub fn suggest<'a>(query: &str, dataset: &'a Dataset) -> Vec<&'a str> {
    let Some(needle) = Needle::non_blank(query) else {
        return Vec::new();
    };

    let mut labels: IndexSet<&'a str> = IndexSet::new();
    let mut offer = |label: &'a str| {
        if needle.matches(label) {
            labels.insert(label);
        }
    };

    for (_, industry) in dataset.industries() {
        offer(industry.name.as_str());
        for department in industry.classifications.iter().flat_map(|c| &c.departments) {
            offer(department.name.as_str());
            for sub in &department.subdepartments {
                offer(sub.name.as_str());
                for kpi in &sub.kpicollection {
                    offer(kpi.name.as_str());
                }
            }
        }
    }

    tracing::debug!(query, suggestions = labels.len(), "suggest");
    labels.into_iter().collect()
}

/// Full search: KPIs and use cases whose names contain `query`, grouped by
/// industry in document order.
///
/// Repeated KPI names are all reported since each carries its own
/// subdepartment. Use cases without a string name are skipped. Only the
/// empty query is rejected; `" "` matches every name containing a space.
pub fn search<'a>(query: &str, dataset: &'a Dataset) -> Vec<IndustryResult<'a>> {
    let Some(needle) = Needle::new(query) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for (_, industry) in dataset.industries() {
        let mut matched_kpis = Vec::new();
        let mut matched_usecases = Vec::new();

        for sub in industry.subdepartments() {
            matched_kpis.extend(
                sub.kpicollection
                    .iter()
                    .filter(|kpi| needle.matches(&kpi.name))
                    .map(|kpi| MatchedKpi {
                        kpi,
                        subdepartment: &sub.name,
                    }),
            );
            matched_usecases.extend(
                sub.usecases
                    .iter()
                    .filter(|uc| uc.name().is_some_and(|name| needle.matches(name))),
            );
        }

        if !matched_kpis.is_empty() || !matched_usecases.is_empty() {
            results.push(IndustryResult {
                industry: &industry.name,
                matched_kpis,
                matched_usecases,
            });
        }
    }

    tracing::debug!(query, industries = results.len(), "search");
    results
}

/// Group industries under their domain names, merging repeated domains.
pub fn aggregate_by_domain(dataset: &Dataset) -> Vec<DomainGroup<'_>> {
    let mut groups: IndexMap<&str, Vec<&Industry>> = IndexMap::new();
    for domain in dataset.domains() {
        groups
            .entry(domain.name.as_str())
            .or_default()
            .extend(domain.industries.iter());
    }
    groups
        .into_iter()
        .map(|(domain, industries)| DomainGroup { domain, industries })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn banking() -> Dataset {
        Dataset::from_json_str(
            r#"[{
                "domain": "Finance",
                "industries": [{
                    "industry": "Banking",
                    "classifications": [{
                        "departments": [{
                            "department": "Lending",
                            "subdepartments": [{
                                "subdepartment": "Retail",
                                "kpicollection": [{"kpi": "Net Interest Margin", "formula": "f", "explanation": "e"}],
                                "usecases": [{"usecase": 123}, {"usecase": "Interest Rate Forecast"}]
                            }]
                        }]
                    }]
                }]
            }]"#,
        )
        .unwrap()
    }

    #[test]
    fn suggest_is_case_insensitive() {
        let ds = banking();
        assert_eq!(suggest("INTEREST", &ds), vec!["Net Interest Margin"]);
    }

    #[test]
    fn suggest_skips_usecase_names() {
        let ds = banking();
        assert!(!suggest("forecast", &ds).contains(&"Interest Rate Forecast"));
    }

    #[test]
    fn suggest_blank_query_is_empty() {
        let ds = banking();
        assert!(suggest("", &ds).is_empty());
        assert!(suggest("   ", &ds).is_empty());
    }

    #[test]
    fn search_whitespace_query_is_matched_literally() {
        let ds = banking();
        assert!(search("", &ds).is_empty());
        let results = search(" ", &ds);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_kpis[0].kpi.name, "Net Interest Margin");
        assert_eq!(results[0].matched_usecases.len(), 1);
    }

    #[test]
    fn needle_folds_non_ascii_labels() {
        let needle = Needle::new("ÉCOLE").unwrap();
        assert!(needle.matches("Grande école"));
        assert!(!needle.matches("Ecole"));
        let ascii = Needle::new("Margin").unwrap();
        assert!(ascii.matches("NET INTEREST MARGIN"));
        assert!(!ascii.matches("Marg"));
    }

    #[test]
    fn search_annotates_subdepartment() {
        let ds = banking();
        let results = search("margin", &ds);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].industry, "Banking");
        assert_eq!(results[0].matched_kpis[0].subdepartment, "Retail");
        assert!(results[0].matched_usecases.is_empty());
    }

    #[test]
    fn search_matches_string_usecase_names_only() {
        let ds = banking();
        let results = search("rate", &ds);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_usecases.len(), 1);
        assert_eq!(
            results[0].matched_usecases[0].name(),
            Some("Interest Rate Forecast")
        );
    }

    #[test]
    fn search_numeric_query_does_not_hit_numeric_usecase_name() {
        let ds = banking();
        assert!(search("123", &ds).is_empty());
    }

    #[test]
    fn search_serializes_with_original_keys() {
        let ds = banking();
        let json = serde_json::to_value(search("margin", &ds)).unwrap();
        assert_eq!(json[0]["industry"], "Banking");
        assert_eq!(json[0]["matchedKPIs"][0]["kpi"], "Net Interest Margin");
        assert_eq!(json[0]["matchedKPIs"][0]["subdepartment"], "Retail");
        assert_eq!(json[0]["matchedUseCases"], serde_json::json!([]));
    }

    #[test]
    fn aggregate_merges_repeated_domain_names() {
        let ds = Dataset::from_json_str(
            r#"[
                {"domain": "Finance", "industries": [{"industry": "Banking"}]},
                {"domain": "Health", "industries": [{"industry": "Hospitals"}]},
                {"domain": "Finance", "industries": [{"industry": "Insurance"}]}
            ]"#,
        )
        .unwrap();
        let groups = aggregate_by_domain(&ds);
        let shape: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.domain, g.industries.iter().map(|i| i.name.as_str()).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("Finance", vec!["Banking", "Insurance"]),
                ("Health", vec!["Hospitals"]),
            ]
        );
    }
}
