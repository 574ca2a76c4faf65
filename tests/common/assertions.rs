//! Domain-specific assertion macros for kpidex harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! engine guarantee was violated.

/// Assert that every label contains `query` case-insensitively.
///
/// ```rust
/// assert_all_contain!(suggest("rate", &ds), "rate");
/// ```
#[macro_export]
macro_rules! assert_all_contain {
    ($labels:expr, $query:expr) => {{
        let query: &str = $query;
        let needle = query.to_lowercase();
        for label in $labels.iter() {
            let label: &str = label;
            if !label.to_lowercase().contains(&needle) {
                panic!(
                    "assert_all_contain! failed: label {:?} does not contain {:?}",
                    label, query
                );
            }
        }
    }};
}

/// Assert that a sequence has no repeated elements.
#[macro_export]
macro_rules! assert_no_duplicates {
    ($items:expr) => {{
        let mut seen = std::collections::HashSet::new();
        for item in $items.iter() {
            if !seen.insert(item) {
                panic!("assert_no_duplicates! failed: {:?} appears more than once", item);
            }
        }
    }};
}

/// Assert that every industry result carries at least one match.
#[macro_export]
macro_rules! assert_results_non_empty {
    ($results:expr) => {{
        for result in $results.iter() {
            let result: &kpidex_core::IndustryResult = result;
            if result.match_count() == 0 {
                panic!(
                    "assert_results_non_empty! failed: industry {:?} reported with no matches",
                    result.industry
                );
            }
        }
    }};
}
