//! Industry page: the full outline of one industry, opened from the sidebar,
//! the detail popup or `:open <slug>`.
//!
//! Leaves are KPIs and use cases; activating one opens the detail popup.

use super::tree::{TreeNode, TreeState};
use crate::theme::Theme;
use kpidex_core::{Displayable, Industry, KpiView, UseCaseView};

pub type IndustryPageState<'d> = TreeState<Displayable<'d>>;

/// Build the outline tree for `industry`. Use cases without a string name
/// are left out, as they are in search results.
pub fn build<'d>(industry: &'d Industry, theme: &Theme) -> IndustryPageState<'d> {
    let nodes = industry
        .classifications
        .iter()
        .enumerate()
        .map(|(ci, classification)| {
            let label = classification
                .name
                .clone()
                .unwrap_or_else(|| format!("Classification {}", ci + 1));
            let departments = classification
                .departments
                .iter()
                .enumerate()
                .map(|(di, department)| {
                    let subs = department
                        .subdepartments
                        .iter()
                        .enumerate()
                        .map(|(si, sub)| {
                            let prefix = format!("{ci}.{di}.{si}");
                            let kpis = sub.kpicollection.iter().enumerate().map(|(ki, kpi)| {
                                TreeNode::new(format!("{prefix}.kpi.{ki}"), kpi.name.clone())
                                    .with_hint("KPI")
                                    .with_style(theme.result_kpi)
                                    .with_payload(Displayable::Kpi(KpiView {
                                        kpi,
                                        subdepartment: &sub.name,
                                        industry: &industry.name,
                                    }))
                            });
                            let usecases = sub.usecases.iter().enumerate().filter_map(|(ui, usecase)| {
                                let name = usecase.name()?;
                                Some(
                                    TreeNode::new(format!("{prefix}.uc.{ui}"), name)
                                        .with_hint("use case")
                                        .with_style(theme.result_usecase)
                                        .with_payload(Displayable::UseCase(UseCaseView {
                                            usecase,
                                            industry: &industry.name,
                                        })),
                                )
                            });
                            TreeNode::new(prefix.clone(), sub.name.clone())
                                .with_children(usecases.chain(kpis).collect())
                        })
                        .collect();
                    TreeNode::new(format!("{ci}.{di}"), department.name.clone())
                        .with_style(theme.result_section)
                        .with_children(subs)
                })
                .collect();
            TreeNode::new(format!("{ci}"), label)
                .with_style(theme.result_industry)
                .with_children(departments)
        })
        .collect();
    TreeState::new(nodes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AppEvent, Direction};
    use kpidex_core::Dataset;

    #[test]
    fn outline_skips_unnamed_usecases() {
        let ds = Dataset::from_json_str(
            r#"[{"domain": "D", "industries": [{"industry": "Banking", "classifications": [{
                "departments": [{"department": "Lending", "subdepartments": [{
                    "subdepartment": "Retail",
                    "kpicollection": [{"kpi": "Net Interest Margin"}],
                    "usecases": [{"usecase": 7}, {"usecase": "Credit Scoring"}]
                }]}]
            }]}]}]"#,
        )
        .unwrap();
        let industry = ds.industry_by_slug("banking").unwrap();
        let page = build(industry, &Theme::load_default());
        let labels: Vec<_> = page.visible().iter().map(|(_, n)| n.label.clone()).collect();
        assert_eq!(
            labels,
            vec![
                "Classification 1",
                "Lending",
                "Retail",
                "Credit Scoring",
                "Net Interest Margin"
            ]
        );
    }

    #[test]
    fn activating_kpi_leaf_yields_displayable() {
        let ds = Dataset::sample();
        let industry = ds.industry_by_slug("banking").unwrap();
        let mut page = build(industry, &Theme::load_default());
        // Core Operations → Lending → Retail → Automated Credit Scoring
        for _ in 0..3 {
            page.handle(&AppEvent::Nav(Direction::Down));
        }
        let item = page.handle(&AppEvent::Enter).expect("leaf payload");
        assert_eq!(item.title(), "Automated Credit Scoring");
        assert_eq!(item.industry(), "Banking");
    }
}
