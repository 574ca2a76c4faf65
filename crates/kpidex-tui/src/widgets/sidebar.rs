//! Category sidebar: domains with their industries, built from
//! [`aggregate_by_domain`].
//!
//! Activating an industry yields its slug; the app shell opens the matching
//! industry page.

use super::tree::{TreeNode, TreeState};
use crate::theme::Theme;
use kpidex_core::{aggregate_by_domain, slugify, Dataset};

pub type SidebarState = TreeState<String>;

/// Build the sidebar tree. Domains start expanded.
pub fn build(dataset: &Dataset, theme: &Theme) -> SidebarState {
    let nodes = aggregate_by_domain(dataset)
        .into_iter()
        .map(|group| {
            let children = group
                .industries
                .iter()
                .enumerate()
                .map(|(i, industry)| {
                    let slug = slugify(&industry.name);
                    TreeNode::new(format!("industry:{}:{i}", group.domain), industry.name.clone())
                        .with_hint(format!("/{slug}"))
                        .with_style(theme.sidebar_industry)
                        .with_payload(slug)
                })
                .collect();
            TreeNode::new(format!("domain:{}", group.domain), group.domain)
                .with_style(theme.sidebar_domain)
                .with_children(children)
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

    #[test]
    fn one_node_per_domain_group() {
        let ds = Dataset::from_json_str(
            r#"[
                {"domain": "Finance", "industries": [{"industry": "Banking"}]},
                {"domain": "Finance", "industries": [{"industry": "Capital Markets"}]}
            ]"#,
        )
        .unwrap();
        let tree = build(&ds, &Theme::load_default());
        assert_eq!(tree.nodes.len(), 1);
        let labels: Vec<_> = tree.nodes[0].children.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Banking", "Capital Markets"]);
    }

    #[test]
    fn activating_industry_yields_slug() {
        let ds = Dataset::from_json_str(
            r#"[{"domain": "Finance", "industries": [{"industry": "Capital Markets"}]}]"#,
        )
        .unwrap();
        let mut tree = build(&ds, &Theme::load_default());
        tree.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(
            tree.handle(&AppEvent::Enter),
            Some("capital-markets".to_string())
        );
    }
}
