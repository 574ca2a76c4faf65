//! kpidex TUI: ratatui front end over [`kpidex_core`].

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use kpidex_core::{config::Config, Dataset};

/// Run the interactive browser until the user quits.
pub fn run(dataset: &Dataset, config: Config) -> anyhow::Result<()> {
    let stats = dataset.stats();
    tracing::info!(
        domains = stats.domains,
        industries = stats.industries,
        kpis = stats.kpis,
        "starting tui"
    );
    App::new(dataset, config).run()
}
