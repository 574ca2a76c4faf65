//! kpidex: browse and search a KPI / use-case knowledge base.
//!
//! The engines and data model live in [`kpidex_core`] and the terminal UI in
//! `kpidex_tui`. This crate adds the two non-interactive surfaces on top and
//! exposes them as modules so the integration tests can drive them directly.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──► kpidex_tui (default)
//! Dataset ──► core├──► report  (suggest / search / categories subcommands)
//!                 └──► server  (serve subcommand, axum)
//! ```
//!
//! Every surface reads the same immutable [`kpidex_core::Dataset`].

pub mod report;
pub mod server;
