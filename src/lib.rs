//! Polyglot - locale negotiation and gettext catalog workflow
//!
//! Polyglot is a CLI tool and library for internationalizing web
//! applications. It resolves the locale, timezone and currency of each
//! request, and drives an external gettext toolchain to extract, initialize,
//! update, compile and machine-translate message catalogs.
//!
//! ## Module Structure
//!
//! - `catalog`: Message catalogs, the PO format and catalog merging
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and validation
//! - `events`: Workflow events and subscriptions
//! - `extract`: Multi-root extraction through the catalog tool
//! - `locale`: Request-scoped locale, timezone and currency resolution
//! - `placeholders`: Protection of named placeholders around machine translation
//! - `progress`: Progress reporting interface
//! - `runner`: External command execution
//! - `translate`: Machine translation of catalogs
//! - `workflow`: Catalog maintenance commands

pub mod catalog;
pub mod cli;
pub mod config;
pub mod events;
pub mod extract;
pub mod locale;
pub mod placeholders;
pub mod progress;
pub mod runner;
pub mod translate;
pub mod workflow;
