//! # roam2md Architecture
//!
//! roam2md turns a Roam Research JSON export into an Obsidian vault: one
//! Markdown outline per page, block references resolved into links, daily
//! notes renamed to `YYYY-MM-DD`. A separate fixup pass then reconciles the
//! two Markdown dialects (math delimiters, italics markers).
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints messages, owns exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Loads the export, wires config into the commands         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - convert: index, render, write every page                 │
//! │  - fixup: rewrite written files in place                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (loader, index, render, fixup) + Output (store/)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline is strictly sequential: the whole export is loaded, then
//! indexed, then rendered and written page by page. Nothing below the CLI
//! prints to stdout or exits the process; outcomes travel back as
//! [`commands::CmdResult`] values and diagnostics go through `log`.
//!
//! ## Module Overview
//!
//! - [`loader`]: JSON export to typed [`model::Page`]/[`model::Block`] forest
//! - [`references`]: block reference / embed / mention syntax
//! - [`index`]: uid table and referenced-uid set
//! - [`render`]: page to Markdown lines
//! - [`daily`]: daily-note title detection and link rewriting
//! - [`store`]: output sinks and vault layout
//! - [`fixup`]: Markdown dialect substitutions
//! - [`config`]: `roam2md.json` settings
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod daily;
pub mod error;
pub mod fixup;
pub mod index;
pub mod loader;
pub mod logging;
pub mod model;
pub mod references;
pub mod render;
pub mod store;
