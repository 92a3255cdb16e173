//! # izi-cli
//!
//! Command-line companion for IZIGo applications.
//!
//! This crate provides the `izi` binary with the following commands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `izi fix` | Upgrade the application in the current directory to the IZIGo 1.6+ API |
//! | `izi version` | Print IZI, IZIGo and Go versions alongside platform information |
//!
//! ## Architecture
//!
//! - [`commands::fix`] — tree walk and in-place rewriting (`izi fix`)
//!   - [`commands::fix::rules`] — the rule table as an explicit [`RuleSet`](commands::fix::RuleSet)
//!   - [`commands::fix::engine`] — the stage pipeline that applies it
//!   - [`commands::fix::imports`] — Go import section scanner
//! - [`commands::version`] — version banner (`izi version`)
//! - [`logging`] — `tracing` subscriber setup

pub mod commands;
pub mod logging;
