//! Command implementations for the `izi` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

/// Application upgrade — `izi fix`.
///
/// Walks the current directory and rewrites source, docs and `.conf` files
/// from the pre-1.6 IZIGo API to the current one.
pub mod fix;

/// Version banner — `izi version`.
///
/// Prints the CLI version, the installed IZIGo and Go versions and platform
/// information, as a banner or as JSON/YAML.
pub mod version;
