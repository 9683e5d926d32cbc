//! tidyshelf - organize files into category/year/month folders.
//!
//! This library classifies files by extension using a user-supplied category
//! mapping and places each one under `<root>/<category>/<year>/<month>` based
//! on its modification date, with collision-safe renaming, optional recursive
//! traversal, and a dry-run preview mode.

pub mod category;
pub mod cli;
pub mod config;
pub mod organizer;
pub mod output;

pub use category::{CategoryMap, DEFAULT_CATEGORY};
pub use config::{CategoryConfig, ConfigError};
pub use organizer::{OrganizeError, Organizer, Placement, RunLog};

pub use cli::{Cli, run_cli};
