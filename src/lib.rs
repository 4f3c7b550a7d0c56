//! # debserver
//!
//! Serve a folder of Debian packages as a flat APT repository. The folder is
//! indexed into `Packages`, `Packages.gz` and `Packages.bz2` at startup, and
//! again whenever it changes if watching is enabled. Every file in the folder
//! is then served over HTTP.

pub mod cli;
pub mod config;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod server;
pub mod watch;

pub use config::Config;
pub use error::{DebserverError, Result};
