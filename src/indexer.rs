//! One indexing cycle.

use apt_repository::{write_packages_index, ScanError};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Rewrite the Packages index of `folder` and log how long it took.
pub fn run_cycle(folder: &Path, max_depth: usize) -> Result<usize, ScanError> {
    let started = Instant::now();
    let count = write_packages_index(folder, max_depth)?;
    info!("Indexed {} package(s) in {:?}", count, started.elapsed());
    Ok(count)
}
