use anyhow::Result;
use clap::Parser;
use debserver::cli::Args;
use debserver::watch::{spawn_watcher, PackageWatcher};
use debserver::{indexer, logging, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    logging::init_logging(&config.logging)?;

    info!(
        "Indexing {} (max depth {}, watch: {})",
        config.folder.display(),
        config.max_depth,
        config.watch
    );

    // Register the watch first so changes made during the initial cycle are
    // picked up by the next one.
    let watcher = if config.watch && !args.index_only {
        Some(PackageWatcher::new(&config)?)
    } else {
        None
    };

    let folder = config.folder.clone();
    let max_depth = config.max_depth;
    tokio::task::spawn_blocking(move || indexer::run_cycle(&folder, max_depth)).await??;

    if args.index_only {
        return Ok(());
    }

    match watcher {
        Some(watcher) => {
            let watching = spawn_watcher(watcher);
            tokio::select! {
                served = server::serve(&config) => served?,
                watched = watching => watched??,
            }
        }
        None => server::serve(&config).await?,
    }

    Ok(())
}
