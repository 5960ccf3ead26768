//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::Site;

/// Generate the static site in a single all-or-nothing pass
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(site);
    let nodes = loader.load_all()?;

    tracing::info!("Loaded {} content documents", nodes.len());

    let generator = Generator::new(site)?;
    generator.generate(&nodes)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(site.content_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    if site.static_dir.exists() {
        watcher.watch(site.static_dir.as_ref(), notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = run(site) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
