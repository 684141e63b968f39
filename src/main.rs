// Entrypoint for the CLI application.
// - Keeps `main` small: open the catalog and hand it to the UI loop.
// - Returns `anyhow::Result` to simplify error handling at the boundary.

use libman_cli::{catalog::Catalog, storage::JsonFileStorage, ui::main_menu};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Log to stderr so warnings (e.g. a corrupt data file being moved
    // aside) don't interleave with the menu. Level comes from RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Storage path comes from the environment variable `LIBRARY_FILE`,
    // defaulting to `library.json` in the working directory.
    let path = std::env::var("LIBRARY_FILE").unwrap_or_else(|_| "library.json".into());
    let catalog = Catalog::load(JsonFileStorage::new(path))?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(catalog)?;
    Ok(())
}
