//! # Resource Factory CLI
//!
//! Flattens every manifest named on the command line and prints the resulting
//! resources as a YAML stream.
//!
//! ```bash
//! RESOURCE_FACTORY_ROOT=overlays/prod RUST_LOG=debug cargo run -- base.yaml services.yaml
//! ```
//!
//! Paths are resolved against [`FactoryConfig::root`], so nothing outside that
//! directory can be read.

use resource_factory::lifecycle::{setup_tracing, FactoryConfig, FactorySystem};
use tracing::{error, info};

fn main() -> Result<(), String> {
    setup_tracing();

    let config = FactoryConfig::from_env();
    let system = FactorySystem::new(&config).map_err(|e| e.to_string())?;

    let mut total = 0;
    for path in std::env::args().skip(1) {
        let resources = system.load_resources(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load manifest");
            e.to_string()
        })?;
        for resource in &resources {
            print!("---\n{resource}");
        }
        total += resources.len();
    }

    info!(count = total, "Done");
    Ok(())
}
