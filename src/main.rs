mod config;
mod error;
mod game;
mod quiz;
mod view;

use std::process;

use dotenv::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::Config;
use quiz::catalog::Catalog;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine, everything has a default.
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting vocabulary quiz...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            process::exit(2);
        }
    };

    let catalog = match &config.catalog_dir {
        Some(dir) => Catalog::from_dir(dir),
        None => Catalog::bundled(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Could not load word lists: {}", e);
            process::exit(1);
        }
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    game::run(config, catalog, rng).await;

    // Stdin is read on a blocking thread that cannot be cancelled, so leave
    // without waiting for the runtime to wind it down.
    process::exit(0);
}
