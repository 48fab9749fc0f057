use std::time::Instant;

use randomdrops::{RandomDropsServer, init_log};
use randomdrops_config::{Configuration, LoggingConfig};

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let time = Instant::now();

    let exec_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            init_log(&LoggingConfig::default());
            log::error!("Unable to determine the working directory: {err}");
            std::process::exit(1);
        }
    };

    let config = match Configuration::load(&exec_dir) {
        Ok(config) => config,
        Err(err) => {
            init_log(&LoggingConfig::default());
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    init_log(&config.advanced.logging);

    log::info!("Starting RandomDrops {CARGO_PKG_VERSION}");

    let server = match RandomDropsServer::new(&config).await {
        Ok(server) => server,
        Err(err) => {
            log::error!("Failed to start: {err}");
            std::process::exit(1);
        }
    };

    log::info!("Started Server took {}ms", time.elapsed().as_millis());
    log::info!("Type commands like /rd_start or /setblock 0 64 0 stone into the console");

    server.run_console().await;
    log::info!("The server has stopped.");
}
