use std::path::Path;
use std::sync::Arc;

use command::CommandSender;
use drops::{RandomDropsPlugin, SettingsError, plugin::METADATA};
use plugin::ManagerError;
use randomdrops_config::{Configuration, LoggingConfig};
use server::Server;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

pub mod command;
pub mod drops;
pub mod entity;
pub mod item;
pub mod plugin;
pub mod server;
pub mod world;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid drop settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Plugin(#[from] ManagerError),
}

/// Installs the terminal logger. Does nothing when logging is disabled.
pub fn init_log(config: &LoggingConfig) {
    if !config.enabled {
        return;
    }

    let mut builder = ConfigBuilder::new();
    if config.timestamp {
        builder.set_time_format_rfc3339();
        builder.set_time_level(log::LevelFilter::Error);
    } else {
        builder.set_time_level(log::LevelFilter::Off);
    }
    if config.threads {
        builder.set_thread_level(log::LevelFilter::Info);
    } else {
        builder.set_thread_level(log::LevelFilter::Off);
    }
    builder.set_target_level(log::LevelFilter::Off);

    let color = if config.color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    if let Err(err) = TermLogger::init(
        config.level.into(),
        builder.build(),
        TerminalMode::Mixed,
        color,
    ) {
        eprintln!("Failed to set up logging: {err}");
    }
}

/// The host with the random drops plugin loaded.
pub struct RandomDropsServer {
    pub server: Arc<Server>,
    use_console: bool,
}

impl RandomDropsServer {
    pub async fn new(config: &Configuration) -> Result<Self, StartupError> {
        let server = Arc::new(Server::new(&config.advanced));
        let plugin = RandomDropsPlugin::new(&config.drops)?;
        server
            .plugin_manager
            .load_plugin(&server, METADATA, Box::new(plugin))
            .await?;

        if config.drops.enabled_on_start {
            log::info!("[RandomDrops] Enabled on start");
        }

        Ok(Self {
            server,
            use_console: config.advanced.commands.use_console,
        })
    }

    /// Loads the configuration below `exec_dir` and starts from it.
    pub async fn from_dir(exec_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Configuration::load(exec_dir)?;
        Ok(Self::new(&config).await?)
    }

    /// Reads console commands from stdin until the server stops, stdin closes
    /// or an interrupt arrives.
    pub async fn run_console(&self) {
        if !self.use_console {
            log::info!("Console commands are disabled, waiting for interrupt");
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("Unable to listen for interrupt: {err}");
            }
            return;
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while !self.server.is_stopping() {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        self.server
                            .handle_command(&mut CommandSender::Console, &line)
                            .await;
                    }
                    Ok(None) => break,
                    Err(err) => {
                        log::error!("Failed to read console input: {err}");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    log::warn!("Received interrupt signal; stopping server...");
                    self.server.stop();
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use randomdrops_data::Block;
    use randomdrops_util::math::position::BlockPos;

    use super::RandomDropsServer;
    use crate::command::CommandSender;

    #[tokio::test]
    async fn starts_from_a_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let started = RandomDropsServer::from_dir(dir.path()).await.unwrap();
        assert!(dir.path().join("config/randomdrops.toml").exists());
        assert!(
            started
                .server
                .plugin_manager
                .is_plugin_loaded("randomdrops")
                .await
        );

        let server = &started.server;
        server
            .handle_command(&mut CommandSender::Console, "setblock 0 1 0 stone")
            .await;
        server
            .handle_command(&mut CommandSender::Console, "rd_start")
            .await;
        server
            .handle_command(&mut CommandSender::Console, "break 0 1 0")
            .await;

        let world = server.default_world().await;
        assert_eq!(world.get_block(&BlockPos::new(0, 1, 0)).await, Block::AIR);
        let drops = world.items().await.len() + world.entities().await.len();
        assert!(drops >= 1);

        server.handle_command(&mut CommandSender::Console, "stop").await;
        assert!(server.is_stopping());
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join("config/randomdrops.toml"),
            "max_amount = 0\n",
        )
        .unwrap();
        assert!(RandomDropsServer::from_dir(dir.path()).await.is_err());
    }
}
