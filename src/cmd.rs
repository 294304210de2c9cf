use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::{Config, ConfigLoadOption};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, disable_help_subcommand = true)]
pub struct Command {
    /// Address to bind
    #[arg(short, long, display_order = 1000)]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT", display_order = 1000)]
    pub port: Option<u16>,

    /// Timeout in seconds for cluster fetches
    #[arg(long, value_name = "SECONDS", display_order = 1000)]
    pub fetch_timeout_secs: Option<u64>,

    /// Config file path
    #[arg(long, display_order = 1000)]
    pub config_file: Option<PathBuf>,
}

impl Command {
    pub fn init() -> Self {
        Self::parse()
    }

    /// Layered config: defaults, then the config file, then environment, then
    /// command-line flags.
    pub fn load_config(&self) -> Result<Config> {
        let option = match &self.config_file {
            Some(path) => ConfigLoadOption::Path(path.clone()),
            None => ConfigLoadOption::Default,
        };

        let mut config = Config::load(option)?;

        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }

        if let Some(port) = self.port {
            config.port = port;
        }

        if let Some(secs) = self.fetch_timeout_secs {
            config.fetch_timeout_secs = secs;
        }

        Ok(config)
    }
}
