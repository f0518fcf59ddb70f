use std::path::{Path, PathBuf};

mod catalog;
mod complete;
mod compose;
mod config;
mod form;
mod init;
mod inquire;
mod terminal;
mod validate;

use beehive::{Catalog, Config};
use clap::ArgAction;
use compose::Compose;
use inquire::Inquire;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "villa.toml", global = true)]
    config: PathBuf,

    /// YAML file replacing the built-in site content
    #[arg(long, value_name = "PATH", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let context = Context {
            config_path: self.config,
            catalog_path: self.catalog,
        };
        self.command.run(&context).await
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries inquiry output and mailto links
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Paths shared by every subcommand.
#[derive(Debug)]
pub struct Context {
    config_path: PathBuf,
    catalog_path: Option<PathBuf>,
}

impl Context {
    fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn config(&self) -> anyhow::Result<Config> {
        Config::load_or_default(&self.config_path).map_err(|e| anyhow::anyhow!("{e}"))
    }

    fn catalog(&self) -> anyhow::Result<Catalog> {
        use anyhow::Context as _;

        match &self.catalog_path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog from {}", path.display())),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Send a booking inquiry
    ///
    /// Validates the inquiry, composes the email and opens it in your mail
    /// client. Nothing is sent until you send it from there.
    Inquire(Inquire),

    /// Check an inquiry without sending it
    Validate(Validate),

    /// Print the email an inquiry would produce
    Compose(Compose),

    /// Browse rooms, amenities, attractions and the gallery
    Catalog(catalog::Command),

    /// Show or modify configuration settings
    Config(config::Command),

    /// Write a default configuration file
    Init(init::Command),

    /// Generate shell completion scripts
    Complete(complete::Command),
}

impl Command {
    async fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Inquire(command) => command.run(context).await?,
            Self::Validate(command) => command.run(context)?,
            Self::Compose(command) => command.run(context)?,
            Self::Catalog(command) => command.run(context)?,
            Self::Config(command) => command.run(context.config_path())?,
            Self::Init(command) => command.run(context.config_path())?,
            Self::Complete(command) => command.run(),
        }
        Ok(())
    }
}
