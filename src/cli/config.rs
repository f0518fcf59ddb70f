use std::path::Path;

use beehive::Config;
use tracing::instrument;

use crate::cli::terminal::Colorize;

const KEYS: &str = "business_name\n  contact_email\n  notice_seconds\n  processing_delay_ms\n  \
                    strict_dates";

#[derive(Debug, clap::Parser)]
/// Show or modify configuration
///
/// Configuration is stored in villa.toml (see --config).
///
/// Available configuration keys:
///   `business_name`        Name used in the email greeting
///   `contact_email`        Address inquiries are sent to
///   `notice_seconds`       How long the success notice shows (default: 5)
///   `processing_delay_ms`  Pause before reporting success (default: 1000)
///   `strict_dates`         Check date order and past check-in (default:
/// false)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   villa config set `contact_email` bookings@beehivevilla.com
    ///   villa config set `strict_dates` true
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(config_path).map_err(|e| anyhow::anyhow!("{e}"))?;

        match self.command {
            ConfigCommand::Show => {
                Self::show_config(&config);
                Ok(())
            }
            ConfigCommand::Get { key } => Self::get_config(&config, &key),
            ConfigCommand::Set { key, value } => {
                Self::set_config(config, config_path, &key, &value)
            }
        }
    }

    fn show_config(config: &Config) {
        println!("Configuration:");
        println!("  business_name: {}", config.business_name());
        println!("  contact_email: {}", config.contact_email());
        println!(
            "  notice_seconds: {}",
            config.notice_duration().as_secs()
        );
        println!(
            "  processing_delay_ms: {}",
            config.processing_delay().as_millis()
        );
        println!(
            "  strict_dates: {} ({})",
            config.strict_dates,
            if config.strict_dates {
                "date order and past check-in are checked".dim()
            } else {
                "any non-empty date is accepted".dim()
            }
        );
    }

    fn get_config(config: &Config, key: &str) -> anyhow::Result<()> {
        match key {
            "business_name" => println!("{}", config.business_name()),
            "contact_email" => println!("{}", config.contact_email()),
            "notice_seconds" => println!("{}", config.notice_duration().as_secs()),
            "processing_delay_ms" => println!("{}", config.processing_delay().as_millis()),
            "strict_dates" => println!("{}", config.strict_dates),
            _ => {
                anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys:\n  {KEYS}");
            }
        }
        Ok(())
    }

    fn set_config(
        mut config: Config,
        config_path: &Path,
        key: &str,
        value: &str,
    ) -> anyhow::Result<()> {
        match key {
            "business_name" => config.set_business_name(value.to_string()),
            "contact_email" => config
                .set_contact_email(value.to_string())
                .map_err(|e| anyhow::anyhow!("{e}"))?,
            "notice_seconds" => config.set_notice_seconds(parse_number(value)?),
            "processing_delay_ms" => config.set_processing_delay_ms(parse_number(value)?),
            "strict_dates" => {
                config.strict_dates = value
                    .parse::<bool>()
                    .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))?;
            }
            _ => {
                anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys:\n  {KEYS}");
            }
        }

        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        println!("{}", format!("Set {key} = {value}").success());

        if key == "strict_dates" && config.strict_dates {
            println!(
                "\n{}",
                "Inquiries must now use YYYY-MM-DD dates, with check-out after check-in.".info()
            );
        }

        Ok(())
    }
}

fn parse_number(value: &str) -> anyhow::Result<u64> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Value must be a whole number, got '{value}'"))
}
