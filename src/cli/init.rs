use std::path::Path;

use beehive::Config;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Address inquiries are sent to
    #[arg(long, value_name = "EMAIL")]
    contact_email: Option<String>,

    /// Business name used in the greeting
    #[arg(long, value_name = "NAME")]
    business_name: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Configuration already exists at {} (use 'villa config set' to change it)",
                config_path.display()
            );
        }

        let mut config = Config::default();
        if let Some(name) = self.business_name {
            config.set_business_name(name);
        }
        if let Some(email) = self.contact_email {
            config
                .set_contact_email(email)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
        }

        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", config_path.display()))?;

        println!(
            "{}",
            format!("Created {}", config_path.display()).success()
        );
        println!("  Inquiries go to: {}", config.contact_email());
        println!();
        println!("Next steps:");
        println!("  villa inquire --interactive");

        Ok(())
    }
}
