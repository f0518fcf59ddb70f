use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::domain::validation::Rules;

/// Configuration for the inquiry toolkit.
///
/// This struct holds the business identity inquiries are addressed to, the
/// timings of the submission flow, and optional stricter validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The name used in the greeting of composed messages.
    business_name: String,

    /// The address inquiries are sent to.
    contact_email: String,

    /// How long the success notice stays visible, in seconds.
    notice_seconds: u64,

    /// The pause between handing off and reporting success, in
    /// milliseconds.
    processing_delay_ms: u64,

    /// Whether check-in/check-out dates are checked for order and for
    /// check-in in the past.
    ///
    /// Off by default, in which case any non-empty date text is accepted.
    pub strict_dates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            business_name: default_business_name(),
            contact_email: default_contact_email(),
            notice_seconds: default_notice_seconds(),
            processing_delay_ms: default_processing_delay_ms(),
            strict_dates: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration at `path`, or the defaults if there is no
    /// file there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the business name.
    #[must_use]
    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    /// Returns the address inquiries are sent to.
    #[must_use]
    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    /// Returns how long the success notice stays visible.
    #[must_use]
    pub const fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }

    /// Returns the pause between hand-off and reporting success.
    #[must_use]
    pub const fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Returns the validation rules for an inquiry submitted today.
    #[must_use]
    pub fn rules(&self) -> Rules {
        Rules {
            strict_dates: self.strict_dates,
            ..Rules::default()
        }
    }

    /// Sets the business name.
    pub fn set_business_name(&mut self, name: String) {
        self.business_name = name;
    }

    /// Sets the contact address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address has no `@`.
    pub fn set_contact_email(&mut self, email: String) -> Result<(), String> {
        if !email.contains('@') {
            return Err(format!("'{email}' is not an email address"));
        }
        self.contact_email = email;
        Ok(())
    }

    /// Sets how long the success notice stays visible, in seconds.
    pub const fn set_notice_seconds(&mut self, seconds: u64) {
        self.notice_seconds = seconds;
    }

    /// Sets the pause between hand-off and reporting success, in
    /// milliseconds.
    pub const fn set_processing_delay_ms(&mut self, millis: u64) {
        self.processing_delay_ms = millis;
    }
}

fn default_business_name() -> String {
    "Bee Hive Villa".to_string()
}

fn default_contact_email() -> String {
    "info@beehivevilla.com".to_string()
}

const fn default_notice_seconds() -> u64 {
    5
}

const fn default_processing_delay_ms() -> u64 {
    1000
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_business_name")]
        business_name: String,

        #[serde(default = "default_contact_email")]
        contact_email: String,

        #[serde(default = "default_notice_seconds")]
        notice_seconds: u64,

        #[serde(default = "default_processing_delay_ms")]
        processing_delay_ms: u64,

        #[serde(default)]
        strict_dates: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                business_name,
                contact_email,
                notice_seconds,
                processing_delay_ms,
                strict_dates,
            } => Self {
                business_name,
                contact_email,
                notice_seconds,
                processing_delay_ms,
                strict_dates,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            business_name: config.business_name,
            contact_email: config.contact_email,
            notice_seconds: config.notice_seconds,
            processing_delay_ms: config.processing_delay_ms,
            strict_dates: config.strict_dates,
        }
    }
}
