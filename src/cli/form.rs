//! Inquiry fields as command-line arguments.

use std::path::{Path, PathBuf};

use anyhow::Context;
use beehive::{InquiryForm, domain::RoomType};

/// The inquiry form, one flag per field.
///
/// Fields can also be read from a JSON or YAML file with `--from`; flags
/// given alongside it take precedence.
#[derive(Debug, Default, clap::Args)]
pub struct FormArgs {
    /// Read the inquiry from a JSON or YAML file
    #[arg(long, value_name = "FILE")]
    from: Option<PathBuf>,

    /// Your full name
    #[arg(long)]
    name: Option<String>,

    /// Your email address
    #[arg(long)]
    email: Option<String>,

    /// Your phone number
    #[arg(long)]
    phone: Option<String>,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    check_in: Option<String>,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    check_out: Option<String>,

    /// Number of guests (1-6)
    #[arg(long, short)]
    guests: Option<String>,

    /// Room preference
    #[arg(long, value_enum)]
    room: Option<RoomType>,

    /// Interested in the bee keeping experience
    #[arg(long)]
    bee_keeping: bool,

    /// Special requests or questions
    #[arg(long, short)]
    message: Option<String>,
}

impl FormArgs {
    /// Builds the raw form from the file (if any) and the flags.
    pub fn into_form(self) -> anyhow::Result<InquiryForm> {
        let mut form = match &self.from {
            Some(path) => read_form(path)?,
            None => InquiryForm::default(),
        };

        let overrides = [
            (&mut form.name, self.name),
            (&mut form.email, self.email),
            (&mut form.phone, self.phone),
            (&mut form.check_in, self.check_in),
            (&mut form.check_out, self.check_out),
            (&mut form.guests, self.guests),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(room) = self.room {
            form.room = Some(room.value().to_string());
        }
        if self.bee_keeping {
            form.bee_keeping = Some(true);
        }
        if self.message.is_some() {
            form.message = self.message;
        }

        Ok(form)
    }
}

fn read_form(path: &Path) -> anyhow::Result<InquiryForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    let form = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid inquiry JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid inquiry YAML in {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), "inquiry read from file");
    Ok(form)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn flags_fill_the_form() {
        let args = FormArgs {
            name: Some("Jane Doe".to_string()),
            guests: Some("2".to_string()),
            room: Some(RoomType::PremiumTwin),
            bee_keeping: true,
            ..FormArgs::default()
        };

        let form = args.into_form().unwrap();

        assert_eq!(form.name, "Jane Doe");
        assert_eq!(form.guests, "2");
        assert_eq!(form.room.as_deref(), Some("premium-twin"));
        assert_eq!(form.bee_keeping, Some(true));
        assert!(form.email.is_empty());
    }

    #[test]
    fn flags_override_file_values() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"name":"Jane Doe","email":"old@example.com","guests":"3"}"#)
            .unwrap();

        let args = FormArgs {
            from: Some(file.path().to_path_buf()),
            email: Some("new@example.com".to_string()),
            ..FormArgs::default()
        };

        let form = args.into_form().unwrap();

        assert_eq!(form.name, "Jane Doe");
        assert_eq!(form.email, "new@example.com");
        assert_eq!(form.guests, "3");
    }

    #[test]
    fn yaml_files_are_accepted() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"name: Jane Doe\ncheckIn: 2025-08-01\nbeeKeeping: true\n")
            .unwrap();

        let args = FormArgs {
            from: Some(file.path().to_path_buf()),
            ..FormArgs::default()
        };

        let form = args.into_form().unwrap();

        assert_eq!(form.check_in, "2025-08-01");
        assert_eq!(form.bee_keeping, Some(true));
    }
}
