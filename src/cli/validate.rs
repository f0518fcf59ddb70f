use std::process;

use beehive::{Field, ValidationErrors, domain::validation::validate};
use clap::Parser;
use tracing::instrument;

use super::{Context, form::FormArgs, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Check every field of an inquiry without sending it")]
pub struct Validate {
    #[command(flatten)]
    form: FormArgs,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Validate {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let config = context.config()?;
        let form = self.form.into_form()?;

        let result = validate(&form, &config.rules());
        let errors = result.as_ref().err();

        match self.output {
            OutputFormat::Table => {
                if !self.quiet {
                    Self::output_table(errors);
                }
            }
            OutputFormat::Json => Self::output_json(errors)?,
            OutputFormat::Summary => Self::output_summary(errors),
        }

        // Exit with appropriate code
        if errors.is_some() {
            process::exit(2);
        }

        Ok(())
    }

    fn output_table(errors: Option<&ValidationErrors>) {
        println!("Validating inquiry...\n");

        for field in Field::ALL {
            let line = match errors.and_then(|errors| errors.get(field)) {
                Some(message) => format!("✗ {:<16} {message}", field.label()).warning(),
                None if field.is_required() => format!("✓ {}", field.label()),
                None => format!("✓ {} (optional)", field.label()).dim(),
            };
            println!("{line}");
        }

        match errors {
            None => println!("\n{}", "Inquiry is ready to send".success()),
            Some(errors) => println!(
                "\n{}",
                format!("Summary: {}", needing_attention(errors.len())).warning()
            ),
        }
    }

    fn output_json(errors: Option<&ValidationErrors>) -> anyhow::Result<()> {
        use serde_json::json;

        let output = json!({
            "status": if errors.is_none() { "valid" } else { "invalid" },
            "errors": errors.map_or_else(|| json!({}), |errors| json!(errors)),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(errors: Option<&ValidationErrors>) {
        println!("errors={}", errors.map_or(0, ValidationErrors::len));
    }
}

/// Prints one line per failing field.
pub fn print_errors(errors: &ValidationErrors) {
    println!(
        "{}",
        format!("✗ Inquiry not sent: {}", needing_attention(errors.len())).warning()
    );
    for error in errors.iter() {
        println!("  • {}: {}", error.field.label(), error.message);
    }
}

fn needing_attention(count: usize) -> String {
    if count == 1 {
        "1 field needs attention".to_string()
    } else {
        format!("{count} fields need attention")
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(1, "1 field needs attention"; "single")]
    #[test_case(3, "3 fields need attention"; "several")]
    fn attention_count_is_pluralised(count: usize, expected: &str) {
        assert_eq!(needing_attention(count), expected);
    }
}
