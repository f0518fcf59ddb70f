use std::{
    io::{self, Write},
    process,
    time::Duration,
};

use beehive::{
    Field, FormSession, InquiryForm, MailHandoff, ValidationErrors,
    domain::{
        ComposedMessage, GuestCount, PrintHandoff, RoomType, Status, SubmitError, SuccessNotice,
        SystemMailClient, compose::NO_ROOM_PREFERENCE,
    },
};
use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::instrument;

use super::{Context, form::FormArgs, terminal::Colorize, validate::print_errors};

#[derive(Debug, Parser)]
pub struct Inquire {
    #[command(flatten)]
    form: FormArgs,

    /// Prompt for missing fields and for corrections
    #[arg(long, short)]
    interactive: bool,

    /// Print the mailto link instead of opening the mail client
    #[arg(long)]
    print: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Inquire {
    #[instrument(level = "debug", skip_all)]
    pub async fn run(self, context: &Context) -> anyhow::Result<()> {
        let config = context.config()?;
        let mut session = FormSession::new(&config);
        session.set_form(self.form.into_form()?);

        let handoff: Box<dyn MailHandoff> = if self.print {
            print_handoff(io::stdout(), io::stderr(), self.output)
        } else {
            Box::new(SystemMailClient)
        };

        if self.interactive {
            prompt_fields(session.form_mut(), None)?;
        }

        loop {
            let spinner = spinner(matches!(self.output, OutputFormat::Table) && !self.print)?;
            let result = session.submit(handoff.as_ref()).await;
            spinner.finish_and_clear();

            match result {
                Ok(message) => {
                    match self.output {
                        OutputFormat::Table => {
                            if session.notice().is_some() {
                                print_notice();
                            }
                        }
                        OutputFormat::Json => write_sent(&mut io::stdout().lock(), &message)?,
                    }
                    return Ok(());
                }
                Err(SubmitError::Validation(errors)) => {
                    if self.interactive {
                        print_errors(&errors);
                        println!();
                        prompt_fields(session.form_mut(), Some(&errors))?;
                        continue;
                    }
                    report_invalid(&errors, self.output)?;
                    process::exit(2);
                }
                Err(error @ SubmitError::Handoff(_)) => {
                    if let Status::Failed(message) = session.status() {
                        eprintln!("{}", message.error());
                    }
                    return Err(error.into());
                }
            }
        }
    }
}

/// Picks where `--print` writes the link. JSON output owns stdout, so the
/// link goes to stderr there; the JSON carries it under `mailto` anyway.
fn print_handoff<O, E>(stdout: O, stderr: E, output: OutputFormat) -> Box<dyn MailHandoff>
where
    O: Write + 'static,
    E: Write + 'static,
{
    match output {
        OutputFormat::Table => Box::new(PrintHandoff::new(stdout)),
        OutputFormat::Json => Box::new(PrintHandoff::new(stderr)),
    }
}

fn write_sent(out: &mut impl Write, message: &ComposedMessage) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(
        &mut *out,
        &serde_json::json!({
            "status": "sent",
            "message": message,
            "mailto": message.mailto_uri(),
        }),
    )?;
    writeln!(out)?;
    Ok(())
}

fn spinner(visible: bool) -> anyhow::Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Preparing Your Inquiry...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn print_notice() {
    println!("{}", format!("✓ {}", SuccessNotice::TITLE).success());
    println!("  {}", SuccessNotice::MESSAGE);
}

fn report_invalid(errors: &ValidationErrors, output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Table => print_errors(errors),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "status": "invalid",
                    "errors": errors,
                }))?
            );
        }
    }
    Ok(())
}

/// Prompts for fields. With `errors`, only the failing fields are asked
/// again; otherwise every required field that is still blank.
fn prompt_fields(form: &mut InquiryForm, errors: Option<&ValidationErrors>) -> anyhow::Result<()> {
    let wanted = |field: Field, value: &str| match errors {
        Some(errors) => errors.contains(field),
        None => value.trim().is_empty(),
    };

    let text_fields = [
        (Field::Name, &mut form.name),
        (Field::Email, &mut form.email),
        (Field::Phone, &mut form.phone),
        (Field::CheckIn, &mut form.check_in),
        (Field::CheckOut, &mut form.check_out),
    ];
    for (field, value) in text_fields {
        if wanted(field, value) {
            *value = Input::<String>::new()
                .with_prompt(field.label())
                .with_initial_text(value.clone())
                .allow_empty(true)
                .interact_text()?;
        }
    }

    if wanted(Field::Guests, &form.guests) {
        let options: Vec<GuestCount> = GuestCount::options().collect();
        let labels: Vec<String> = options.iter().map(|count| count.label()).collect();
        let selected = Select::new()
            .with_prompt(Field::Guests.label())
            .items(&labels)
            .default(1)
            .interact()?;
        form.guests = options[selected].to_string();
    }

    // optional fields are only offered on the first pass
    if errors.is_none() {
        if form.room.is_none() {
            let mut labels = vec![NO_ROOM_PREFERENCE.to_string()];
            labels.extend(RoomType::ALL.iter().map(|room| room.title().to_string()));
            let selected = Select::new()
                .with_prompt(Field::Room.label())
                .items(&labels)
                .default(0)
                .interact()?;
            form.room = selected
                .checked_sub(1)
                .map(|index| RoomType::ALL[index].value().to_string());
        }

        if form.bee_keeping.is_none() {
            form.bee_keeping = Some(
                Confirm::new()
                    .with_prompt("I'm interested in the bee keeping experience")
                    .default(false)
                    .interact()?,
            );
        }

        if form.message.is_none() {
            let message: String = Input::new()
                .with_prompt(Field::Message.label())
                .allow_empty(true)
                .interact_text()?;
            form.message = Some(message);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use beehive::Config;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn jane_doe() -> InquiryForm {
        InquiryForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            check_in: "2025-07-10".to_string(),
            check_out: "2025-07-14".to_string(),
            guests: "2".to_string(),
            ..InquiryForm::default()
        }
    }

    async fn send(output: OutputFormat) -> (SharedBuffer, SharedBuffer) {
        let stdout = SharedBuffer::default();
        let stderr = SharedBuffer::default();
        let handoff = print_handoff(stdout.clone(), stderr.clone(), output);

        let mut session = FormSession::new(&Config::default());
        session.set_form(jane_doe());
        let message = session.submit(handoff.as_ref()).await.unwrap();

        if matches!(output, OutputFormat::Json) {
            write_sent(&mut stdout.clone(), &message).unwrap();
        }
        (stdout, stderr)
    }

    #[tokio::test(start_paused = true)]
    async fn printed_json_output_is_a_single_document() {
        let (stdout, stderr) = send(OutputFormat::Json).await;

        let json: serde_json::Value = serde_json::from_str(&stdout.text()).unwrap();
        assert_eq!(json["status"], "sent");

        let uri = json["mailto"].as_str().unwrap();
        assert!(uri.starts_with("mailto:info@beehivevilla.com?subject="));
        assert_eq!(stderr.text(), format!("{uri}\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn printed_table_output_puts_the_link_on_stdout() {
        let (stdout, stderr) = send(OutputFormat::Table).await;

        assert!(stdout.text().starts_with("mailto:info@beehivevilla.com?subject="));
        assert!(stderr.text().is_empty());
    }
}
