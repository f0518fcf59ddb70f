use std::{
    io::{self, Write},
    process::Command,
    sync::Mutex,
};

use tracing::instrument;

/// Failure to pass a message on to the mail client.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    /// The opener program could not be started.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// The program that was invoked.
        program: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The opener ran but reported failure.
    #[error("'{program}' exited with {status}")]
    Exit {
        /// The program that was invoked.
        program: &'static str,
        /// How it exited.
        status: std::process::ExitStatus,
    },

    /// The URI could not be written out.
    #[error("failed to write mailto link: {0}")]
    Write(#[from] io::Error),
}

/// Something that can open a `mailto:` URI for the guest.
///
/// Delivery is outside the toolkit's control; a successful hand-off only
/// means the mail client was asked to compose the message.
pub trait MailHandoff {
    /// Hands the URI to the mail client.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError`] if the hand-off could not be made.
    fn hand_off(&self, uri: &str) -> Result<(), HandoffError>;
}

/// Opens URIs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMailClient;

impl SystemMailClient {
    #[cfg(target_os = "macos")]
    fn command(uri: &str) -> (&'static str, Command) {
        let mut command = Command::new("open");
        command.arg(uri);
        ("open", command)
    }

    #[cfg(target_os = "windows")]
    fn command(uri: &str) -> (&'static str, Command) {
        use std::os::windows::process::CommandExt;

        let mut command = Command::new("cmd");
        command
            .args(["/C", "start", ""])
            .raw_arg(escape_for_cmd(uri));
        ("cmd", command)
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn command(uri: &str) -> (&'static str, Command) {
        let mut command = Command::new("xdg-open");
        command.arg(uri);
        ("xdg-open", command)
    }
}

/// Caret-escapes the characters `cmd.exe` treats specially, so `&` between
/// query parameters is not read as a command separator and `%XX` escapes
/// are not expanded as variables.
#[cfg(any(target_os = "windows", test))]
fn escape_for_cmd(uri: &str) -> String {
    let mut escaped = String::with_capacity(uri.len());
    for c in uri.chars() {
        if matches!(c, '^' | '&' | '|' | '<' | '>' | '(' | ')' | '%' | '!' | '"') {
            escaped.push('^');
        }
        escaped.push(c);
    }
    escaped
}

impl MailHandoff for SystemMailClient {
    #[instrument(level = "debug", skip_all)]
    fn hand_off(&self, uri: &str) -> Result<(), HandoffError> {
        let (program, mut command) = Self::command(uri);
        let status = command
            .status()
            .map_err(|source| HandoffError::Launch { program, source })?;

        if status.success() {
            tracing::debug!(program, "mail client launched");
            Ok(())
        } else {
            Err(HandoffError::Exit { program, status })
        }
    }
}

/// Writes the URI out instead of opening it.
///
/// Useful on headless machines, where the link can be copied by hand.
#[derive(Debug)]
pub struct PrintHandoff<W> {
    writer: Mutex<W>,
}

impl<W: Write> PrintHandoff<W> {
    /// Creates a hand-off that writes URIs, one per line, to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write> MailHandoff for PrintHandoff<W> {
    fn hand_off(&self, uri: &str) -> Result<(), HandoffError> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(writer, "{uri}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_handoff_writes_one_line_per_uri() {
        let handoff = PrintHandoff::new(Vec::new());

        handoff.hand_off("mailto:a@b.com?subject=x").unwrap();
        handoff.hand_off("mailto:a@b.com?subject=y").unwrap();

        let written = String::from_utf8(handoff.into_inner()).unwrap();
        assert_eq!(
            written,
            "mailto:a@b.com?subject=x\nmailto:a@b.com?subject=y\n"
        );
    }

    #[test]
    fn cmd_escaping_keeps_the_body_parameter() {
        let uri = "mailto:info@beehivevilla.com?subject=Booking%20Inquiry&body=Dear%20Team";

        assert_eq!(
            escape_for_cmd(uri),
            "mailto:info@beehivevilla.com?subject=Booking^%20Inquiry^&body=Dear^%20Team"
        );
    }

    #[test]
    fn cmd_escaping_covers_unreserved_punctuation() {
        assert_eq!(escape_for_cmd("(it's)!"), "^(it's^)^!");
        assert_eq!(escape_for_cmd("plain"), "plain");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn print_handoff_reports_write_failures() {
        let error = PrintHandoff::new(BrokenPipe)
            .hand_off("mailto:a@b.com")
            .unwrap_err();

        assert!(matches!(error, HandoffError::Write(_)));
        assert!(error.to_string().starts_with("failed to write mailto link"));
    }
}
