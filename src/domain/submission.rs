//! One booking form and the life of its submission attempts.
//!
//! Each attempt runs `Validating`, then either stops with field errors or
//! goes on to `Submitting`, which ends in a success notice that expires on
//! its own or in a failure message. Nothing is retried or queued.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::domain::{
    Config, InquiryForm,
    compose::{ComposedMessage, Composer},
    handoff::{HandoffError, MailHandoff},
    validation::{Rules, ValidationErrors, validate},
};

/// Shown when the mail client could not be reached.
pub const FAILURE_MESSAGE: &str =
    "Sorry, your inquiry could not be prepared. Please try again or contact us directly.";

/// Where a [`FormSession`] is in its submission cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Waiting for input. Field errors from the last attempt may be shown.
    Idle,
    /// An inquiry is being handed off; the submit control is disabled.
    Submitting,
    /// The last attempt was handed off.
    Succeeded(SuccessNotice),
    /// The last attempt could not be handed off.
    Failed(String),
}

/// The notice shown after a successful hand-off, until it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessNotice {
    expires_at: Instant,
}

impl SuccessNotice {
    /// The notice heading.
    pub const TITLE: &'static str = "Inquiry Sent Successfully!";

    /// The notice text.
    pub const MESSAGE: &'static str = "Your email client has opened with your inquiry details. \
                                       Please send the email to complete your booking request.";

    fn new(duration: Duration) -> Self {
        Self {
            expires_at: Instant::now() + duration,
        }
    }

    /// When the notice disappears.
    #[must_use]
    pub const fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whether the notice is still showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Why a submission attempt did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// One or more required fields are invalid.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The mail client could not be reached.
    #[error("inquiry hand-off failed: {0}")]
    Handoff(#[from] HandoffError),
}

/// The state of a single inquiry form.
///
/// `submit` borrows the session mutably for the whole attempt, so a form
/// can never have two submissions in flight.
#[derive(Debug, Clone)]
pub struct FormSession {
    form: InquiryForm,
    errors: Option<ValidationErrors>,
    status: Status,
    composer: Composer,
    rules: Rules,
    processing_delay: Duration,
    notice_duration: Duration,
}

impl FormSession {
    /// Creates an empty form using the business identity and timings in
    /// `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            form: InquiryForm::default(),
            errors: None,
            status: Status::Idle,
            composer: Composer::from_config(config),
            rules: config.rules(),
            processing_delay: config.processing_delay(),
            notice_duration: config.notice_duration(),
        }
    }

    /// Replaces the validation rules.
    #[must_use]
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// The current field values.
    #[must_use]
    pub const fn form(&self) -> &InquiryForm {
        &self.form
    }

    /// Mutable access to the field values, for editing.
    pub const fn form_mut(&mut self) -> &mut InquiryForm {
        &mut self.form
    }

    /// Replaces all field values.
    pub fn set_form(&mut self, form: InquiryForm) {
        self.form = form;
    }

    /// Field errors from the last attempt, if it failed validation.
    #[must_use]
    pub const fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    /// The current status.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Whether an attempt is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.status, Status::Submitting)
    }

    /// The success notice, while it is visible.
    #[must_use]
    pub fn notice(&self) -> Option<&SuccessNotice> {
        match &self.status {
            Status::Succeeded(notice) if notice.is_visible() => Some(notice),
            _ => None,
        }
    }

    /// Runs one submission attempt.
    ///
    /// On success the fields are cleared and a [`SuccessNotice`] is shown;
    /// the composed message is returned. On failure the fields are left as
    /// they were.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Validation`] if any required field is invalid. The
    ///   errors are also kept on the session.
    /// - [`SubmitError::Handoff`] if the mail client could not be reached.
    pub async fn submit<H>(&mut self, handoff: &H) -> Result<ComposedMessage, SubmitError>
    where
        H: MailHandoff + ?Sized,
    {
        let span = info_span!("submit", attempt = %Uuid::new_v4());
        self.attempt(handoff).instrument(span).await
    }

    async fn attempt<H>(&mut self, handoff: &H) -> Result<ComposedMessage, SubmitError>
    where
        H: MailHandoff + ?Sized,
    {
        self.status = Status::Idle;

        let inquiry = match validate(&self.form, &self.rules) {
            Ok(inquiry) => {
                self.errors = None;
                inquiry
            }
            Err(errors) => {
                tracing::info!(failed = errors.len(), "inquiry rejected");
                self.errors = Some(errors.clone());
                return Err(errors.into());
            }
        };

        self.status = Status::Submitting;
        let message = self.composer.compose(&inquiry);

        if let Err(error) = handoff.hand_off(&message.mailto_uri()) {
            tracing::warn!(%error, "inquiry hand-off failed");
            self.status = Status::Failed(FAILURE_MESSAGE.to_string());
            return Err(error.into());
        }

        tokio::time::sleep(self.processing_delay).await;

        tracing::info!(to = %message.to, "inquiry handed off");
        self.form.clear();
        self.status = Status::Succeeded(SuccessNotice::new(self.notice_duration));
        Ok(message)
    }

    /// Waits for the success notice to expire, then dismisses it.
    ///
    /// Returns immediately if no notice is showing.
    pub async fn dismiss_expired_notice(&mut self) {
        if let Status::Succeeded(notice) = self.status {
            tokio::time::sleep_until(notice.expires_at()).await;
            tracing::debug!("success notice dismissed");
            self.status = Status::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io};

    use super::*;
    use crate::domain::Field;

    #[derive(Default)]
    struct Recorder {
        uris: RefCell<Vec<String>>,
    }

    impl MailHandoff for Recorder {
        fn hand_off(&self, uri: &str) -> Result<(), HandoffError> {
            self.uris.borrow_mut().push(uri.to_string());
            Ok(())
        }
    }

    struct NoMailClient;

    impl MailHandoff for NoMailClient {
        fn hand_off(&self, _: &str) -> Result<(), HandoffError> {
            Err(HandoffError::Write(io::Error::other("no mail client")))
        }
    }

    fn filled_session() -> FormSession {
        let mut session = FormSession::new(&Config::default());
        session.set_form(InquiryForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "0712345678".to_string(),
            check_in: "2025-08-01".to_string(),
            check_out: "2025-08-05".to_string(),
            guests: "2".to_string(),
            room: Some("luxury-suite".to_string()),
            bee_keeping: Some(true),
            message: Some("Late arrival".to_string()),
        });
        session
    }

    #[tokio::test(start_paused = true)]
    async fn success_clears_form_and_shows_notice() {
        let mut session = filled_session();
        let recorder = Recorder::default();
        let started = Instant::now();

        let message = session.submit(&recorder).await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(1));
        assert_eq!(message.subject, "Booking Inquiry from Jane Doe");
        assert_eq!(recorder.uris.borrow().as_slice(), [message.mailto_uri()]);
        assert!(session.form().is_blank());
        assert!(session.errors().is_none());
        assert!(!session.is_submitting());
        assert!(session.notice().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn notice_expires_without_user_action() {
        let mut session = filled_session();
        session.submit(&Recorder::default()).await.unwrap();

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert!(session.notice().is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(session.notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_waits_for_notice_duration() {
        let mut session = filled_session();
        session.submit(&Recorder::default()).await.unwrap();
        let shown = Instant::now();

        session.dismiss_expired_notice().await;

        assert_eq!(shown.elapsed(), Duration::from_secs(5));
        assert_eq!(session.status(), &Status::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_without_notice_returns_immediately() {
        let mut session = FormSession::new(&Config::default());
        let started = Instant::now();

        session.dismiss_expired_notice().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(session.status(), &Status::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn handoff_failure_keeps_fields() {
        let mut session = filled_session();
        let before = session.form().clone();

        let error = session.submit(&NoMailClient).await.unwrap_err();

        assert!(matches!(error, SubmitError::Handoff(_)));
        assert_eq!(session.form(), &before);
        assert_eq!(
            session.status(),
            &Status::Failed(FAILURE_MESSAGE.to_string())
        );
        assert!(session.notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_form_is_never_handed_off() {
        let mut session = filled_session();
        session.form_mut().email = "not-an-email".to_string();
        session.form_mut().name = "J".to_string();
        let recorder = Recorder::default();

        let error = session.submit(&recorder).await.unwrap_err();

        let SubmitError::Validation(errors) = error else {
            panic!("expected validation error, got {error:?}");
        };
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::Name));
        assert_eq!(session.errors(), Some(&errors));
        assert!(recorder.uris.borrow().is_empty());
        assert_eq!(session.form().email, "not-an-email");
        assert_eq!(session.status(), &Status::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn corrected_resubmission_clears_errors() {
        let mut session = filled_session();
        session.form_mut().phone = "123".to_string();
        let recorder = Recorder::default();

        assert!(session.submit(&recorder).await.is_err());
        assert!(session.errors().is_some());

        session.form_mut().phone = "0712345678".to_string();
        session.submit(&recorder).await.unwrap();

        assert!(session.errors().is_none());
        assert_eq!(recorder.uris.borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn strict_rules_block_reversed_stay() {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let mut session = filled_session().with_rules(Rules {
            strict_dates: true,
            today,
        });
        session.form_mut().check_out = "2025-07-30".to_string();
        let recorder = Recorder::default();

        let error = session.submit(&recorder).await.unwrap_err();

        assert!(matches!(error, SubmitError::Validation(ref errors) if errors.contains(Field::CheckOut)));
        assert!(recorder.uris.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_failure_can_succeed() {
        let mut session = filled_session();

        assert!(session.submit(&NoMailClient).await.is_err());
        session.submit(&Recorder::default()).await.unwrap();

        assert!(session.notice().is_some());
        assert!(session.form().is_blank());
    }
}
