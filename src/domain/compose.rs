use std::fmt::Write as _;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use tracing::instrument;

use crate::domain::{BookingInquiry, Config};

/// Bytes left alone by `encodeURIComponent`; everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Placeholder used when the guest did not pick a room.
pub const NO_ROOM_PREFERENCE: &str = "No preference";

/// An inquiry email, ready to be handed to a mail client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedMessage {
    /// The business contact address.
    pub to: String,
    /// Subject line, naming the guest.
    pub subject: String,
    /// The message body.
    pub body: String,
}

impl ComposedMessage {
    /// Builds the `mailto:` URI that opens this message in a mail client.
    ///
    /// Subject and body are percent-encoded the way browsers encode URI
    /// components.
    ///
    /// # Examples
    ///
    /// ```
    /// use beehive::ComposedMessage;
    ///
    /// let message = ComposedMessage {
    ///     to: "info@beehivevilla.com".to_string(),
    ///     subject: "Booking Inquiry from Jane".to_string(),
    ///     body: "Hi & bye".to_string(),
    /// };
    ///
    /// assert_eq!(
    ///     message.mailto_uri(),
    ///     "mailto:info@beehivevilla.com?subject=Booking%20Inquiry%20from%20Jane&body=Hi%20%26%20bye"
    /// );
    /// ```
    #[must_use]
    pub fn mailto_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.to,
            utf8_percent_encode(&self.subject, URI_COMPONENT),
            utf8_percent_encode(&self.body, URI_COMPONENT),
        )
    }
}

/// Turns validated inquiries into messages addressed to the business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    business_name: String,
    contact_email: String,
}

impl Composer {
    /// Creates a composer for the given business.
    #[must_use]
    pub fn new(business_name: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            contact_email: contact_email.into(),
        }
    }

    /// Creates a composer using the business identity from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.business_name(), config.contact_email())
    }

    /// The address messages are sent to.
    #[must_use]
    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    /// Composes the inquiry email for `inquiry`.
    #[must_use]
    #[instrument(level = "debug", skip_all)]
    pub fn compose(&self, inquiry: &BookingInquiry) -> ComposedMessage {
        ComposedMessage {
            to: self.contact_email.clone(),
            subject: format!("Booking Inquiry from {}", inquiry.name()),
            body: self.body(inquiry),
        }
    }

    fn body(&self, inquiry: &BookingInquiry) -> String {
        let mut body = String::new();

        // writing to a String cannot fail
        let _ = write!(
            body,
            "Dear {business} Team,\n\
             \n\
             I would like to make a booking inquiry with the following details:\n\
             \n\
             Guest Information:\n\
             - Name: {name}\n\
             - Email: {email}\n\
             - Phone: {phone}\n\
             \n\
             Booking Details:\n\
             - Check-in Date: {check_in}\n\
             - Check-out Date: {check_out}\n\
             - Number of Guests: {guests}\n\
             - Room Preference: {room}\n\
             - Interested in Bee Keeping Experience: {bee_keeping}\n",
            business = self.business_name,
            name = inquiry.name(),
            email = inquiry.email(),
            phone = inquiry.phone(),
            check_in = inquiry.check_in(),
            check_out = inquiry.check_out(),
            guests = inquiry.guests(),
            room = inquiry.room().unwrap_or(NO_ROOM_PREFERENCE),
            bee_keeping = if inquiry.bee_keeping() { "Yes" } else { "No" },
        );

        if let Some(message) = inquiry.message() {
            let _ = write!(body, "\nSpecial Requests/Questions:\n{message}\n");
        }

        let _ = write!(
            body,
            "\nLooking forward to your response.\n\nBest regards,\n{}\n",
            inquiry.name()
        );

        body
    }
}
