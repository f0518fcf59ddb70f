//! Booking inquiries for Bee Hive Villa
//!
//! Guests fill in an inquiry form; it is validated field by field, composed
//! into a message and handed off to their mail client as a `mailto:` link.
//! The static site content (rooms, amenities, gallery, attractions) lives
//! here too.

pub mod domain;
pub use domain::{
    BookingInquiry, Catalog, ComposedMessage, Config, Field, FormSession, InquiryForm,
    MailHandoff, Rules, ValidationErrors,
};
