//! Domain models for the villa inquiry toolkit.
//!
//! This module contains the booking inquiry and its validation, message
//! composition and hand-off, the static site catalog, and configuration.

/// Raw and validated booking inquiry types.
pub mod inquiry;
pub use inquiry::{BookingInquiry, Field, GuestCount, InquiryForm, RoomType};

/// All-fields validation of a booking inquiry.
pub mod validation;
pub use validation::{FieldError, Rules, ValidationErrors};

/// Message composition and `mailto:` URIs.
pub mod compose;
pub use compose::{ComposedMessage, Composer};

/// Handing a composed message to an external mail client.
pub mod handoff;
pub use handoff::{HandoffError, MailHandoff, PrintHandoff, SystemMailClient};

/// The per-form submission state machine.
pub mod submission;
pub use submission::{FormSession, Status, SubmitError, SuccessNotice};

/// Static site content.
pub mod catalog;
pub use catalog::{Catalog, GalleryCategory, GalleryFilter};

/// Section navigation and the mobile menu.
pub mod navigation;
pub use navigation::{MobileMenu, NavLink};

mod config;
pub use config::Config;
