use std::{fmt, num::NonZeroU8, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// Raw booking inquiry input, exactly as entered into the form.
///
/// Nothing here is checked. Text fields hold whatever the guest typed and
/// the optional fields may be missing entirely. Use
/// [`validate`](crate::domain::validation::validate) to turn this into a
/// [`BookingInquiry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryForm {
    /// The guest's full name.
    pub name: String,
    /// The guest's email address.
    pub email: String,
    /// The guest's phone number.
    pub phone: String,
    /// Arrival date, as entered.
    pub check_in: String,
    /// Departure date, as entered.
    pub check_out: String,
    /// Number of guests, as selected.
    pub guests: String,
    /// Room preference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Interest in the bee keeping experience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bee_keeping: Option<bool>,
    /// Special requests or questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InquiryForm {
    /// Returns `true` if no field has been filled in.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The fields of the inquiry form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Guest name.
    Name,
    /// Guest email.
    Email,
    /// Guest phone.
    Phone,
    /// Check-in date.
    CheckIn,
    /// Check-out date.
    CheckOut,
    /// Number of guests.
    Guests,
    /// Room preference.
    Room,
    /// Bee keeping interest.
    BeeKeeping,
    /// Special requests.
    Message,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::CheckIn,
        Self::CheckOut,
        Self::Guests,
        Self::Room,
        Self::BeeKeeping,
        Self::Message,
    ];

    /// The field's name as used by the form and in serialized inquiries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CheckIn => "checkIn",
            Self::CheckOut => "checkOut",
            Self::Guests => "guests",
            Self::Room => "room",
            Self::BeeKeeping => "beeKeeping",
            Self::Message => "message",
        }
    }

    /// The human-readable label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::CheckIn => "Check-in Date",
            Self::CheckOut => "Check-out Date",
            Self::Guests => "Number of Guests",
            Self::Room => "Room Preference",
            Self::BeeKeeping => "Bee Keeping Experience",
            Self::Message => "Special Requests or Questions",
        }
    }

    /// Whether the form requires a value for this field.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Room | Self::BeeKeeping | Self::Message)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown inquiry field '{0}'")]
pub struct UnknownFieldError(String);

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// The number of guests on an inquiry, between 1 and [`GuestCount::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GuestCount(NonZeroU8);

impl GuestCount {
    /// The largest party the form accepts.
    pub const MAX: u8 = 6;

    /// Creates a guest count, returning `None` outside `1..=MAX`.
    #[must_use]
    pub fn new(count: u8) -> Option<Self> {
        if count > Self::MAX {
            return None;
        }
        NonZeroU8::new(count).map(Self)
    }

    /// Returns the count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Every selectable count, smallest first.
    pub fn options() -> impl Iterator<Item = Self> {
        (1..=Self::MAX).filter_map(Self::new)
    }

    /// The label used by the guest selector, e.g. "1 Guest" or "3 Guests".
    #[must_use]
    pub fn label(self) -> String {
        if self.get() == 1 {
            "1 Guest".to_string()
        } else {
            format!("{} Guests", self.get())
        }
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The room types offered by the room preference selector.
///
/// The inquiry itself stores the preference verbatim; this enum exists so
/// front ends can offer the known values and the catalog can resolve them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    /// Standard Twin Room.
    StandardTwin,
    /// Deluxe Twin Room.
    DeluxeTwin,
    /// Premium Twin Room.
    PremiumTwin,
    /// Luxury Twin Suite.
    LuxurySuite,
}

impl RoomType {
    /// All room types, in the order the selector lists them.
    pub const ALL: [Self; 4] = [
        Self::StandardTwin,
        Self::DeluxeTwin,
        Self::PremiumTwin,
        Self::LuxurySuite,
    ];

    /// The value submitted by the form.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::StandardTwin => "standard-twin",
            Self::DeluxeTwin => "deluxe-twin",
            Self::PremiumTwin => "premium-twin",
            Self::LuxurySuite => "luxury-suite",
        }
    }

    /// The name shown in the selector.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::StandardTwin => "Standard Twin Room",
            Self::DeluxeTwin => "Deluxe Twin Room",
            Self::PremiumTwin => "Premium Twin Room",
            Self::LuxurySuite => "Luxury Twin Suite",
        }
    }

    /// Looks up a room type by its form value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|room| room.value() == value)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// A booking inquiry whose required fields have all been validated.
///
/// The only way to obtain one is through
/// [`validate`](crate::domain::validation::validate), so holding a
/// `BookingInquiry` means it is safe to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInquiry {
    pub(crate) name: NonEmptyString,
    pub(crate) email: NonEmptyString,
    pub(crate) phone: NonEmptyString,
    pub(crate) check_in: NonEmptyString,
    pub(crate) check_out: NonEmptyString,
    pub(crate) guests: GuestCount,
    pub(crate) room: Option<NonEmptyString>,
    pub(crate) bee_keeping: bool,
    pub(crate) message: Option<NonEmptyString>,
}

impl BookingInquiry {
    /// The guest's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The guest's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// The guest's phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// The arrival date, as entered.
    #[must_use]
    pub fn check_in(&self) -> &str {
        self.check_in.as_str()
    }

    /// The departure date, as entered.
    #[must_use]
    pub fn check_out(&self) -> &str {
        self.check_out.as_str()
    }

    /// The number of guests.
    #[must_use]
    pub const fn guests(&self) -> GuestCount {
        self.guests
    }

    /// The room preference, verbatim, if one was given.
    #[must_use]
    pub fn room(&self) -> Option<&str> {
        self.room.as_ref().map(NonEmptyString::as_str)
    }

    /// Whether the guest is interested in the bee keeping experience.
    #[must_use]
    pub const fn bee_keeping(&self) -> bool {
        self.bee_keeping
    }

    /// Special requests or questions, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(NonEmptyString::as_str)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let error = "checkin".parse::<Field>().unwrap_err();
        assert_eq!(error.to_string(), "Unknown inquiry field 'checkin'");
    }

    #[test]
    fn optional_fields_are_not_required() {
        let required: Vec<_> = Field::ALL.into_iter().filter(|f| f.is_required()).collect();
        assert_eq!(
            required,
            [
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::CheckIn,
                Field::CheckOut,
                Field::Guests
            ]
        );
    }

    #[test_case(0, None; "zero")]
    #[test_case(1, Some(1); "one")]
    #[test_case(6, Some(6); "max")]
    #[test_case(7, None; "above max")]
    fn guest_count_bounds(count: u8, expected: Option<u8>) {
        assert_eq!(GuestCount::new(count).map(GuestCount::get), expected);
    }

    #[test]
    fn guest_count_labels() {
        let labels: Vec<_> = GuestCount::options().map(GuestCount::label).collect();
        assert_eq!(labels.first().unwrap(), "1 Guest");
        assert_eq!(labels.last().unwrap(), "6 Guests");
        assert_eq!(labels.len(), 6);
    }

    #[test]
    fn room_type_values() {
        assert_eq!(
            RoomType::from_value("luxury-suite"),
            Some(RoomType::LuxurySuite)
        );
        assert_eq!(RoomType::from_value("penthouse"), None);
        assert_eq!(RoomType::DeluxeTwin.title(), "Deluxe Twin Room");
    }

    #[test]
    fn form_deserializes_wire_names() {
        let form: InquiryForm = serde_json::from_str(
            r#"{"name":"Jane Doe","checkIn":"2025-08-01","beeKeeping":true}"#,
        )
        .unwrap();

        assert_eq!(form.name, "Jane Doe");
        assert_eq!(form.check_in, "2025-08-01");
        assert_eq!(form.bee_keeping, Some(true));
        assert!(form.email.is_empty());
        assert_eq!(form.room, None);
    }

    #[test]
    fn clear_resets_every_field() {
        let mut form = InquiryForm {
            name: "Jane".to_string(),
            message: Some("hello".to_string()),
            ..InquiryForm::default()
        };
        assert!(!form.is_blank());

        form.clear();
        assert!(form.is_blank());
    }
}
