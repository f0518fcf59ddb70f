use std::{fmt, sync::LazyLock};

use chrono::NaiveDate;
use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;
use regex::Regex;
use serde::Serialize;
use tracing::instrument;

use crate::domain::inquiry::{BookingInquiry, Field, GuestCount, InquiryForm};

/// `local@domain.tld`: no whitespace, one `@`, at least one `.` after it.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_CHARS: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Options that tune how an inquiry is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Also require ISO dates, no check-in in the past, and check-out after
    /// check-in.
    pub strict_dates: bool,
    /// The date "in the past" is measured against when `strict_dates` is
    /// set.
    pub today: NaiveDate,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            strict_dates: false,
            today: chrono::Local::now().date_naive(),
        }
    }
}

/// A single failing field and the message to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation, in form order.
///
/// Never empty, and holds at most one error per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(NonEmpty<FieldError>);

impl ValidationErrors {
    /// Iterates over the failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// The fields that failed, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(|error| error.field)
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// The number of failing fields. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let count = self.len();
        write!(
            f,
            "{count} field{} failed validation",
            if count == 1 { "" } else { "s" }
        )?;
        for error in self.iter() {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for error in self.iter() {
            map.serialize_entry(error.field.as_str(), &error.message)?;
        }
        map.end()
    }
}

/// Validates every field of `form` and returns the typed inquiry.
///
/// All fields are checked, so the error set names every problem at once.
/// Optional fields never fail; empty optional text counts as absent.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing each required field that failed.
#[instrument(level = "debug", skip_all, fields(strict_dates = rules.strict_dates))]
pub fn validate(form: &InquiryForm, rules: &Rules) -> Result<BookingInquiry, ValidationErrors> {
    let name = check_min_chars(
        Field::Name,
        &form.name,
        MIN_NAME_CHARS,
        "Name must be at least 2 characters",
    );
    let email = check_email(&form.email);
    let phone = check_min_chars(
        Field::Phone,
        &form.phone,
        MIN_PHONE_CHARS,
        "Please enter a valid phone number",
    );
    let (check_in, check_out) = check_dates(&form.check_in, &form.check_out, rules);
    let guests = check_guests(&form.guests);

    match (name, email, phone, check_in, check_out, guests) {
        (Ok(name), Ok(email), Ok(phone), Ok(check_in), Ok(check_out), Ok(guests)) => {
            Ok(BookingInquiry {
                name,
                email,
                phone,
                check_in,
                check_out,
                guests,
                room: optional_text(form.room.as_deref()),
                bee_keeping: form.bee_keeping.unwrap_or(false),
                message: optional_text(form.message.as_deref()),
            })
        }
        (name, email, phone, check_in, check_out, guests) => {
            let errors: Vec<FieldError> = [
                name.err(),
                email.err(),
                phone.err(),
                check_in.err(),
                check_out.err(),
                guests.err(),
            ]
            .into_iter()
            .flatten()
            .collect();

            tracing::debug!(failed = errors.len(), "inquiry failed validation");

            // at least one of the checks above failed to get here
            let errors = NonEmpty::from_vec(errors).expect("a failing check produced an error");
            Err(ValidationErrors(errors))
        }
    }
}

fn check_min_chars(
    field: Field,
    value: &str,
    min: usize,
    message: &str,
) -> Result<NonEmptyString, FieldError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(FieldError::new(field, message));
    }
    NonEmptyString::new(trimmed.to_string()).map_err(|_| FieldError::new(field, message))
}

fn check_email(value: &str) -> Result<NonEmptyString, FieldError> {
    let trimmed = value.trim();
    let invalid = || FieldError::new(Field::Email, "Please enter a valid email address");
    if !EMAIL.is_match(trimmed) {
        return Err(invalid());
    }
    NonEmptyString::new(trimmed.to_string()).map_err(|_| invalid())
}

fn check_required(field: Field, value: &str, message: &str) -> Result<NonEmptyString, FieldError> {
    NonEmptyString::new(value.trim().to_string()).map_err(|_| FieldError::new(field, message))
}

fn check_dates(
    check_in: &str,
    check_out: &str,
    rules: &Rules,
) -> (
    Result<NonEmptyString, FieldError>,
    Result<NonEmptyString, FieldError>,
) {
    let check_in = check_required(Field::CheckIn, check_in, "Please select a check-in date");
    let check_out = check_required(Field::CheckOut, check_out, "Please select a check-out date");

    if !rules.strict_dates {
        return (check_in, check_out);
    }

    let arrival = check_in.and_then(|value| {
        let date = parse_date(Field::CheckIn, &value)?;
        if date < rules.today {
            return Err(FieldError::new(
                Field::CheckIn,
                "Check-in date cannot be in the past",
            ));
        }
        Ok((value, date))
    });

    let departure = check_out.and_then(|value| {
        let date = parse_date(Field::CheckOut, &value)?;
        Ok((value, date))
    });

    let departure = match (&arrival, departure) {
        (Ok((_, arrival)), Ok((_, departure))) if departure <= *arrival => Err(FieldError::new(
            Field::CheckOut,
            "Check-out date must be after check-in date",
        )),
        (_, departure) => departure,
    };

    (arrival.map(|(value, _)| value), departure.map(|(value, _)| value))
}

fn parse_date(field: Field, value: &NonEmptyString) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value.as_str(), DATE_FORMAT)
        .map_err(|_| FieldError::new(field, "Please enter a valid date"))
}

fn check_guests(value: &str) -> Result<GuestCount, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(
            Field::Guests,
            "Please select number of guests",
        ));
    }
    GuestCount::options()
        .find(|count| count.to_string() == trimmed)
        .ok_or_else(|| {
            FieldError::new(
                Field::Guests,
                format!("Number of guests must be between 1 and {}", GuestCount::MAX),
            )
        })
}

fn optional_text(value: Option<&str>) -> Option<NonEmptyString> {
    value
        .map(str::trim)
        .and_then(|text| NonEmptyString::new(text.to_string()).ok())
}
