//! Identity (KYC) form validation.
//!
//! Every rule checks the trimmed value. A blank value is treated as absent:
//! a required field that is blank reports only its "required" message, and
//! format rules run on present values only, which is also what makes the
//! tax ID and national ID optional.

use courseflow_sdk::objects::{FieldErrors, IdentityField, IdentityRecord};
use validator::{Validate, ValidationErrors};

// Literal patterns; compiling them cannot fail.
#[allow(clippy::expect_used)]
mod patterns {
    use std::sync::LazyLock;

    use regex::Regex;

    /// At least two non-empty dot-separated domain labels.
    pub(super) static EMAIL_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email domain pattern")
    });
    pub(super) static MOBILE_NUMBER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile number pattern"));
    pub(super) static POSTAL_CODE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("postal code pattern"));
    pub(super) static TAX_ID: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("tax id pattern"));
    pub(super) static NATIONAL_ID: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("national id pattern"));
}

use patterns::{EMAIL_DOMAIN, MOBILE_NUMBER, NATIONAL_ID, POSTAL_CODE, TAX_ID};

/// Trimmed view of an [`IdentityRecord`]; `None` stands for a blank value.
#[derive(Debug, Validate)]
struct IdentityForm<'a> {
    #[validate(required(message = "Full name is required"))]
    full_name: Option<&'a str>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Please enter a valid email address"),
        regex(path = *EMAIL_DOMAIN, message = "Please enter a valid email address")
    )]
    email: Option<&'a str>,
    #[validate(
        required(message = "Phone number is required"),
        regex(path = *MOBILE_NUMBER, message = "Please enter a valid 10-digit mobile number")
    )]
    phone: Option<&'a str>,
    #[validate(required(message = "Date of birth is required"))]
    date_of_birth: Option<&'a str>,
    #[validate(required(message = "Gender is required"))]
    gender: Option<&'a str>,
    #[validate(required(message = "Address is required"))]
    address_line1: Option<&'a str>,
    #[validate(required(message = "City is required"))]
    city: Option<&'a str>,
    #[validate(required(message = "State is required"))]
    state: Option<&'a str>,
    #[validate(
        required(message = "PIN code is required"),
        regex(path = *POSTAL_CODE, message = "Please enter a valid 6-digit PIN code")
    )]
    postal_code: Option<&'a str>,
    #[validate(regex(path = *TAX_ID, message = "Please enter a valid PAN (e.g. ABCDE1234F)"))]
    tax_id: Option<&'a str>,
    #[validate(regex(path = *NATIONAL_ID, message = "Aadhaar number must be exactly 12 digits"))]
    national_id: Option<&'a str>,
    #[validate(required(message = "Occupation is required"))]
    occupation: Option<&'a str>,
    #[validate(required(message = "Income range is required"))]
    income_bracket: Option<&'a str>,
}

impl<'a> IdentityForm<'a> {
    fn new(record: &'a IdentityRecord) -> Self {
        let value = move |field: IdentityField| {
            let value = record.get(field).trim();
            (!value.is_empty()).then_some(value)
        };
        Self {
            full_name: value(IdentityField::FullName),
            email: value(IdentityField::Email),
            phone: value(IdentityField::Phone),
            date_of_birth: value(IdentityField::DateOfBirth),
            gender: value(IdentityField::Gender),
            address_line1: value(IdentityField::AddressLine1),
            city: value(IdentityField::City),
            state: value(IdentityField::State),
            postal_code: value(IdentityField::PostalCode),
            tax_id: value(IdentityField::TaxId),
            national_id: value(IdentityField::NationalId),
            occupation: value(IdentityField::Occupation),
            income_bracket: value(IdentityField::IncomeBracket),
        }
    }
}

/// Keep the first message reported for each field.
fn into_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let by_field = errors.field_errors();
    IdentityField::ALL
        .into_iter()
        .filter_map(|field| {
            let message = by_field
                .get(field.as_str())?
                .iter()
                .find_map(|error| error.message.as_ref())?;
            Some((field, message.to_string()))
        })
        .collect()
}

/// Validate a record, returning one message per invalid field.
pub fn validate_identity(record: &IdentityRecord) -> FieldErrors {
    match IdentityForm::new(record).validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => into_field_errors(&errors),
    }
}

/// Normalize a value as it is typed into a field. The tax ID is
/// uppercased; everything else is kept verbatim.
pub fn normalize_input(field: IdentityField, value: String) -> String {
    match field {
        IdentityField::TaxId => value.to_uppercase(),
        _ => value,
    }
}
