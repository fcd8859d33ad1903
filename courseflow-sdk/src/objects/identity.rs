//! KYC (identity/compliance) record collected in the first checkout step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-field validation messages. An empty map means the record passed.
pub type FieldErrors = BTreeMap<IdentityField, String>;

/// Identity and compliance details of the buyer.
///
/// Values are kept exactly as entered (apart from the tax ID, which is
/// uppercased on input) so that validation sees what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// National tax ID (`ABCDE1234F`). Optional.
    pub tax_id: String,
    /// National ID number (12 digits). Optional.
    pub national_id: String,
    pub occupation: String,
    pub income_bracket: String,
}

/// A single field of [`IdentityRecord`], used as the key of [`FieldErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    FullName,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    TaxId,
    NationalId,
    Occupation,
    IncomeBracket,
}

impl IdentityField {
    pub const ALL: [IdentityField; 14] = [
        IdentityField::FullName,
        IdentityField::Email,
        IdentityField::Phone,
        IdentityField::DateOfBirth,
        IdentityField::Gender,
        IdentityField::AddressLine1,
        IdentityField::AddressLine2,
        IdentityField::City,
        IdentityField::State,
        IdentityField::PostalCode,
        IdentityField::TaxId,
        IdentityField::NationalId,
        IdentityField::Occupation,
        IdentityField::IncomeBracket,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IdentityField::FullName => "full_name",
            IdentityField::Email => "email",
            IdentityField::Phone => "phone",
            IdentityField::DateOfBirth => "date_of_birth",
            IdentityField::Gender => "gender",
            IdentityField::AddressLine1 => "address_line1",
            IdentityField::AddressLine2 => "address_line2",
            IdentityField::City => "city",
            IdentityField::State => "state",
            IdentityField::PostalCode => "postal_code",
            IdentityField::TaxId => "tax_id",
            IdentityField::NationalId => "national_id",
            IdentityField::Occupation => "occupation",
            IdentityField::IncomeBracket => "income_bracket",
        }
    }
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IdentityRecord {
    /// Borrow the raw value of a field.
    pub fn get(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::FullName => &self.full_name,
            IdentityField::Email => &self.email,
            IdentityField::Phone => &self.phone,
            IdentityField::DateOfBirth => &self.date_of_birth,
            IdentityField::Gender => &self.gender,
            IdentityField::AddressLine1 => &self.address_line1,
            IdentityField::AddressLine2 => &self.address_line2,
            IdentityField::City => &self.city,
            IdentityField::State => &self.state,
            IdentityField::PostalCode => &self.postal_code,
            IdentityField::TaxId => &self.tax_id,
            IdentityField::NationalId => &self.national_id,
            IdentityField::Occupation => &self.occupation,
            IdentityField::IncomeBracket => &self.income_bracket,
        }
    }

    /// Mutably borrow the raw value of a field.
    pub fn get_mut(&mut self, field: IdentityField) -> &mut String {
        match field {
            IdentityField::FullName => &mut self.full_name,
            IdentityField::Email => &mut self.email,
            IdentityField::Phone => &mut self.phone,
            IdentityField::DateOfBirth => &mut self.date_of_birth,
            IdentityField::Gender => &mut self.gender,
            IdentityField::AddressLine1 => &mut self.address_line1,
            IdentityField::AddressLine2 => &mut self.address_line2,
            IdentityField::City => &mut self.city,
            IdentityField::State => &mut self.state,
            IdentityField::PostalCode => &mut self.postal_code,
            IdentityField::TaxId => &mut self.tax_id,
            IdentityField::NationalId => &mut self.national_id,
            IdentityField::Occupation => &mut self.occupation,
            IdentityField::IncomeBracket => &mut self.income_bracket,
        }
    }

    /// A copy safe to echo back to a client: the tax ID and national ID
    /// keep only their last four characters.
    pub fn redacted(&self) -> IdentityRecord {
        IdentityRecord {
            tax_id: mask(&self.tax_id),
            national_id: mask(&self.national_id),
            ..self.clone()
        }
    }
}

fn mask(value: &str) -> String {
    let value = value.trim();
    let len = value.chars().count();
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 4 < len { '*' } else { c })
        .collect()
}
