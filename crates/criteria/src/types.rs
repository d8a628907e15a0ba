//! Core data model for the search form.
//!
//! [`CriteriaState`] is the authoritative shape of a search request. It holds
//! raw, user-entered values; nothing in here enforces required-ness. That is
//! the job of the [`CriteriaValidator`](crate::CriteriaValidator), which turns
//! a state into a typed [`ValidatedCriteria`].
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// The two search flows. Exactly one is active once the form is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Lookup by the serial number of an already registered profile.
    Serial,
    /// Demographic search by birth star, gender and age.
    Nakshatra,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Serial => "serial",
            SearchMode::Nakshatra => "nakshatra",
        }
    }

    /// The mode that is deactivated when this one is selected.
    pub fn other(&self) -> SearchMode {
        match self {
            SearchMode::Serial => SearchMode::Nakshatra,
            SearchMode::Nakshatra => SearchMode::Serial,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial" => Ok(SearchMode::Serial),
            "nakshatra" => Ok(SearchMode::Nakshatra),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

/// Seeker gender. Only the two canonical spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Canonical token as stored and as accepted on input.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Strict parse: `"Male"` or `"Female"`, nothing else.
    pub fn from_canonical(token: &str) -> Option<Gender> {
        match token {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }

    /// The gender a seeker of this gender is matched against.
    pub fn opposite(&self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::from_canonical(s).ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// A token that is not one of an enum's canonical spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value '{0}'")]
pub struct UnknownToken(pub String);

/// Every input the form manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SerialNo,
    NakshatraId,
    Gender,
    SeekerAge,
    Gothram,
    EnableRasiCompatibility,
    Rasi,
    AgePreference,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::SerialNo,
        Field::NakshatraId,
        Field::Gender,
        Field::SeekerAge,
        Field::Gothram,
        Field::EnableRasiCompatibility,
        Field::Rasi,
        Field::AgePreference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::SerialNo => "serial_no",
            Field::NakshatraId => "nakshatra_id",
            Field::Gender => "gender",
            Field::SeekerAge => "seeker_age",
            Field::Gothram => "gothram",
            Field::EnableRasiCompatibility => "enable_rasi_compatibility",
            Field::Rasi => "rasi",
            Field::AgePreference => "age_preference",
        }
    }

    /// The mode that owns this field, or `None` for fields shared by both.
    pub fn owner(&self) -> Option<SearchMode> {
        match self {
            Field::SerialNo => Some(SearchMode::Serial),
            Field::NakshatraId | Field::Gender | Field::SeekerAge | Field::Gothram => {
                Some(SearchMode::Nakshatra)
            }
            Field::EnableRasiCompatibility | Field::Rasi | Field::AgePreference => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw state of the search form.
///
/// Text inputs are kept as entered so validation can distinguish "empty" from
/// "not a number". `seeker_age` and `nakshatra_id` accept either a string or
/// an integer. Empty strings for the optional `mode`, `nakshatra_id`,
/// `gender` and `age_preference` fields deserialize as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaState {
    #[serde(deserialize_with = "blank_as_none")]
    pub mode: Option<SearchMode>,
    pub serial_no: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub nakshatra_id: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "text_or_integer")]
    pub seeker_age: String,
    pub gothram: String,
    pub rasi: String,
    pub enable_rasi_compatibility: bool,
    #[serde(deserialize_with = "blank_as_none")]
    pub age_preference: Option<u32>,
}

impl CriteriaState {
    /// A fresh, uninitialized form.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form initialized to the given mode with every field empty.
    pub fn with_mode(mode: SearchMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    /// Seeker age as an integer, if the raw input parses.
    pub fn seeker_age_value(&self) -> Option<u32> {
        parse_age(&self.seeker_age)
    }

    /// Reset one field to its empty value.
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::SerialNo => self.serial_no.clear(),
            Field::NakshatraId => self.nakshatra_id = None,
            Field::Gender => self.gender = None,
            Field::SeekerAge => self.seeker_age.clear(),
            Field::Gothram => self.gothram.clear(),
            Field::EnableRasiCompatibility => self.enable_rasi_compatibility = false,
            Field::Rasi => self.rasi.clear(),
            Field::AgePreference => self.age_preference = None,
        }
    }

    /// Whether a field currently holds its empty value.
    pub fn is_empty(&self, field: Field) -> bool {
        match field {
            Field::SerialNo => self.serial_no.is_empty(),
            Field::NakshatraId => self.nakshatra_id.is_none(),
            Field::Gender => self.gender.is_none(),
            Field::SeekerAge => self.seeker_age.is_empty(),
            Field::Gothram => self.gothram.is_empty(),
            Field::EnableRasiCompatibility => !self.enable_rasi_compatibility,
            Field::Rasi => self.rasi.is_empty(),
            Field::AgePreference => self.age_preference.is_none(),
        }
    }
}

/// Parse a raw age input. Surrounding whitespace is ignored; anything but
/// ASCII digits (including a leading `+`) is rejected.
pub fn parse_age(raw: &str) -> Option<u32> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}

/// Criteria that passed validation, in the shape the matcher consumes.
///
/// Rasi appears only when the compatibility gate was active at submission;
/// a retained-but-disabled rasi value is never carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ValidatedCriteria {
    Serial {
        serial_no: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        age_preference: Option<u32>,
    },
    Nakshatra {
        nakshatra_id: String,
        gender: Gender,
        seeker_age: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gothram: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rasi: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        age_preference: Option<u32>,
    },
}

impl ValidatedCriteria {
    pub fn mode(&self) -> SearchMode {
        match self {
            ValidatedCriteria::Serial { .. } => SearchMode::Serial,
            ValidatedCriteria::Nakshatra { .. } => SearchMode::Nakshatra,
        }
    }

    pub fn age_preference(&self) -> Option<u32> {
        match self {
            ValidatedCriteria::Serial { age_preference, .. }
            | ValidatedCriteria::Nakshatra { age_preference, .. } => *age_preference,
        }
    }
}

/// A form input as it arrives over the wire: typed text or a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Text(String),
    Integer(i64),
}

impl RawInput {
    fn into_text(self) -> String {
        match self {
            RawInput::Text(text) => text,
            RawInput::Integer(value) => value.to_string(),
        }
    }
}

fn text_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawInput> = Option::deserialize(deserializer)?;
    Ok(raw.map(RawInput::into_text).unwrap_or_default())
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<RawInput>::deserialize(deserializer)?.map(RawInput::into_text);
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(token) => token.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
