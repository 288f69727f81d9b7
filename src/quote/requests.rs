//! Request DTOs for the quote endpoint.
//!
//! The form builder posts either URL-encoded fields or a JSON object using
//! the same field names. Both decode into [`QuoteForm`].

use std::iter::Peekable;
use std::str::Chars;

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::calculators::QuoteRequest;

pub const FIELD_NAME: &str = "Multi-Form-11-Name";
pub const FIELD_EMAIL: &str = "Multi-Form-11-Email";
pub const FIELD_SERVICE_TYPE: &str = "Multi-form-11-Type";
pub const FIELD_BUDGET: &str = "Multi-Form-11-Budget";
pub const FIELD_DISTANCE: &str = "Multi-Form-11-Distance";
pub const FIELD_PROJECT: &str = "Multi-Form-11-Project";
pub const FIELD_COMPANY: &str = "Multi-Form-11-Company";
pub const FIELD_RESIDENCE_TYPE: &str = "Multi-form-11-People";
pub const FIELD_CURRENT_ADDRESS: &str = "Multi-Form-11-Link";
pub const FIELD_REGION: &str = "Multi-Form-11-Country";
pub const FIELD_MOVE_DATE: &str = "Multi-Form-11-Date";
pub const FIELD_SERVICES: &str = "Multi-form-11-Services";
pub const FIELD_COMPLEX: &str = "Multi-form-11-Complex";
pub const FIELD_FLOORS: &str = "Multi-form-11-Floors";

/// Rejected before any pricing is attempted
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Required fields missing")]
    MissingFields(Vec<&'static str>),

    #[error("Invalid request body")]
    InvalidBody(String),
}

/// A field the form may send once or several times
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenSelection {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl TokenSelection {
    /// Add another occurrence of the field
    pub fn push(self, token: String) -> Self {
        match self {
            TokenSelection::None => TokenSelection::One(token),
            TokenSelection::One(first) => TokenSelection::Many(vec![first, token]),
            TokenSelection::Many(mut tokens) => {
                tokens.push(token);
                TokenSelection::Many(tokens)
            }
        }
    }

    pub fn into_tokens(self) -> Vec<String> {
        match self {
            TokenSelection::None => vec![],
            TokenSelection::One(token) => vec![token],
            TokenSelection::Many(tokens) => tokens,
        }
    }
}

/// Any JSON value is accepted. Scalars become tokens; anything else is
/// dropped.
impl<'de> Deserialize<'de> for TokenSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => {
                TokenSelection::Many(items.into_iter().filter_map(scalar_text).collect())
            }
            value => scalar_text(value).map_or(TokenSelection::None, TokenSelection::One),
        })
    }
}

/// Quote form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteForm {
    #[serde(rename = "Multi-Form-11-Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "Multi-Form-11-Email", default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(rename = "Multi-form-11-Type", default, deserialize_with = "lenient_text")]
    pub service_type: Option<String>,
    #[serde(rename = "Multi-form-11-People", default, deserialize_with = "lenient_text")]
    pub residence_type: Option<String>,
    #[serde(rename = "Multi-Form-11-Budget", default, deserialize_with = "lenient_text")]
    pub budget: Option<String>,
    #[serde(rename = "Multi-Form-11-Distance", default, deserialize_with = "lenient_text")]
    pub distance: Option<String>,
    #[serde(rename = "Multi-Form-11-Project", default, deserialize_with = "lenient_text")]
    pub project_details: Option<String>,
    #[serde(rename = "Multi-Form-11-Company", default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(rename = "Multi-Form-11-Link", default, deserialize_with = "lenient_text")]
    pub current_address: Option<String>,
    #[serde(rename = "Multi-Form-11-Country", default, deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(rename = "Multi-Form-11-Date", default, deserialize_with = "lenient_text")]
    pub move_date: Option<String>,
    #[serde(rename = "Multi-form-11-Services", alias = "Multi-form-11-Services[]", default)]
    pub services: TokenSelection,
    #[serde(rename = "Multi-form-11-Complex", alias = "Multi-form-11-Complex[]", default)]
    pub complex_items: TokenSelection,
    #[serde(rename = "Multi-form-11-Floors", default, deserialize_with = "lenient_text")]
    pub floors: Option<String>,
}

/// Accept strings, numbers and booleans for text fields; JSON clients are
/// not consistent about quoting numeric inputs. Arrays and objects count as
/// absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Validated submission ready for pricing and notification
#[derive(Debug, Clone)]
pub struct QuoteSubmission {
    pub name: String,
    pub email: String,
    pub budget: Option<String>,
    pub project_details: Option<String>,
    pub company: Option<String>,
    pub current_address: Option<String>,
    pub move_date: Option<String>,
    pub request: QuoteRequest,
}

impl QuoteForm {
    /// Decode a request body according to its content type.
    ///
    /// JSON bodies must be objects. Everything else is treated as
    /// URL-encoded, where repeated keys accumulate.
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self, ValidationError> {
        let is_json = content_type
            .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            serde_json::from_slice(body).map_err(|e| ValidationError::InvalidBody(e.to_string()))
        } else {
            Ok(Self::from_urlencoded(body))
        }
    }

    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = QuoteForm::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let value = value.into_owned();
            match key.as_ref() {
                FIELD_NAME => form.name = Some(value),
                FIELD_EMAIL => form.email = Some(value),
                FIELD_SERVICE_TYPE => form.service_type = Some(value),
                FIELD_RESIDENCE_TYPE => form.residence_type = Some(value),
                FIELD_BUDGET => form.budget = Some(value),
                FIELD_DISTANCE => form.distance = Some(value),
                FIELD_PROJECT => form.project_details = Some(value),
                FIELD_COMPANY => form.company = Some(value),
                FIELD_CURRENT_ADDRESS => form.current_address = Some(value),
                FIELD_REGION => form.region = Some(value),
                FIELD_MOVE_DATE => form.move_date = Some(value),
                FIELD_FLOORS => form.floors = Some(value),
                key if key.strip_suffix("[]").unwrap_or(key) == FIELD_SERVICES => {
                    form.services = std::mem::take(&mut form.services).push(value);
                }
                key if key.strip_suffix("[]").unwrap_or(key) == FIELD_COMPLEX => {
                    form.complex_items = std::mem::take(&mut form.complex_items).push(value);
                }
                _ => {}
            }
        }
        form
    }

    /// Check required fields and resolve the form into pricing inputs.
    pub fn into_submission(self) -> Result<QuoteSubmission, ValidationError> {
        let mut missing = Vec::new();
        let name = required(self.name, FIELD_NAME, &mut missing);
        let email = required(self.email, FIELD_EMAIL, &mut missing);
        let service_type = required(self.service_type, FIELD_SERVICE_TYPE, &mut missing);
        let residence_type = required(self.residence_type, FIELD_RESIDENCE_TYPE, &mut missing);

        let (Some(name), Some(email), Some(service_type), Some(residence_type)) =
            (name, email, service_type, residence_type)
        else {
            return Err(ValidationError::MissingFields(missing));
        };

        Ok(QuoteSubmission {
            name,
            email,
            budget: non_blank(self.budget),
            project_details: non_blank(self.project_details),
            company: non_blank(self.company),
            current_address: non_blank(self.current_address),
            move_date: non_blank(self.move_date),
            request: QuoteRequest {
                residence_category: residence_type,
                service_category: service_type,
                region: non_blank(self.region),
                distance_km: self.distance.as_deref().and_then(parse_distance),
                extra_services: self.services.into_tokens(),
                complex_items: self.complex_items.into_tokens(),
                floor_level: non_blank(self.floors),
            },
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = non_blank(value);
    if value.is_none() {
        missing.push(field);
    }
    value
}

/// Parse a distance in kilometres from its leading number, so `"30 km"` is
/// 30. Input that does not start with a number means no distance was given.
/// Numbers too large for a `Decimal` saturate.
pub fn parse_distance(raw: &str) -> Option<Decimal> {
    let number = leading_number(raw.trim_start())?;

    Decimal::from_str(&number)
        .or_else(|_| Decimal::from_scientific(&number))
        .ok()
        .or_else(|| {
            let value: f64 = number.parse().ok()?;
            Decimal::from_f64(value).or(Some(if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }))
        })
}

/// Longest prefix of `text` that reads as a decimal number with an optional
/// sign, fraction and exponent, rewritten without `+` signs or bare dots.
fn leading_number(text: &str) -> Option<String> {
    let mut chars = text.chars().peekable();
    let mut number = String::new();

    if let Some(sign) = chars.next_if(|c| matches!(*c, '+' | '-')) {
        if sign == '-' {
            number.push('-');
        }
    }

    let integer = take_digits(&mut chars);
    let fraction = match chars.next_if_eq(&'.') {
        Some(_) => take_digits(&mut chars),
        None => String::new(),
    };
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    number.push_str(if integer.is_empty() { "0" } else { &integer });
    if !fraction.is_empty() {
        number.push('.');
        number.push_str(&fraction);
    }

    if chars.next_if(|c| matches!(*c, 'e' | 'E')).is_some() {
        let negative = chars.next_if(|c| matches!(*c, '+' | '-')) == Some('-');
        let exponent = take_digits(&mut chars);
        if !exponent.is_empty() {
            number.push('e');
            if negative {
                number.push('-');
            }
            number.push_str(&exponent);
        }
    }

    Some(number)
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        digits.push(digit);
    }
    digits
}
