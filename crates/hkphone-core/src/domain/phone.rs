use crate::error::PhoneError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leading sequences reserved for emergency and special services.
pub const EMERGENCY_PREFIXES: [&str; 3] = ["999", "992", "112"];

/// First digits of the Hong Kong numbering plan accepted as contact numbers.
pub const ALLOWED_PREFIXES: [&str; 6] = ["2", "3", "5", "6", "8", "9"];

pub const ACCEPTED_FORMATS: [&str; 5] = [
    "XXXX-XXXX",
    "852-XXXX-XXXX",
    "(+852) XXXX-XXXX",
    "XXXX XXXX",
    "XXXXXXXX",
];

static HK_PHONE_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:852-?)?([0-9]{4})[-.]?([0-9]{4})$").expect("valid phone pattern")
});

/// A Hong Kong phone number in `DDDD-DDDD` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HkPhoneNumber(String);

impl HkPhoneNumber {
    pub fn new(raw: &str) -> Result<Self, PhoneError> {
        let normalized = normalize_hk_phone(raw)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for HkPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HkPhoneNumber {
    type Err = PhoneError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl<'de> Deserialize<'de> for HkPhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Validates a Hong Kong phone number and returns it as `DDDD-DDDD`.
///
/// Parentheses, plus signs and whitespace are dropped before matching, and an
/// optional leading `852` country code is discarded. Format is checked first,
/// then the emergency sequences, then the allowed first digits.
pub fn normalize_hk_phone(raw: &str) -> Result<String, PhoneError> {
    let cleaned = strip_decorations(raw);
    let caps = HK_PHONE_DIGITS
        .captures(&cleaned)
        .ok_or(PhoneError::InvalidFormat)?;

    let value = format!("{}-{}", &caps[1], &caps[2]);

    if EMERGENCY_PREFIXES
        .iter()
        .any(|special| value.starts_with(special))
    {
        return Err(PhoneError::DisguisedEmergencyNumber);
    }

    if !ALLOWED_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
    {
        return Err(PhoneError::DisallowedPrefix);
    }

    Ok(value)
}

fn strip_decorations(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '(' | ')' | '+') && !ch.is_whitespace())
        .collect()
}
