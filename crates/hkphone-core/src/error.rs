use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error(
        "Phone number must be in one of the following formats: \
         XXXX-XXXX, 852-XXXX-XXXX, (+852) XXXX-XXXX, XXXX XXXX, XXXXXXXX."
    )]
    InvalidFormat,
    #[error("Phone number should not start with one of the followings: 999, 992, 112.")]
    DisguisedEmergencyNumber,
    #[error("Phone number should start with one of the followings: 2, 3, 5, 6, 8, 9.")]
    DisallowedPrefix,
}

impl PhoneError {
    pub fn code(self) -> ErrorCode {
        match self {
            PhoneError::InvalidFormat => ErrorCode::Invalid,
            PhoneError::DisguisedEmergencyNumber => ErrorCode::Disguise,
            PhoneError::DisallowedPrefix => ErrorCode::Prefix,
        }
    }
}

/// Stable identifiers for every way a phone field can reject its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Required,
    Invalid,
    Disguise,
    Prefix,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Invalid => "invalid",
            ErrorCode::Disguise => "disguise",
            ErrorCode::Prefix => "prefix",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
