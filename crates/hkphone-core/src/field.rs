use crate::domain::phone::normalize_hk_phone;
use crate::error::{ErrorCode, PhoneError};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required.";

/// User-facing message per error code. Overrides are how callers localize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    pub required: String,
    pub invalid: String,
    pub disguise: String,
    pub prefix: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            required: DEFAULT_REQUIRED_MESSAGE.to_string(),
            invalid: PhoneError::InvalidFormat.to_string(),
            disguise: PhoneError::DisguisedEmergencyNumber.to_string(),
            prefix: PhoneError::DisallowedPrefix.to_string(),
        }
    }
}

impl ErrorMessages {
    pub fn get(&self, code: ErrorCode) -> &str {
        match code {
            ErrorCode::Required => &self.required,
            ErrorCode::Invalid => &self.invalid,
            ErrorCode::Disguise => &self.disguise,
            ErrorCode::Prefix => &self.prefix,
        }
    }

    pub fn set(&mut self, code: ErrorCode, message: impl Into<String>) {
        let slot = match code {
            ErrorCode::Required => &mut self.required,
            ErrorCode::Invalid => &mut self.invalid,
            ErrorCode::Disguise => &mut self.disguise,
            ErrorCode::Prefix => &mut self.prefix,
        };
        *slot = message.into();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct FieldError {
    pub code: ErrorCode,
    pub message: String,
}

/// A form field accepting Hong Kong phone numbers.
///
/// Wraps [`normalize_hk_phone`] with the conventions a form layer expects:
/// a required check, a representation for empty input, and overridable
/// messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneField {
    required: bool,
    empty_value: String,
    messages: ErrorMessages,
}

impl Default for PhoneField {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneField {
    pub fn new() -> Self {
        Self {
            required: true,
            empty_value: String::new(),
            messages: ErrorMessages::default(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn empty_value(mut self, value: impl Into<String>) -> Self {
        self.empty_value = value.into();
        self
    }

    pub fn messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn empty_representation(&self) -> &str {
        &self.empty_value
    }

    pub fn error_messages(&self) -> &ErrorMessages {
        &self.messages
    }

    /// Returns the normalized number, or the empty representation for empty input.
    ///
    /// The required check looks at the trimmed value; the empty check looks at
    /// the raw one, so whitespace-only input on an optional field is reported
    /// as an invalid format rather than treated as empty.
    pub fn clean(&self, raw: Option<&str>) -> Result<String, FieldError> {
        if self.required && raw.is_none_or(|value| value.trim().is_empty()) {
            return Err(self.error(ErrorCode::Required));
        }

        let value = match raw {
            None | Some("") => return Ok(self.empty_value.clone()),
            Some(value) => value,
        };

        normalize_hk_phone(value).map_err(|err| self.error(err.code()))
    }

    fn error(&self, code: ErrorCode) -> FieldError {
        FieldError {
            code,
            message: self.messages.get(code).to_string(),
        }
    }
}
