pub mod domain;
pub mod error;
pub mod field;

pub use domain::*;
pub use error::{ErrorCode, PhoneError};
pub use field::{ErrorMessages, FieldError, PhoneField};
