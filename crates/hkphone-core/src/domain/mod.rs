pub mod phone;

pub use phone::{
    normalize_hk_phone, HkPhoneNumber, ACCEPTED_FORMATS, ALLOWED_PREFIXES, EMERGENCY_PREFIXES,
};
