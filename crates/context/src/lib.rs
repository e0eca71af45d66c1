mod identity;
mod outcome;

pub use identity::{ClientDetails, UserIdentity, PASSWORD_SENTINEL};
pub use outcome::{ValidationOutcome, ValidationStatus};
