mod extract;
mod introspection;
mod memo;
mod validator;

pub use memo::MemoizedValidator;
pub use validator::{TokenValidator, ValidateToken};
