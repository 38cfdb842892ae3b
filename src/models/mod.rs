//! Twilio API model types.

mod call;
mod rest_exception;

pub use call::*;
pub use rest_exception::*;
