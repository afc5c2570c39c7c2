pub mod authentication;

pub use authentication::{require_operator_token, OperatorToken};
