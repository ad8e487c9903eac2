//! Command implementations.

pub mod extract;
pub mod validate;

pub use extract::execute_extract;
pub use validate::execute_validate;
