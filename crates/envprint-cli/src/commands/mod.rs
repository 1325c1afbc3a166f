//! CLI command implementations

pub mod digest;
pub mod json_output;
pub mod probe;
pub mod profiles;
