//! envprint CLI library.
//!
//! This crate is the trigger side of envprint: it resolves a host, invokes a
//! single probe and routes the digest and record (or the error) to the
//! terminal, either colored for humans or as JSON for tools.

pub mod commands;
pub mod input;
