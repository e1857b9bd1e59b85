//! Identity verification.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Credential checks and token issuance belong to the external auth service;
//! this server only verifies the tokens it presents.

pub mod jwt;
