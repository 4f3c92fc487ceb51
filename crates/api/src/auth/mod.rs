//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access-token generation and validation.
//! - [`bootstrap`] -- creates the configured admin account at startup.

pub mod bootstrap;
pub mod jwt;
pub mod password;
