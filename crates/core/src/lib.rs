//! Domain building blocks shared by every Folio crate.
//!
//! - [`resource`] -- the generic resource definition (table, columns, order).
//! - [`catalog`] -- the concrete definitions for every portfolio entity.
//! - [`validation`] -- JSON payload to typed column values.
//! - [`contact`] -- public contact-form submission and notification status.

pub mod catalog;
pub mod contact;
pub mod error;
pub mod resource;
pub mod roles;
pub mod types;
pub mod validation;
