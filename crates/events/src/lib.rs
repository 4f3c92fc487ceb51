//! Owner notifications for contact-form submissions.
//!
//! - [`ContactNotice`] -- what the owner is told about a new message.
//! - [`delivery`] -- the [`ContactNotifier`] seam and its HTTP API / SMTP
//!   implementations.
//! - [`config`] -- mail settings from the environment.
//! - [`dispatch`] -- fire-and-forget delivery that records the outcome on
//!   the stored message.

pub mod config;
pub mod delivery;
pub mod dispatch;
pub mod notice;

pub use config::{build_notifier, MailConfig, MailTransport};
pub use delivery::{ContactNotifier, DeliveryError, DisabledNotifier};
pub use dispatch::{deliver_and_record, spawn_contact_notification};
pub use notice::ContactNotice;
