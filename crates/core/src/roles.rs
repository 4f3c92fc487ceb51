//! Well-known role name constants.
//!
//! Every account in `admin_users` is issued tokens with [`ROLE_ADMIN`].

pub const ROLE_ADMIN: &str = "admin";
