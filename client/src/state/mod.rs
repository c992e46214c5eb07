//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the reactive session state every screen reads, `session` is its
//! only writer, and `registration` is local wizard state for sign-up.

pub mod auth;
pub mod registration;
pub mod session;
