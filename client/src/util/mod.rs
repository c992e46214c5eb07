//! Utility helpers shared across client screens.

pub mod auth;
