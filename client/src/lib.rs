//! # client
//!
//! Front-end core for the lawn-care marketplace app: auth state, the
//! role-based access gate, the route table, the session driver that talks to
//! the identity provider, and the sign-up wizard.
//!
//! Rendering is left to the UI shell. It reads [`state::auth::AuthStore`],
//! asks [`app::navigate`] what to do for a path, and acts on the returned
//! [`util::auth::Outcome`].

pub mod app;
pub mod net;
pub mod state;
pub mod util;
