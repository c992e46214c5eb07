//! Domain services invoked by the function routes.
//!
//! DESIGN
//! ======
//! Each function calls exactly one stored procedure through `roles`, so the
//! database stays the single authority on which role an account holds.

pub mod roles;
