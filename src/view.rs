//! View models of the notes front end.
//!
//! Each view owns its own transient state and reports changes through callbacks; none of them
//! keeps notes beyond what it currently displays.

pub mod form;
pub mod list;
pub mod selector;
