//! Validation core of "Leave Me a Note", a site where users keep notes about
//! the shows they went to.
//!
//! Submitted fields go through the [`forms`], which check them against the
//! rules of each form and the users already in the [`database`].

pub mod config;
pub mod consts;
pub mod database;
pub mod forms;
pub mod models;
pub mod utils;
