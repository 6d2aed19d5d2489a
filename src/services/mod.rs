//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and reply logic so route handlers can stay
//! focused on protocol translation.

pub mod assistant;
pub mod contact;
