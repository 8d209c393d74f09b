//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the record, session and suggestion logic so route
//! handlers can stay focused on request parsing and response shaping.

pub mod history;
pub mod session;
pub mod status;
pub mod store;
pub mod suggestion;
