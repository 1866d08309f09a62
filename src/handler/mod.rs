//! Request handler module
//!
//! Responsible for request dispatch and the user collection handlers.

pub mod router;
pub mod users;

// Re-export main entry point
pub use router::{handle_request, Dispatcher};
