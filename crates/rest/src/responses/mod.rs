//! Response formatting for the REST API.
//!
//! - [`hal`] - HAL+JSON representations

pub mod hal;

pub use hal::hal_response;
