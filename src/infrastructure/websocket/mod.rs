//! WebSocket client implementations and data transfer objects.
//!
//! Currently this module provides the analytics cell subscription client.

pub mod cell_client;
pub mod dto;

pub use cell_client::*;
pub use dto::*;
