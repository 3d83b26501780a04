pub mod wasm_api;
pub mod wiring;

pub use wasm_api::*;
