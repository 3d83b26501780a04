//! Browser-side implementations of the domain ports.

pub mod dom;
pub mod rendering;
pub mod services;
pub mod templates;
pub mod websocket;

pub use dom::BrowserDom;
pub use rendering::CanvasCurvePlugin;
pub use templates::StaticTemplates;
pub use websocket::WebSocketCellSource;
