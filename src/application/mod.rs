pub mod curve_gadget;
pub mod gadget_manager;
pub mod trade_form;

pub use curve_gadget::*;
pub use gadget_manager::*;
pub use trade_form::*;
