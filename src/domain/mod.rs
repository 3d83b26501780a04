pub mod blotter;
pub mod dom;
pub mod errors;
pub mod gadgets;
pub mod logging;
pub mod outcome;
