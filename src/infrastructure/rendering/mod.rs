pub mod curve_chart;

pub use curve_chart::*;
