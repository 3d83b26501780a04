use super::value_objects::{CellCoordinate, DataEvent, SeriesSet};
use crate::domain::errors::AppResult;

pub type DataHandler = Box<dyn FnMut(DataEvent)>;

/// Interface to the analytics grid: one subscription per cell.
pub trait DataSource {
    fn subscribe(&self, cell: &CellCoordinate, on_data: DataHandler) -> Box<dyn CellSubscription>;
}

/// Live feed of a single cell.
pub trait CellSubscription {
    /// Stop delivering events. Calling it again does nothing.
    fn kill(&mut self);

    fn is_killed(&self) -> bool;
}

/// Chart plugin: binds a widget to the element matching `selector`.
pub trait ChartPlugin {
    fn mount(&self, selector: &str, data: &SeriesSet) -> AppResult<Box<dyn ChartWidget>>;
}

pub trait ChartWidget {
    /// Replace the drawn series in place.
    fn update(&mut self, data: &SeriesSet) -> AppResult<()>;
}
