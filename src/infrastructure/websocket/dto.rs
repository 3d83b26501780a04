use serde::{Deserialize, Serialize};
use crate::domain::gadgets::{CellCoordinate, DataEvent};

/// Frame sent right after the socket opens
#[derive(Debug, Serialize)]
pub struct SubscribeFrame<'a> {
    pub action: &'static str,
    pub source: &'a str,
    pub row: u32,
    pub col: u32,
}

impl<'a> SubscribeFrame<'a> {
    pub fn for_cell(cell: &'a CellCoordinate) -> Self {
        Self { action: "subscribe", source: &cell.source, row: cell.row, col: cell.col }
    }
}

/// Inbound frame: either `{"data": {"t":..,"v":..}}` or the bare event
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CellUpdateFrame {
    Wrapped { data: DataEvent },
    Bare(DataEvent),
}

impl CellUpdateFrame {
    pub fn into_event(self) -> DataEvent {
        match self {
            CellUpdateFrame::Wrapped { data } | CellUpdateFrame::Bare(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gadgets::DataKind;

    #[test]
    fn subscribe_frame_serializes_cell() {
        let cell = CellCoordinate::new("primitives", 3, 1);
        let json = serde_json::to_string(&SubscribeFrame::for_cell(&cell)).unwrap();
        assert_eq!(json, r#"{"action":"subscribe","source":"primitives","row":3,"col":1}"#);
    }

    #[test]
    fn both_frame_shapes_yield_the_event() {
        let wrapped: CellUpdateFrame = serde_json::from_str(r#"{"data":{"t":"CURVE","v":[1]}}"#).unwrap();
        let bare: CellUpdateFrame = serde_json::from_str(r#"{"t":"MATRIX_2D","v":null}"#).unwrap();
        assert_eq!(wrapped.into_event().kind, DataKind::Curve);
        assert_eq!(bare.into_event().kind, DataKind::Other("MATRIX_2D".to_string()));
    }
}
