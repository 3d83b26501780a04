use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value Object - one (source, row, col) coordinate of the analytics grid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}[{},{}]", source, row, col)]
pub struct CellCoordinate {
    pub source: String,
    pub row: u32,
    pub col: u32,
}

impl CellCoordinate {
    pub fn new(source: impl Into<String>, row: u32, col: u32) -> Self {
        Self { source: source.into(), row, col }
    }
}

/// Discriminator of an inbound cell payload. Only `CURVE` is drawable here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataKind {
    Curve,
    Other(String),
}

impl DataKind {
    pub const CURVE_TAG: &'static str = "CURVE";

    pub fn as_str(&self) -> &str {
        match self {
            DataKind::Curve => Self::CURVE_TAG,
            DataKind::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DataKind {
    fn from(tag: String) -> Self {
        if tag == Self::CURVE_TAG { DataKind::Curve } else { DataKind::Other(tag) }
    }
}

impl From<&str> for DataKind {
    fn from(tag: &str) -> Self {
        DataKind::from(tag.to_string())
    }
}

impl From<DataKind> for String {
    fn from(kind: DataKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Wire shape of a cell update: `{"t": "CURVE", "v": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEvent {
    #[serde(rename = "t")]
    pub kind: DataKind,
    #[serde(rename = "v", default)]
    pub value: Value,
}

impl DataEvent {
    pub fn new(kind: impl Into<DataKind>, value: Value) -> Self {
        Self { kind: kind.into(), value }
    }

    pub fn curve(value: Value) -> Self {
        Self::new(DataKind::Curve, value)
    }
}

/// One drawable series, serialized as `{"curve": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    pub curve: Vec<Value>,
}

impl CurveSeries {
    /// Plot points: `[x, y]` pairs as-is, bare numbers against their index.
    /// Anything else is skipped.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.curve
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| match entry {
                Value::Number(y) => y.as_f64().map(|y| (i as f64, y)),
                Value::Array(pair) if pair.len() == 2 => {
                    Some((pair[0].as_f64()?, pair[1].as_f64()?))
                }
                _ => None,
            })
            .collect()
    }
}

/// What the chart widget is fed: a list of series.
#[derive(Debug, Clone, Default, PartialEq, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesSet(Vec<CurveSeries>);

impl SeriesSet {
    /// Sequence payloads become a single series; anything else yields an
    /// empty set.
    pub fn wrap(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self(vec![CurveSeries { curve: items.clone() }]),
            _ => Self::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Value Object - generated CSS class tying a gadget to its host element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", class)]
pub struct LivenessMarker {
    class: String,
    suffix: u64,
}

impl LivenessMarker {
    pub fn new(prefix: &str, suffix: u64) -> Self {
        Self { class: format!("{prefix}{suffix}"), suffix }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn selector(&self) -> String {
        format!(".{}", self.class)
    }

    pub fn suffix(&self) -> u64 {
        self.suffix
    }
}

/// Gadget construction parameters as supplied by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GadgetConfig {
    pub source: String,
    pub row: u32,
    pub col: u32,
    pub selector: String,
    /// Child gadgets are owned by a parent and skip manager registration.
    #[serde(default)]
    pub child: bool,
}

impl GadgetConfig {
    pub fn cell(&self) -> CellCoordinate {
        CellCoordinate::new(self.source.clone(), self.row, self.col)
    }
}
