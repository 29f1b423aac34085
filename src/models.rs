use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One geocoding result record (address, POI or parcel), kept as the raw
/// GeoJSON feature the service returned. Accessors only peek into the common
/// fields; everything else stays reachable through the inner value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Feature(pub Value);

impl Feature {
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties")?.as_object()
    }

    /// Full human-readable address line, e.g. "10 Rue de Rivoli 75004 Paris".
    pub fn label(&self) -> Option<&str> {
        self.properties()?.get("label")?.as_str()
    }

    /// Relevance score in `[0, 1]` assigned by the geocoder.
    pub fn score(&self) -> Option<f64> {
        self.properties()?.get("score")?.as_f64()
    }

    /// Point geometry as `(longitude, latitude)` per GeoJSON ordering.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let coordinates = self.0.get("geometry")?.get("coordinates")?.as_array()?;
        Some((coordinates.first()?.as_f64()?, coordinates.get(1)?.as_f64()?))
    }
}

/// Scalar value of one query parameter. The service takes everything as a
/// string on the wire; this keeps the caller-facing types honest.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Open, ordered set of query parameters. Keys are not validated; the remote
/// service defines which names mean anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(name, _)| name == key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn extend(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    /// Render every pair as strings, in insertion order, ready for
    /// `RequestBuilder::query`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }
}
