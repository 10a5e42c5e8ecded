use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Values keyed by bucket label, in the order the source returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData(Vec<(String, f64)>);

/// Geometry of a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// `floor(value * chart_height / max)`.
    pub height: u32,
    /// `round(value / max * 100)`.
    pub percent: u32,
}

impl ChartData {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.0
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|(_, value)| *value).collect()
    }

    /// Scale every value against the largest one.
    ///
    /// When the largest value is not positive every bar is flat. Negative
    /// values clamp to zero.
    pub fn bars(&self, chart_height: u32) -> Vec<Bar> {
        let max = self.0.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        let usable = max.is_finite() && max > 0.0;
        let height = f64::from(chart_height);

        self.0
            .iter()
            .map(|(label, value)| {
                let (height, percent) = if usable {
                    (
                        (value * height / max).floor().max(0.0) as u32,
                        (value / max * 100.0).round().max(0.0) as u32,
                    )
                } else {
                    (0, 0)
                };
                Bar {
                    label: label.clone(),
                    value: *value,
                    height,
                    percent,
                }
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ChartData {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for ChartData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct ChartDataVisitor;

impl<'de> Visitor<'de> for ChartDataVisitor {
    type Value = ChartData;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of labels to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((label, value)) = access.next_entry::<String, f64>()? {
            entries.push((label, value));
        }
        Ok(ChartData(entries))
    }
}

// A visitor rather than a map type so bucket order survives decoding.
impl<'de> Deserialize<'de> for ChartData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ChartDataVisitor)
    }
}
