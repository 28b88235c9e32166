use crate::utils::date_formatter::{format_timestamp, SmartDateFormat};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// X position of a sample: a unix timestamp in milliseconds or a free label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XKey {
    Timestamp(i64),
    Label(String),
}

impl XKey {
    /// Formats the key for an axis tick or tooltip.
    pub fn format(&self, format: SmartDateFormat) -> String {
        match self {
            Self::Timestamp(ms) => format_timestamp(*ms, format),
            Self::Label(label) => label.clone(),
        }
    }

    pub fn millis(&self) -> Option<i64> {
        match self {
            Self::Timestamp(ms) => Some(*ms),
            Self::Label(_) => None,
        }
    }
}

impl fmt::Display for XKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(SmartDateFormat::HourMinSec))
    }
}

impl From<i64> for XKey {
    fn from(ms: i64) -> Self {
        Self::Timestamp(ms)
    }
}

impl From<&str> for XKey {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// One point in time with a value per line.
///
/// A line whose value is `None` (or absent) is treated as missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: XKey,
    #[serde(default, deserialize_with = "lenient_values")]
    pub values: BTreeMap<String, Option<f64>>,
}

impl Sample {
    pub fn new(x: impl Into<XKey>) -> Self {
        Self {
            x: x.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, line: impl Into<String>, value: f64) -> Self {
        self.values.insert(line.into(), Some(value));
        self
    }

    pub fn with_missing(mut self, line: impl Into<String>) -> Self {
        self.values.insert(line.into(), None);
        self
    }

    /// The value of `line` if it is present and finite.
    pub fn finite_value(&self, line: &str) -> Option<f64> {
        self.values
            .get(line)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    /// Keeps only the named lines.
    pub fn project(&self, lines: &[String]) -> Self {
        let values = self
            .values
            .iter()
            .filter(|(line, _)| lines.contains(line))
            .map(|(line, value)| (line.clone(), *value))
            .collect();
        Self {
            x: self.x.clone(),
            values,
        }
    }

    /// Builds a sample from one collector snapshot, one line per metric present.
    pub fn from_snapshot(timestamp_ms: i64, snapshot: &MetricsSnapshot) -> Self {
        let values = MetricKey::ALL
            .iter()
            .filter_map(|key| {
                snapshot
                    .value(*key)
                    .map(|v| (key.as_str().to_string(), Some(v)))
            })
            .collect();
        Self {
            x: XKey::Timestamp(timestamp_ms),
            values,
        }
    }

    pub fn from_snapshot_json(timestamp_ms: i64, json: &str) -> Result<Self> {
        let snapshot: MetricsSnapshot =
            serde_json::from_str(json).wrap_err("invalid metrics snapshot")?;
        Ok(Self::from_snapshot(timestamp_ms, &snapshot))
    }
}

/// Sorted, de-duplicated line ids across `samples`.
pub fn discover_lines(samples: &[Sample]) -> Vec<String> {
    samples
        .iter()
        .flat_map(|s| s.values.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// Anything that is not a JSON number counts as missing.
fn lenient_values<'de, D>(deserializer: D) -> Result<BTreeMap<String, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.as_f64())).collect())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Fps,
    Cpu,
    Power,
    Memory,
    Network,
    Battery,
    BatteryTemp,
    Traffic,
}

impl MetricKey {
    pub const ALL: [MetricKey; 8] = [
        Self::Fps,
        Self::Cpu,
        Self::Power,
        Self::Memory,
        Self::Network,
        Self::Battery,
        Self::BatteryTemp,
        Self::Traffic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fps => "fps",
            Self::Cpu => "cpu",
            Self::Power => "power",
            Self::Memory => "memory",
            Self::Network => "network",
            Self::Battery => "battery",
            Self::BatteryTemp => "battery_temp",
            Self::Traffic => "traffic",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One poll of the device collector. Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    pub fps: Option<f64>,
    pub cpu: Option<f64>,
    pub power: Option<f64>,
    pub memory_mb: Option<f64>,
    pub network_kbps: Option<f64>,
    pub battery_level: Option<f64>,
    pub battery_temp_c: Option<f64>,
    pub rx_bps: Option<f64>,
    pub tx_bps: Option<f64>,
}

impl MetricsSnapshot {
    pub fn value(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Fps => self.fps,
            MetricKey::Cpu => self.cpu,
            MetricKey::Power => self.power,
            MetricKey::Memory => self.memory_mb,
            MetricKey::Network => self.network_kbps,
            MetricKey::Battery => self.battery_level,
            MetricKey::BatteryTemp => self.battery_temp_c,
            MetricKey::Traffic => self.total_bps(),
        }
    }

    /// Combined rx + tx throughput, whichever directions were measured.
    pub fn total_bps(&self) -> Option<f64> {
        match (self.rx_bps, self.tx_bps) {
            (Some(rx), Some(tx)) => Some(rx + tx),
            (Some(rx), None) => Some(rx),
            (None, Some(tx)) => Some(tx),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_values_deserialize_as_missing() {
        let s: Sample =
            serde_json::from_str(r#"{"x": 5, "values": {"fps": 60, "cpu": "n/a", "power": null}}"#)
                .unwrap();
        assert_eq!(s.x, XKey::Timestamp(5));
        assert_eq!(s.finite_value("fps"), Some(60.0));
        assert_eq!(s.values.get("cpu"), Some(&None));
        assert_eq!(s.finite_value("power"), None);
    }

    #[test]
    fn snapshot_becomes_one_line_per_metric() {
        let s = Sample::from_snapshot_json(
            1_000,
            r#"{"fps": 59.5, "memory_mb": 812.0, "rx_bps": 100.0, "raw": "ignored"}"#,
        )
        .unwrap();
        assert_eq!(s.finite_value("fps"), Some(59.5));
        assert_eq!(s.finite_value("memory"), Some(812.0));
        assert_eq!(s.finite_value("traffic"), Some(100.0));
        assert!(!s.values.contains_key("cpu"));
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        assert!(Sample::from_snapshot_json(0, "{not json").is_err());
    }

    #[test]
    fn project_keeps_named_lines() {
        let s = Sample::new(0_i64).with_value("fps", 1.0).with_value("cpu", 2.0);
        let p = s.project(&["cpu".to_string()]);
        assert_eq!(p.values.len(), 1);
        assert_eq!(p.finite_value("cpu"), Some(2.0));
    }
}
