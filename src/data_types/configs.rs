use super::Viewport;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings shared by every chart of a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub initial_viewport: Viewport,
    pub settle_delay_ms: u64,
    /// Value cells (samples x lines) from which statistics go parallel.
    pub parallel_stats_threshold: usize,
    pub feed_capacity: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            initial_viewport: Viewport::FULL,
            settle_delay_ms: 150,
            parallel_stats_threshold: 50_000,
            feed_capacity: 600,
        }
    }
}

impl GroupConfig {
    /// Parses a possibly partial JSON object; missing fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).wrap_err("invalid chart group configuration")?;
        config.initial_viewport = config.initial_viewport.clamped();
        Ok(config)
    }

    pub fn with_initial_viewport(mut self, viewport: Viewport) -> Self {
        self.initial_viewport = viewport.clamped();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// One chart of a group and the lines it plots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub id: String,
    /// Empty means "every line found in the data".
    #[serde(default)]
    pub lines: Vec<String>,
}

impl ChartConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lines: vec![],
        }
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let c = GroupConfig::from_json_str(r#"{"settle_delay_ms": 300}"#).unwrap();
        assert_eq!(c.settle_delay(), Duration::from_millis(300));
        assert_eq!(c.initial_viewport, Viewport::FULL);
        assert_eq!(c.feed_capacity, 600);
    }

    #[test]
    fn out_of_range_initial_viewport_is_clamped() {
        let c = GroupConfig::from_json_str(r#"{"initial_viewport": {"start": 90, "end": 10}}"#)
            .unwrap();
        assert_eq!(c.initial_viewport, Viewport::new(90.0, 90.0));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = GroupConfig::from_json_str("[1, 2").unwrap_err();
        assert!(format!("{err:#}").contains("invalid chart group configuration"));
    }
}
