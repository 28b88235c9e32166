use crate::data_types::Sample;
use rayon::prelude::*;
use serde::Serialize;

/// Rendered in place of a statistic when a line has no usable values.
pub const UNDEFINED_LABEL: &str = "—";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LineStats {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
}

/// Max/min/avg of the finite values of `line` in `samples`.
/// `None` when the slice holds no finite value for that line.
pub fn line_stats(samples: &[Sample], line: &str) -> Option<LineStats> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for v in samples.iter().filter_map(|s| s.finite_value(line)) {
        count += 1;
        sum += v;
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    if count == 0 {
        return None;
    }
    Some(LineStats {
        max,
        min,
        avg: sum / count as f64,
    })
}

/// Display rule: zero decimals from a magnitude of 100, one below.
/// A trailing `.0` is dropped, so 60.0 renders as `60`.
pub fn format_stat_value(value: f64) -> String {
    if !value.is_finite() {
        return UNDEFINED_LABEL.to_string();
    }
    let text = if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else {
        let one = format!("{:.1}", value);
        match one.strip_suffix(".0") {
            Some(whole) => whole.to_string(),
            None => one,
        }
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatsLabel {
    pub max: String,
    pub min: String,
    pub avg: String,
}

impl StatsLabel {
    pub fn new(stats: Option<LineStats>) -> Self {
        match stats {
            Some(s) => Self {
                max: format_stat_value(s.max),
                min: format_stat_value(s.min),
                avg: format_stat_value(s.avg),
            },
            None => Self {
                max: UNDEFINED_LABEL.to_string(),
                min: UNDEFINED_LABEL.to_string(),
                avg: UNDEFINED_LABEL.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineSummary {
    pub line: String,
    pub stats: Option<LineStats>,
    pub label: StatsLabel,
}

impl LineSummary {
    fn compute(samples: &[Sample], line: &str) -> Self {
        let stats = line_stats(samples, line);
        Self {
            line: line.to_string(),
            stats,
            label: StatsLabel::new(stats),
        }
    }
}

/// Statistics for every line over the visible slice, in `lines` order.
///
/// Lines are processed in parallel once `samples.len() * lines.len()`
/// reaches `parallel_threshold`.
pub fn series_stats(
    samples: &[Sample],
    lines: &[String],
    parallel_threshold: usize,
) -> Vec<LineSummary> {
    let cells = samples.len().saturating_mul(lines.len());
    if lines.len() > 1 && cells >= parallel_threshold {
        lines
            .par_iter()
            .map(|line| LineSummary::compute(samples, line))
            .collect()
    } else {
        lines
            .iter()
            .map(|line| LineSummary::compute(samples, line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_switches_at_one_hundred() {
        assert_eq!(format_stat_value(99.96), "100");
        assert_eq!(format_stat_value(100.4), "100");
        assert_eq!(format_stat_value(812.7), "813");
        assert_eq!(format_stat_value(33.333), "33.3");
        assert_eq!(format_stat_value(60.0), "60");
        assert_eq!(format_stat_value(-0.04), "0");
        assert_eq!(format_stat_value(-150.2), "-150");
    }

    #[test]
    fn missing_line_is_undefined() {
        let samples = vec![Sample::new(0_i64).with_value("fps", 1.0)];
        assert_eq!(line_stats(&samples, "cpu"), None);
        assert_eq!(StatsLabel::new(None).avg, UNDEFINED_LABEL);
    }
}
