//! gpui_chart_sync: live-updating charts that share one pan/zoom window

pub mod buffer;
pub mod chart_group;
pub mod data_types;
pub mod feed;
pub mod live_chart;
pub mod session;
pub mod shared_viewport;
pub mod stats;
pub mod utils;
pub mod windowing;

pub use chart_group::ChartGroup;
pub use data_types::{ChartConfig, GroupConfig, Sample, Viewport, XKey};
pub use feed::MetricFeed;
pub use live_chart::{ChartFrame, LiveChart};
pub use shared_viewport::SharedViewport;
pub use windowing::VisibleWindow;
