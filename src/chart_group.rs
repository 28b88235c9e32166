use crate::data_types::{ChartConfig, GroupConfig, Sample, Viewport};
use crate::feed::MetricFeed;
use crate::live_chart::LiveChart;
use crate::shared_viewport::{InteractionListener, SharedViewport};
use gpui::{App, AppContext, Context, Entity, Task};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Parent coordinator of charts that pan and zoom together.
///
/// Owns the shared viewport and hands it to each chart it creates; charts
/// never reach into one another.
pub struct ChartGroup {
    config: GroupConfig,
    shared: Entity<SharedViewport>,
    charts: Vec<Entity<LiveChart>>,
    feed_revision: u64,
    feed_task: Option<Task<()>>,
}

impl ChartGroup {
    pub fn new(config: GroupConfig, cx: &mut Context<Self>) -> Self {
        let shared = cx.new(|_| SharedViewport::new(config.initial_viewport));
        cx.observe(&shared, |_, _, cx| cx.notify()).detach();

        Self {
            config,
            shared,
            charts: vec![],
            feed_revision: 0,
            feed_task: None,
        }
    }

    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    pub fn shared(&self) -> &Entity<SharedViewport> {
        &self.shared
    }

    pub fn charts(&self) -> &[Entity<LiveChart>] {
        &self.charts
    }

    pub fn viewport(&self, cx: &App) -> Viewport {
        self.shared.read(cx).viewport()
    }

    pub fn is_interacting(&self, cx: &App) -> bool {
        self.shared.read(cx).is_interacting()
    }

    /// Registers the callback run whenever the interaction flag flips.
    pub fn on_interaction_change(
        &mut self,
        listener: impl Fn(bool, &mut App) + 'static,
        cx: &mut Context<Self>,
    ) {
        let listener: InteractionListener = Rc::new(listener);
        self.shared.update(cx, |s, _| s.set_listener(Some(listener)));
    }

    pub fn add_chart(&mut self, config: ChartConfig, cx: &mut Context<Self>) -> Entity<LiveChart> {
        debug!(chart = %config.id, "adding chart to group");
        let shared = self.shared.clone();
        let group_config = self.config.clone();
        let chart = cx.new(|cx| LiveChart::new(config, shared, &group_config, cx));
        self.charts.push(chart.clone());
        cx.notify();
        chart
    }

    pub fn chart(&self, id: &str, cx: &App) -> Option<Entity<LiveChart>> {
        self.charts
            .iter()
            .find(|c| c.read(cx).id() == id)
            .cloned()
    }

    /// Unmounts a chart. Its settle timer goes with it, and so does its hold
    /// on the group's interaction; siblings unfreeze once no drag remains.
    pub fn remove_chart(&mut self, id: &str, cx: &mut Context<Self>) -> bool {
        let Some(pos) = self.charts.iter().position(|c| c.read(cx).id() == id) else {
            return false;
        };
        let chart = self.charts.remove(pos);
        let was_dragging = chart.update(cx, |c, _| {
            c.cancel_settle();
            c.is_dragging()
        });
        if was_dragging {
            self.shared.update(cx, |s, cx| s.end_interaction(id, cx));
        }
        debug!(chart = id, was_dragging, "removed chart from group");
        cx.notify();
        true
    }

    pub fn push_data(&mut self, id: &str, live: Vec<Sample>, cx: &mut Context<Self>) -> bool {
        match self.chart(id, cx) {
            Some(chart) => {
                chart.update(cx, |c, cx| c.push_data(live, cx));
                true
            }
            None => false,
        }
    }

    /// Back to the full range, unless a drag is in progress.
    pub fn reset_viewport(&mut self, cx: &mut Context<Self>) {
        self.shared.update(cx, |s, cx| {
            if !s.is_interacting() {
                s.set_viewport(Viewport::FULL, cx);
            }
        });
    }

    /// A feed bounded to the configured history length.
    pub fn new_feed(&self) -> MetricFeed {
        MetricFeed::new(self.config.feed_capacity)
    }

    /// Pushes the feed's history to every chart if it changed since the
    /// last sync. Each chart receives only its own lines.
    pub fn sync_from_feed(&mut self, feed: &MetricFeed, cx: &mut Context<Self>) -> bool {
        let Some((revision, history)) = feed.read_since(self.feed_revision) else {
            return false;
        };
        self.feed_revision = revision;

        for chart in &self.charts {
            chart.update(cx, |c, cx| {
                let lines = &c.config().lines;
                let live = if lines.is_empty() {
                    history.clone()
                } else {
                    history.iter().map(|s| s.project(lines)).collect()
                };
                c.push_data(live, cx);
            });
        }
        true
    }

    /// Polls `feed` every `interval` until the group is dropped or
    /// [`stop_following`](Self::stop_following) is called.
    pub fn follow_feed(&mut self, feed: MetricFeed, interval: Duration, cx: &mut Context<Self>) {
        self.feed_task = Some(cx.spawn(async move |this, cx| loop {
            cx.background_executor().timer(interval).await;
            let synced = this.update(cx, |group, cx| {
                group.sync_from_feed(&feed, cx);
            });
            if synced.is_err() {
                break;
            }
        }));
    }

    pub fn stop_following(&mut self) {
        self.feed_task = None;
    }
}
