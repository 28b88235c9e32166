use crate::buffer::{ChartBuffer, IngestOutcome};
use crate::data_types::{discover_lines, ChartConfig, GroupConfig, Sample};
use crate::session::{DragTransition, InteractionSession};
use crate::shared_viewport::SharedViewport;
use crate::stats::{series_stats, LineSummary};
use crate::utils::date_formatter::{format_for_range, SmartDateFormat};
use crate::windowing::{viewport_from_indices, visible_window, VisibleWindow};
use gpui::{App, Context, Entity, Task};
use std::time::Instant;
use tracing::{debug, trace};

/// What the renderer needs for one chart on one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub window: VisibleWindow,
    pub samples: Vec<Sample>,
    pub stats: Vec<LineSummary>,
    /// Label format for the visible x keys, sized to their time span.
    pub x_format: SmartDateFormat,
    /// First and last visible x keys, formatted with `x_format`.
    pub x_labels: Option<(String, String)>,
}

/// Picks the x label format from the first and last visible keys.
/// Free-form labels and empty slices keep the finest format.
pub fn x_label_format(samples: &[Sample]) -> SmartDateFormat {
    let first = samples.first().and_then(|s| s.x.millis());
    let last = samples.last().and_then(|s| s.x.millis());
    match (first, last) {
        (Some(first), Some(last)) => format_for_range(first, last),
        _ => SmartDateFormat::HourMinSec,
    }
}

/// One chart of a group: its own data buffer and drag session, reading the
/// group's shared viewport.
pub struct LiveChart {
    config: ChartConfig,
    shared: Entity<SharedViewport>,
    buffer: ChartBuffer,
    session: InteractionSession,
    settle_task: Option<Task<()>>,
    parallel_stats_threshold: usize,
}

impl LiveChart {
    pub fn new(
        config: ChartConfig,
        shared: Entity<SharedViewport>,
        group_config: &GroupConfig,
        cx: &mut Context<Self>,
    ) -> Self {
        cx.observe(&shared, |this, shared, cx| {
            // The group's last gesture ended: release what was held back.
            // A chart still in its own session flushes when it settles.
            if !shared.read(cx).is_interacting()
                && !this.session.is_interacting()
                && this.buffer.flush()
            {
                this.correct_viewport(cx);
            }
            cx.notify();
        })
        .detach();

        Self {
            config,
            shared,
            buffer: ChartBuffer::default(),
            session: InteractionSession::new(group_config.settle_delay()),
            settle_task: None,
            parallel_stats_threshold: group_config.parallel_stats_threshold,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn shared(&self) -> &Entity<SharedViewport> {
        &self.shared
    }

    pub fn display_data(&self) -> &[Sample] {
        self.buffer.display()
    }

    pub fn pending_data(&self) -> Option<&[Sample]> {
        self.buffer.pending()
    }

    /// True while this chart's own selector is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.session.is_interacting()
    }

    pub fn has_settle_timer(&self) -> bool {
        self.settle_task.is_some()
    }

    /// Receives a fresh copy of this chart's live data.
    pub fn push_data(&mut self, live: Vec<Sample>, cx: &mut Context<Self>) {
        let interacting = self.session.is_interacting() || self.shared.read(cx).is_interacting();
        match self.buffer.ingest(live, interacting) {
            IngestOutcome::Applied => {
                self.correct_viewport(cx);
                cx.notify();
            }
            IngestOutcome::Deferred => {
                trace!(chart = %self.config.id, "live data held during interaction");
            }
        }
    }

    /// Drag feedback from the renderer, in this chart's index space.
    pub fn report_drag(&mut self, start_index: usize, end_index: usize, cx: &mut Context<Self>) {
        let next = viewport_from_indices(start_index, end_index, self.buffer.display().len());

        if self.session.record_drag(Instant::now()) == DragTransition::Started {
            debug!(chart = %self.config.id, "selector drag started");
            let id = self.config.id.clone();
            self.shared.update(cx, |s, cx| s.begin_interaction(&id, cx));
        }
        self.shared.update(cx, |s, cx| s.set_viewport(next, cx));
        self.schedule_settle(cx);
    }

    /// Ends the gesture right away, for hosts that know when a drag ends.
    pub fn end_drag(&mut self, cx: &mut Context<Self>) {
        self.settle_task = None;
        self.finish_settle(cx);
    }

    /// Drops the pending settle timer without settling.
    pub fn cancel_settle(&mut self) {
        self.settle_task = None;
    }

    fn schedule_settle(&mut self, cx: &mut Context<Self>) {
        let delay = self.session.settle_delay();
        // Replacing the task drops, and so cancels, the previous timer.
        self.settle_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;
            if let Err(err) = this.update(cx, |chart, cx| chart.finish_settle(cx)) {
                trace!(%err, "chart dropped before its drag settled");
            }
        }));
    }

    fn finish_settle(&mut self, cx: &mut Context<Self>) {
        if !self.session.settle() {
            return;
        }
        debug!(chart = %self.config.id, "selector drag settled");
        let id = self.config.id.clone();
        self.shared.update(cx, |s, cx| s.end_interaction(&id, cx));
        // Held data only lands once no sibling is still dragging; otherwise
        // the group flag dropping later flushes it through the observer.
        if !self.shared.read(cx).is_interacting() && self.buffer.flush() {
            self.correct_viewport(cx);
        }
        cx.notify();
    }

    /// Pulls an out-of-range viewport back into `[0, 100]`. Idempotent.
    fn correct_viewport(&mut self, cx: &mut Context<Self>) {
        let state = self.shared.read(cx).state();
        if state.interacting {
            return;
        }
        let clamped = state.viewport.clamped();
        if clamped != state.viewport {
            debug!(chart = %self.config.id, ?clamped, "correcting shared viewport");
            self.shared.update(cx, |s, cx| s.set_viewport(clamped, cx));
        }
    }

    pub fn visible_window(&self, cx: &App) -> VisibleWindow {
        visible_window(self.shared.read(cx).viewport(), self.buffer.display().len())
    }

    pub fn visible_samples<'a>(&'a self, cx: &App) -> &'a [Sample] {
        let display = self.buffer.display();
        &display[self.visible_window(cx).range(display.len())]
    }

    /// Configured lines, or every line present in the displayed data.
    pub fn lines(&self) -> Vec<String> {
        if self.config.lines.is_empty() {
            discover_lines(self.buffer.display())
        } else {
            self.config.lines.clone()
        }
    }

    pub fn stats(&self, cx: &App) -> Vec<LineSummary> {
        series_stats(
            self.visible_samples(cx),
            &self.lines(),
            self.parallel_stats_threshold,
        )
    }

    pub fn frame(&self, cx: &App) -> ChartFrame {
        let samples = self.visible_samples(cx);
        let x_format = x_label_format(samples);
        let x_labels = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => {
                Some((first.x.format(x_format), last.x.format(x_format)))
            }
            _ => None,
        };
        ChartFrame {
            window: self.visible_window(cx),
            samples: samples.to_vec(),
            stats: self.stats(cx),
            x_format,
            x_labels,
        }
    }
}
