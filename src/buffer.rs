use crate::data_types::Sample;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The data replaced what the chart displays.
    Applied,
    /// The data was parked until the current gesture ends.
    Deferred,
}

/// Per-chart holding area between the live stream and the rendered series.
///
/// While the group is interacting the displayed series stays frozen and
/// only the most recent arrival is kept aside.
#[derive(Clone, Debug, Default)]
pub struct ChartBuffer {
    display: Vec<Sample>,
    pending: Option<Vec<Sample>>,
}

impl ChartBuffer {
    pub fn new(initial: Vec<Sample>) -> Self {
        Self {
            display: initial,
            pending: None,
        }
    }

    pub fn display(&self) -> &[Sample] {
        &self.display
    }

    pub fn pending(&self) -> Option<&[Sample]> {
        self.pending.as_deref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ingest(&mut self, live: Vec<Sample>, interacting: bool) -> IngestOutcome {
        if interacting {
            trace!(len = live.len(), replaced = self.pending.is_some(), "deferring live data");
            self.pending = Some(live);
            IngestOutcome::Deferred
        } else {
            self.display = live;
            IngestOutcome::Applied
        }
    }

    /// Moves pending data into the display. Returns whether anything moved.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                trace!(len = pending.len(), "applying deferred data");
                self.display = pending;
                true
            }
            None => false,
        }
    }
}
