use crate::data_types::{Viewport, ViewportState};
use gpui::{App, Context};
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::debug;

/// Called with the new flag whenever the group starts or stops interacting.
pub type InteractionListener = Rc<dyn Fn(bool, &mut App)>;

/// The window into time shared by a group of charts.
///
/// Lives in an `Entity` owned by the group; charts observe it and derive
/// their own indices on every read. Mutations are whole-value replaces.
///
/// The interacting flag is derived: it stays up while any chart holds a
/// drag or the host has raised it with [`set_interacting`](Self::set_interacting).
pub struct SharedViewport {
    state: ViewportState,
    dragging: BTreeSet<String>,
    host_interacting: bool,
    on_interaction_change: Option<InteractionListener>,
}

impl SharedViewport {
    pub fn new(initial: Viewport) -> Self {
        Self {
            state: ViewportState {
                viewport: initial.clamped(),
                interacting: false,
            },
            dragging: BTreeSet::new(),
            host_interacting: false,
            on_interaction_change: None,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.state.viewport
    }

    pub fn is_interacting(&self) -> bool {
        self.state.interacting
    }

    /// Ids of the charts whose selector is currently held.
    pub fn dragging_charts(&self) -> impl Iterator<Item = &str> {
        self.dragging.iter().map(String::as_str)
    }

    pub fn set_listener(&mut self, listener: Option<InteractionListener>) {
        self.on_interaction_change = listener;
    }

    pub fn set_viewport(&mut self, next: Viewport, cx: &mut Context<Self>) {
        if self.state.viewport == next {
            return;
        }
        self.state = ViewportState {
            viewport: next,
            ..self.state
        };
        cx.notify();
    }

    /// Host-driven interaction, independent of chart drags.
    pub fn set_interacting(&mut self, interacting: bool, cx: &mut Context<Self>) {
        self.host_interacting = interacting;
        self.refresh_interacting(cx);
    }

    /// Marks `chart_id` as dragging. Returns false if it already was.
    pub fn begin_interaction(&mut self, chart_id: &str, cx: &mut Context<Self>) -> bool {
        if !self.dragging.insert(chart_id.to_string()) {
            return false;
        }
        self.refresh_interacting(cx);
        true
    }

    /// Releases `chart_id`'s drag. The group only stops interacting once
    /// no chart holds one.
    pub fn end_interaction(&mut self, chart_id: &str, cx: &mut Context<Self>) -> bool {
        if !self.dragging.remove(chart_id) {
            return false;
        }
        self.refresh_interacting(cx);
        true
    }

    fn refresh_interacting(&mut self, cx: &mut Context<Self>) {
        let interacting = self.host_interacting || !self.dragging.is_empty();
        if self.state.interacting == interacting {
            return;
        }
        debug!(interacting, dragging = self.dragging.len(), "group interaction changed");
        self.state = ViewportState {
            interacting,
            ..self.state
        };
        if let Some(listener) = self.on_interaction_change.clone() {
            // Deferred so the listener can read the group.
            App::defer(cx, move |cx| listener(interacting, cx));
        }
        cx.notify();
    }
}
