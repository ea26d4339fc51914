//! Event-driven model of the diagram's client runtime.
//!
//! The embedded script is a port of this state machine. All mutation goes through `&mut self`
//! event methods; time is an explicit monotonic clock supplied by the caller, and timers fire
//! from [`DiagramRuntime::advance`].
//!
//! Popups share a single active slot. Each popup moves through
//! `Hidden -> Showing -> PendingHide -> (Hidden | Showing)`; the hide timer carries a
//! sequence number so that a timer which outlived its cancellation is ignored, and even a
//! current timer re-checks hover state before hiding.

use super::geometry::{EdgeGeometry, PopupPlacement, place_popup};
use super::layout::DiagramLayout;
use apidoc_core::geom::size;
use apidoc_core::{DiagramDecl, DiagramSettings};
use rustc_hash::FxHashSet;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupState {
    Hidden,
    Showing,
    PendingHide,
}

impl PopupState {
    /// Name the client script uses for this state (`Hidden` is an empty active slot there).
    pub fn as_str(self) -> &'static str {
        match self {
            PopupState::Hidden => "hidden",
            PopupState::Showing => "showing",
            PopupState::PendingHide => "pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    Shown {
        node: String,
        placement: PopupPlacement,
    },
    HideScheduled {
        node: String,
        timer: TimerId,
        due: Duration,
    },
    HideCancelled {
        node: String,
    },
    Hidden {
        node: String,
    },
    Redrawn {
        edges: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct HideTimer {
    id: TimerId,
    due: Duration,
}

#[derive(Debug, Clone)]
struct ActivePopup {
    node: String,
    state: PopupState,
    placement: PopupPlacement,
    timer: Option<HideTimer>,
}

#[derive(Debug, Clone)]
pub struct DiagramRuntime {
    decl: DiagramDecl,
    settings: DiagramSettings,
    layout: DiagramLayout,
    edges: Vec<EdgeGeometry>,
    redraws: usize,
    loaded: bool,
    settle_due: Option<Duration>,
    now: Duration,
    hovered_nodes: FxHashSet<String>,
    popup_hovered: bool,
    active: Option<ActivePopup>,
    next_timer: u64,
}

impl DiagramRuntime {
    pub fn new(decl: DiagramDecl, settings: DiagramSettings) -> Self {
        Self {
            decl,
            settings,
            layout: DiagramLayout::default(),
            edges: Vec::new(),
            redraws: 0,
            loaded: false,
            settle_due: None,
            now: Duration::ZERO,
            hovered_nodes: FxHashSet::default(),
            popup_hovered: false,
            active: None,
            next_timer: 0,
        }
    }

    /// Replaces the measured node boxes without redrawing (a reflow the runtime has not been
    /// told about yet).
    pub fn set_layout(&mut self, layout: DiagramLayout) {
        self.layout = layout;
    }

    /// First draw. Schedules the one-shot settle redraw.
    pub fn load(&mut self, now: Duration) -> Vec<RuntimeEvent> {
        self.now = self.now.max(now);
        let mut events = vec![self.redraw()];
        if !self.loaded {
            self.loaded = true;
            self.settle_due = Some(self.now + self.settings.settle);
        }
        events.extend(self.advance(now));
        events
    }

    pub fn resize(&mut self, layout: DiagramLayout, now: Duration) -> Vec<RuntimeEvent> {
        self.layout = layout;
        let mut events = self.advance(now);
        events.push(self.redraw());
        events
    }

    /// Moves the clock forward and fires every timer that is due, in due order.
    pub fn advance(&mut self, now: Duration) -> Vec<RuntimeEvent> {
        self.now = self.now.max(now);
        let mut fired: Vec<(Duration, Option<TimerId>)> = Vec::with_capacity(2);
        if let Some(due) = self.settle_due.filter(|due| *due <= self.now) {
            fired.push((due, None));
        }
        if let Some(timer) = self
            .active
            .as_ref()
            .and_then(|a| a.timer)
            .filter(|t| t.due <= self.now)
        {
            fired.push((timer.due, Some(timer.id)));
        }
        fired.sort_by_key(|(due, _)| *due);

        let mut events = Vec::new();
        for (_, timer) in fired {
            match timer {
                None => {
                    self.settle_due = None;
                    events.push(self.redraw());
                }
                Some(id) => events.extend(self.fire_hide_timer(id)),
            }
        }
        events
    }

    /// Handles a hide timer firing. Stale ids are ignored; a current timer still checks that
    /// neither the node nor its popup is hovered.
    pub fn fire_hide_timer(&mut self, id: TimerId) -> Option<RuntimeEvent> {
        let active = self.active.as_mut()?;
        match active.timer {
            Some(t) if t.id == id => active.timer = None,
            _ => {
                tracing::trace!(timer = id.0, "ignoring stale hide timer");
                return None;
            }
        }
        if active.state != PopupState::PendingHide {
            return None;
        }
        if self.hovered_nodes.contains(&active.node) || self.popup_hovered {
            active.state = PopupState::Showing;
            return Some(RuntimeEvent::HideCancelled {
                node: active.node.clone(),
            });
        }
        let node = active.node.clone();
        self.active = None;
        Some(RuntimeEvent::Hidden { node })
    }

    pub fn pointer_enter_node(&mut self, node: &str, now: Duration) -> Vec<RuntimeEvent> {
        let mut events = self.advance(now);
        self.hovered_nodes.insert(node.to_string());

        if let Some(active) = self.active.as_mut() {
            if active.node == node {
                if active.state == PopupState::PendingHide {
                    active.state = PopupState::Showing;
                    active.timer = None;
                    events.push(RuntimeEvent::HideCancelled {
                        node: node.to_string(),
                    });
                }
                return events;
            }
            let previous = active.node.clone();
            self.active = None;
            self.popup_hovered = false;
            events.push(RuntimeEvent::Hidden { node: previous });
        }

        let Some(placement) = self.placement_for(node) else {
            tracing::debug!(node, "no layout box for hovered node");
            return events;
        };
        self.active = Some(ActivePopup {
            node: node.to_string(),
            state: PopupState::Showing,
            placement,
            timer: None,
        });
        events.push(RuntimeEvent::Shown {
            node: node.to_string(),
            placement,
        });
        events
    }

    pub fn pointer_leave_node(&mut self, node: &str, now: Duration) -> Vec<RuntimeEvent> {
        let mut events = self.advance(now);
        self.hovered_nodes.remove(node);
        if !self.popup_hovered {
            events.extend(self.schedule_hide(node));
        }
        events
    }

    pub fn pointer_enter_popup(&mut self, node: &str, now: Duration) -> Vec<RuntimeEvent> {
        let mut events = self.advance(now);
        let Some(active) = self.active.as_mut().filter(|a| a.node == node) else {
            return events;
        };
        self.popup_hovered = true;
        if active.state == PopupState::PendingHide {
            active.state = PopupState::Showing;
            active.timer = None;
            events.push(RuntimeEvent::HideCancelled {
                node: node.to_string(),
            });
        }
        events
    }

    pub fn pointer_leave_popup(&mut self, node: &str, now: Duration) -> Vec<RuntimeEvent> {
        let mut events = self.advance(now);
        if self.active.as_ref().is_some_and(|a| a.node == node) {
            self.popup_hovered = false;
            if !self.hovered_nodes.contains(node) {
                events.extend(self.schedule_hide(node));
            }
        }
        events
    }

    fn schedule_hide(&mut self, node: &str) -> Option<RuntimeEvent> {
        let due = self.now + self.settings.grace;
        let id = TimerId(self.next_timer);
        let active = self
            .active
            .as_mut()
            .filter(|a| a.node == node && a.state == PopupState::Showing)?;
        self.next_timer += 1;
        active.state = PopupState::PendingHide;
        active.timer = Some(HideTimer { id, due });
        Some(RuntimeEvent::HideScheduled {
            node: node.to_string(),
            timer: id,
            due,
        })
    }

    fn placement_for(&self, node: &str) -> Option<PopupPlacement> {
        let rect = *self.layout.nodes.get(node)?;
        Some(place_popup(
            rect,
            size(self.settings.popup_width, self.settings.popup_height),
            self.layout.container,
            &self.settings,
        ))
    }

    /// Clears and recomputes every edge from the current layout.
    fn redraw(&mut self) -> RuntimeEvent {
        self.edges = self
            .layout
            .route_edges(&self.decl, self.settings.label_offset);
        self.redraws += 1;
        RuntimeEvent::Redrawn {
            edges: self.edges.len(),
        }
    }

    pub fn edges(&self) -> &[EdgeGeometry] {
        &self.edges
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Node whose popup occupies the active slot.
    pub fn active_node(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.node.as_str())
    }

    pub fn popup_state(&self, node: &str) -> PopupState {
        match &self.active {
            Some(a) if a.node == node => a.state,
            _ => PopupState::Hidden,
        }
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.active.as_ref().and_then(|a| a.timer).map(|t| t.id)
    }
}
