//! Typed publish/subscribe between the data model, the viewport, and hosts.
//!
//! Everything runs on one thread: `emit` only queues, and `dispatch` drains
//! the queue, handing each event to each subscriber exactly once. Handlers
//! run to completion before the next event is delivered.

use std::collections::VecDeque;

use serde::Serialize;

use crate::render::colors::Rgb;
use crate::types::{Rect, SheetId};

/// Change notifications consumed from the data model / app shell.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    SheetOffsetsChanged { sheet: SheetId },
    SheetValidationsChanged { sheet: SheetId },
    /// Tables, merges, or fills changed on a sheet.
    SheetContentChanged { sheet: SheetId },
    ThemeAccentColorChanged(Rgb),
    /// Cursor or selection moved.
    SelectionChanged,
    SheetSwitched { sheet: SheetId },
}

/// Notifications emitted by the viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewportEvent {
    ViewportChanged,
    /// Follows `ViewportChanged` once dependent state is consistent, so UI
    /// anchored to cells can reposition.
    ViewportChangedReady,
    ZoomChanged { scale: f64 },
    /// Visible world bounds for an off-thread culling/rendering worker.
    RenderViewportUpdate { bounds: Rect, scale: f64 },
    /// Throttled broadcast for multiplayer "follow".
    MultiplayerViewport {
        sheet: String,
        bounds: Rect,
        scale: f64,
    },
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

/// Single-threaded event queue with explicit subscribers.
pub struct EventBus<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler<E>)>,
    queue: VecDeque<E>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Queue an event for the next `dispatch`.
    pub fn emit(&mut self, event: E) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deliver queued events in order. Returns the number delivered.
    pub fn dispatch(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            for (_, handler) in &mut self.subscribers {
                handler(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Take queued events without delivering them.
    pub fn drain(&mut self) -> Vec<E> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_each_event_delivered_once_per_subscriber() {
        let mut bus: EventBus<u32> = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&seen);
        bus.subscribe(move |e| a.borrow_mut().push(("a", *e)));
        let b = Rc::clone(&seen);
        bus.subscribe(move |e| b.borrow_mut().push(("b", *e)));

        bus.emit(1);
        bus.emit(2);
        assert_eq!(bus.dispatch(), 2);
        assert_eq!(bus.dispatch(), 0);
        assert_eq!(
            *seen.borrow(),
            vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus: EventBus<u32> = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_| *c.borrow_mut() += 1);
        bus.emit(1);
        bus.dispatch();
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(2);
        bus.dispatch();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_viewport_event_serializes_tagged() {
        let json = serde_json::to_string(&ViewportEvent::ZoomChanged { scale: 2.0 }).ok();
        assert_eq!(json.as_deref(), Some(r#"{"type":"zoomChanged","scale":2.0}"#));
    }
}
