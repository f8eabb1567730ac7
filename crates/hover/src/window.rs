//! The top-level event scope pointer listeners attach to.

use layout::{ClientPoint, PagePoint, ScrollOffset};
use log::{debug, trace, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
}

/// A pointer position in both frames.
///
/// `page` is derived from `client` with the window's scroll offset at
/// dispatch time; listeners compare boxes against `page` only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub client: ClientPoint,
    pub page: PagePoint,
}

type Listener = Rc<dyn Fn(&PointerEvent)>;

struct Registration {
    id: u64,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct WindowState {
    scroll: ScrollOffset,
    listeners: Vec<Registration>,
    next_id: u64,
}

/// Shared handle to a window. Clones refer to the same window.
#[derive(Clone, Default)]
pub struct Window {
    state: Rc<RefCell<WindowState>>,
}

impl Window {
    /// Register `listener` for `kind`. It stays registered until the returned
    /// guard is dropped.
    pub fn add_event_listener<F>(&self, kind: EventKind, listener: F) -> ListenerGuard
    where
        F: Fn(&PointerEvent) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push(Registration {
            id,
            kind,
            listener: Rc::new(listener),
        });
        debug!("Added {kind:?} listener {id}");
        ListenerGuard {
            window: Rc::downgrade(&self.state),
            id,
        }
    }

    /// Deliver a pointer move at `client` to every pointer-move listener, in
    /// registration order.
    pub fn dispatch_pointer_move(&self, client: ClientPoint) -> PointerEvent {
        let (event, listeners) = {
            let state = self.state.borrow();
            let event = PointerEvent {
                client,
                page: client.to_page(state.scroll),
            };
            let listeners: Vec<Listener> = state
                .listeners
                .iter()
                .filter(|registration| registration.kind == EventKind::PointerMove)
                .map(|registration| Rc::clone(&registration.listener))
                .collect();
            (event, listeners)
        };
        trace!(
            "Pointer move at client ({}, {}) page ({}, {}) to {} listeners",
            client.x,
            client.y,
            event.page.x,
            event.page.y,
            listeners.len()
        );
        for listener in listeners {
            listener(&event);
        }
        event
    }

    /// Scroll to an absolute offset. Negative offsets clamp to zero.
    pub fn scroll_to(&self, x: f32, y: f32) {
        let mut state = self.state.borrow_mut();
        state.scroll = ScrollOffset {
            x: x.max(0.0),
            y: y.max(0.0),
        };
        debug!("Scrolled to ({}, {})", state.scroll.x, state.scroll.y);
    }

    pub fn scroll_by(&self, dx: f32, dy: f32) {
        let current = self.scroll_offset();
        self.scroll_to(current.x + dx, current.y + dy);
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.state.borrow().scroll
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Removes its listener from the window when dropped.
#[must_use = "the listener is removed as soon as the guard is dropped"]
pub struct ListenerGuard {
    window: Weak<RefCell<WindowState>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(shared) = self.window.upgrade() else {
            return;
        };
        let Ok(mut state) = shared.try_borrow_mut() else {
            warn!("Window busy, listener {} left registered", self.id);
            return;
        };
        let id = self.id;
        state.listeners.retain(|registration| registration.id != id);
        debug!("Removed listener {id}");
    }
}
