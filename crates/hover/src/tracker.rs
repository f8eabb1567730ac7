use crate::line_height::{FirstLineMetric, first_line_height};
use crate::window::{EventKind, ListenerGuard, PointerEvent, Window};
use html::{Document, NodeId};
use layout::{GeometrySource, PagePoint};
use log::{debug, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Where to draw the hover player for the hovered element.
///
/// `top` and `left` are the element's box corner in the page frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverInfo {
    pub element: NodeId,
    pub top: f32,
    pub left: f32,
    pub height_of_first_line: f32,
}

/// What the tracker reads on every pointer move.
pub trait HoverSurface {
    fn document(&self) -> &Document;

    fn geometry(&self) -> &dyn GeometrySource;
}

/// First candidate whose box contains `point`, edges included.
pub fn find_hovered<S>(
    surface: &S,
    candidates: &[NodeId],
    point: PagePoint,
    metric: FirstLineMetric,
) -> Option<HoverInfo>
where
    S: HoverSurface + ?Sized,
{
    let geometry = surface.geometry();
    candidates.iter().copied().find_map(|element| {
        let rect = geometry.bounding_box(element)?;
        if !rect.contains(point) {
            return None;
        }
        Some(HoverInfo {
            element,
            top: rect.top(),
            left: rect.left(),
            height_of_first_line: first_line_height(surface.document(), geometry, element, metric),
        })
    })
}

type Observer = Box<dyn FnMut(Option<&HoverInfo>)>;

#[derive(Default)]
struct TrackerState {
    candidates: Vec<NodeId>,
    current: Option<HoverInfo>,
}

/// Keeps the hovered readable element of a surface up to date.
///
/// The tracker owns one pointer-move listener on its window; replacing the
/// candidates re-registers it and dropping the tracker removes it.
pub struct HoverTracker<S: HoverSurface + 'static> {
    window: Window,
    surface: Rc<RefCell<S>>,
    state: Rc<RefCell<TrackerState>>,
    observers: Rc<RefCell<Vec<Observer>>>,
    metric: FirstLineMetric,
    guard: Option<ListenerGuard>,
}

impl<S: HoverSurface + 'static> HoverTracker<S> {
    pub fn attach(
        window: &Window,
        surface: Rc<RefCell<S>>,
        candidates: Vec<NodeId>,
        metric: FirstLineMetric,
    ) -> Self {
        let mut tracker = Self {
            window: window.clone(),
            surface,
            state: Rc::new(RefCell::new(TrackerState::default())),
            observers: Rc::new(RefCell::new(Vec::new())),
            metric,
            guard: None,
        };
        tracker.set_candidates(candidates);
        tracker
    }

    /// Track a new candidate sequence.
    ///
    /// The old listener is removed before the new one is added, and the
    /// hovered element resets to none until the next pointer move.
    pub fn set_candidates(&mut self, candidates: Vec<NodeId>) {
        self.guard = None;
        debug!("Tracking {} hover candidates", candidates.len());
        self.state.borrow_mut().candidates = candidates;
        publish(&self.state, &self.observers, None);

        let surface = Rc::clone(&self.surface);
        let state = Rc::clone(&self.state);
        let observers = Rc::clone(&self.observers);
        let metric = self.metric;
        let listener = move |event: &PointerEvent| {
            let Ok(scene) = surface.try_borrow() else {
                warn!("Surface busy, skipping pointer move");
                return;
            };
            let next = {
                let tracked = state.borrow();
                find_hovered(&*scene, &tracked.candidates, event.page, metric)
            };
            drop(scene);
            publish(&state, &observers, next);
        };
        self.guard = Some(
            self.window
                .add_event_listener(EventKind::PointerMove, listener),
        );
    }

    /// The hovered element, or `None` when the pointer is over no candidate.
    pub fn current(&self) -> Option<HoverInfo> {
        self.state.borrow().current
    }

    /// Call `observer` whenever the hovered value changes.
    pub fn on_change<F>(&self, observer: F)
    where
        F: FnMut(Option<&HoverInfo>) + 'static,
    {
        self.observers.borrow_mut().push(Box::new(observer));
    }
}

fn publish(
    state: &RefCell<TrackerState>,
    observers: &RefCell<Vec<Observer>>,
    next: Option<HoverInfo>,
) {
    {
        let mut tracked = state.borrow_mut();
        if tracked.current == next {
            trace!("Hover unchanged");
            return;
        }
        tracked.current = next;
    }
    match next {
        Some(info) => debug!(
            "Hovering {:?} at ({}, {}), first line {}px",
            info.element, info.left, info.top, info.height_of_first_line
        ),
        None => debug!("Hover cleared"),
    }
    let Ok(mut observers) = observers.try_borrow_mut() else {
        warn!("Hover observer re-entered, change not delivered");
        return;
    };
    for observer in observers.iter_mut() {
        observer(next.as_ref());
    }
}
