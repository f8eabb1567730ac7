use anyhow::{Error, anyhow};
use hover::{
    EventKind, FirstLineMetric, HoverInfo, HoverSurface, HoverTracker, Window, first_line_height,
};
use html::{Document, NodeId, parse_html};
use layout::{ClientPoint, GeometrySource, LayoutRect, LayoutSnapshot, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use style::{ComputedStyle, LineHeight, StyleOptions, compute_styles};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Fixture {
    document: Document,
    geometry: LayoutSnapshot,
}

impl HoverSurface for Fixture {
    fn document(&self) -> &Document {
        &self.document
    }

    fn geometry(&self) -> &dyn GeometrySource {
        &self.geometry
    }
}

impl Fixture {
    /// Two stacked boxes, `#a` over `#b`, and an overlapping `#c` under `#b`.
    fn new() -> Result<Self, Error> {
        let document = parse_html(
            "<div id='a'>Alpha</div>\
             <div id='b'>Beta <strong id='s'>strong</strong></div>\
             <div id='c'>Gamma</div>\
             <div id='empty'></div>",
        )?;
        let styles = compute_styles(&document, StyleOptions::default());
        let mut geometry = LayoutSnapshot::new(styles, Viewport::default());
        geometry.insert_rect(by_id(&document, "a")?, LayoutRect::new(10.0, 20.0, 100.0, 50.0));
        geometry.insert_rect(by_id(&document, "b")?, LayoutRect::new(10.0, 1000.0, 100.0, 50.0));
        geometry.insert_rect(by_id(&document, "c")?, LayoutRect::new(10.0, 1000.0, 200.0, 200.0));
        Ok(Self { document, geometry })
    }

    fn id(&self, id: &str) -> Result<NodeId, Error> {
        by_id(&self.document, id)
    }
}

fn by_id(document: &Document, id: &str) -> Result<NodeId, Error> {
    document
        .element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))
}

fn tracked() -> Result<(Window, Rc<RefCell<Fixture>>, HoverTracker<Fixture>), Error> {
    let fixture = Fixture::new()?;
    let candidates = vec![fixture.id("a")?, fixture.id("b")?, fixture.id("c")?];
    let window = Window::default();
    let surface = Rc::new(RefCell::new(fixture));
    let tracker = HoverTracker::attach(
        &window,
        Rc::clone(&surface),
        candidates,
        FirstLineMetric::FontSize,
    );
    Ok((window, surface, tracker))
}

#[test]
fn point_inside_a_candidate_publishes_its_corner() -> Result<(), Error> {
    init_logger();
    let (window, surface, tracker) = tracked()?;
    window.dispatch_pointer_move(ClientPoint::new(50.0, 40.0));
    let info = tracker.current().ok_or_else(|| anyhow!("nothing hovered"))?;
    assert_eq!(info.element, surface.borrow().id("a")?);
    assert_eq!(info.top, 20.0);
    assert_eq!(info.left, 10.0);
    assert_eq!(info.height_of_first_line, 16.0);
    Ok(())
}

#[test]
fn point_outside_every_candidate_publishes_none() -> Result<(), Error> {
    init_logger();
    let (window, _surface, tracker) = tracked()?;
    window.dispatch_pointer_move(ClientPoint::new(50.0, 40.0));
    assert!(tracker.current().is_some());
    window.dispatch_pointer_move(ClientPoint::new(500.0, 500.0));
    assert_eq!(tracker.current(), None);
    Ok(())
}

#[test]
fn edges_and_corners_count_as_inside() -> Result<(), Error> {
    init_logger();
    let (window, surface, tracker) = tracked()?;
    let first = surface.borrow().id("a")?;
    for (x, y) in [(10.0, 20.0), (110.0, 70.0), (10.0, 70.0), (110.0, 45.0)] {
        window.dispatch_pointer_move(ClientPoint::new(x, y));
        assert_eq!(tracker.current().map(|info| info.element), Some(first), "({x}, {y})");
    }
    window.dispatch_pointer_move(ClientPoint::new(110.5, 70.0));
    assert_eq!(tracker.current(), None);
    Ok(())
}

#[test]
fn first_matching_candidate_wins_and_scroll_is_applied() -> Result<(), Error> {
    init_logger();
    let (window, surface, tracker) = tracked()?;
    let (second, third) = {
        let fixture = surface.borrow();
        (fixture.id("b")?, fixture.id("c")?)
    };

    window.scroll_to(0.0, 950.0);
    window.dispatch_pointer_move(ClientPoint::new(20.0, 60.0));
    let info = tracker.current().ok_or_else(|| anyhow!("nothing hovered"))?;
    assert_eq!(info.element, second);
    assert_eq!(info.top, 1000.0);

    window.dispatch_pointer_move(ClientPoint::new(150.0, 60.0));
    assert_eq!(tracker.current().map(|info| info.element), Some(third));

    // Same client point, but the page has moved under the pointer.
    window.scroll_to(0.0, 0.0);
    window.dispatch_pointer_move(ClientPoint::new(150.0, 60.0));
    assert_eq!(tracker.current(), None);
    Ok(())
}

#[test]
fn replacing_candidates_resets_and_reregisters() -> Result<(), Error> {
    init_logger();
    let (window, surface, mut tracker) = tracked()?;
    assert_eq!(window.listener_count(), 1);
    window.dispatch_pointer_move(ClientPoint::new(50.0, 40.0));
    assert!(tracker.current().is_some());

    let third = surface.borrow().id("c")?;
    tracker.set_candidates(vec![third]);
    assert_eq!(tracker.current(), None);
    assert_eq!(window.listener_count(), 1);
    window.dispatch_pointer_move(ClientPoint::new(50.0, 40.0));
    assert_eq!(tracker.current(), None);

    drop(tracker);
    assert_eq!(window.listener_count(), 0);
    Ok(())
}

#[test]
fn observers_hear_only_changes() -> Result<(), Error> {
    init_logger();
    let (window, _surface, tracker) = tracked()?;
    let seen: Rc<RefCell<Vec<Option<HoverInfo>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    tracker.on_change(move |info| sink.borrow_mut().push(info.copied()));

    window.dispatch_pointer_move(ClientPoint::new(50.0, 40.0));
    window.dispatch_pointer_move(ClientPoint::new(60.0, 41.0));
    window.dispatch_pointer_move(ClientPoint::new(900.0, 900.0));
    window.dispatch_pointer_move(ClientPoint::new(901.0, 900.0));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].is_some());
    assert_eq!(seen[1], None);
    Ok(())
}

#[test]
fn tracker_ignores_other_listeners() -> Result<(), Error> {
    init_logger();
    let (window, _surface, tracker) = tracked()?;
    let guard = window.add_event_listener(EventKind::PointerMove, |_| {});
    assert_eq!(window.listener_count(), 2);
    window.dispatch_pointer_move(ClientPoint::new(50.0, 40.0));
    assert!(tracker.current().is_some());
    drop(guard);
    assert_eq!(window.listener_count(), 1);
    Ok(())
}

#[test]
fn first_line_height_prefers_explicit_sizes() -> Result<(), Error> {
    init_logger();
    let mut fixture = Fixture::new()?;
    let first = fixture.id("a")?;
    let second = fixture.id("b")?;
    let strong = fixture.id("s")?;
    let empty = fixture.id("empty")?;
    let styles = fixture.geometry.styles_mut();
    styles.insert(
        first,
        ComputedStyle {
            font_size: 24.0,
            line_height: LineHeight::Number(1.5),
            ..ComputedStyle::default()
        },
    );
    styles.insert(
        strong,
        ComputedStyle {
            font_size: 20.0,
            ..ComputedStyle::default()
        },
    );

    let document = &fixture.document;
    let geometry = &fixture.geometry;
    assert_eq!(first_line_height(document, geometry, first, FirstLineMetric::FontSize), 24.0);
    assert_eq!(first_line_height(document, geometry, first, FirstLineMetric::LineHeight), 36.0);
    // Default-sized container: its first child with text decides.
    assert_eq!(first_line_height(document, geometry, second, FirstLineMetric::FontSize), 20.0);
    assert_eq!(first_line_height(document, geometry, empty, FirstLineMetric::FontSize), 0.0);
    Ok(())
}
