use anyhow::{Error, anyhow};
use html::{DOMUpdate, NodeId, NodeKey, parse_html};
use hover::FirstLineMetric;
use layout::{LayoutRect, LayoutSnapshot, Viewport};
use page::{LectorConfig, ReadablePage};
use std::cell::RefCell;
use std::rc::Rc;
use style::{StyleOptions, compute_styles};

const ARTICLE: &str = include_str!("fixtures/article.html");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn node(page: &ReadablePage, id: &str) -> Result<NodeId, Error> {
    page.document()
        .element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))
}

fn rect(page: &ReadablePage, id: &str) -> Result<LayoutRect, Error> {
    let target = node(page, id)?;
    page.layout()
        .rect(target)
        .ok_or_else(|| anyhow!("#{id} has no box"))
}

fn readable_ids(page: &ReadablePage) -> Vec<String> {
    page.summaries()
        .into_iter()
        .map(|summary| summary.id.unwrap_or(summary.tag))
        .collect()
}

#[test]
fn fixture_yields_its_readable_elements() -> Result<(), Error> {
    init_logger();
    let page = ReadablePage::from_html(ARTICLE, LectorConfig::default())?;
    assert_eq!(
        readable_ids(&page),
        ["intro", "lead", "quote-wrap", "card-body", "outro", "footer"]
    );
    let elements = page.readable_elements().elements();
    for (index, outer) in elements.iter().enumerate() {
        for inner in &elements[index + 1..] {
            assert!(!page.document().contains(*outer, *inner));
            assert!(!page.document().contains(*inner, *outer));
        }
    }
    Ok(())
}

#[test]
fn hovering_a_paragraph_reports_its_corner() -> Result<(), Error> {
    init_logger();
    let page = ReadablePage::from_html(ARTICLE, LectorConfig::default())?;
    let intro = rect(&page, "intro")?;
    let info = page
        .dispatch_pointer_move(intro.x + intro.width / 2.0, intro.y + intro.height / 2.0)
        .ok_or_else(|| anyhow!("nothing hovered"))?;
    assert_eq!(info.element, node(&page, "intro")?);
    assert_eq!(info.top, intro.top());
    assert_eq!(info.left, intro.left());
    assert_eq!(info.height_of_first_line, 16.0);
    assert_eq!(page.hovered(), Some(info));

    let corner = page
        .dispatch_pointer_move(intro.x, intro.y)
        .ok_or_else(|| anyhow!("corner missed"))?;
    assert_eq!(corner.element, info.element);

    assert_eq!(page.dispatch_pointer_move(1279.0, 1.0), None);
    assert_eq!(page.hovered(), None);
    Ok(())
}

#[test]
fn first_line_follows_the_configured_metric() -> Result<(), Error> {
    init_logger();
    let lead_height = |metric: FirstLineMetric| -> Result<f32, Error> {
        let config = LectorConfig {
            first_line_metric: metric,
            ..LectorConfig::default()
        };
        let page = ReadablePage::from_html(ARTICLE, config)?;
        let lead = rect(&page, "lead")?;
        let info = page
            .dispatch_pointer_move(lead.x + 1.0, lead.y + 1.0)
            .ok_or_else(|| anyhow!("lead not hovered"))?;
        Ok(info.height_of_first_line)
    };
    assert_eq!(lead_height(FirstLineMetric::FontSize)?, 20.0);
    assert!((lead_height(FirstLineMetric::LineHeight)? - 24.0).abs() < 0.01);
    Ok(())
}

#[test]
fn scrolling_moves_the_page_under_the_pointer() -> Result<(), Error> {
    init_logger();
    let page = ReadablePage::from_html(ARTICLE, LectorConfig::default())?;
    let outro = rect(&page, "outro")?;
    page.scroll_to(0.0, outro.y - 10.0);
    let info = page
        .dispatch_pointer_move(outro.x + 1.0, 11.0)
        .ok_or_else(|| anyhow!("outro not hovered"))?;
    assert_eq!(info.element, node(&page, "outro")?);
    assert_eq!(info.top, outro.y);
    Ok(())
}

#[test]
fn observers_see_enter_and_leave() -> Result<(), Error> {
    init_logger();
    let page = ReadablePage::from_html(ARTICLE, LectorConfig::default())?;
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    page.on_hover_change(move |info| sink.borrow_mut().push(info.map(|hovered| hovered.element)));

    let intro = rect(&page, "intro")?;
    page.dispatch_pointer_move(intro.x + 1.0, intro.y + 1.0);
    page.dispatch_pointer_move(intro.x + 2.0, intro.y + 1.0);
    page.dispatch_pointer_move(1279.0, 1.0);
    assert_eq!(*changes.borrow(), [Some(node(&page, "intro")?), None]);
    Ok(())
}

#[test]
fn updates_refresh_candidates_and_reset_hover() -> Result<(), Error> {
    init_logger();
    let mut page = ReadablePage::from_html("<p id='first'>First</p><p id='second'>Second</p>", LectorConfig::default())?;
    let first = rect(&page, "first")?;
    assert!(page.dispatch_pointer_move(first.x + 1.0, first.y + 1.0).is_some());
    let generation = page.readable_elements().generation();

    let parent = {
        let document = page.document();
        let body = document.body().ok_or_else(|| anyhow!("missing body"))?;
        document.node_key(body).ok_or_else(|| anyhow!("body key"))?
    };
    let paragraph = page.allocate_key();
    let text = page.allocate_key();
    page.apply_updates([
        DOMUpdate::InsertElement { parent, node: paragraph, tag: "p".to_owned(), pos: 2 },
        DOMUpdate::SetAttr { node: paragraph, name: "id".to_owned(), value: "third".to_owned() },
        DOMUpdate::InsertText { parent: paragraph, node: text, text: "Third".to_owned(), pos: 0 },
    ])?;

    assert_eq!(page.hovered(), None);
    assert!(page.readable_elements().generation() > generation);
    assert_eq!(readable_ids(&page), ["first", "second", "third"]);
    assert_eq!(page.window().listener_count(), 1);

    let third = rect(&page, "third")?;
    let info = page
        .dispatch_pointer_move(third.x + 1.0, third.y + 1.0)
        .ok_or_else(|| anyhow!("third not hovered"))?;
    assert_eq!(info.element, node(&page, "third")?);
    Ok(())
}

#[test]
fn failed_updates_still_refresh_the_page() -> Result<(), Error> {
    init_logger();
    let mut page = ReadablePage::from_html("<p id='only'>Only</p>", LectorConfig::default())?;
    let only = node(&page, "only")?;
    let key = page.document().node_key(only).ok_or_else(|| anyhow!("key"))?;
    let result = page.apply_updates([
        DOMUpdate::RemoveNode { node: key },
        DOMUpdate::RemoveNode { node: NodeKey(99_999) },
    ]);
    let message = result.err().map(|err| err.to_string()).unwrap_or_default();
    assert!(!message.is_empty());
    assert!(page.readable_elements().is_empty());
    Ok(())
}

#[test]
fn measured_geometry_drives_hover() -> Result<(), Error> {
    init_logger();
    let document = parse_html("<p id='a'>Alpha</p><p id='b'>Beta</p>")?;
    let styles = compute_styles(&document, StyleOptions::default());
    let mut geometry = LayoutSnapshot::new(styles, Viewport::default());
    let beta = document.element_by_id("b").ok_or_else(|| anyhow!("missing #b"))?;
    geometry.insert_rect(beta, LayoutRect::new(100.0, 3000.0, 400.0, 60.0));

    let page = ReadablePage::with_geometry(document, geometry, LectorConfig::default());
    page.scroll_to(0.0, 2900.0);
    let info = page
        .dispatch_pointer_move(150.0, 130.0)
        .ok_or_else(|| anyhow!("beta not hovered"))?;
    assert_eq!(info.element, beta);
    assert_eq!((info.left, info.top), (100.0, 3000.0));
    Ok(())
}

#[test]
fn summaries_serialise_to_json() -> Result<(), Error> {
    init_logger();
    let page = ReadablePage::from_html(ARTICLE, LectorConfig::default())?;
    let json = serde_json::to_value(page.summaries())?;
    let first = json
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| anyhow!("no summaries"))?;
    assert_eq!(first["tag"], "section");
    assert_eq!(first["id"], "intro");
    assert_eq!(first["text"], "This document talks about interesting things.");
    assert!(first["rect"]["width"].as_f64().is_some_and(|width| width > 0.0));

    let lead = rect(&page, "lead")?;
    let info = page
        .dispatch_pointer_move(lead.x + 1.0, lead.y + 1.0)
        .ok_or_else(|| anyhow!("lead not hovered"))?;
    let summary = page.describe_hover(&info).ok_or_else(|| anyhow!("no summary"))?;
    assert_eq!(summary.element.id.as_deref(), Some("lead"));
    assert_eq!(serde_json::to_value(&summary)?["height_of_first_line"], 20.0);
    Ok(())
}

#[test]
fn every_paragraph_of_a_linked_card_is_hoverable() -> Result<(), Error> {
    init_logger();
    let page = ReadablePage::from_html(
        "<a href='#'><p id='one'>One</p><p id='two'>Two</p></a><div id='other'>Other</div>",
        LectorConfig::default(),
    )?;
    assert_eq!(readable_ids(&page), ["one", "two", "other"]);
    for id in ["one", "two", "other"] {
        let target = rect(&page, id)?;
        let info = page
            .dispatch_pointer_move(target.x + 1.0, target.y + target.height / 2.0)
            .ok_or_else(|| anyhow!("#{id} not hovered"))?;
        assert_eq!(info.element, node(&page, id)?);
        assert_eq!(info.top, target.top());
    }
    Ok(())
}
