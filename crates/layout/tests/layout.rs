use anyhow::{Error, anyhow};
use html::{Document, NodeId, parse_html};
use layout::{GeometrySource, LayoutOptions, LayoutRect, LayoutSnapshot, Viewport, layout_document};
use style::{StyleOptions, compute_styles};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn lay_out(html: &str) -> Result<(Document, LayoutSnapshot), Error> {
    let document = parse_html(html)?;
    let styles = compute_styles(&document, StyleOptions::default());
    let snapshot = layout_document(&document, styles, LayoutOptions::default());
    Ok((document, snapshot))
}

fn by_id(document: &Document, id: &str) -> Result<NodeId, Error> {
    document
        .element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn body_margin_and_paragraph_margins_stack() -> Result<(), Error> {
    init_logger();
    let (document, snapshot) = lay_out("<p id='a'>Hello</p><p id='b'>World</p>")?;
    let body = document.body().ok_or_else(|| anyhow!("missing body"))?;
    let body_rect = snapshot.rect(body).ok_or_else(|| anyhow!("body has no box"))?;
    assert_eq!(body_rect.x, 8.0);
    assert_eq!(body_rect.y, 8.0);
    assert_eq!(body_rect.width, 1264.0);

    let first = snapshot
        .rect(by_id(&document, "a")?)
        .ok_or_else(|| anyhow!("#a has no box"))?;
    assert_eq!(first.x, 8.0);
    assert_eq!(first.y, 24.0);
    assert_close(first.height, 19.2);

    let second = snapshot
        .rect(by_id(&document, "b")?)
        .ok_or_else(|| anyhow!("#b has no box"))?;
    assert_close(second.y, first.bottom() + 32.0);
    assert_close(snapshot.document_height(), second.bottom() + 16.0 + 8.0);
    Ok(())
}

#[test]
fn inline_elements_share_their_run_box() -> Result<(), Error> {
    init_logger();
    let (document, snapshot) = lay_out("<p id='p'>Hello <span id='s'>world</span></p>")?;
    let paragraph = snapshot.rect(by_id(&document, "p")?);
    let span = snapshot.rect(by_id(&document, "s")?);
    assert!(paragraph.is_some());
    assert_eq!(span, paragraph);
    Ok(())
}

#[test]
fn hidden_elements_generate_no_box() -> Result<(), Error> {
    init_logger();
    let (document, snapshot) = lay_out(
        "<div id='gone' style='display: none'><p id='inner'>x</p></div><p id='after'>y</p>",
    )?;
    assert_eq!(snapshot.bounding_box(by_id(&document, "gone")?), None);
    assert_eq!(snapshot.bounding_box(by_id(&document, "inner")?), None);
    let after = snapshot
        .rect(by_id(&document, "after")?)
        .ok_or_else(|| anyhow!("#after has no box"))?;
    assert_eq!(after.y, 24.0);
    Ok(())
}

#[test]
fn long_text_wraps_onto_more_lines() -> Result<(), Error> {
    init_logger();
    // 300 glyphs at 8px each need two lines of the 1264px body.
    let html = format!("<div id='long'>{}</div>", "x".repeat(300));
    let (document, snapshot) = lay_out(&html)?;
    let rect = snapshot
        .rect(by_id(&document, "long")?)
        .ok_or_else(|| anyhow!("#long has no box"))?;
    assert_close(rect.height, 38.4);
    Ok(())
}

#[test]
fn line_height_and_font_size_drive_run_height() -> Result<(), Error> {
    init_logger();
    let (document, snapshot) = lay_out(
        "<div id='big' style='font-size: 20px; line-height: 1.5'>Big</div><h1 id='title'>Title</h1>",
    )?;
    let big = by_id(&document, "big")?;
    let rect = snapshot.rect(big).ok_or_else(|| anyhow!("#big has no box"))?;
    assert_close(rect.height, 30.0);
    let style = snapshot
        .computed_style(big)
        .ok_or_else(|| anyhow!("#big has no style"))?;
    assert_close(style.font_size, 20.0);

    let title = snapshot
        .rect(by_id(&document, "title")?)
        .ok_or_else(|| anyhow!("#title has no box"))?;
    assert_close(title.height, 38.4);
    Ok(())
}

#[test]
fn snapshot_accepts_measured_boxes() -> Result<(), Error> {
    init_logger();
    let (document, mut snapshot) = lay_out("<p id='a'>Hello</p>")?;
    assert_eq!(snapshot.viewport(), Viewport::default());
    let node = by_id(&document, "a")?;
    snapshot.insert_rect(node, LayoutRect::new(0.0, 2000.0, 100.0, 40.0));
    assert_eq!(
        snapshot.bounding_box(node),
        Some(LayoutRect::new(0.0, 2000.0, 100.0, 40.0))
    );
    assert_close(snapshot.document_height(), 2040.0);
    Ok(())
}

#[test]
fn blocks_inside_inline_elements_stack() -> Result<(), Error> {
    init_logger();
    let (document, snapshot) = lay_out(
        "<a id='card' href='#'><p id='one'>One</p><p id='two'>Two</p></a><div id='other'>Other</div>",
    )?;
    let rect = |id: &str| -> Result<LayoutRect, Error> {
        snapshot
            .rect(by_id(&document, id)?)
            .ok_or_else(|| anyhow!("#{id} has no box"))
    };
    let one = rect("one")?;
    let two = rect("two")?;
    let other = rect("other")?;
    assert_eq!(one.y, 24.0);
    assert_close(one.height, 19.2);
    assert_close(two.y, one.bottom() + 32.0);
    assert_close(two.height, 19.2);
    assert!(one.bottom() < two.top());
    assert_close(other.y, two.bottom() + 16.0);

    let card = rect("card")?;
    assert_eq!(card.y, 8.0);
    assert_close(card.bottom(), two.bottom() + 16.0);
    Ok(())
}
