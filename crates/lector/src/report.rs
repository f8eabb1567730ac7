use layout::{ClientPoint, LayoutRect, PagePoint};
use page::{ElementSummary, HoverSummary, ReadablePage};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct MoveReport {
    pub client: ClientPoint,
    pub page: PagePoint,
    pub hover: Option<HoverSummary>,
}

/// Everything one run prints.
#[derive(Debug, Serialize)]
pub struct Report {
    pub readable: Vec<ElementSummary>,
    pub moves: Vec<MoveReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom: Option<Value>,
}

impl Report {
    /// Replay `moves` over `page` and collect the results.
    pub fn collect(page: &ReadablePage, moves: &[ClientPoint], with_dom: bool) -> Self {
        let moves = moves
            .iter()
            .map(|client| {
                let hovered = page.dispatch_pointer_move(client.x, client.y);
                MoveReport {
                    client: *client,
                    page: client.to_page(page.scroll_offset()),
                    hover: hovered.and_then(|info| page.describe_hover(&info)),
                }
            })
            .collect();
        Self {
            readable: page.summaries(),
            moves,
            dom: with_dom.then(|| page.document().to_json_value()),
        }
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readable elements ({}):", self.readable.len())?;
        for summary in &self.readable {
            writeln!(out, "  {} {} {:?}", element_label(summary), rect_label(summary.rect), summary.text)?;
        }
        for report in &self.moves {
            write!(
                out,
                "pointer ({}, {}) page ({}, {}) -> ",
                report.client.x, report.client.y, report.page.x, report.page.y
            )?;
            match &report.hover {
                Some(hover) => writeln!(
                    out,
                    "{} top={} left={} first-line={}",
                    element_label(&hover.element),
                    hover.top,
                    hover.left,
                    hover.height_of_first_line
                )?,
                None => writeln!(out, "none")?,
            }
        }
        if let Some(dom) = &self.dom {
            writeln!(out, "{}", serde_json::to_string_pretty(dom)?)?;
        }
        Ok(())
    }
}

fn element_label(summary: &ElementSummary) -> String {
    match &summary.id {
        Some(id) => format!("<{} id={id:?}>", summary.tag),
        None => format!("<{}>", summary.tag),
    }
}

fn rect_label(rect: Option<LayoutRect>) -> String {
    rect.map_or_else(
        || String::from("(no box)"),
        |rect| format!("({}, {}) {}x{}", rect.x, rect.y, rect.width, rect.height),
    )
}
