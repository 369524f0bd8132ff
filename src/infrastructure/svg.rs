//! SVG export canvas.
//!
//! Records outlines as `<circle>` elements and labels as centred `<text>`
//! elements, then wraps them in a document sized to the canvas.

use std::fmt::Write as _;

use kurbo::{Circle, Point};

use crate::domain::Canvas;

/// A recording canvas that exports an SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    stroke: String,
    background: String,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            stroke: "black".to_string(),
            background: "white".to_string(),
            body: String::new(),
        }
    }

    pub fn with_colors(mut self, stroke: impl Into<String>, background: impl Into<String>) -> Self {
        self.stroke = stroke.into();
        self.background = background.into();
        self
    }

    /// Export everything drawn so far as an SVG document.
    ///
    /// `width`/`height` are used both as the SVG `width`/`height` attributes and to set
    /// `viewBox="0 0 width height"`.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        let _ = writeln!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape(&self.background)
        );
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Canvas for SvgCanvas {
    fn outline(&mut self, disc: Circle) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\"/>",
            disc.center.x,
            disc.center.y,
            disc.radius,
            escape(&self.stroke)
        );
    }

    fn label(&mut self, text: &str, position: Point, size: f64) {
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{}\">{}</text>",
            position.x,
            position.y,
            size,
            escape(&self.stroke),
            escape(text)
        );
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
