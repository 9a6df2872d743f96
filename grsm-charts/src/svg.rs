//! Standalone SVG documents from panel frames.
//!
//! The web view draws frames with components; this module builds the same
//! marks as an `svg::Document` for export from the command line.

use crate::anc_trend::{self, AncFrame};
use crate::axis::Tick;
use crate::heatmap::{self, HeatmapFrame};
use crate::parks::{self, ParksFrame};
use crate::shape::fmt_num;
use crate::stacked_area::{self, AreaFrame};
use crate::timeline::{self, TimelineFrame};
use crate::viewport::Layout;
use crate::visibility::{self, VisibilityFrame};
use crate::visits::{self, VisitsFrame};
use ::svg::node::element::{
    Circle, ClipPath, Definitions, Group, Line, LinearGradient, Path, Rectangle, Stop, Text,
};
use ::svg::{Document, Node};

const AXIS_COLOR: &str = "#333";
const FONT: &str = "sans-serif";

/// One document under construction: marks go into the plot group, which is
/// translated by the layout margins when the document is finished.
pub struct Canvas {
    plot: Group,
    layout: Layout,
}

fn text(x: f64, y: f64, anchor: &str, content: &str) -> Text {
    Text::new(content)
        .set("x", fmt_num(x))
        .set("y", fmt_num(y))
        .set("text-anchor", anchor)
}

fn path(d: &str) -> Path {
    Path::new().set("d", d)
}

fn rect(x: f64, y: f64, width: f64, height: f64) -> Rectangle {
    Rectangle::new()
        .set("x", fmt_num(x))
        .set("y", fmt_num(y))
        .set("width", fmt_num(width))
        .set("height", fmt_num(height))
}

fn circle(cx: f64, cy: f64, r: f64, fill: &str) -> Circle {
    Circle::new()
        .set("cx", fmt_num(cx))
        .set("cy", fmt_num(cy))
        .set("r", fmt_num(r))
        .set("fill", fill)
}

impl Canvas {
    pub fn new(layout: Layout) -> Self {
        Self {
            plot: Group::new().set("transform", layout.transform()),
            layout,
        }
    }

    pub fn add<T: Into<Box<dyn Node>>>(&mut self, node: T) {
        self.plot.append(node);
    }

    /// Bottom axis along the plot's lower edge.
    pub fn x_axis(&mut self, ticks: &[Tick]) {
        let y = self.layout.height;
        self.axis_line(0.0, y, self.layout.width, y);
        for tick in ticks {
            self.axis_line(tick.position, y, tick.position, y + 6.0);
            self.add(
                text(tick.position, y + 18.0, "middle", &tick.label).set("font-size", "10"),
            );
        }
    }

    /// Left axis at `x` (0 for the plot's left edge).
    pub fn y_axis(&mut self, ticks: &[Tick], x: f64, outward: f64) {
        self.axis_line(x, 0.0, x, self.layout.height);
        let anchor = if outward < 0.0 { "end" } else { "start" };
        for tick in ticks {
            self.axis_line(x, tick.position, x + outward, tick.position);
            self.add(
                text(x + outward * 1.5, tick.position + 3.0, anchor, &tick.label)
                    .set("font-size", "10"),
            );
        }
    }

    fn axis_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.add(
            Line::new()
                .set("x1", fmt_num(x1))
                .set("y1", fmt_num(y1))
                .set("x2", fmt_num(x2))
                .set("y2", fmt_num(y2))
                .set("stroke", AXIS_COLOR),
        );
    }

    /// Centred title above the plot.
    pub fn title(&mut self, title: &str) {
        let y = -self.layout.margin.top / 2.0;
        self.add(
            text(self.layout.width / 2.0, y, "middle", title)
                .set("font-size", "16")
                .set("font-weight", "bold"),
        );
    }

    /// Axis captions below and left of the plot.
    pub fn labels(&mut self, x_label: &str, y_label: &str) {
        let Layout { width, height, margin, .. } = self.layout;
        if !x_label.is_empty() {
            self.add(text(width / 2.0, height + margin.bottom * 0.75, "middle", x_label));
        }
        if !y_label.is_empty() {
            let x = -margin.left * 0.7;
            let y = height / 2.0;
            self.add(
                text(x, y, "middle", y_label)
                    .set("transform", format!("rotate(-90,{},{})", fmt_num(x), fmt_num(y))),
            );
        }
    }

    pub fn finish(self) -> String {
        let width = fmt_num(self.layout.outer.width);
        let height = fmt_num(self.layout.outer.height);
        Document::new()
            .set("viewBox", format!("0 0 {} {}", width, height))
            .set("width", width)
            .set("height", height)
            .set("font-family", FONT)
            .add(self.plot)
            .to_string()
    }
}

pub fn timeline(frame: &TimelineFrame) -> String {
    let mut svg = Canvas::new(frame.layout);
    if let Some(d) = &frame.area {
        svg.add(path(d).set("fill", frame.fill.to_string()));
    }
    if let Some((x0, x1)) = frame.selection {
        svg.add(
            rect(x0, 0.0, x1 - x0, frame.layout.height)
                .set("class", "selection")
                .set("fill", "#777")
                .set("fill-opacity", "0.3"),
        );
    }
    svg.x_axis(&frame.x_ticks);
    svg.y_axis(&frame.y_ticks, 0.0, -6.0);
    svg.title(timeline::TITLE);
    svg.labels("", timeline::Y_LABEL);
    svg.finish()
}

pub fn stacked_area(frame: &AreaFrame) -> String {
    let mut svg = Canvas::new(frame.layout);
    svg.add(
        Definitions::new().add(
            ClipPath::new()
                .set("id", stacked_area::CLIP_ID)
                .add(rect(0.0, 0.0, frame.layout.width, frame.layout.height)),
        ),
    );
    let mut areas = Group::new().set("clip-path", format!("url(#{})", stacked_area::CLIP_ID));
    for band in &frame.paths {
        areas.append(
            path(&band.d)
                .set("class", "area")
                .set("data-key", band.key.as_str())
                .set("fill", band.color.as_str())
                .set("opacity", fmt_num(band.opacity)),
        );
    }
    svg.add(areas);
    svg.x_axis(&frame.x_ticks);
    svg.y_axis(&frame.y_ticks, 0.0, -6.0);
    if !frame.label.is_empty() {
        svg.add(text(10.0, 20.0, "start", &frame.label));
    }
    svg.title(stacked_area::TITLE);
    svg.labels(stacked_area::X_LABEL, stacked_area::Y_LABEL);
    svg.finish()
}

pub fn heatmap(frame: &HeatmapFrame) -> String {
    let mut svg = Canvas::new(frame.layout);
    for cell in &frame.rects {
        let mut mark = rect(cell.x, cell.y, cell.width, cell.height).set("fill", cell.fill.as_str());
        if cell.highlighted {
            mark = mark.set("stroke", "#000");
        }
        svg.add(mark);
    }
    svg.x_axis(&frame.x_ticks);
    svg.y_axis(&frame.y_ticks, 0.0, -6.0);
    if let Some(legend) = &frame.legend {
        let gradient_id = "heatmapLegendGradient";
        let gradient = legend.stops.iter().fold(
            LinearGradient::new().set("id", gradient_id),
            |gradient, stop| {
                gradient.add(
                    Stop::new()
                        .set("offset", format!("{}%", fmt_num(stop.offset)))
                        .set("stop-color", stop.color.as_str()),
                )
            },
        );
        svg.add(Definitions::new().add(gradient));
        let y = -heatmap::LEGEND_HEIGHT * 4.0;
        svg.add(
            rect(0.0, y, heatmap::LEGEND_WIDTH, heatmap::LEGEND_HEIGHT)
                .set("fill", format!("url(#{})", gradient_id)),
        );
        for tick in &legend.ticks {
            svg.add(
                text(tick.position, y + heatmap::LEGEND_HEIGHT + 12.0, "middle", &tick.label)
                    .set("font-size", "10"),
            );
        }
        svg.add(text(0.0, y - 6.0, "start", heatmap::LEGEND_TITLE).set("font-size", "11"));
    }
    svg.title(heatmap::TITLE);
    svg.finish()
}

pub fn anc_trend(frame: &AncFrame) -> String {
    let mut svg = Canvas::new(frame.layout);
    if let Some(d) = &frame.line {
        svg.add(
            path(d)
                .set("fill", "none")
                .set("stroke", anc_trend::LINE_COLOR)
                .set("stroke-width", "2"),
        );
    }
    for point in &frame.points {
        svg.add(circle(point.cx, point.cy, point.r, anc_trend::LINE_COLOR));
    }
    if let Some(d) = &frame.trend {
        svg.add(
            path(d)
                .set("fill", "none")
                .set("stroke", anc_trend::TREND_COLOR)
                .set("stroke-dasharray", anc_trend::TREND_DASH),
        );
    }
    svg.x_axis(&frame.x_ticks);
    svg.y_axis(&frame.y_ticks, 0.0, -6.0);
    svg.title(anc_trend::TITLE);
    svg.labels("Year", anc_trend::Y_LABEL);
    svg.finish()
}

pub fn visibility(frame: &VisibilityFrame) -> String {
    let mut svg = Canvas::new(frame.layout);
    if let Some(overlay) = &frame.visits {
        let fill = if overlay.gradient.is_empty() {
            visibility::VISITS_COLOR.to_string()
        } else {
            let gradient = overlay.gradient.iter().fold(
                LinearGradient::new()
                    .set("id", visibility::GRADIENT_ID)
                    .set("x1", "0%")
                    .set("x2", "100%"),
                |gradient, stop| {
                    gradient.add(
                        Stop::new()
                            .set("offset", format!("{}%", fmt_num(stop.offset * 100.0)))
                            .set("stop-color", visibility::VISITS_COLOR)
                            .set("stop-opacity", fmt_num(stop.opacity)),
                    )
                },
            );
            svg.add(Definitions::new().add(gradient));
            format!("url(#{})", visibility::GRADIENT_ID)
        };
        if let Some(d) = &overlay.area {
            svg.add(path(d).set("fill", fill));
        }
        if let Some(d) = &overlay.outline {
            svg.add(
                path(d)
                    .set("fill", "none")
                    .set("stroke", visibility::VISITS_COLOR),
            );
        }
        svg.y_axis(&overlay.y_ticks, frame.layout.width, 6.0);
    }
    if frame.line_visible {
        if let Some(d) = &frame.line {
            svg.add(
                path(d)
                    .set("fill", "none")
                    .set("stroke", visibility::LINE_COLOR)
                    .set("stroke-width", "1.5"),
            );
        }
        svg.y_axis(&frame.y_ticks, 0.0, -6.0);
    }
    svg.x_axis(&frame.x_ticks);
    svg.title(visibility::TITLE);
    svg.labels(visibility::X_LABEL, "");
    svg.finish()
}

pub fn visits(frame: &VisitsFrame) -> String {
    let mut svg = Canvas::new(frame.layout);
    if let Some(d) = &frame.line {
        svg.add(
            path(d)
                .set("fill", "none")
                .set("stroke", visits::COLOR)
                .set("stroke-width", "2"),
        );
    }
    for point in &frame.points {
        svg.add(circle(point.cx, point.cy, point.r, visits::COLOR));
    }
    svg.x_axis(&frame.x_ticks);
    svg.y_axis(&frame.y_ticks, 0.0, -6.0);
    svg.title(visits::TITLE);
    svg.labels(visits::X_LABEL, visits::Y_LABEL);
    svg.finish()
}

pub fn parks(frame: &ParksFrame) -> String {
    let mut svg = Canvas::new(frame.layout);
    for bar in &frame.bars {
        svg.add(rect(bar.x, bar.y, bar.width, bar.height).set("fill", bar.fill.as_str()));
    }
    svg.x_axis(&frame.x_ticks);
    svg.y_axis(&frame.y_ticks, 0.0, -6.0);
    svg.title(parks::TITLE);
    svg.labels(parks::X_LABEL, parks::Y_LABEL);
    svg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{FixedViewport, Margin, Size};
    use grsm_data::ParkRecord;

    #[test]
    fn text_content_is_escaped() {
        let layout = Layout::new(Size::new(200.0, 100.0), Margin::new(10.0, 10.0, 10.0, 10.0));
        let mut svg = Canvas::new(layout);
        svg.title("Salamanders & <newts>");
        let doc = svg.finish();
        assert!(doc.contains("Salamanders &amp; &lt;newts&gt;"));
        assert!(!doc.contains("<newts>"));
    }

    #[test]
    fn parks_document() {
        let mut chart = parks::ParksComparison::new(vec![ParkRecord {
            park: "Great Smoky Mountains".into(),
            species_total: 19_000.0,
            description: "Salamanders & more".into(),
        }]);
        let frame = chart.render(&FixedViewport(Size::new(800.0, 400.0)), parks::CONTAINER_ID);
        let doc = super::parks(&frame);
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(doc.contains("width=\"800\""));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(doc.contains(r##"fill="#69b3a2""##));
        assert!(doc.contains("Great Smoky Mountains</text>"));
        assert!(doc.contains(r#"transform="translate(250,50)""#));
    }

    #[test]
    fn stacked_document_never_contains_nan() {
        let mut chart =
            stacked_area::StackedAreaChart::new(stacked_area::tests::sample());
        chart.initialize(Layout::new(Size::new(600.0, 400.0), stacked_area::MARGIN));
        let doc = super::stacked_area(&chart.render());
        assert!(doc.contains("clip-path=\"url(#clip-stacked)\""));
        assert!(doc.contains("data-key=\"Bear\""));
        assert!(!doc.contains("NaN"));
    }
}
