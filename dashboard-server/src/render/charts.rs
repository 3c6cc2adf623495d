//! Inline SVG charts
//!
//! Each function returns a self-contained `<svg>` element sized by its
//! `viewBox`, so the page scales it to the container width.

use std::fmt::Write;

use rust_decimal::prelude::*;

use crate::utils::html::escape;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 60.0;

const PRIMARY: &str = "#2E86C1";

/// Categorical palette used for pie slices
const PALETTE: [&str; 10] = [
    "#2E86C1", "#E67E22", "#27AE60", "#C0392B", "#8E44AD", "#16A085", "#F1C40F", "#7F8C8D",
    "#D35400", "#2C3E50",
];

/// One labelled data point
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub label: String,
    pub value: f64,
    /// Text printed next to the bar (horizontal bars / value labels)
    pub annotation: Option<String>,
}

impl Point {
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value: value.to_f64().unwrap_or_default(),
            annotation: None,
        }
    }

    pub fn annotated(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }
}

fn empty_chart(title: &str) -> String {
    format!(
        r#"<svg class="chart" viewBox="0 0 {w} 80" role="img"><text x="10" y="24" class="chart-title">{t}</text><text x="10" y="56" class="chart-empty">No data for the current selection</text></svg>"#,
        w = WIDTH,
        t = escape(title),
    )
}

fn max_value(points: &[Point]) -> f64 {
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    if max <= 0.0 { 1.0 } else { max }
}

fn open_svg(out: &mut String, title: &str, height: f64) {
    let _ = write!(
        out,
        r#"<svg class="chart" viewBox="0 0 {w} {h}" role="img"><text x="10" y="22" class="chart-title">{t}</text>"#,
        w = WIDTH,
        h = height,
        t = escape(title),
    );
}

/// Axis lines plus a zero and max tick on the value axis
fn axes(out: &mut String, max: f64) {
    let bottom = HEIGHT - MARGIN_BOTTOM;
    let _ = write!(
        out,
        r##"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#999"/><line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#999"/><text x="{tx}" y="{b}" class="tick" text-anchor="end">0</text><text x="{tx}" y="{ty}" class="tick" text-anchor="end">{max}</text>"##,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom,
        r = WIDTH - MARGIN_RIGHT,
        tx = MARGIN_LEFT - 6.0,
        ty = MARGIN_TOP + 4.0,
        max = compact(max),
    );
}

fn y_for(value: f64, max: f64) -> f64 {
    let plot = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    HEIGHT - MARGIN_BOTTOM - (value.max(0.0) / max) * plot
}

/// Short tick label: 1.2M, 35K, 900
fn compact(value: f64) -> String {
    match value.abs() {
        v if v >= 1_000_000.0 => format!("{:.1}M", value / 1_000_000.0),
        v if v >= 1_000.0 => format!("{:.0}K", value / 1_000.0),
        _ => format!("{:.0}", value),
    }
}

/// Line chart with point markers
pub fn line_chart(title: &str, points: &[Point]) -> String {
    if points.is_empty() {
        return empty_chart(title);
    }
    let max = max_value(points);
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let step = if points.len() > 1 {
        plot_w / (points.len() - 1) as f64
    } else {
        0.0
    };
    let x_for = |i: usize| {
        if points.len() > 1 {
            MARGIN_LEFT + step * i as f64
        } else {
            MARGIN_LEFT + plot_w / 2.0
        }
    };

    let mut out = String::new();
    open_svg(&mut out, title, HEIGHT);
    axes(&mut out, max);

    let path: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:.1},{:.1}", x_for(i), y_for(p.value, max)))
        .collect();
    let _ = write!(
        out,
        r#"<polyline fill="none" stroke="{PRIMARY}" stroke-width="2" points="{}"/>"#,
        path.join(" ")
    );

    for (i, p) in points.iter().enumerate() {
        let (x, y) = (x_for(i), y_for(p.value, max));
        let _ = write!(
            out,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{PRIMARY}"><title>{label}: {value:.0}</title></circle><text x="{x:.1}" y="{ly:.1}" class="tick" text-anchor="middle">{label}</text>"#,
            label = escape(&p.label),
            value = p.value,
            ly = HEIGHT - MARGIN_BOTTOM + 18.0,
        );
    }
    out.push_str("</svg>");
    out
}

/// Vertical bar chart; annotations are printed above the bars
pub fn bar_chart(title: &str, points: &[Point]) -> String {
    if points.is_empty() {
        return empty_chart(title);
    }
    let max = max_value(points);
    let slot = (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / points.len() as f64;
    let bar_w = (slot * 0.7).max(2.0);

    let mut out = String::new();
    open_svg(&mut out, title, HEIGHT);
    axes(&mut out, max);

    for (i, p) in points.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = y_for(p.value, max);
        let h = HEIGHT - MARGIN_BOTTOM - y;
        let cx = x + bar_w / 2.0;
        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{h:.1}" fill="{PRIMARY}"><title>{label}: {value:.0}</title></rect><text x="{cx:.1}" y="{ly:.1}" class="tick" text-anchor="middle">{label}</text>"#,
            label = escape(&p.label),
            value = p.value,
            ly = HEIGHT - MARGIN_BOTTOM + 18.0,
        );
        if let Some(note) = &p.annotation {
            let _ = write!(
                out,
                r#"<text x="{cx:.1}" y="{ny:.1}" class="value" text-anchor="middle">{}</text>"#,
                escape(note),
                ny = y - 6.0,
            );
        }
    }
    out.push_str("</svg>");
    out
}

/// Horizontal bar chart, largest first, label on the left
pub fn horizontal_bar_chart(title: &str, points: &[Point]) -> String {
    if points.is_empty() {
        return empty_chart(title);
    }
    const ROW: f64 = 22.0;
    const LABEL_W: f64 = 200.0;
    let max = max_value(points);
    let height = MARGIN_TOP + ROW * points.len() as f64 + 20.0;
    let plot_w = WIDTH - LABEL_W - MARGIN_RIGHT - 60.0;

    let mut out = String::new();
    open_svg(&mut out, title, height);

    for (i, p) in points.iter().enumerate() {
        let y = MARGIN_TOP + ROW * i as f64;
        let w = (p.value.max(0.0) / max) * plot_w;
        let _ = write!(
            out,
            r#"<text x="{lx}" y="{ty:.1}" class="tick" text-anchor="end">{label}</text><rect x="{LABEL_W}" y="{y:.1}" width="{w:.1}" height="{bh:.1}" fill="{PRIMARY}"><title>{label}: {value:.0}</title></rect>"#,
            lx = LABEL_W - 6.0,
            ty = y + ROW * 0.6,
            bh = ROW - 6.0,
            label = escape(&p.label),
            value = p.value,
        );
        if let Some(note) = &p.annotation {
            let _ = write!(
                out,
                r#"<text x="{nx:.1}" y="{ty:.1}" class="value">{}</text>"#,
                escape(note),
                nx = LABEL_W + w + 6.0,
                ty = y + ROW * 0.6,
            );
        }
    }
    out.push_str("</svg>");
    out
}

/// Pie chart with a legend; non-positive values are skipped
pub fn pie_chart(title: &str, points: &[Point]) -> String {
    let slices: Vec<&Point> = points.iter().filter(|p| p.value > 0.0).collect();
    let total: f64 = slices.iter().map(|p| p.value).sum();
    if slices.is_empty() || total <= 0.0 {
        return empty_chart(title);
    }

    let (cx, cy, r) = (200.0_f64, HEIGHT / 2.0 + 10.0, 110.0_f64);
    let mut out = String::new();
    open_svg(&mut out, title, HEIGHT);

    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (i, p) in slices.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let share = p.value / total;
        let label = escape(&p.label);

        if slices.len() == 1 {
            let _ = write!(
                out,
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{color}"><title>{label}: 100%</title></circle>"#
            );
        } else {
            let sweep = share * std::f64::consts::TAU;
            let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
            let _ = write!(
                out,
                r#"<path d="M{cx},{cy} L{x1:.2},{y1:.2} A{r},{r} 0 {large} 1 {x2:.2},{y2:.2} Z" fill="{color}"><title>{label}: {pct:.1}%</title></path>"#,
                pct = share * 100.0,
            );
            angle = end;
        }

        let ly = MARGIN_TOP + 10.0 + 22.0 * i as f64;
        let _ = write!(
            out,
            r#"<rect x="380" y="{ry:.1}" width="14" height="14" fill="{color}"/><text x="400" y="{ty:.1}" class="tick">{label} ({pct:.1}%)</text>"#,
            ry = ly - 11.0,
            ty = ly,
            pct = share * 100.0,
        );
    }
    out.push_str("</svg>");
    out
}
