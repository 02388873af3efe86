use crate::plot::svg::SvgTag;
use crate::plot::PlotBundle;
use std::collections::HashMap;
use std::fmt::Write as _;

// Pool 1 red, pool 2 blue, then the rest of the matplotlib cycle
const POOL_COLORS: [&str; 6] = ["#d62728", "#1f77b4", "#2ca02c", "#ff7f0e", "#9467bd", "#8c564b"];
const DEPTH_COLOR: &str = "#008000";
const DENSITY_COLOR: &str = "#ff0000";
const THRESHOLD_COLOR: &str = "#0000ff";

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 80.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 45.0;
const PANEL_GAP: f64 = 8.0;

// Numeric pools above this are laid out like named pools
const MAX_NUMERIC_POOL_ROW: usize = 8;

/// Trailing mean over `window` values; `None` until a full window is available.
pub fn moving_average(depths: &[u32], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; depths.len()];
    }

    let mut sum = 0u64;
    depths
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            sum += d as u64;
            if i >= window {
                sum -= depths[i - window] as u64;
            }
            (i + 1 >= window).then(|| sum as f64 / window as f64)
        })
        .collect()
}

/// Pixel geometry: a depth panel above an amplicon lane, in a 5:1 height ratio.
struct Frame {
    left: f64,
    right: f64,
    depth_top: f64,
    depth_bottom: f64,
    lane_top: f64,
    lane_bottom: f64,
    genome_span: f64,
    y_axis_top: f64,
    lane_units: f64,
}

impl Frame {
    fn x(&self, position: f64) -> f64 {
        self.left + position / self.genome_span * (self.right - self.left)
    }

    /// Log-scale depth, clipped to [1, y_axis_top].
    fn depth_y(&self, depth: f64) -> f64 {
        let top_exp = self.y_axis_top.log10();
        let exp = depth.clamp(1.0, self.y_axis_top).log10();
        self.depth_bottom - exp / top_exp * (self.depth_bottom - self.depth_top)
    }

    fn density_y(&self, density: f64) -> f64 {
        self.depth_bottom - density.clamp(0.0, 1.0) * (self.depth_bottom - self.depth_top)
    }

    fn lane_y(&self, units: f64) -> f64 {
        self.lane_bottom - units / self.lane_units * (self.lane_bottom - self.lane_top)
    }
}

/// Lane row per pool: numeric pools up to [`MAX_NUMERIC_POOL_ROW`] use their number,
/// others are numbered in order of first appearance.
fn pool_rows(bundle: &PlotBundle) -> HashMap<&str, usize> {
    let mut rows = HashMap::new();
    let mut next_row = 1;
    for amplicon in &bundle.amplicons {
        let pool = amplicon.pool.as_str();
        if rows.contains_key(pool) {
            continue;
        }
        let row = match pool.parse::<usize>() {
            Ok(n) if (1..=MAX_NUMERIC_POOL_ROW).contains(&n) => n,
            _ => next_row,
        };
        next_row = next_row.max(row.saturating_add(1));
        rows.insert(pool, row);
    }
    rows
}

fn tick_step(span: f64) -> f64 {
    let raw = (span / 10.0).max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw)
        .unwrap_or(10.0 * magnitude)
}

fn polyline(svg: &mut String, points: impl Iterator<Item = (f64, f64)>, color: &str, dashed: bool) {
    let mut coords = String::new();
    for (x, y) in points {
        let _ = write!(coords, "{:.1},{:.1} ", x, y);
    }
    if coords.is_empty() {
        return;
    }

    let mut tag = SvgTag::new("polyline")
        .attr("points", coords.trim_end())
        .attr("fill", "none")
        .attr("stroke", color)
        .attr("stroke-width", 0.5);
    if dashed {
        tag = tag.attr("stroke-dasharray", "1,2");
    }
    tag.write_empty(svg);
}

fn text(svg: &mut String, x: f64, y: f64, anchor: &str, size: f64, color: &str, content: &str) {
    SvgTag::new("text")
        .attr("x", format!("{:.1}", x))
        .attr("y", format!("{:.1}", y))
        .attr("text-anchor", anchor)
        .attr("font-family", "Arial")
        .attr("font-size", size)
        .attr("fill", color)
        .write_text(svg, content);
}

/// Renders depth (moving average, log scale), N density and amplicon layout as SVG.
pub fn render_svg(bundle: &PlotBundle, pixels_per_inch: f64) -> String {
    let width = bundle.width_inches * pixels_per_inch;
    let height = bundle.height_inches * pixels_per_inch;

    let rows = pool_rows(bundle);
    let max_row = rows.values().copied().max().unwrap_or(0) as f64;

    let inner_height = (height - MARGIN_TOP - MARGIN_BOTTOM - PANEL_GAP).max(12.0);
    let depth_top = MARGIN_TOP;
    let depth_bottom = depth_top + inner_height * 5.0 / 6.0;
    let lane_top = depth_bottom + PANEL_GAP;
    let frame = Frame {
        left: MARGIN_LEFT,
        right: (width - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0),
        depth_top,
        depth_bottom,
        lane_top,
        lane_bottom: lane_top + inner_height / 6.0,
        genome_span: bundle.genome_length.max(1) as f64,
        y_axis_top: bundle.y_axis_top.max(10.0),
        lane_units: (max_row + 2.0).max(4.0),
    };

    let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    SvgTag::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", format!("{:.0}", width))
        .attr("height", format!("{:.0}", height))
        .attr("viewBox", format!("0 0 {:.0} {:.0}", width, height))
        .write_open(&mut svg);
    SvgTag::new("rect")
        .attr("width", "100%")
        .attr("height", "100%")
        .attr("fill", "#ffffff")
        .write_empty(&mut svg);

    text(&mut svg, (frame.left + frame.right) / 2.0, MARGIN_TOP - 14.0, "middle", 16.0, "#000000", &bundle.sample_name);

    // Panel outlines
    for (top, bottom) in [(frame.depth_top, frame.depth_bottom), (frame.lane_top, frame.lane_bottom)] {
        SvgTag::new("rect")
            .attr("x", format!("{:.1}", frame.left))
            .attr("y", format!("{:.1}", top))
            .attr("width", format!("{:.1}", frame.right - frame.left))
            .attr("height", format!("{:.1}", bottom - top))
            .attr("fill", "none")
            .attr("stroke", "#000000")
            .attr("stroke-width", 0.8)
            .write_empty(&mut svg);
    }

    // Left axis: decades of depth
    let top_exp = frame.y_axis_top.log10().floor() as i32;
    for exp in 0..=top_exp {
        let y = frame.depth_y(10f64.powi(exp));
        SvgTag::new("line")
            .attr("x1", format!("{:.1}", frame.left - 5.0))
            .attr("y1", format!("{:.1}", y))
            .attr("x2", format!("{:.1}", frame.left))
            .attr("y2", format!("{:.1}", y))
            .attr("stroke", "#000000")
            .write_empty(&mut svg);
        text(&mut svg, frame.left - 8.0, y + 4.0, "end", 11.0, "#000000", &format!("1e{}", exp));
    }
    let depth_mid = (frame.depth_top + frame.depth_bottom) / 2.0;
    SvgTag::new("text")
        .attr("x", format!("{:.1}", frame.left - 55.0))
        .attr("y", format!("{:.1}", depth_mid))
        .attr("transform", format!("rotate(-90 {:.1} {:.1})", frame.left - 55.0, depth_mid))
        .attr("text-anchor", "middle")
        .attr("font-family", "Arial")
        .attr("font-size", 13)
        .attr("fill", DEPTH_COLOR)
        .write_text(&mut svg, "Depth");

    // Right axis: N density
    for step in 0..=4 {
        let density = step as f64 / 4.0;
        let y = frame.density_y(density);
        SvgTag::new("line")
            .attr("x1", format!("{:.1}", frame.right))
            .attr("y1", format!("{:.1}", y))
            .attr("x2", format!("{:.1}", frame.right + 5.0))
            .attr("y2", format!("{:.1}", y))
            .attr("stroke", "#000000")
            .write_empty(&mut svg);
        text(&mut svg, frame.right + 8.0, y + 4.0, "start", 11.0, "#000000", &format!("{:.2}", density));
    }
    SvgTag::new("text")
        .attr("x", format!("{:.1}", frame.right + 60.0))
        .attr("y", format!("{:.1}", depth_mid))
        .attr("transform", format!("rotate(90 {:.1} {:.1})", frame.right + 60.0, depth_mid))
        .attr("text-anchor", "middle")
        .attr("font-family", "Arial")
        .attr("font-size", 13)
        .attr("fill", DENSITY_COLOR)
        .write_text(&mut svg, "N density");

    // Bottom axis: genome position
    let step = tick_step(frame.genome_span);
    let mut tick = 0.0;
    while tick <= frame.genome_span {
        let x = frame.x(tick);
        SvgTag::new("line")
            .attr("x1", format!("{:.1}", x))
            .attr("y1", format!("{:.1}", frame.lane_bottom))
            .attr("x2", format!("{:.1}", x))
            .attr("y2", format!("{:.1}", frame.lane_bottom + 5.0))
            .attr("stroke", "#000000")
            .write_empty(&mut svg);
        text(&mut svg, x, frame.lane_bottom + 17.0, "middle", 11.0, "#000000", &format!("{}", tick as u64));
        tick += step;
    }
    text(&mut svg, (frame.left + frame.right) / 2.0, frame.lane_bottom + 36.0, "middle", 13.0, "#000000", "Position");

    // Minimum depth threshold
    let threshold_y = frame.depth_y(bundle.min_depth as f64);
    SvgTag::new("line")
        .attr("x1", format!("{:.1}", frame.left))
        .attr("y1", format!("{:.1}", threshold_y))
        .attr("x2", format!("{:.1}", frame.right))
        .attr("y2", format!("{:.1}", threshold_y))
        .attr("stroke", THRESHOLD_COLOR)
        .attr("stroke-width", 0.5)
        .attr("stroke-dasharray", "1,2")
        .write_empty(&mut svg);

    let averaged = moving_average(&bundle.depth, bundle.moving_average_window);
    polyline(
        &mut svg,
        averaged
            .iter()
            .enumerate()
            .filter_map(|(i, avg)| avg.map(|d| (frame.x(i as f64), frame.depth_y(d)))),
        DEPTH_COLOR,
        false,
    );

    polyline(
        &mut svg,
        bundle
            .n_density
            .iter()
            .map(|p| (frame.x(p.midpoint.min(frame.genome_span)), frame.density_y(p.density))),
        DENSITY_COLOR,
        false,
    );

    // Amplicon lane
    for amplicon in &bundle.amplicons {
        let row = rows.get(amplicon.pool.as_str()).copied().unwrap_or(1);
        let color = POOL_COLORS[(row - 1) % POOL_COLORS.len()];
        let x = frame.x(amplicon.start as f64);
        let w = frame.x((amplicon.start + amplicon.length) as f64) - x;
        let y_top = frame.lane_y(row as f64 + 1.0);
        let y_bottom = frame.lane_y(row as f64);

        SvgTag::new("rect")
            .attr("x", format!("{:.1}", x))
            .attr("y", format!("{:.1}", y_top))
            .attr("width", format!("{:.1}", w))
            .attr("height", format!("{:.1}", y_bottom - y_top))
            .attr("fill", color)
            .write_empty(&mut svg);
        SvgTag::new("text")
            .attr("x", format!("{:.1}", x + w / 2.0))
            .attr("y", format!("{:.1}", (y_top + y_bottom) / 2.0))
            .attr("text-anchor", "middle")
            .attr("dominant-baseline", "central")
            .attr("font-family", "Arial")
            .attr("font-size", 6)
            .attr("font-weight", "bold")
            .attr("fill", "#000000")
            .write_text(&mut svg, &amplicon.number);
    }

    svg.push_str("</svg>\n");
    svg
}
