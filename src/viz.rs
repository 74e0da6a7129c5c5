//! Chart drawing: SVG files through Plotters and text bars for the terminal

use std::path::Path;

use plotters::prelude::*;

use crate::data::{GroupedCounts, StackedHistogram};
use crate::view::Chart;

/// One color per churn label, in sorted label order ("No", "Yes")
const HUE_COLORS: [RGBColor; 4] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
];

/// Glyphs standing in for the hue colors in text output
const HUE_GLYPHS: [char; 4] = ['█', '▒', '░', '▓'];

/// Width of the longest text bar
const TEXT_BAR_WIDTH: usize = 40;

/// Draw a chart to an SVG file
pub fn draw_chart(chart: &Chart, output_path: &Path) -> crate::Result<()> {
    match chart {
        Chart::GroupedCount { title, counts } => draw_grouped_counts(counts, title, output_path),
        Chart::StackedHistogram {
            title,
            x_label,
            histogram,
        } => draw_stacked_histogram(histogram, title, x_label, output_path),
    }
}

/// Side-by-side bars, one group per category and one bar per churn label
pub fn draw_grouped_counts(counts: &GroupedCounts, title: &str, output_path: &Path) -> crate::Result<()> {
    let n_categories = counts.categories.len().max(1);
    let y_max = counts.max_count().max(1) as f64 * 1.1;

    let root = SVGBackend::new(output_path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..(n_categories as f64 - 0.5), 0f64..y_max)?;

    let categories = &counts.categories;
    let category_label = |x: &f64| -> String {
        let idx = x.round();
        if (x - idx).abs() > 0.01 || idx < 0.0 {
            return String::new();
        }
        categories.get(idx as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_categories)
        .x_label_formatter(&category_label)
        .x_desc(counts.column.as_str())
        .y_desc("Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let n_hues = counts.hues.len();
    for (hue_idx, hue) in counts.hues.iter().enumerate() {
        let color = HUE_COLORS[hue_idx % HUE_COLORS.len()];
        chart
            .draw_series(counts.categories.iter().enumerate().map(|(cat_idx, category)| {
                let (x0, x1) = bar_span(cat_idx, hue_idx, n_hues);
                Rectangle::new(
                    [(x0, 0.0), (x1, counts.count(category, hue) as f64)],
                    color.filled(),
                )
            }))?
            .label(hue.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!(path = %output_path.display(), "chart saved");

    Ok(())
}

/// Equal-width histogram with churn labels stacked bottom to top
pub fn draw_stacked_histogram(
    histogram: &StackedHistogram,
    title: &str,
    x_label: &str,
    output_path: &Path,
) -> crate::Result<()> {
    let x_min = histogram.edges.first().copied().unwrap_or(0.0);
    let x_max = histogram.edges.last().copied().unwrap_or(1.0);
    let y_max = (0..histogram.bins())
        .map(|bin| histogram.bin_total(bin))
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.1;

    let root = SVGBackend::new(output_path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let bounds = stack_bounds(histogram);
    for (hue_idx, hue) in histogram.hues.iter().enumerate() {
        let color = HUE_COLORS[hue_idx % HUE_COLORS.len()];
        let layer = &bounds[hue_idx];
        chart
            .draw_series(layer.iter().enumerate().map(|(bin, &(bottom, top))| {
                Rectangle::new(
                    [
                        (histogram.edges[bin], bottom as f64),
                        (histogram.edges[bin + 1], top as f64),
                    ],
                    color.filled(),
                )
            }))?
            .label(hue.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!(path = %output_path.display(), "chart saved");

    Ok(())
}

/// Horizontal extent of bar `hue_idx` inside the group centred on `cat_idx`
fn bar_span(cat_idx: usize, hue_idx: usize, n_hues: usize) -> (f64, f64) {
    let width = 0.8 / n_hues.max(1) as f64;
    let x0 = cat_idx as f64 - 0.4 + width * hue_idx as f64;
    (x0, x0 + width)
}

/// `(bottom, top)` of every stacked segment, indexed `[hue][bin]`
fn stack_bounds(histogram: &StackedHistogram) -> Vec<Vec<(u64, u64)>> {
    let mut base = vec![0u64; histogram.bins()];
    histogram
        .layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .zip(base.iter_mut())
                .map(|(&count, bottom)| {
                    let segment = (*bottom, *bottom + count);
                    *bottom += count;
                    segment
                })
                .collect()
        })
        .collect()
}

/// Render a chart as text bars for the terminal
pub fn text_chart(chart: &Chart) -> String {
    match chart {
        Chart::GroupedCount { title, counts } => text_grouped_counts(title, counts),
        Chart::StackedHistogram {
            title, histogram, ..
        } => text_stacked_histogram(title, histogram),
    }
}

fn text_grouped_counts(title: &str, counts: &GroupedCounts) -> String {
    let mut out = format!("{}\n", title);
    let label_width = counts
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    let hue_width = counts.hues.iter().map(|h| h.chars().count()).max().unwrap_or(0);
    let max = counts.max_count();

    for category in &counts.categories {
        for (hue_idx, hue) in counts.hues.iter().enumerate() {
            let count = counts.count(category, hue);
            let glyph = HUE_GLYPHS[hue_idx % HUE_GLYPHS.len()];
            out.push_str(&format!(
                "  {:<lw$}  {:<hw$} {} {}\n",
                category,
                hue,
                glyph.to_string().repeat(scaled(count, max)),
                count,
                lw = label_width,
                hw = hue_width,
            ));
        }
    }
    out
}

fn text_stacked_histogram(title: &str, histogram: &StackedHistogram) -> String {
    let mut out = format!("{}\n", title);
    let legend: Vec<String> = histogram
        .hues
        .iter()
        .enumerate()
        .map(|(i, hue)| format!("{} {}", HUE_GLYPHS[i % HUE_GLYPHS.len()], hue))
        .collect();
    out.push_str(&format!("  legend: {}\n", legend.join("  ")));

    let max = (0..histogram.bins())
        .map(|bin| histogram.bin_total(bin))
        .max()
        .unwrap_or(0);

    for bin in 0..histogram.bins() {
        let mut bar = String::new();
        let mut counts = Vec::with_capacity(histogram.hues.len());
        for (hue_idx, layer) in histogram.layers.iter().enumerate() {
            let glyph = HUE_GLYPHS[hue_idx % HUE_GLYPHS.len()];
            bar.push_str(&glyph.to_string().repeat(scaled(layer[bin], max)));
            counts.push(layer[bin].to_string());
        }
        out.push_str(&format!(
            "  {:>7.1} - {:<7.1} {} {}\n",
            histogram.edges[bin],
            histogram.edges[bin + 1],
            bar,
            counts.join("/"),
        ));
    }
    out
}

/// Bar length for `count` when `max` fills the full width
fn scaled(count: u64, max: u64) -> usize {
    if max == 0 {
        return 0;
    }
    ((count as f64 / max as f64) * TEXT_BAR_WIDTH as f64).round() as usize
}

/// File-name friendly version of a chart title
pub fn slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}
