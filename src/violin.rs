//! Split-violin figure construction and the render entry point.
//!
//! Each figure overlays the USER cohort on the negative half of the axis
//! (in the metric's family colour) and the API cohort on the positive half
//! (in a fixed neutral dark), with a quartile box and a dashed mean line
//! per cohort.

use std::path::Path;

use log::{debug, info};
use plotly::common::{DashType, Fill, Line, Mode, Title};
use plotly::layout::{Axis, Shape, ShapeLine, ShapeType};
use plotly::{Layout, Plot, Scatter};

use crate::color;
use crate::data::loader::load_descriptors;
use crate::data::model::{IqmTable, Source};
use crate::data::reshape::{melt, LongTable};
use crate::error::{Error, Result};
use crate::metrics;
use crate::stats::{violin_shape, Summary, HALF_WIDTH};

/// x positions of the quartile box within one half (inner/outer edge and
/// the whisker line between them).
const BOX_INNER: f64 = 0.02;
const BOX_OUTER: f64 = 0.10;
const BOX_MID: f64 = 0.06;

// ---------------------------------------------------------------------------
// Render entry point
// ---------------------------------------------------------------------------

/// Render one split-violin figure per requested metric, comparing the USER
/// and API cohorts of `data`.
///
/// An empty `requested` list selects the full vocabulary
/// ([`metrics::QC_VOCABULARY`]). Each figure is displayed immediately via
/// the host environment's viewer; nothing is returned and nothing is
/// written to disk. The first error aborts the whole call with no partial
/// output: an unrecognized name fails before any reshape or plotting work,
/// an unreadable descriptor table fails before the first figure, and a
/// metric without a colour fails its loop iteration before display.
pub fn make_violin_plots(
    data: &IqmTable,
    requested: &[&str],
    descriptor_path: &Path,
) -> Result<()> {
    info!("loading observation table with {} scans", data.len());
    let variables = metrics::resolve(requested)?;

    info!(
        "loading variable descriptions from {}",
        descriptor_path.display()
    );
    let descriptors = load_descriptors(descriptor_path)?;

    let long = melt(data);
    debug!("long table holds {} rows", long.len());

    for var in &variables {
        if let Some(text) = descriptors.describe(var) {
            debug!("{var}: {text}");
        }
        let figure = violin_figure(&long, var)?;
        figure.show();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Per-metric figure
// ---------------------------------------------------------------------------

/// Build the split-violin figure for one metric.
///
/// Pure with respect to the long table: the same inputs always produce the
/// same figure, and nothing is displayed. A cohort with no rows for the
/// metric yields an empty trace and no overlay, which is not an error.
pub fn violin_figure(long: &LongTable, var: &str) -> Result<Plot> {
    let line_color =
        color::line_color(var).ok_or_else(|| Error::MissingColor(var.to_string()))?;

    let user = long.values(var, Source::User);
    let api = long.values(var, Source::Api);
    debug!(
        "{var}: {} USER values, {} API values",
        user.len(),
        api.len()
    );

    let mut plot = Plot::new();
    plot.add_trace(half_violin(
        &user,
        -1.0,
        "user data",
        line_color,
        color::fill_color(line_color),
    ));
    plot.add_trace(half_violin(
        &api,
        1.0,
        "api",
        color::API_LINE_COLOR,
        color::api_fill_color(),
    ));

    let mut shapes = Vec::new();
    if let Some(summary) = Summary::of(&user) {
        overlay_shapes(&mut shapes, &summary, -1.0, line_color);
    }
    if let Some(summary) = Summary::of(&api) {
        overlay_shapes(&mut shapes, &summary, 1.0, color::API_LINE_COLOR);
    }

    let layout = Layout::new()
        .title(Title::from(var))
        .auto_size(false)
        .width(600)
        .height(600)
        .paper_background_color("white")
        .plot_background_color("white")
        .x_axis(
            Axis::new()
                .range(vec![-0.75, 0.75])
                .show_tick_labels(false)
                .zero_line(true),
        )
        .y_axis(Axis::new().title(Title::from(var)))
        .shapes(shapes);
    plot.set_layout(layout);

    Ok(plot)
}

/// One half of the split: the cohort's density outline as a closed, filled
/// polygon. No values → an empty trace.
fn half_violin(
    values: &[f64],
    sign: f64,
    name: &str,
    line_color: &'static str,
    fill_color: String,
) -> Box<Scatter<f64, f64>> {
    let (xs, ys) = match violin_shape(values) {
        Some(shape) => shape.outline(sign),
        None => (Vec::new(), Vec::new()),
    };
    Scatter::new(xs, ys)
        .name(name)
        .legend_group(name)
        .mode(Mode::Lines)
        .line(Line::new().color(line_color).width(2.0))
        .fill(Fill::ToSelf)
        .fill_color(fill_color)
}

/// Box and mean-line overlay for one cohort: quartile box, median tick,
/// data-range whisker, and a dashed mean line reaching across the half.
fn overlay_shapes(shapes: &mut Vec<Shape>, summary: &Summary, sign: f64, color: &'static str) {
    let inner = sign * BOX_INNER;
    let outer = sign * BOX_OUTER;
    let mid = sign * BOX_MID;

    shapes.push(
        Shape::new()
            .shape_type(ShapeType::Rect)
            .x0(inner)
            .x1(outer)
            .y0(summary.q1)
            .y1(summary.q3)
            .line(ShapeLine::new().color(color).width(1.0)),
    );
    shapes.push(
        Shape::new()
            .shape_type(ShapeType::Line)
            .x0(inner)
            .x1(outer)
            .y0(summary.median)
            .y1(summary.median)
            .line(ShapeLine::new().color(color).width(1.0)),
    );
    shapes.push(
        Shape::new()
            .shape_type(ShapeType::Line)
            .x0(mid)
            .x1(mid)
            .y0(summary.min)
            .y1(summary.max)
            .line(ShapeLine::new().color(color).width(1.0)),
    );
    shapes.push(
        Shape::new()
            .shape_type(ShapeType::Line)
            .x0(0.0)
            .x1(sign * HALF_WIDTH)
            .y0(summary.mean)
            .y1(summary.mean)
            .line(ShapeLine::new().color(color).width(1.5).dash(DashType::Dot)),
    );
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;

    use serde_json::Value;

    use super::*;
    use crate::data::model::IqmRecord;

    fn record(name: &str, source: Source, metrics: &[(&str, f64)]) -> IqmRecord {
        IqmRecord {
            bids_name: name.to_string(),
            source,
            metrics: metrics
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn sample_table() -> IqmTable {
        IqmTable::from_records(vec![
            record("sub-01", Source::User, &[("snr", 3.0), ("tsnr", 40.0)]),
            record("sub-02", Source::User, &[("snr", 4.0), ("tsnr", 42.0)]),
            record("api-01", Source::Api, &[("snr", 5.0)]),
            record("api-02", Source::Api, &[("snr", 6.0)]),
        ])
    }

    fn figure_json(var: &str) -> Value {
        let long = melt(&sample_table());
        let plot = violin_figure(&long, var).unwrap();
        serde_json::from_str(&plot.to_json()).unwrap()
    }

    #[test]
    fn figure_has_two_traces_on_a_square_white_canvas() {
        let json = figure_json("snr");
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["layout"]["width"], 600);
        assert_eq!(json["layout"]["height"], 600);
        assert_eq!(json["layout"]["autosize"], false);
        assert_eq!(json["layout"]["paper_bgcolor"], "white");
        assert_eq!(json["layout"]["plot_bgcolor"], "white");
    }

    #[test]
    fn cohorts_sit_on_opposite_halves() {
        let json = figure_json("snr");
        let user_x = json["data"][0]["x"].as_array().unwrap();
        let api_x = json["data"][1]["x"].as_array().unwrap();
        assert!(!user_x.is_empty() && !api_x.is_empty());
        assert!(user_x.iter().all(|x| x.as_f64().unwrap() <= 0.0));
        assert!(api_x.iter().all(|x| x.as_f64().unwrap() >= 0.0));
    }

    #[test]
    fn traces_carry_the_fixed_colours() {
        let json = figure_json("snr");
        assert_eq!(json["data"][0]["name"], "user data");
        assert_eq!(json["data"][0]["line"]["color"], "#A52A2A");
        assert_eq!(json["data"][0]["fillcolor"], "rgba(165, 42, 42, 0.35)");
        assert_eq!(json["data"][1]["name"], "api");
        assert_eq!(json["data"][1]["line"]["color"], "rgb(58, 54, 54)");
    }

    #[test]
    fn both_cohorts_get_box_and_mean_overlays() {
        let json = figure_json("snr");
        let shapes = json["layout"]["shapes"].as_array().unwrap();
        // 4 shapes per cohort: box, median, whisker, mean line.
        assert_eq!(shapes.len(), 8);
        let rects = shapes.iter().filter(|s| s["type"] == "rect").count();
        assert_eq!(rects, 2);
    }

    #[test]
    fn user_violin_spans_the_user_values() {
        let json = figure_json("snr");
        let user_y = json["data"][0]["y"].as_array().unwrap();
        let min = user_y
            .iter()
            .map(|y| y.as_f64().unwrap())
            .fold(f64::INFINITY, f64::min);
        let max = user_y
            .iter()
            .map(|y| y.as_f64().unwrap())
            .fold(f64::NEG_INFINITY, f64::max);
        // USER snr values are 3.0 and 4.0; the outline reaches past them.
        assert!(min < 3.0);
        assert!(max > 4.0);
    }

    #[test]
    fn missing_cohort_yields_an_empty_trace_not_an_error() {
        // tsnr exists only in the USER rows of the sample table.
        let json = figure_json("tsnr");
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert!(json["data"][1]["x"].as_array().unwrap().is_empty());
        // Only the USER side has overlay shapes.
        assert_eq!(json["layout"]["shapes"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn metric_without_a_colour_is_fatal() {
        let long = melt(&sample_table());
        let err = violin_figure(&long, "size_t").err().unwrap();
        assert!(matches!(err, Error::MissingColor(name) if name == "size_t"));
    }

    #[test]
    fn unknown_metric_aborts_before_any_other_work() {
        // The descriptor path does not exist, but validation runs first.
        let err = make_violin_plots(
            &sample_table(),
            &["not_a_real_metric"],
            Path::new("/nonexistent/descriptors.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedVariable(_)));
    }

    #[test]
    fn unreadable_descriptor_table_aborts_before_any_figure() {
        let err = make_violin_plots(
            &sample_table(),
            &["snr"],
            Path::new("/nonexistent/descriptors.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
