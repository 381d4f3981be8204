//! Chart Components
//!
//! Categorical bar charts using HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A single bar in a [`BarChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// A row in a [`StackedBarChart`]: one value per series.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedBar {
    pub label: String,
    pub values: Vec<f64>,
}

/// A named, colored series of a stacked chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub color: &'static str,
}

/// Bar chart with one colored bar per category
#[component]
pub fn BarChart(#[prop(into)] bars: Signal<Vec<Bar>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the data changes
    create_effect(move |_| {
        let bars = bars.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_bar_chart(&canvas, &bars);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="300"
            class="w-full h-56 md:h-72 rounded-lg"
        />
    }
}

/// Stacked bar chart with a legend row
#[component]
pub fn StackedBarChart(
    #[prop(into)] rows: Signal<Vec<StackedBar>>,
    series: Vec<Series>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    let series_for_draw = series.clone();
    create_effect(move |_| {
        let rows = rows.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_stacked_chart(&canvas, &rows, &series_for_draw);
        }
    });

    view! {
        <div>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full h-56 md:h-72 rounded-lg"
            />

            // Legend
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                {series.into_iter().map(|s| view! {
                    <div class="flex items-center space-x-2">
                        <div
                            class="w-3 h-3 rounded-full"
                            style=format!("background-color: {}", s.color)
                        />
                        <span class="text-sm text-gray-300">{s.name}</span>
                    </div>
                }).collect_view()}
            </div>
        </div>
    }
}

/// Round a raw maximum up to a clean axis ceiling.
fn axis_max(max_value: f64) -> f64 {
    if max_value <= 0.0 {
        return 1.0;
    }

    let exponent = max_value.log10().floor() as i32;
    let magnitude = 10_f64.powi(exponent);
    let normalized = max_value / magnitude;

    if normalized <= 1.0 {
        magnitude
    } else if normalized <= 2.0 {
        2.0 * magnitude
    } else if normalized <= 5.0 {
        5.0 * magnitude
    } else {
        10_f64.powi(exponent + 1)
    }
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Draw the chart frame (background, grid, y-axis labels) and return the
/// plottable area as (left, top, width, height).
fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    y_max: f64,
) -> (f64, f64, f64, f64) {
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    // Grid lines and y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);

    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max * (1.0 - i as f64 / 5.0);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    (margin_left, margin_top, chart_width, chart_height)
}

fn draw_no_data(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style(&"#6b7280".into());
    ctx.set_font("16px sans-serif");
    let _ = ctx.fill_text("No data available", width / 2.0 - 60.0, height / 2.0);
}

/// Draw a simple categorical bar chart
fn draw_bar_chart(canvas: &HtmlCanvasElement, bars: &[Bar]) {
    let Some(ctx) = canvas_context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let y_max = axis_max(bars.iter().map(|b| b.value).fold(0.0, f64::max));
    let (left, top, chart_width, chart_height) = draw_frame(&ctx, width, height, y_max);

    if bars.is_empty() {
        draw_no_data(&ctx, width, height);
        return;
    }

    let slot = chart_width / bars.len() as f64;
    let bar_width = slot * 0.6;

    for (i, bar) in bars.iter().enumerate() {
        let x = left + i as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = (bar.value / y_max) * chart_height;
        let y = top + chart_height - bar_height;

        ctx.set_fill_style(&bar.color.as_str().into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        // Category label
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&bar.label, x, height - 10.0);
    }
}

/// Draw a stacked categorical bar chart
fn draw_stacked_chart(canvas: &HtmlCanvasElement, rows: &[StackedBar], series: &[Series]) {
    let Some(ctx) = canvas_context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let y_max = axis_max(
        rows.iter()
            .map(|r| r.values.iter().sum::<f64>())
            .fold(0.0, f64::max),
    );
    let (left, top, chart_width, chart_height) = draw_frame(&ctx, width, height, y_max);

    if rows.is_empty() {
        draw_no_data(&ctx, width, height);
        return;
    }

    let slot = chart_width / rows.len() as f64;
    let bar_width = slot * 0.6;

    for (i, row) in rows.iter().enumerate() {
        let x = left + i as f64 * slot + (slot - bar_width) / 2.0;
        let mut stack_top = top + chart_height;

        for (value, s) in row.values.iter().zip(series) {
            let segment_height = (value / y_max) * chart_height;
            stack_top -= segment_height;

            ctx.set_fill_style(&s.color.into());
            ctx.fill_rect(x, stack_top, bar_width, segment_height);
        }

        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&row.label, x, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_max_rounds_up_to_clean_ceilings() {
        assert_eq!(axis_max(7.0), 10.0);
        assert_eq!(axis_max(42.0), 50.0);
        assert_eq!(axis_max(100.0), 100.0);
        assert_eq!(axis_max(130.0), 200.0);
        assert_eq!(axis_max(0.8), 1.0);
    }

    #[test]
    fn axis_max_handles_empty_and_zero_data() {
        assert_eq!(axis_max(0.0), 1.0);
        assert_eq!(axis_max(-3.0), 1.0);
    }
}
