//! Signup Chart Component
//!
//! Bar chart of signups per bucket using HTML5 Canvas. The canvas grows with
//! the number of buckets and scrolls horizontally inside its container.

use leptos::*;
use tenant_dashboard::{axis_ticks, SignupSeries};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::GlobalState;

/// Horizontal space per bucket
pub const BAR_SLOT_PX: u32 = 60;
/// Canvas height
pub const CHART_HEIGHT_PX: u32 = 300;

const MARGIN_LEFT: f64 = 40.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 32.0;
const BAR_WIDTH: f64 = 36.0;
const BAR_COLOR: &str = "#3b82f6";

/// Canvas width for a series of `buckets` points
pub fn chart_width(buckets: usize) -> u32 {
    MARGIN_LEFT as u32 + buckets.max(1) as u32 * BAR_SLOT_PX
}

/// Bar height in pixels for `value` on an axis topping out at `top`
pub fn bar_height(value: u64, top: u64, plot_height: f64) -> f64 {
    if top == 0 {
        return 0.0;
    }
    value as f64 / top as f64 * plot_height
}

/// Signup bar chart component
#[component]
pub fn SignupChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let series = state.series;

    // Redraw when the summary or the granularity changes
    create_effect(move |_| {
        let series = series.get();
        if let Some(canvas) = canvas_ref.get() {
            canvas.set_width(chart_width(series.len()));
            canvas.set_height(CHART_HEIGHT_PX);
            draw_chart(&canvas, &series);
        }
    });

    view! {
        <div class="overflow-x-auto">
            <canvas
                node_ref=canvas_ref
                style=move || format!(
                    "width: {}px; height: {}px",
                    chart_width(series.with(|s| s.len())),
                    CHART_HEIGHT_PX
                )
                class="rounded-lg"
            />
        </div>
    }
}

/// Draw the bars on canvas
fn draw_chart(canvas: &HtmlCanvasElement, series: &SignupSeries) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let plot_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_height;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if series.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No signups to chart", 10.0, height / 2.0);
        return;
    }

    let ticks = axis_ticks(series.max_signups());
    let top = ticks.last().copied().unwrap_or(1);

    // Horizontal grid lines with integer labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for tick in &ticks {
        let y = baseline - bar_height(*tick, top, plot_height);
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width, y);
        ctx.stroke();

        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&tick.to_string(), 5.0, y + 4.0);
    }

    for (i, point) in series.points.iter().enumerate() {
        let slot_x = MARGIN_LEFT + i as f64 * BAR_SLOT_PX as f64;
        let bar_x = slot_x + (BAR_SLOT_PX as f64 - BAR_WIDTH) / 2.0;
        let bar_h = bar_height(point.signups, top, plot_height);

        ctx.set_fill_style(&BAR_COLOR.into());
        ctx.fill_rect(bar_x, baseline - bar_h, BAR_WIDTH, bar_h);

        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("11px sans-serif");
        let _ = ctx.fill_text(&point.label, slot_x + 6.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_width_grows_with_buckets() {
        assert_eq!(chart_width(0), 40 + 60);
        assert_eq!(chart_width(2), 40 + 120);
        assert_eq!(chart_width(30), 40 + 1800);
    }

    #[test]
    fn test_bar_height() {
        assert_eq!(bar_height(2, 4, 200.0), 100.0);
        assert_eq!(bar_height(4, 4, 200.0), 200.0);
        assert_eq!(bar_height(1, 0, 200.0), 0.0);
    }
}
