//! Revenue Chart
//!
//! Daily revenue bars drawn on an HTML5 canvas.

use dinedesk::format::format_cents;
use dinedesk::models::DailyPoint;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BAR_COLOR: &str = "#FF9800";

/// Bar chart of revenue per day
#[component]
pub fn RevenueChart(#[prop(into)] points: Signal<Vec<DailyPoint>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let points = points.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_bars(&canvas, &points);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="320"
            class="w-full h-64 md:h-80 rounded-lg"
        />
    }
}

fn draw_bars(canvas: &HtmlCanvasElement, points: &[DailyPoint]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 70.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for selected range", width / 2.0 - 90.0, height / 2.0);
        return;
    }

    let max = points.iter().map(|p| p.revenue).max().unwrap_or(0).max(100) as f64;

    // Grid with dollar labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * max;
        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(&format_cents(value.round() as i64), 5.0, y + 4.0);
    }

    let slot = chart_width / points.len() as f64;
    let bar_width = (slot * 0.7).max(1.0);

    ctx.set_fill_style(&BAR_COLOR.into());
    for (i, point) in points.iter().enumerate() {
        let bar_height = (point.revenue.max(0) as f64 / max) * chart_height;
        let x = margin_left + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = margin_top + chart_height - bar_height;
        ctx.fill_rect(x, y, bar_width, bar_height);
    }

    // At most ~7 date labels
    ctx.set_fill_style(&"#9ca3af".into());
    let step = (points.len() / 7).max(1);
    for (i, point) in points.iter().enumerate().step_by(step) {
        let x = margin_left + i as f64 * slot;
        let label = point.date.get(5..).unwrap_or(&point.date);
        let _ = ctx.fill_text(label, x, height - 10.0);
    }
}
