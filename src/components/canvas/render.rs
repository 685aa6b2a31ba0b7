use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, Highlight};
use crate::editor::EditorState;
use crate::model::{Point, Service};
use crate::settings::CanvasSettings;
use crate::theme::Theme;

const ARROW_SIZE: f64 = 10.0;

/// Where the segment from a box's centre toward `toward` leaves the box.
pub fn border_point(service: &Service, toward: Point) -> Point {
	let c = service.center();
	let (dx, dy) = (toward.x - c.x, toward.y - c.y);
	if dx == 0.0 && dy == 0.0 {
		return c;
	}
	let (hw, hh) = (service.size.width / 2.0, service.size.height / 2.0);
	let t = (hw / dx.abs()).min(hh / dy.abs());
	Point::new(c.x + dx * t, c.y + dy * t)
}

pub fn render(
	editor: &EditorState,
	canvas: &CanvasState,
	theme: Theme,
	ctx: &CanvasRenderingContext2d,
) {
	let view = editor.viewport();
	let settings = editor.settings();
	ctx.clear_rect(0.0, 0.0, canvas.width, canvas.height);
	ctx.set_fill_style_str(theme.canvas_background());
	ctx.fill_rect(0.0, 0.0, canvas.width, canvas.height);

	ctx.save();
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);
	draw_grid(editor, canvas, theme, ctx);

	let highlight = canvas
		.hover
		.map(|id| Highlight::around(editor.graph(), id))
		.unwrap_or_default();
	draw_links(editor, &highlight, ctx);
	draw_services(editor, &highlight, ctx);
	ctx.restore();

	if let Some(kind) = editor.interaction().armed_kind() {
		ctx.set_fill_style_str(kind.stroke());
		ctx.set_font(&format!("{}px sans-serif", settings.link_label_font_px));
		ctx.set_text_align("left");
		ctx.set_text_baseline("top");
		let hint = match editor.interaction().pending_source() {
			Some(_) => format!("{kind}: pick the target service"),
			None => format!("{kind}: pick the source service"),
		};
		let _ = ctx.fill_text(&hint, 12.0, 12.0);
	}
}

fn draw_grid(editor: &EditorState, canvas: &CanvasState, theme: Theme, ctx: &CanvasRenderingContext2d) {
	let view = editor.viewport();
	// Coarsen the grid until dots are at least 8px apart on screen.
	let mut step = editor.settings().grid_size;
	if step <= 0.0 {
		return;
	}
	while step * view.k < 8.0 {
		step *= 5.0;
	}
	let top_left = view.screen_to_world(Point::new(0.0, 0.0));
	let bottom_right = view.screen_to_world(Point::new(canvas.width, canvas.height));
	ctx.set_fill_style_str(match theme {
		Theme::Light => "rgba(0, 0, 0, 0.15)",
		Theme::Dark => "rgba(255, 255, 255, 0.12)",
	});
	let dot = 1.0 / view.k;
	let mut x = (top_left.x / step).floor() * step;
	while x <= bottom_right.x {
		let mut y = (top_left.y / step).floor() * step;
		while y <= bottom_right.y {
			ctx.fill_rect(x, y, dot, dot);
			y += step;
		}
		x += step;
	}
}

fn draw_links(editor: &EditorState, highlight: &Highlight, ctx: &CanvasRenderingContext2d) {
	let settings = editor.settings();
	let graph = editor.graph();
	for link in graph.links() {
		let Some((source, target)) = graph.endpoints(link) else {
			continue;
		};
		let from = border_point(source, target.center());
		let tip = border_point(target, source.center());
		let (dx, dy) = (tip.x - from.x, tip.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let (stroke, width) = if highlight.links.contains(&link.id) {
			(settings.highlight_stroke, settings.highlight_width)
		} else {
			(link.kind.stroke(), settings.link_width)
		};
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
		ctx.stroke();

		let (back_x, back_y) = (tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.set_fill_style_str(stroke);
		ctx.begin_path();
		ctx.move_to(tip.x, tip.y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		draw_link_label(settings, link.kind.label(), stroke, from, tip, ctx);
	}
}

fn draw_link_label(
	settings: &CanvasSettings,
	text: &str,
	fill: &str,
	from: Point,
	to: Point,
	ctx: &CanvasRenderingContext2d,
) {
	let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
	let font_px = settings.link_label_font_px;
	ctx.set_font(&format!("{font_px}px sans-serif"));
	let width = ctx
		.measure_text(text)
		.map(|m| m.width())
		.unwrap_or(font_px * text.len() as f64 * 0.6);
	let (pad_x, h) = (6.0, font_px + 6.0);

	ctx.set_fill_style_str(fill);
	rounded_rect(ctx, mid.x - width / 2.0 - pad_x, mid.y - h / 2.0, width + 2.0 * pad_x, h, h / 2.0);
	ctx.fill();
	ctx.set_fill_style_str(settings.label_fill);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, mid.x, mid.y);
}

fn draw_services(editor: &EditorState, highlight: &Highlight, ctx: &CanvasRenderingContext2d) {
	let settings = editor.settings();
	let pending = editor.interaction().pending_source();
	for service in editor.graph().services() {
		let (x, y) = (service.position.x, service.position.y);
		let (w, h) = (service.size.width, service.size.height);

		rounded_rect(ctx, x, y, w, h, settings.node_corner_radius);
		ctx.set_fill_style_str(&service.body.fill);
		ctx.fill();

		if highlight.services.contains(&service.id) {
			ctx.set_stroke_style_str(settings.highlight_stroke);
			ctx.set_line_width(settings.highlight_width);
		} else {
			ctx.set_stroke_style_str(&service.body.stroke);
			ctx.set_line_width(settings.node_stroke_width);
		}
		if pending == Some(service.id) {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(6.0),
				&JsValue::from_f64(4.0),
			));
		}
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(settings.label_fill);
		ctx.set_font(&format!("{}px sans-serif", settings.label_font_px));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text_with_max_width(&service.label, x + w / 2.0, y + h / 2.0, w - 8.0);
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	let _ = ctx.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
	ctx.line_to(x + w, y + h - r);
	let _ = ctx.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
	ctx.line_to(x + r, y + h);
	let _ = ctx.arc(x + r, y + h - r, r, PI / 2.0, PI);
	ctx.line_to(x, y + r);
	let _ = ctx.arc(x + r, y + r, r, PI, 1.5 * PI);
	ctx.close_path();
}
