use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::camera::{Camera, Point};
use super::state::GraphViewState;
use super::store::Node;

const BACKGROUND: &str = "#1a1a2e";
const EDGE_COLOR: &str = "rgba(100, 180, 255, 0.45)";
const ARROW_COLOR: &str = "rgba(100, 180, 255, 0.7)";
const LABEL_COLOR: &str = "rgba(255, 255, 255, 0.8)";
const LABEL_FONT: &str = "10px sans-serif";
const LABEL_GAP: f64 = 3.0;

pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let t = &state.camera.transform;
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_labels(state, ctx);
}

fn draw_edges(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let k = state.camera.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.0 / k, 6.0 / k, 3.0 / k, 6.0 / k);
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(ARROW_COLOR);
	ctx.set_line_width(line_width);

	for (source, target) in state.store.edges() {
		if source.hidden() || target.hidden() {
			continue;
		}
		let (dx, dy) = (target.x - source.x, target.y - source.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist <= source.size + target.size {
			continue;
		}

		let (ux, uy) = (dx / dist, dy / dist);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.begin_path();
		ctx.move_to(source.x + ux * source.size, source.y + uy * source.size);
		ctx.line_to(
			target.x - ux * (target.size + arrow_size),
			target.y - uy * (target.size + arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		let (tip_x, tip_y) = (target.x - ux * target.size, target.y - uy * target.size);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let k = state.camera.transform.k;
	let dragged = state.drag.active_node();

	for (idx, node) in state.store.nodes() {
		if node.hidden() {
			continue;
		}
		draw_node(ctx, node, k, dragged == Some(idx));
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &Node, k: f64, dragged: bool) {
	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.size, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.color);
	ctx.fill();

	if dragged {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.size + 2.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(LABEL_COLOR);
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	}
}

/// Labels are drawn untransformed so the text keeps its pixel size at any
/// zoom level.
fn draw_labels(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font(LABEL_FONT);
	for (_, node) in state.store.nodes() {
		if node.hidden() {
			continue;
		}
		if let Some(label) = &node.label {
			let at = label_anchor(&state.camera, node);
			let _ = ctx.fill_text(label, at.x, at.y);
		}
	}
}

/// Canvas position just right of the node's rim.
fn label_anchor(camera: &Camera, node: &Node) -> Point {
	let centre = camera.graph_to_viewport(Point::new(node.x, node.y));
	Point::new(
		centre.x + node.size * camera.transform.k + LABEL_GAP,
		centre.y + LABEL_GAP,
	)
}
