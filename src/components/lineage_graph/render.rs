use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{LineageGraphState, VisualNode};
use super::types::NodeKind;

const GRID_GAP: f64 = 24.0;
const TOOLTIP_MAX_W: f64 = 260.0;
const TOOLTIP_PAD: f64 = 10.0;
const TOOLTIP_LINE_H: f64 = 16.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &LineageGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#fafafa");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();

	draw_tooltip(state, ctx);
}

/// Dot grid over the visible world rect, capped so extreme zoom-out
/// doesn't stall the frame.
fn draw_grid(state: &LineageGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (gx0, gy0) = state.screen_to_graph(0.0, 0.0);
	let (gx1, gy1) = state.screen_to_graph(state.width, state.height);
	let cols = ((gx1 - gx0) / GRID_GAP).ceil();
	let rows = ((gy1 - gy0) / GRID_GAP).ceil();
	if cols * rows > 20_000.0 {
		return;
	}

	ctx.set_fill_style_str("#d4d4d4");
	let mut x = (gx0 / GRID_GAP).floor() * GRID_GAP;
	while x <= gx1 {
		let mut y = (gy0 / GRID_GAP).floor() * GRID_GAP;
		while y <= gy1 {
			let (sx, sy) = (x * k + state.transform.x, y * k + state.transform.y);
			ctx.fill_rect(sx - 1.0, sy - 1.0, 2.0, 2.0);
			y += GRID_GAP;
		}
		x += GRID_GAP;
	}
}

fn draw_edges(state: &LineageGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap) = (1.5 / k, 8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	for &(src, tgt) in &state.edges {
		let (a, b) = (&state.nodes[src], &state.nodes[tgt]);
		let (aw, ah) = a.size();
		let (_, bh) = b.size();
		// Right-center of the source box to left-center of the target.
		let (x1, y1) = (a.x + aw, a.y + ah / 2.0);
		let (x2, y2) = (b.x, b.y + bh / 2.0);

		let is_highlighted = state.is_highlighted(src) && state.is_highlighted(tgt);
		// t=0: all edges at base, t=1: highlighted brighten, others dim
		let (alpha, width) = if is_highlighted {
			(0.9 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.9 - 0.7 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(129, 212, 250, {alpha})"));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		// Smoothstep-style curve: control points at the horizontal midpoint.
		let mid = (x1 + x2) / 2.0;
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.bezier_curve_to(mid, y1, mid, y2, x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn node_style(kind: NodeKind) -> (&'static str, &'static str, f64) {
	match kind {
		NodeKind::Table => ("#f0f0f0", "#cccccc", 2.0),
		NodeKind::Column => ("#e1f5fe", "#81d4fa", 1.0),
	}
}

fn draw_node_box(node: &VisualNode, ctx: &CanvasRenderingContext2d, k: f64) {
	let (w, h) = node.size();
	let (fill, stroke, border) = node_style(node.kind);
	rounded_rect(ctx, node.x, node.y, w, h, 5.0);
	ctx.set_fill_style_str(fill);
	ctx.fill();
	ctx.set_stroke_style_str(stroke);
	ctx.set_line_width(border);
	ctx.stroke();

	ctx.set_fill_style_str("#212121");
	let size: f64 = match node.kind {
		NodeKind::Table => 13.0,
		NodeKind::Column => 12.0,
	};
	ctx.set_font(&format!("{}px sans-serif", size.max(10.0 / k.max(0.5))));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&node.label, node.x + w / 2.0, node.y + h / 2.0);
}

fn draw_nodes(state: &LineageGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	for (idx, node) in state.nodes.iter().enumerate() {
		if has_highlight && state.is_highlighted(idx) {
			continue;
		}
		ctx.set_global_alpha(1.0 - 0.6 * t);
		draw_node_box(node, ctx, k);
		ctx.set_global_alpha(1.0);
	}

	if !has_highlight {
		return;
	}

	for (idx, node) in state.nodes.iter().enumerate() {
		if !state.is_highlighted(idx) {
			continue;
		}
		let (w, h) = node.size();
		let is_hovered = state.is_hovered(idx);

		if is_hovered && t > 0.01 {
			let (cx, cy) = (node.x + w / 2.0, node.y + h / 2.0);
			let glow_r = w * 0.7;
			if let Ok(gradient) = ctx.create_radial_gradient(cx, cy, w * 0.2, cx, cy, glow_r) {
				let alpha = 0.25 * t;
				let _ = gradient.add_color_stop(0.0, &format!("rgba(2, 136, 209, {alpha})"));
				let _ = gradient.add_color_stop(1.0, "rgba(2, 136, 209, 0)");
				ctx.begin_path();
				let _ = ctx.arc(cx, cy, glow_r, 0.0, 2.0 * std::f64::consts::PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		draw_node_box(node, ctx, k);

		if is_hovered && t > 0.01 {
			rounded_rect(
				ctx,
				node.x - 2.0 / k,
				node.y - 2.0 / k,
				w + 4.0 / k,
				h + 4.0 / k,
				5.0,
			);
			ctx.set_stroke_style_str(&format!("rgba(2, 136, 209, {})", 0.8 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
	}
}

/// Description tooltip for the hovered column node, drawn in screen
/// space so it stays readable at any zoom.
fn draw_tooltip(state: &LineageGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	if t <= 0.01 {
		return;
	}
	let Some(idx) = state.hover.node.or(state.hover.prev_node) else {
		return;
	};
	let node = &state.nodes[idx];
	let Some(description) = &node.description else {
		return;
	};

	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	let lines = wrap_text(ctx, description, TOOLTIP_MAX_W - 2.0 * TOOLTIP_PAD);
	if lines.is_empty() {
		return;
	}

	let box_h = lines.len() as f64 * TOOLTIP_LINE_H + 2.0 * TOOLTIP_PAD;
	let (w, _) = node.size();
	let k = state.transform.k;
	let mut sx = (node.x + w) * k + state.transform.x + 12.0;
	let mut sy = node.y * k + state.transform.y;
	sx = sx.min(state.width - TOOLTIP_MAX_W - 8.0).max(8.0);
	sy = sy.min(state.height - box_h - 8.0).max(8.0);

	ctx.set_global_alpha(t);
	rounded_rect(ctx, sx, sy, TOOLTIP_MAX_W, box_h, 4.0);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill();
	ctx.set_stroke_style_str("#81d4fa");
	ctx.set_line_width(1.0);
	ctx.stroke();

	ctx.set_fill_style_str("#37474f");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(
			line,
			sx + TOOLTIP_PAD,
			sy + TOOLTIP_PAD + i as f64 * TOOLTIP_LINE_H,
		);
	}
	ctx.set_global_alpha(1.0);
}

/// Greedy word wrap using the canvas' own text metrics.
fn wrap_text(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	for word in text.split_whitespace() {
		let candidate = if current.is_empty() {
			word.to_string()
		} else {
			format!("{current} {word}")
		};
		let width = ctx
			.measure_text(&candidate)
			.map(|m| m.width())
			.unwrap_or(0.0);
		if width > max_w && !current.is_empty() {
			lines.push(std::mem::take(&mut current));
			current = word.to_string();
		} else {
			current = candidate;
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}
