use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use super::render;
use super::state::CanvasState;
use crate::components::act;
use crate::editor::{CanvasEvent, EditorState, InteractionState};
use crate::model::Point;
use crate::theme::Theme;

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The diagram surface: draws the graph store and turns pointer input into
/// [`CanvasEvent`]s.
#[component]
pub fn DiagramCanvas(
	editor: RwSignal<EditorState>,
	#[prop(into)] theme: Signal<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(CanvasState::default()));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			log::error!("no window; canvas not started");
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				log::error!("2d context unavailable");
				return;
			}
		};
		*state_init.borrow_mut() = CanvasState::new(w, h);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state_resize.borrow_mut().resize(nw, nh);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let theme = theme.try_get_untracked().unwrap_or_default();
			let drawn = editor.try_with_untracked(|s| {
				render::render(s, &state_anim.borrow(), theme, &ctx);
			});
			// The editor signal is gone once the page unmounts.
			if drawn.is_none() {
				return;
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = local_point(canvas_ref, &ev) else {
			return;
		};
		let (hit, idle, node_start) = editor.with_untracked(|s| {
			let hit = s.service_at_screen(p);
			let node_start = hit.and_then(|id| s.graph().service(id)).map(|svc| svc.position);
			(hit, s.interaction().is_idle(), node_start)
		});
		match (hit, node_start) {
			(Some(id), Some(node_start)) => {
				if idle {
					state_md.borrow_mut().begin_drag(id, p, node_start);
				}
				act(editor, |s| s.dispatch(CanvasEvent::NodePress(id)));
			}
			_ => act(editor, |s| s.dispatch(CanvasEvent::BlankPress(p))),
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = local_point(canvas_ref, &ev) else {
			return;
		};
		let (hovered, scale, panning) = editor.with_untracked(|s| {
			(
				s.service_at_screen(p),
				s.viewport().k,
				matches!(s.interaction().state(), InteractionState::Panning(_)),
			)
		});

		let mut s = state_mm.borrow_mut();
		if let Some((id, to)) = s.drag_target(p, scale) {
			act(editor, |e| e.move_service(id, to));
		} else {
			s.hover = hovered;
			if panning {
				act(editor, |e| e.dispatch(CanvasEvent::BlankMove(p)));
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		state_mu.borrow_mut().end_drag();
		act(editor, |s| s.dispatch(CanvasEvent::BlankRelease));
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.end_drag();
		s.hover = None;
		act(editor, |e| e.dispatch(CanvasEvent::BlankRelease));
	};

	let on_dblclick = move |ev: MouseEvent| {
		let Some(p) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(id) = editor.with_untracked(|s| s.service_at_screen(p)) {
			act(editor, |s| s.dispatch(CanvasEvent::NodeDoubleClick(id)));
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(p) = local_point(canvas_ref, &ev) else {
			return;
		};
		editor.update(|s| s.wheel_zoom(p, ev.delta_y()));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="diagram-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: default;"
		/>
	}
}

/// Installs the `Ctrl+=` / `Ctrl+-` zoom shortcuts on the window.
pub fn install_zoom_shortcuts(editor: RwSignal<EditorState>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
		if !ev.ctrl_key() {
			return;
		}
		match ev.key().as_str() {
			"=" => {
				ev.prevent_default();
				editor.update(EditorState::zoom_in);
			}
			"-" => {
				ev.prevent_default();
				editor.update(EditorState::zoom_out);
			}
			_ => {}
		}
	});
	if let Err(e) = window.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref()) {
		log::warn!("zoom shortcuts not installed: {e:?}");
	}
	// Lives as long as the page.
	handler.forget();
}
