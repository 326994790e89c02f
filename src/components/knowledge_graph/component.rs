use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, MouseEvent, WheelEvent};

use super::guards::{AnimationLoop, ResizeGuard, WindowListener};
use super::layout::ForceLayout;
use super::render;
use super::state::GraphViewState;
use super::status::{ViewStatus, load_graph};
use super::types::{GraphData, Node};
use super::viewport::{ContainerSize, SizeObserver};
use crate::api::GraphClient;
use crate::config::GraphConfig;

const FRAME_DT: f32 = 0.016;

type SharedState = Rc<RefCell<Option<GraphViewState<ForceLayout>>>>;

/// Loads the graph once on mount and shows it, or an error.
#[component]
pub fn KnowledgeGraph(
	#[prop(optional)] config: Option<GraphConfig>,
	#[prop(optional, into)] on_node_click: Option<Callback<Node>>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let status = RwSignal::new(ViewStatus::Loading);

	let client = GraphClient::new(&config);
	spawn_local(async move {
		let next = load_graph(&client).await;
		// The view may already be gone.
		let _ = status.try_set(next);
	});

	move || {
		status.with(|s| match s {
			ViewStatus::Loading => view! {
				<div class="graph-status">"Loading graph..."</div>
			}
			.into_any(),
			ViewStatus::Error(message) => view! {
				<div class="graph-status graph-error">{message.clone()}</div>
			}
			.into_any(),
			ViewStatus::Ready(data) => view! {
				<GraphCanvas data=data.clone() config=config.clone() on_node_click=on_node_click />
			}
			.into_any(),
		})
	}
}

struct Registrations {
	_resize: WindowListener,
	_observer: ResizeGuard,
	_animation: AnimationLoop,
}

fn local_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
fn GraphCanvas(
	data: GraphData,
	config: GraphConfig,
	on_node_click: Option<Callback<Node>>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let registrations = StoredValue::new_local(None::<Registrations>);
	let mut pending = Some((data, config));
	let state_init = state.clone();

	Effect::new(move |_| {
		let (Some(container), Some(canvas)) = (container_ref.get(), canvas_ref.get()) else {
			return;
		};
		let Some((data, config)) = pending.take() else {
			return;
		};
		let container: Element = container.into();

		let mut ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("Canvas 2d context unavailable");
				return;
			}
		};

		let sizer = ContainerSize {
			container: container.clone(),
			min_height: config.min_height,
		};
		let size = sizer.size();
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);

		let layout = ForceLayout::new(&data, size.width, size.height, config.simulation());
		*state_init.borrow_mut() = Some(GraphViewState::new(data, layout, size, config));
		info!("Canvas ready at {}x{}", size.width, size.height);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		let refit: Rc<dyn Fn()> = Rc::new(move || {
			let size = sizer.size();
			let (w, h) = (size.width as u32, size.height as u32);
			if canvas_resize.width() != w || canvas_resize.height() != h {
				canvas_resize.set_width(w);
				canvas_resize.set_height(h);
			}
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(size);
			}
		});

		let state_anim = state_init.clone();
		let refit_window = refit.clone();
		registrations.set_value(Some(Registrations {
			_resize: WindowListener::new("resize", move || refit_window()),
			_observer: ResizeGuard::observe(&container, move || refit()),
			_animation: AnimationLoop::start(move || {
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					s.tick(FRAME_DT);
					render::render(s, &mut ctx);
				}
			}),
		}));
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.pointer_up());
		if let (Some(node), Some(callback)) = (clicked, on_node_click) {
			info!("Node clicked: {}", node.id);
			callback.run(node);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_pointer();
		}
	};

	let state_wh = state;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="knowledge-graph-canvas"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="position: absolute; top: 0; left: 0; display: block; cursor: grab;"
			/>
		</div>
	}
}
