//! Canvas and editor defaults.

/// Simulation parameters for the auto-arrange action.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSettings {
	/// Repulsion between every pair of services.
	pub force_charge: f32,
	/// Pull along each link.
	pub force_spring: f32,
	/// Cap on the force applied to one service per tick.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Fraction of velocity kept between ticks.
	pub damping_factor: f32,
	/// Number of fixed-step ticks run per arrange.
	pub iterations: usize,
	/// Seconds per tick.
	pub dt: f32,
}

impl Default for LayoutSettings {
	fn default() -> Self {
		Self {
			force_charge: 12000.0,
			force_spring: 0.3,
			force_max: 280.0,
			node_speed: 7000.0,
			damping_factor: 0.95,
			iterations: 400,
			dt: 0.016,
		}
	}
}

/// Visual and interaction defaults for the diagram canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSettings {
	/// Width of a new service box, in world units.
	pub node_width: f64,
	/// Height of a new service box.
	pub node_height: f64,
	/// Corner radius of service boxes.
	pub node_corner_radius: f64,
	/// Fill colour of a new service.
	pub node_fill: &'static str,
	/// Border colour of a new service.
	pub node_stroke: &'static str,
	/// Border width of an unhighlighted service.
	pub node_stroke_width: f64,
	/// Text colour inside service boxes and link pills.
	pub label_fill: &'static str,
	/// Font size of service labels.
	pub label_font_px: f64,
	/// Stroke width of an unhighlighted link.
	pub link_width: f64,
	/// Font size of link labels and the mode hint.
	pub link_label_font_px: f64,
	/// Stroke used for links and neighbours of the hovered service.
	pub highlight_stroke: &'static str,
	/// Stroke width of highlighted cells.
	pub highlight_width: f64,
	/// Spacing of background dots, in world units.
	pub grid_size: f64,
	/// Spawn point of services created from the toolbar.
	pub spawn_x: f64,
	/// See `spawn_x`.
	pub spawn_y: f64,
	/// Scale factor applied by `Ctrl+=`.
	pub zoom_in_step: f64,
	/// Scale factor applied by `Ctrl+-`.
	pub zoom_out_step: f64,
	/// Scale factor for one wheel notch towards the user.
	pub wheel_zoom_in: f64,
	/// Scale factor for one wheel notch away from the user.
	pub wheel_zoom_out: f64,
	/// Smallest viewport scale.
	pub min_scale: f64,
	/// Largest viewport scale.
	pub max_scale: f64,
	/// Auto-arrange parameters.
	pub layout: LayoutSettings,
}

impl Default for CanvasSettings {
	fn default() -> Self {
		Self {
			node_width: 120.0,
			node_height: 60.0,
			node_corner_radius: 10.0,
			node_fill: "#8b5cf6",
			node_stroke: "#6b46c1",
			node_stroke_width: 2.0,
			label_fill: "#ffffff",
			label_font_px: 14.0,
			link_width: 2.0,
			link_label_font_px: 12.0,
			highlight_stroke: "#ff0000",
			highlight_width: 3.0,
			grid_size: 10.0,
			spawn_x: 50.0,
			spawn_y: 50.0,
			zoom_in_step: 1.2,
			zoom_out_step: 0.8,
			wheel_zoom_in: 1.1,
			wheel_zoom_out: 0.9,
			min_scale: 0.1,
			max_scale: 10.0,
			layout: LayoutSettings::default(),
		}
	}
}
