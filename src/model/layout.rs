//! Force-directed auto-arrange of service positions.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::{CellId, GraphStore, Point};
use crate::error::Result;
use crate::settings::LayoutSettings;

/// Mean of all service centres, or `None` for an empty store.
pub fn centroid(store: &GraphStore) -> Option<Point> {
	let n = store.service_count();
	if n == 0 {
		return None;
	}
	let (sx, sy) = store
		.services()
		.map(|s| s.center())
		.fold((0.0, 0.0), |(ax, ay), c| (ax + c.x, ay + c.y));
	Some(Point::new(sx / n as f64, sy / n as f64))
}

/// Relaxes service positions with a spring/charge simulation.
///
/// Links pull their endpoints together, every pair of services repels.
/// The layout is shifted afterwards so the centroid stays where it was.
pub fn arrange(store: &mut GraphStore, settings: &LayoutSettings) -> Result<()> {
	let Some(before) = centroid(store) else {
		return Ok(());
	};

	let mut graph: ForceGraph<CellId, ()> = ForceGraph::new(SimulationParameters {
		force_charge: settings.force_charge,
		force_spring: settings.force_spring,
		force_max: settings.force_max,
		node_speed: settings.node_speed,
		damping_factor: settings.damping_factor,
	});

	let n = store.service_count();
	let mut id_to_idx = HashMap::new();
	for (i, service) in store.services().enumerate() {
		// Spread coincident services so the charge force has a direction.
		let angle = (i as f64) * 2.0 * PI / n as f64;
		let c = service.center();
		let idx = graph.add_node(NodeData {
			x: (c.x + 5.0 * angle.cos()) as f32,
			y: (c.y + 5.0 * angle.sin()) as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: service.id,
		});
		id_to_idx.insert(service.id, idx);
	}
	for link in store.links() {
		if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
			graph.add_edge(src, tgt, EdgeData::default());
		}
	}

	for _ in 0..settings.iterations {
		graph.update(settings.dt);
	}

	let mut centers = Vec::with_capacity(n);
	graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		if x.is_finite() && y.is_finite() {
			centers.push((node.data.user_data, Point::new(x, y)));
		}
	});
	if centers.is_empty() {
		return Ok(());
	}
	let count = centers.len() as f64;
	let (sx, sy) = centers
		.iter()
		.fold((0.0, 0.0), |(ax, ay), (_, c)| (ax + c.x, ay + c.y));
	let (dx, dy) = (before.x - sx / count, before.y - sy / count);

	for (id, c) in centers {
		let service = store.service_mut(id)?;
		service.position = Point::new(
			c.x + dx - service.size.width / 2.0,
			c.y + dy - service.size.height / 2.0,
		);
	}
	info!("arranged {n} service(s)");
	Ok(())
}
