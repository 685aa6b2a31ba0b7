use std::collections::BTreeMap;

use log::debug;

use super::{CellId, CommunicationLink, LinkKind, Point, Service};
use crate::error::{EditorError, Result};

/// Holds every service and link of the diagram.
///
/// Cells are keyed by [`CellId`]; ids only ever grow, so iteration order is
/// insertion order, which is also the draw order.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	services: BTreeMap<CellId, Service>,
	links: BTreeMap<CellId, CommunicationLink>,
	next_id: u32,
	revision: u64,
}

impl GraphStore {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Bumped on every mutation; lets views tell whether anything changed.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	fn allocate_id(&mut self) -> CellId {
		self.next_id += 1;
		CellId(self.next_id)
	}

	fn touch(&mut self) {
		self.revision += 1;
	}

	/// Inserts a service, assigning its id.
	pub fn add_service(&mut self, mut service: Service) -> CellId {
		let id = self.allocate_id();
		service.id = id;
		debug!("add service {id} ({})", service.config.name);
		self.services.insert(id, service);
		self.touch();
		id
	}

	/// Inserts a link between two distinct, existing services.
	pub fn add_link(&mut self, source: CellId, target: CellId, kind: LinkKind) -> Result<CellId> {
		if source == target {
			return Err(EditorError::SelfLink(source));
		}
		for end in [source, target] {
			if !self.services.contains_key(&end) {
				return Err(EditorError::UnknownService(end));
			}
		}
		let id = self.allocate_id();
		debug!("add {kind} link {id}: {source} -> {target}");
		self.links.insert(
			id,
			CommunicationLink {
				id,
				source,
				target,
				kind,
			},
		);
		self.touch();
		Ok(id)
	}

	/// Removes a service together with every link touching it.
	pub fn remove_service(&mut self, id: CellId) -> Result<Service> {
		let service = self
			.services
			.remove(&id)
			.ok_or(EditorError::UnknownService(id))?;
		let before = self.links.len();
		self.links.retain(|_, link| link.opposite(id).is_none());
		debug!(
			"removed service {id} and {} attached link(s)",
			before - self.links.len()
		);
		self.touch();
		Ok(service)
	}

	/// Looks up a service by id.
	pub fn service(&self, id: CellId) -> Option<&Service> {
		self.services.get(&id)
	}

	/// Mutable access; counts as a change.
	pub fn service_mut(&mut self, id: CellId) -> Result<&mut Service> {
		if !self.services.contains_key(&id) {
			return Err(EditorError::UnknownService(id));
		}
		self.touch();
		self.services
			.get_mut(&id)
			.ok_or(EditorError::UnknownService(id))
	}

	/// Looks up a link by id.
	pub fn link(&self, id: CellId) -> Option<&CommunicationLink> {
		self.links.get(&id)
	}

	/// Services in draw order; reverse it for topmost-first.
	pub fn services(&self) -> impl DoubleEndedIterator<Item = &Service> {
		self.services.values()
	}

	/// Links in creation order.
	pub fn links(&self) -> impl Iterator<Item = &CommunicationLink> {
		self.links.values()
	}

	/// Number of services.
	pub fn service_count(&self) -> usize {
		self.services.len()
	}

	/// Number of links.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Links with `service` as either endpoint.
	pub fn connected_links(&self, service: CellId) -> impl Iterator<Item = &CommunicationLink> {
		self.links
			.values()
			.filter(move |link| link.opposite(service).is_some())
	}

	/// Source and target services of a link.
	pub fn endpoints(&self, link: &CommunicationLink) -> Option<(&Service, &Service)> {
		Some((self.service(link.source)?, self.service(link.target)?))
	}

	/// Topmost service under a world-space point.
	pub fn service_at(&self, p: Point) -> Option<CellId> {
		self.services
			.values()
			.rev()
			.find(|service| service.contains(p))
			.map(|service| service.id)
	}

	/// Moves a service's top-left corner.
	pub fn move_service(&mut self, id: CellId, position: Point) -> Result<()> {
		self.service_mut(id)?.position = position;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::ServiceFactory;

	fn store_with(n: usize) -> (GraphStore, Vec<CellId>) {
		let mut factory = ServiceFactory::default();
		let mut store = GraphStore::new();
		let ids = (0..n)
			.map(|i| store.add_service(factory.create_service(i as f64 * 200.0, 0.0)))
			.collect();
		(store, ids)
	}

	#[test]
	fn ids_are_unique_across_cells() {
		let (mut store, ids) = store_with(2);
		let link = store.add_link(ids[0], ids[1], LinkKind::RestApi).unwrap();
		assert!(!ids.contains(&link));
		assert_eq!(store.service(ids[0]).unwrap().id, ids[0]);
	}

	#[test]
	fn rejects_self_and_dangling_links() {
		let (mut store, ids) = store_with(1);
		assert!(matches!(
			store.add_link(ids[0], ids[0], LinkKind::Grpc),
			Err(EditorError::SelfLink(_))
		));
		assert!(matches!(
			store.add_link(ids[0], CellId(99), LinkKind::Grpc),
			Err(EditorError::UnknownService(CellId(99)))
		));
		assert_eq!(store.link_count(), 0);
	}

	#[test]
	fn removing_a_service_drops_its_links() {
		let (mut store, ids) = store_with(3);
		store.add_link(ids[0], ids[1], LinkKind::Grpc).unwrap();
		store.add_link(ids[1], ids[2], LinkKind::Graphql).unwrap();
		store.add_link(ids[2], ids[0], LinkKind::RestApi).unwrap();

		store.remove_service(ids[1]).unwrap();
		assert_eq!(store.service_count(), 2);
		assert_eq!(store.link_count(), 1);
		assert_eq!(store.connected_links(ids[0]).count(), 1);
		assert!(store.remove_service(ids[1]).is_err());
	}

	#[test]
	fn hit_test_prefers_topmost() {
		let mut factory = ServiceFactory::default();
		let mut store = GraphStore::new();
		let below = store.add_service(factory.create_service(0.0, 0.0));
		let above = store.add_service(factory.create_service(60.0, 30.0));
		assert_eq!(store.service_at(Point::new(10.0, 10.0)), Some(below));
		assert_eq!(store.service_at(Point::new(70.0, 40.0)), Some(above));
		assert_eq!(store.service_at(Point::new(500.0, 500.0)), None);
	}

	#[test]
	fn revision_tracks_mutations() {
		let (mut store, ids) = store_with(2);
		let rev = store.revision();
		store.move_service(ids[0], Point::new(5.0, 5.0)).unwrap();
		assert!(store.revision() > rev);
		assert_eq!(store.service(ids[0]).unwrap().position, Point::new(5.0, 5.0));
	}
}
