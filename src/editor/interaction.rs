//! Pointer-mode state machine for the canvas.
//!
//! | state                  | event               | next                         | effect        |
//! |------------------------|---------------------|------------------------------|---------------|
//! | any                    | `ArmLink(k)`        | `ArmedForLink(k)`            |               |
//! | `ArmedForLink(k)`      | `NodePress(n)`      | `LinkSourceSelected(k, n)`   |               |
//! | `LinkSourceSelected`   | `NodePress(same)`   | unchanged                    |               |
//! | `LinkSourceSelected`   | `NodePress(other)`  | `Idle`                       | `CreateLink`  |
//! | armed / source chosen  | `BlankPress`        | `Idle`                       |               |
//! | `Idle` / `Panning`     | `BlankPress(p)`     | `Panning(p)`                 |               |
//! | `Panning(a)`           | `BlankMove(p)`      | `Panning(p)`                 | `Pan(p - a)`  |
//! | `Panning`              | `BlankRelease`      | `Idle`                       |               |
//! | any                    | `NodeDoubleClick(n)`| unchanged                    | `OpenDialog`  |
//!
//! A blank press while a link is armed only cancels the link; it never
//! starts a pan.

use log::debug;

use crate::model::{CellId, LinkKind, Point};

/// Current pointer mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
	/// Presses drag services or pan.
	#[default]
	Idle,
	/// Waiting for the link's source.
	ArmedForLink(LinkKind),
	/// Waiting for the link's target.
	#[allow(missing_docs)]
	LinkSourceSelected {
		kind: LinkKind,
		source: CellId,
	},
	/// Screen-space position of the last pan step.
	Panning(Point),
}

/// Input delivered by the toolbar and the canvas surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum CanvasEvent {
	/// A link-type button was clicked.
	ArmLink(LinkKind),
	NodePress(CellId),
	NodeDoubleClick(CellId),
	/// Press on empty canvas, in screen coordinates.
	BlankPress(Point),
	BlankMove(Point),
	/// Any button release; also sent when the pointer leaves the canvas.
	BlankRelease,
}

/// What the caller must apply after a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Effect {
	None,
	CreateLink {
		source: CellId,
		target: CellId,
		kind: LinkKind,
	},
	/// Screen-space translation.
	Pan {
		dx: f64,
		dy: f64,
	},
	/// Open the edit dialog on a double-clicked service.
	OpenDialog(CellId),
}

/// Owns the [`InteractionState`] and applies the transition table.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	state: InteractionState,
}

impl InteractionController {
	/// Starts out idle.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current mode.
	pub fn state(&self) -> InteractionState {
		self.state
	}

	/// Whether presses may start a drag.
	pub fn is_idle(&self) -> bool {
		self.state == InteractionState::Idle
	}

	/// Kind armed for the next link, if any.
	pub fn armed_kind(&self) -> Option<LinkKind> {
		match self.state {
			InteractionState::ArmedForLink(kind) | InteractionState::LinkSourceSelected { kind, .. } => {
				Some(kind)
			}
			_ => None,
		}
	}

	/// Source already picked for the pending link.
	pub fn pending_source(&self) -> Option<CellId> {
		match self.state {
			InteractionState::LinkSourceSelected { source, .. } => Some(source),
			_ => None,
		}
	}

	/// Advances the state machine by one event.
	pub fn handle(&mut self, event: CanvasEvent) -> Effect {
		use InteractionState::*;

		let (next, effect) = match (self.state, event) {
			(_, CanvasEvent::NodeDoubleClick(id)) => (self.state, Effect::OpenDialog(id)),
			(_, CanvasEvent::ArmLink(kind)) => (ArmedForLink(kind), Effect::None),

			(ArmedForLink(kind), CanvasEvent::NodePress(source)) => {
				(LinkSourceSelected { kind, source }, Effect::None)
			}
			(LinkSourceSelected { source, .. }, CanvasEvent::NodePress(target)) if source == target => {
				(self.state, Effect::None)
			}
			(LinkSourceSelected { kind, source }, CanvasEvent::NodePress(target)) => (
				Idle,
				Effect::CreateLink {
					source,
					target,
					kind,
				},
			),

			(ArmedForLink(_) | LinkSourceSelected { .. }, CanvasEvent::BlankPress(_)) => {
				(Idle, Effect::None)
			}
			(Idle | Panning(_), CanvasEvent::BlankPress(p)) => (Panning(p), Effect::None),
			(Panning(anchor), CanvasEvent::BlankMove(p)) => (
				Panning(p),
				Effect::Pan {
					dx: p.x - anchor.x,
					dy: p.y - anchor.y,
				},
			),
			(Panning(_), CanvasEvent::BlankRelease) => (Idle, Effect::None),

			(state, _) => (state, Effect::None),
		};

		if next != self.state {
			debug!("interaction: {:?} -> {:?}", self.state, next);
		}
		self.state = next;
		effect
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::InteractionState::*;

	const A: CellId = CellId(1);
	const B: CellId = CellId(2);

	fn run(events: &[CanvasEvent]) -> (InteractionController, Vec<Effect>) {
		let mut ctl = InteractionController::new();
		let effects = events.iter().map(|&e| ctl.handle(e)).collect();
		(ctl, effects)
	}

	fn links(effects: &[Effect]) -> usize {
		effects
			.iter()
			.filter(|e| matches!(e, Effect::CreateLink { .. }))
			.count()
	}

	#[test]
	fn two_distinct_presses_make_one_link() {
		let (ctl, effects) = run(&[
			CanvasEvent::ArmLink(LinkKind::Grpc),
			CanvasEvent::NodePress(A),
			CanvasEvent::NodePress(B),
		]);
		assert_eq!(
			effects[2],
			Effect::CreateLink {
				source: A,
				target: B,
				kind: LinkKind::Grpc
			}
		);
		assert_eq!(ctl.state(), Idle);
	}

	#[test]
	fn pressing_the_source_again_is_a_no_op() {
		let (ctl, effects) = run(&[
			CanvasEvent::ArmLink(LinkKind::RestApi),
			CanvasEvent::NodePress(A),
			CanvasEvent::NodePress(A),
		]);
		assert_eq!(links(&effects), 0);
		assert_eq!(
			ctl.state(),
			LinkSourceSelected {
				kind: LinkKind::RestApi,
				source: A
			}
		);
	}

	#[test]
	fn node_press_without_arming_does_nothing() {
		let (ctl, effects) = run(&[CanvasEvent::NodePress(A), CanvasEvent::NodePress(B)]);
		assert_eq!(links(&effects), 0);
		assert!(ctl.is_idle());
	}

	#[test]
	fn rearming_discards_the_pending_source() {
		let (ctl, effects) = run(&[
			CanvasEvent::ArmLink(LinkKind::RestApi),
			CanvasEvent::NodePress(A),
			CanvasEvent::ArmLink(LinkKind::Graphql),
		]);
		assert_eq!(links(&effects), 0);
		assert_eq!(ctl.state(), ArmedForLink(LinkKind::Graphql));
		assert_eq!(ctl.pending_source(), None);
	}

	#[test]
	fn blank_press_cancels_arming_without_panning() {
		let (mut ctl, _) = run(&[
			CanvasEvent::ArmLink(LinkKind::MessageBroker),
			CanvasEvent::NodePress(A),
			CanvasEvent::BlankPress(Point::new(5.0, 5.0)),
		]);
		assert!(ctl.is_idle());
		assert_eq!(ctl.handle(CanvasEvent::BlankMove(Point::new(9.0, 9.0))), Effect::None);
	}

	#[test]
	fn panning_reports_incremental_deltas() {
		let (ctl, effects) = run(&[
			CanvasEvent::BlankPress(Point::new(10.0, 10.0)),
			CanvasEvent::BlankMove(Point::new(15.0, 12.0)),
			CanvasEvent::BlankMove(Point::new(10.0, 20.0)),
			CanvasEvent::BlankRelease,
		]);
		assert_eq!(effects[1], Effect::Pan { dx: 5.0, dy: 2.0 });
		assert_eq!(effects[2], Effect::Pan { dx: -5.0, dy: 8.0 });
		assert!(ctl.is_idle());
	}

	#[test]
	fn double_click_opens_dialog_in_any_state() {
		let (ctl, effects) = run(&[
			CanvasEvent::ArmLink(LinkKind::Grpc),
			CanvasEvent::NodeDoubleClick(B),
		]);
		assert_eq!(effects[1], Effect::OpenDialog(B));
		assert_eq!(ctl.armed_kind(), Some(LinkKind::Grpc));
	}
}
