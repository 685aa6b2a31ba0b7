//! End-to-end editor flows driven through `EditorState`, as the page's
//! event handlers drive it.

use microservice_canvas::editor::{CanvasEvent, EditorState, InteractionState};
use microservice_canvas::error::EditorError;
use microservice_canvas::model::{CellId, LinkKind, Point};
use microservice_canvas::settings::CanvasSettings;
use serde_json::Value;

fn editor() -> EditorState {
	EditorState::with_initial_service(CanvasSettings::default())
}

fn first_service(state: &EditorState) -> CellId {
	state.graph().services().next().map(|s| s.id).unwrap()
}

fn link(state: &mut EditorState, caption: &str, from: CellId, to: CellId) {
	state.arm_link(caption).unwrap();
	state.dispatch(CanvasEvent::NodePress(from)).unwrap();
	state.dispatch(CanvasEvent::NodePress(to)).unwrap();
}

#[test]
fn page_opens_with_one_service_on_display() {
	let state = editor();
	let id = first_service(&state);
	assert_eq!(state.graph().service_count(), 1);
	assert_eq!(state.panel().active(), Some(id));
	assert_eq!(state.panel().buffer(), "name: Service 1\nport: 8080\n");
	assert_eq!(state.panel().tabs()[0].label, "Service 1");
}

#[test]
fn added_services_get_tabs_and_increasing_names() {
	let mut state = editor();
	let ids: Vec<_> = (0..3).map(|_| state.add_service()).collect();
	let names: Vec<_> = ids
		.iter()
		.map(|&id| state.graph().service(id).unwrap().config.name.clone())
		.collect();
	assert_eq!(names, ["Service 2", "Service 3", "Service 4"]);
	assert_eq!(state.panel().tabs().len(), 4);
	// Adding does not steal the editor.
	assert_eq!(state.panel().active(), Some(first_service(&state)));
}

#[test]
fn armed_link_needs_two_distinct_services() {
	let mut state = editor();
	let a = first_service(&state);
	let b = state.add_service();

	link(&mut state, "gRPC", a, a);
	assert_eq!(state.graph().link_count(), 0);
	state.dispatch(CanvasEvent::NodePress(b)).unwrap();
	assert_eq!(state.graph().link_count(), 1);
	assert_eq!(state.interaction().state(), InteractionState::Idle);

	let created = state.graph().links().next().unwrap();
	assert_eq!((created.source, created.target, created.kind), (a, b, LinkKind::Grpc));
}

#[test]
fn unknown_link_caption_is_rejected() {
	let mut state = editor();
	assert!(matches!(state.arm_link("SOAP"), Err(EditorError::UnknownLinkType(_))));
	assert!(state.interaction().is_idle());
}

#[test]
fn blank_click_aborts_a_pending_link() {
	let mut state = editor();
	let a = first_service(&state);
	let b = state.add_service();
	state.arm_link("REST API").unwrap();
	state.dispatch(CanvasEvent::NodePress(a)).unwrap();
	state.dispatch(CanvasEvent::BlankPress(Point::new(700.0, 500.0))).unwrap();
	state.dispatch(CanvasEvent::NodePress(b)).unwrap();
	assert_eq!(state.graph().link_count(), 0);
	assert_eq!(state.viewport(), EditorState::default().viewport());
}

#[test]
fn saved_name_reaches_label_tab_config_and_yaml() {
	let mut state = editor();
	let id = first_service(&state);
	state.dispatch(CanvasEvent::NodeDoubleClick(id)).unwrap();
	assert_eq!(state.dialog().map(|d| d.name.as_str()), Some("Service 1"));

	state.save_service_edit("Orders", "takes orders").unwrap();
	let service = state.graph().service(id).unwrap();
	assert_eq!(service.label, "Orders");
	assert_eq!(service.config.name, "Orders");
	assert_eq!(service.config.description, "takes orders");
	assert_eq!(state.panel().tab(id).unwrap().label, "Orders");
	assert_eq!(service.config.yaml, "name: Orders\nport: 8080\n");
	assert_eq!(state.panel().buffer(), service.config.yaml);
	assert!(state.dialog().is_none());
}

#[test]
fn renaming_an_inactive_service_leaves_the_buffer_alone() {
	let mut state = editor();
	let b = state.add_service();
	state.open_service_dialog(b).unwrap();
	state.save_service_edit("Billing", "").unwrap();
	assert_eq!(state.panel().buffer(), "name: Service 1\nport: 8080\n");
	assert_eq!(state.panel().tab(b).unwrap().label, "Billing");
}

#[test]
fn blank_name_keeps_dialog_open() {
	let mut state = editor();
	let id = first_service(&state);
	state.open_service_dialog(id).unwrap();
	assert!(matches!(
		state.save_service_edit("   ", "x"),
		Err(EditorError::EmptyServiceName)
	));
	assert!(state.dialog().is_some());
	assert_eq!(state.graph().service(id).unwrap().config.name, "Service 1");

	state.cancel_service_edit();
	assert!(matches!(
		state.save_service_edit("Late", ""),
		Err(EditorError::NoOpenDialog)
	));
}

#[test]
fn typing_only_touches_the_active_service() {
	let mut state = editor();
	let a = first_service(&state);
	let b = state.add_service();

	state.edit_buffer("name: Service 1\nport: 9090\n").unwrap();
	assert_eq!(state.graph().service(a).unwrap().config.yaml, "name: Service 1\nport: 9090\n");
	assert_eq!(state.graph().service(b).unwrap().config.yaml, "name: Service 2\nport: 8080\n");

	state.show_config(b).unwrap();
	assert_eq!(state.panel().buffer(), "name: Service 2\nport: 8080\n");
	state.show_config(a).unwrap();
	assert_eq!(state.panel().buffer(), "name: Service 1\nport: 9090\n");
}

#[test]
fn invalid_yaml_is_stored_and_flagged() {
	let mut state = editor();
	let a = first_service(&state);
	state.edit_buffer("name: Service 1\nport: eighty\n").unwrap();
	assert_eq!(state.graph().service(a).unwrap().config.yaml, "name: Service 1\nport: eighty\n");
	let diags = state.diagnostics();
	assert_eq!(diags.len(), 1);
	assert_eq!(diags[0].path, "port");
}

#[test]
fn export_reflects_deletions() {
	let mut state = editor();
	let a = first_service(&state);
	let b = state.add_service();
	let c = state.add_service();
	link(&mut state, "Message Broker", a, b);
	link(&mut state, "GraphQL", b, c);

	state.open_service_dialog(c).unwrap();
	state.delete_service().unwrap();

	let doc: Value = serde_json::from_str(&state.export_json().unwrap()).unwrap();
	let cells = doc["cells"].as_array().unwrap();
	let services = cells.iter().filter(|c| c["type"] == "custom.Service").count();
	let links: Vec<_> = cells
		.iter()
		.filter(|c| c["type"] == "custom.CommunicationLink")
		.collect();
	assert_eq!(services, 2);
	assert_eq!(links.len(), 1);
	assert_eq!(links[0]["attrs"]["label"]["text"], "Queue");
	assert!(state.panel().tab(c).is_none());
}

#[test]
fn deleting_the_active_service_shows_the_next_tab() {
	let mut state = editor();
	let a = first_service(&state);
	let b = state.add_service();
	state.open_service_dialog(a).unwrap();
	state.delete_service().unwrap();
	assert_eq!(state.panel().active(), Some(b));
	assert_eq!(state.panel().buffer(), "name: Service 2\nport: 8080\n");
}

#[test]
fn pan_then_hit_test_in_screen_space() {
	let mut state = editor();
	let a = first_service(&state);
	// Service 1 spans (50, 50)..(170, 110) in world space.
	assert_eq!(state.service_at_screen(Point::new(60.0, 60.0)), Some(a));

	state.dispatch(CanvasEvent::BlankPress(Point::new(400.0, 400.0))).unwrap();
	state.dispatch(CanvasEvent::BlankMove(Point::new(500.0, 450.0))).unwrap();
	state.dispatch(CanvasEvent::BlankRelease).unwrap();
	assert_eq!((state.viewport().x, state.viewport().y), (100.0, 50.0));
	assert_eq!(state.service_at_screen(Point::new(60.0, 60.0)), None);
	assert_eq!(state.service_at_screen(Point::new(160.0, 110.0)), Some(a));
}

#[test]
fn keyboard_zoom_steps_do_not_cancel_out() {
	let mut state = editor();
	state.zoom_in();
	assert!((state.viewport().k - 1.2).abs() < 1e-12);
	state.zoom_out();
	assert!((state.viewport().k - 0.96).abs() < 1e-12);
}

#[test]
fn arrange_keeps_every_service() {
	let mut state = editor();
	let a = first_service(&state);
	let b = state.add_service();
	link(&mut state, "REST API", a, b);
	state.arrange().unwrap();
	assert_eq!(state.graph().service_count(), 2);
	assert_eq!(state.graph().link_count(), 1);
}

#[test]
fn renaming_keeps_hand_written_yaml_valid() {
	let mut state = editor();
	let id = first_service(&state);
	state.edit_buffer("---\n\"name\": svc\nport: 8080\n").unwrap();
	state.open_service_dialog(id).unwrap();
	state.save_service_edit("Orders", "").unwrap();
	assert_eq!(state.panel().buffer(), "---\nname: Orders\nport: 8080\n");
	assert!(state.diagnostics().is_empty());
}

#[test]
fn stack_template_follows_the_config_panel() {
	let mut state = editor();
	state.add_service();
	state
		.edit_buffer("name: Service 1\nport: 3000\nenvironment:\n  MODE: prod\n")
		.unwrap();

	let doc: Value = serde_json::from_str(&state.deploy_template_json().unwrap()).unwrap();
	let resources = doc["Resources"].as_object().unwrap();
	assert_eq!(resources.len(), 5);
	let first = &resources["Service1TaskDefinition"]["Properties"]["ContainerDefinitions"][0];
	assert_eq!(first["PortMappings"][0]["ContainerPort"], 3000);
	assert_eq!(first["Environment"][0]["Name"], "MODE");
	assert_eq!(first["Environment"][0]["Value"], "prod");
	let second = &resources["Service2TaskDefinition"]["Properties"]["ContainerDefinitions"][0];
	assert_eq!(second["PortMappings"][0]["ContainerPort"], 8080);
	assert_eq!(second["Environment"], Value::Array(Vec::new()));
}

#[test]
fn stack_template_refuses_broken_yaml() {
	let mut state = editor();
	state.edit_buffer("port: [8080\n").unwrap();
	assert!(matches!(
		state.deploy_template_json(),
		Err(EditorError::ServiceConfig { service, .. }) if service == "Service 1"
	));
}
