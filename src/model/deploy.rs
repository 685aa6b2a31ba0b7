//! CloudFormation template for running every service on ECS Fargate.
//!
//! Only the template is built here. Building images and creating the stack
//! happen outside the editor, so image references and network ids are
//! placeholders to fill in before deploying.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::export::{Cell, GraphDocument};
use crate::error::{EditorError, Result};

/// File name offered for the downloaded template.
pub const TEMPLATE_FILENAME: &str = "microservice_stack.json";

/// Logical id of the shared cluster resource.
pub const CLUSTER_RESOURCE: &str = "ECSCluster";

const CLUSTER_NAME: &str = "MicroservicesCluster";
const DEFAULT_PORT: u16 = 8080;
const SUBNETS: [&str; 2] = ["<subnet-id-1>", "<subnet-id-2>"];
const SECURITY_GROUP: &str = "<security-group-id>";

/// The keys of a service's YAML that deployment reads. Anything else is
/// ignored.
#[derive(Debug, Default, Deserialize)]
struct DeployManifest {
	port: Option<u16>,
	#[serde(default)]
	environment: BTreeMap<String, String>,
}

impl DeployManifest {
	fn parse(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
		match serde_yaml::from_str::<Value>(yaml)? {
			// An empty buffer takes every default.
			Value::Null => Ok(Self::default()),
			value => serde_yaml::from_value(value),
		}
	}
}

/// Top-level template document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
	/// Always `2010-09-09`.
	#[serde(rename = "AWSTemplateFormatVersion")]
	pub format_version: &'static str,
	/// Resources by logical id.
	pub resources: BTreeMap<String, Resource>,
}

/// One CloudFormation resource, serialized as `{"Type", "Properties"}`.
#[derive(Debug, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum Resource {
	/// The cluster every service runs in.
	#[serde(rename = "AWS::ECS::Cluster")]
	Cluster(ClusterProperties),
	/// One container per service.
	#[serde(rename = "AWS::ECS::TaskDefinition")]
	TaskDefinition(TaskDefinitionProperties),
	/// Keeps a task running.
	#[serde(rename = "AWS::ECS::Service")]
	Service(EcsServiceProperties),
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterProperties {
	pub cluster_name: String,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskDefinitionProperties {
	pub family: String,
	pub container_definitions: Vec<ContainerDefinition>,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerDefinition {
	pub name: String,
	pub image: String,
	pub port_mappings: Vec<PortMapping>,
	pub environment: Vec<EnvironmentVariable>,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortMapping {
	pub container_port: u16,
	pub protocol: &'static str,
}

/// `{"Name": .., "Value": ..}` entry of a container's environment.
#[allow(missing_docs)]
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentVariable {
	pub name: String,
	pub value: String,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EcsServiceProperties {
	pub service_name: String,
	pub cluster: Ref,
	pub task_definition: Ref,
	pub desired_count: u32,
	pub launch_type: &'static str,
	pub network_configuration: NetworkConfiguration,
}

/// Intrinsic `{"Ref": "<logical id>"}`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Ref {
	#[serde(rename = "Ref")]
	pub logical_id: String,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkConfiguration {
	pub awsvpc_configuration: AwsvpcConfiguration,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsvpcConfiguration {
	pub assign_public_ip: &'static str,
	pub subnets: Vec<String>,
	pub security_groups: Vec<String>,
}

/// Logical-id stem for a service: its name with everything but ASCII
/// letters and digits dropped.
fn logical_stem(
	name: &str,
	taken: &BTreeMap<String, Resource>,
	fallback: impl std::fmt::Display,
) -> String {
	let stem: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
	let stem = if stem.is_empty() { format!("Service{fallback}") } else { stem };
	if taken.contains_key(&format!("{stem}TaskDefinition")) || stem == CLUSTER_RESOURCE {
		format!("{stem}{fallback}")
	} else {
		stem
	}
}

/// Image reference for a service, tagged `latest`.
fn image_for(name: &str) -> String {
	let repository: String = name
		.trim()
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
		.collect();
	format!("{repository}:latest")
}

/// Builds the stack template: one cluster, plus a task definition and a
/// Fargate service per service cell. Links carry no deployment meaning.
///
/// Fails on the first service whose YAML does not parse or whose `port`
/// or `environment` has the wrong shape.
pub fn template(document: &GraphDocument<'_>) -> Result<Template> {
	let mut resources = BTreeMap::new();
	resources.insert(
		CLUSTER_RESOURCE.to_owned(),
		Resource::Cluster(ClusterProperties {
			cluster_name: CLUSTER_NAME.to_owned(),
		}),
	);

	for cell in &document.cells {
		let Cell::Service { id, config, .. } = cell else {
			continue;
		};
		let manifest = DeployManifest::parse(&config.yaml).map_err(|source| EditorError::ServiceConfig {
			service: config.name.clone(),
			source,
		})?;

		let stem = logical_stem(&config.name, &resources, id);
		let task_id = format!("{stem}TaskDefinition");
		let container = ContainerDefinition {
			name: config.name.clone(),
			image: image_for(&config.name),
			port_mappings: vec![PortMapping {
				container_port: manifest.port.unwrap_or(DEFAULT_PORT),
				protocol: "tcp",
			}],
			environment: manifest
				.environment
				.into_iter()
				.map(|(name, value)| EnvironmentVariable { name, value })
				.collect(),
		};
		resources.insert(
			task_id.clone(),
			Resource::TaskDefinition(TaskDefinitionProperties {
				family: config.name.clone(),
				container_definitions: vec![container],
			}),
		);
		resources.insert(
			format!("{stem}Service"),
			Resource::Service(EcsServiceProperties {
				service_name: config.name.clone(),
				cluster: Ref {
					logical_id: CLUSTER_RESOURCE.to_owned(),
				},
				task_definition: Ref { logical_id: task_id },
				desired_count: 1,
				launch_type: "FARGATE",
				network_configuration: NetworkConfiguration {
					awsvpc_configuration: AwsvpcConfiguration {
						assign_public_ip: "ENABLED",
						subnets: SUBNETS.map(str::to_owned).to_vec(),
						security_groups: vec![SECURITY_GROUP.to_owned()],
					},
				},
			}),
		);
		log::debug!("template: {} on port {}", config.name, manifest.port.unwrap_or(DEFAULT_PORT));
	}

	Ok(Template {
		format_version: "2010-09-09",
		resources,
	})
}
