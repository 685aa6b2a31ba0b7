//! Advisory checks over a service's YAML configuration.
//!
//! Nothing here gates persistence: the editor stores whatever is typed and
//! only displays the diagnostics. The expected shape is
//!
//! ```yaml
//! name: orders        # string
//! port: 8080          # integer
//! version: "1.2"      # string
//! dependencies: [db]  # list of strings
//! environment:        # string -> string
//!   LOG_LEVEL: debug
//! ```
//!
//! Unknown keys are accepted.

use std::fmt;

use serde_yaml::Value;

/// One advisory finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
	/// Dotted key path, empty for document-level findings.
	pub path: String,
	/// Human-readable description of the problem.
	pub message: String,
	/// 1-based line, when the parser reports one.
	pub line: Option<usize>,
	/// 1-based column, when the parser reports one.
	pub column: Option<usize>,
}

impl Diagnostic {
	fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			message: message.into(),
			line: None,
			column: None,
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let (Some(line), Some(column)) = (self.line, self.column) {
			write!(f, "{line}:{column}: ")?;
		}
		if !self.path.is_empty() {
			write!(f, "{}: ", self.path)?;
		}
		f.write_str(&self.message)
	}
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Sequence(_) => "array",
		Value::Mapping(_) => "object",
		Value::Tagged(_) => "tagged value",
	}
}

fn expect_string(path: &str, value: &Value, out: &mut Vec<Diagnostic>) {
	if !value.is_string() {
		out.push(Diagnostic::at(
			path,
			format!("expected string, found {}", type_name(value)),
		));
	}
}

/// Checks `yaml` against the service schema.
pub fn diagnose(yaml: &str) -> Vec<Diagnostic> {
	let root: Value = match serde_yaml::from_str(yaml) {
		Ok(root) => root,
		Err(e) => {
			let location = e.location();
			return vec![Diagnostic {
				path: String::new(),
				message: e.to_string(),
				line: location.as_ref().map(|l| l.line()),
				column: location.as_ref().map(|l| l.column()),
			}];
		}
	};

	let mapping = match root {
		// An empty buffer parses as null; nothing to report yet.
		Value::Null => return Vec::new(),
		Value::Mapping(mapping) => mapping,
		other => {
			return vec![Diagnostic::at(
				"",
				format!("expected a mapping at the top level, found {}", type_name(&other)),
			)];
		}
	};

	let mut out = Vec::new();
	for (key, value) in &mapping {
		let Some(key) = key.as_str() else {
			continue;
		};
		match key {
			"name" | "version" => expect_string(key, value, &mut out),
			"port" => {
				if !matches!(value, Value::Number(n) if n.is_i64() || n.is_u64()) {
					out.push(Diagnostic::at(
						key,
						format!("expected integer, found {}", type_name(value)),
					));
				}
			}
			"dependencies" => match value {
				Value::Sequence(items) => {
					for (i, item) in items.iter().enumerate() {
						expect_string(&format!("dependencies.{i}"), item, &mut out);
					}
				}
				other => out.push(Diagnostic::at(
					key,
					format!("expected array, found {}", type_name(other)),
				)),
			},
			"environment" => match value {
				Value::Mapping(vars) => {
					for (var, val) in vars {
						let var = var.as_str().map_or_else(|| format!("{var:?}"), str::to_owned);
						expect_string(&format!("environment.{var}"), val, &mut out);
					}
				}
				other => out.push(Diagnostic::at(
					key,
					format!("expected object, found {}", type_name(other)),
				)),
			},
			_ => {}
		}
	}
	out
}

/// Renders `name` as a YAML scalar, quoting only when needed.
fn yaml_scalar(name: &str) -> String {
	serde_yaml::to_string(name)
		.map(|s| s.trim_end().to_owned())
		.unwrap_or_else(|_| format!("{name:?}"))
}

fn is_doc_marker(line: &str) -> bool {
	line == "---" || line.starts_with("--- ")
}

/// Byte offset just past the closing quote of a quoted scalar at the start
/// of `line`.
fn quoted_end(line: &str, quote: char) -> Option<usize> {
	let mut chars = line.char_indices().skip(1).peekable();
	while let Some((i, c)) = chars.next() {
		if quote == '"' && c == '\\' {
			chars.next();
		} else if c == quote {
			// '' is an escaped quote inside single quotes.
			if quote == '\'' && chars.peek().map(|&(_, n)| n) == Some('\'') {
				chars.next();
				continue;
			}
			return Some(i + c.len_utf8());
		}
	}
	None
}

/// Whether `line` opens a top-level entry whose key is `name`, in any
/// spelling YAML accepts (`name:`, `"name":`, `'name' :`).
fn is_name_entry(line: &str) -> bool {
	if line.is_empty() || line.starts_with(char::is_whitespace) || line.starts_with('#') {
		return false;
	}
	let key_end = match line.chars().next() {
		Some(q @ ('"' | '\'')) => match quoted_end(line, q) {
			Some(end) if line[end..].trim_start().starts_with(':') => end,
			_ => return false,
		},
		_ => {
			let bytes = line.as_bytes();
			let Some(colon) = (0..bytes.len()).find(|&i| {
				bytes[i] == b':' && bytes.get(i + 1).is_none_or(|b| b.is_ascii_whitespace())
			}) else {
				return false;
			};
			colon
		}
	};
	serde_yaml::from_str::<Value>(line[..key_end].trim())
		.is_ok_and(|key| key.as_str() == Some("name"))
}

/// Line range `start..end` covered by the top-level `name` entry: the key
/// line plus any indented continuation, such as a block or folded scalar.
fn name_span(lines: &[&str]) -> Option<(usize, usize)> {
	let start = lines.iter().position(|l| is_name_entry(l))?;
	let mut end = start + 1;
	for (i, line) in lines.iter().enumerate().skip(start + 1) {
		if line.trim().is_empty() {
			continue;
		}
		let nested = line.starts_with(char::is_whitespace) || *line == "-" || line.starts_with("- ");
		if !nested {
			break;
		}
		end = i + 1;
	}
	Some((start, end))
}

/// Where a missing `name` entry goes: after a leading `---` marker, if any,
/// so the buffer stays a single document.
fn insertion_point(lines: &[&str]) -> usize {
	for (i, line) in lines.iter().enumerate() {
		let trimmed = line.trim();
		if trimmed.is_empty() || trimmed.starts_with('#') || line.starts_with('%') {
			continue;
		}
		return if is_doc_marker(line) { i + 1 } else { 0 };
	}
	0
}

/// Rewrites the top-level `name` entry, or inserts one if missing.
///
/// Works line by line so the rest of the buffer keeps its formatting and
/// comments. When the buffer was a valid mapping and the line edit would
/// not leave one carrying the new name (a flow-style root, say), the
/// mapping is re-serialised instead.
pub fn rename(yaml: &str, name: &str) -> String {
	let entry = format!("name: {}", yaml_scalar(name));
	let mut lines: Vec<&str> = yaml.lines().collect();
	match name_span(&lines) {
		Some((start, end)) => {
			lines.drain(start + 1..end);
			lines[start] = &entry;
		}
		None => lines.insert(insertion_point(&lines), &entry),
	}
	let mut out = lines.join("\n");
	out.push('\n');

	let Ok(Value::Mapping(before)) = serde_yaml::from_str::<Value>(yaml) else {
		return out;
	};
	let renamed = serde_yaml::from_str::<Value>(&out)
		.is_ok_and(|after| after.is_mapping() && after["name"].as_str() == Some(name));
	if renamed {
		return out;
	}
	let mut mapping = serde_yaml::Mapping::new();
	mapping.insert("name".into(), name.into());
	for (key, value) in before {
		if key.as_str() != Some("name") {
			mapping.insert(key, value);
		}
	}
	serde_yaml::to_string(&mapping).unwrap_or(out)
}
