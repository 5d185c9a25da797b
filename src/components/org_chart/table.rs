//! Conversion from a role-annotated table into chart records.
//!
//! Hosts usually hand over tabular data where each column carries one or more
//! roles (`id`, `name`, `parentId`, ...). Columns without a known role are kept
//! as opaque metadata under their column name.

use std::collections::BTreeMap;

use log::warn;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{CardInfo, Record, RecordId, display_text};

/// Column header with the roles bound to it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Column {
	/// Header text; used as the metadata key for unbound columns.
	pub name: String,
	/// Roles such as `id`, `name` or `parentId`.
	#[serde(default)]
	pub roles: Vec<String>,
}

/// Role-annotated table as delivered by a host.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Table {
	/// Column headers.
	pub columns: Vec<Column>,
	/// Row cells, in column order. Short rows read as null.
	#[serde(default)]
	pub rows: Vec<Vec<Value>>,
}

/// Failure to map a table onto records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
	/// No column carries the named role.
	#[error("required column role `{0}` is missing")]
	MissingRole(&'static str),
}

const REQUIRED_ROLES: [&str; 3] = ["id", "name", "title"];

static NULL_CELL: Value = Value::Null;

/// Column positions resolved from roles.
struct RoleIndex {
	id: usize,
	name: usize,
	title: usize,
	parent_id: Option<usize>,
	image: Option<usize>,
	grade: Option<usize>,
	id_number: Option<usize>,
	experience: Option<usize>,
	institution: Option<usize>,
	qualification: Option<usize>,
	level: Option<usize>,
	unbound: Vec<usize>,
}

impl RoleIndex {
	fn resolve(columns: &[Column]) -> Result<Self, TableError> {
		let find = |role: &str| columns.iter().position(|c| c.roles.iter().any(|r| r == role));
		let required = |role: &'static str| find(role).ok_or(TableError::MissingRole(role));

		let [id, name, title] = REQUIRED_ROLES.map(required);
		Ok(Self {
			id: id?,
			name: name?,
			title: title?,
			parent_id: find("parentId"),
			image: find("image"),
			grade: find("grade"),
			id_number: find("idNumber"),
			experience: find("experience"),
			institution: find("institution"),
			qualification: find("qualification"),
			level: find("level"),
			unbound: columns
				.iter()
				.enumerate()
				.filter(|(_, c)| c.roles.is_empty())
				.map(|(i, _)| i)
				.collect(),
		})
	}
}

impl Table {
	/// Converts every row into a [`Record`].
	///
	/// Rows whose id cell is empty or not an integer are skipped with a warning.
	/// A parent cell that cannot be read as an id is treated as absent.
	pub fn to_records(&self) -> Result<Vec<Record>, TableError> {
		let roles = RoleIndex::resolve(&self.columns)?;
		let mut records = Vec::with_capacity(self.rows.len());

		for (row_no, row) in self.rows.iter().enumerate() {
			let cell = |idx: usize| row.get(idx).unwrap_or(&NULL_CELL);
			let opt_text = |idx: Option<usize>| idx.and_then(|i| display_text(cell(i)));

			let Some(id) = cell_id(cell(roles.id)) else {
				warn!("org-chart: row {} has no usable id, skipping", row_no);
				continue;
			};

			let parent_id = roles.parent_id.and_then(|idx| {
				let value = cell(idx);
				let parsed = cell_id(value);
				if parsed.is_none() && display_text(value).is_some() {
					warn!("org-chart: row {} has unreadable manager id {}", row_no, value);
				}
				parsed
			});

			let extra: BTreeMap<String, Value> = roles
				.unbound
				.iter()
				.map(|&idx| (self.columns[idx].name.clone(), cell(idx).clone()))
				.collect();

			records.push(Record {
				id,
				parent_id,
				card: CardInfo {
					name: display_text(cell(roles.name)).unwrap_or_default(),
					title: display_text(cell(roles.title)).unwrap_or_default(),
					image: opt_text(roles.image),
					grade: opt_text(roles.grade),
					id_number: opt_text(roles.id_number),
					experience: opt_text(roles.experience),
					institution: opt_text(roles.institution),
					qualification: opt_text(roles.qualification),
					level: roles
						.level
						.and_then(|idx| cell_id(cell(idx)))
						.and_then(|RecordId(l)| u32::try_from(l).ok()),
					extra,
				},
			});
		}

		Ok(records)
	}
}

/// Reads an integer id from a number or numeric string cell.
fn cell_id(value: &Value) -> Option<RecordId> {
	match value {
		Value::Number(n) => n
			.as_i64()
			.or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
			.map(RecordId),
		Value::String(s) => s.trim().parse::<i64>().ok().map(RecordId),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn table(value: Value) -> Table {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn maps_roles_onto_records() {
		let t = table(json!({
			"columns": [
				{"name": "Emp", "roles": ["id"]},
				{"name": "Full name", "roles": ["name"]},
				{"name": "Designation", "roles": ["title"]},
				{"name": "Manager", "roles": ["parentId"]},
				{"name": "Site"}
			],
			"rows": [
				[1, "Noor", "CEO", null, "HQ"],
				["2", "Sami", "CTO", "1", "Lab"],
				[3.0, "", "Architect", 2]
			]
		}));

		let records = t.to_records().unwrap();
		assert_eq!(records.len(), 3);
		assert_eq!(records[0].parent_id, None);
		assert_eq!(records[1].id, RecordId(2));
		assert_eq!(records[1].parent_id, Some(RecordId(1)));
		assert_eq!(records[1].card.extra.get("Site"), Some(&json!("Lab")));
		assert_eq!(records[2].id, RecordId(3));
		assert!(records[2].card.is_vacant());
		assert_eq!(records[2].card.extra.get("Site"), Some(&Value::Null));
	}

	#[test]
	fn missing_required_role_is_an_error() {
		let t = table(json!({
			"columns": [{"name": "Emp", "roles": ["id"]}, {"name": "N", "roles": ["name"]}],
			"rows": []
		}));
		assert_eq!(t.to_records().unwrap_err(), TableError::MissingRole("title"));
	}

	#[test]
	fn rows_without_id_are_skipped_and_bad_parents_dropped() {
		let t = table(json!({
			"columns": [
				{"name": "Emp", "roles": ["id"]},
				{"name": "N", "roles": ["name"]},
				{"name": "T", "roles": ["title"]},
				{"name": "M", "roles": ["parentId"]}
			],
			"rows": [
				[null, "Ghost", "None", null],
				["x1", "Typo", "None", null],
				[5, "Rae", "Lead", "boss"]
			]
		}));
		let records = t.to_records().unwrap();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].id, RecordId(5));
		assert_eq!(records[0].parent_id, None);
	}
}
