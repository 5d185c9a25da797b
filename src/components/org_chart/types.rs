//! Input data structures for the org chart component.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::state::ChartConfig;
use super::table::Table;

/// Stable identifier of a hierarchy member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<i64> for RecordId {
	fn from(value: i64) -> Self {
		Self(value)
	}
}

/// Name used by upstream sources to mark an unfilled position.
const VACANT_NAME: &str = "Vacant Position";

/// Display text for a scalar JSON value. Null and blank strings are absent;
/// numbers and booleans are rendered as written.
pub(crate) fn display_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) if s.trim().is_empty() => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Ok(Option::<Value>::deserialize(deserializer)?
		.as_ref()
		.and_then(display_text))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Accepts a non-negative integer, or a string holding one. Anything else is ignored.
fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
	let level = match Option::<Value>::deserialize(deserializer)? {
		Some(Value::Number(n)) => n.as_u64(),
		Some(Value::String(s)) => s.trim().parse().ok(),
		_ => None,
	};
	Ok(level.and_then(|l| u32::try_from(l).ok()))
}

/// Display attributes shown on a card. Carried through the tree untouched.
///
/// Text fields accept strings, numbers, booleans or `null`, so a card with an
/// odd value still renders instead of failing the whole chart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
	/// Person's name. Empty for a vacant position.
	#[serde(default, deserialize_with = "lenient_string")]
	pub name: String,
	/// Job title or designation.
	#[serde(default, deserialize_with = "lenient_string")]
	pub title: String,
	/// Image reference, usually a `data:` URL.
	#[serde(default, deserialize_with = "lenient_text")]
	pub image: Option<String>,
	/// Pay grade.
	#[serde(default, deserialize_with = "lenient_text")]
	pub grade: Option<String>,
	/// Employee number.
	#[serde(default, deserialize_with = "lenient_text")]
	pub id_number: Option<String>,
	/// Years of experience, or free text.
	#[serde(default, deserialize_with = "lenient_text")]
	pub experience: Option<String>,
	/// Institution attended.
	#[serde(default, deserialize_with = "lenient_text")]
	pub institution: Option<String>,
	/// Highest qualification.
	#[serde(default, deserialize_with = "lenient_text")]
	pub qualification: Option<String>,
	/// Organizational level (0 = management). Falls back to tree depth when absent.
	#[serde(default, deserialize_with = "lenient_level")]
	pub level: Option<u32>,
	/// Arbitrary metadata columns, kept verbatim.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

impl CardInfo {
	/// Card with just a name and title.
	pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			title: title.into(),
			..Self::default()
		}
	}

	/// Whether this card represents an unfilled position.
	pub fn is_vacant(&self) -> bool {
		let name = self.name.trim();
		name.is_empty() || name.eq_ignore_ascii_case(VACANT_NAME)
	}

	/// Up to two uppercase initials, used when no image is available.
	pub fn initials(&self) -> String {
		self.name
			.split_whitespace()
			.filter_map(|word| word.chars().next())
			.flat_map(char::to_uppercase)
			.take(2)
			.collect()
	}

	/// Visual tier, from the explicit level or else the node depth.
	pub fn tier(&self, depth: usize) -> CardTier {
		CardTier::from_level(self.level.map(|l| l as usize).unwrap_or(depth))
	}
}

/// Visual tier of a card within the organization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardTier {
	/// Level 0.
	Management,
	/// Level 1.
	Department,
	/// Level 2 and below.
	Unit,
}

impl CardTier {
	/// Maps a level (or depth) onto a tier.
	pub fn from_level(level: usize) -> Self {
		match level {
			0 => CardTier::Management,
			1 => CardTier::Department,
			_ => CardTier::Unit,
		}
	}
}

/// A flat input row describing one hierarchy member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
	/// Unique id.
	pub id: RecordId,
	/// Manager id. `None` makes the record a root.
	#[serde(default)]
	pub parent_id: Option<RecordId>,
	/// Everything else on the record.
	#[serde(flatten)]
	pub card: CardInfo,
}

impl Record {
	/// Root record with the given id and card.
	pub fn new(id: impl Into<RecordId>, card: CardInfo) -> Self {
		Self {
			id: id.into(),
			parent_id: None,
			card,
		}
	}

	/// Sets the manager id.
	pub fn reporting_to(mut self, parent: impl Into<RecordId>) -> Self {
		self.parent_id = Some(parent.into());
		self
	}
}

/// Complete chart input: either records or a role-annotated table, plus configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChartData {
	/// Ready-made records. Take precedence over `table`.
	#[serde(default)]
	pub records: Option<Vec<Record>>,
	/// Role-annotated table to convert into records.
	#[serde(default)]
	pub table: Option<Table>,
	/// Chart settings.
	#[serde(default)]
	pub config: ChartConfig,
}

impl ChartData {
	/// Wraps a record list with default configuration.
	pub fn from_records(records: Vec<Record>) -> Self {
		Self {
			records: Some(records),
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_parses_camel_case_and_keeps_extra_fields() {
		let json = r#"{
			"id": 7,
			"parentId": 1,
			"name": "Dana Levi",
			"title": "Engineer",
			"idNumber": "E-77",
			"costCenter": "R&D"
		}"#;
		let record: Record = serde_json::from_str(json).unwrap();
		assert_eq!(record.id, RecordId(7));
		assert_eq!(record.parent_id, Some(RecordId(1)));
		assert_eq!(record.card.id_number.as_deref(), Some("E-77"));
		assert_eq!(
			record.card.extra.get("costCenter"),
			Some(&Value::String("R&D".into()))
		);
	}

	#[test]
	fn null_parent_is_root() {
		let record: Record = serde_json::from_str(r#"{"id": 1, "parentId": null}"#).unwrap();
		assert_eq!(record.parent_id, None);
		assert!(record.card.is_vacant());
	}

	#[test]
	fn numeric_and_null_display_values_are_accepted() {
		let json = r#"{
			"id": 1,
			"name": null,
			"title": 42,
			"grade": 7,
			"idNumber": 1001,
			"experience": 12.5,
			"institution": true,
			"qualification": "  ",
			"level": "1"
		}"#;
		let card = serde_json::from_str::<Record>(json).unwrap().card;
		assert_eq!(card.name, "");
		assert!(card.is_vacant());
		assert_eq!(card.title, "42");
		assert_eq!(card.grade.as_deref(), Some("7"));
		assert_eq!(card.id_number.as_deref(), Some("1001"));
		assert_eq!(card.experience.as_deref(), Some("12.5"));
		assert_eq!(card.institution.as_deref(), Some("true"));
		assert_eq!(card.qualification, None);
		assert_eq!(card.level, Some(1));
	}

	#[test]
	fn unusable_level_is_ignored() {
		let record: Record =
			serde_json::from_str(r#"{"id": 1, "name": "A", "level": -3}"#).unwrap();
		assert_eq!(record.card.level, None);
	}

	#[test]
	fn vacancy_and_initials() {
		assert!(CardInfo::new("vacant position", "Lead").is_vacant());
		assert!(CardInfo::new("  ", "Lead").is_vacant());
		let card = CardInfo::new("ada byron lovelace", "Analyst");
		assert!(!card.is_vacant());
		assert_eq!(card.initials(), "AB");
	}

	#[test]
	fn tier_prefers_explicit_level() {
		let mut card = CardInfo::new("A", "B");
		assert_eq!(card.tier(0), CardTier::Management);
		assert_eq!(card.tier(4), CardTier::Unit);
		card.level = Some(1);
		assert_eq!(card.tier(4), CardTier::Department);
	}

	#[test]
	fn chart_data_defaults_config() {
		let data: ChartData = serde_json::from_str(r#"{"records": []}"#).unwrap();
		assert_eq!(data.records.map(|r| r.len()), Some(0));
		assert!(data.table.is_none());
		assert_eq!(data.config.zoom.max, 2.0);
	}
}
