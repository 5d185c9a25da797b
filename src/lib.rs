//! org-chart: interactive organizational chart visual.
//!
//! This crate provides a WASM org chart component that builds an employee
//! hierarchy from flat records and renders it with expand/collapse, pan/zoom
//! and fit-to-view.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;

pub use components::org_chart::{
	CardInfo, ChartConfig, ChartData, ChartState, OrgChartCanvas, Record, RecordId,
};

/// Id of the `<script type="application/json">` element carrying the chart input.
const DATA_ELEMENT_ID: &str = "chart-data";

/// Why chart input could not be loaded from the page.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The data element is absent or not a script element.
	#[error("no `#{0}` script element found in the document")]
	MissingElement(&'static str),
	/// The document is not valid chart JSON.
	#[error("chart data is not valid JSON: {0}")]
	Parse(#[from] serde_json::Error),
	/// The table could not be mapped onto records.
	#[error(transparent)]
	Table(#[from] components::org_chart::table::TableError),
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("org-chart: logging initialized");
}

/// Parses chart input. A table, when present without records, must map cleanly.
pub fn parse_chart_data(json_text: &str) -> Result<ChartData, LoadError> {
	let mut data: ChartData = serde_json::from_str(json_text)?;
	if data.records.is_none() {
		if let Some(table) = &data.table {
			data.records = Some(table.to_records()?);
			data.table = None;
		}
	}
	Ok(data)
}

/// Load chart data from a script element with id="chart-data".
/// Expected format: JSON with { records: [...], config: {...} } or { table: {...} }
pub fn load_chart_data() -> Result<ChartData, LoadError> {
	let missing = || LoadError::MissingElement(DATA_ELEMENT_ID);
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(missing)?;
	let script: HtmlScriptElement = document
		.get_element_by_id(DATA_ELEMENT_ID)
		.and_then(|e| e.dyn_into().ok())
		.ok_or_else(missing)?;
	let json_text = script.text().map_err(|_| missing())?;

	let data = parse_chart_data(&json_text)?;
	info!(
		"org-chart: loaded {} records",
		data.records.as_ref().map_or(0, Vec::len)
	);
	Ok(data)
}

/// Main application component.
/// Loads chart data from the DOM and renders the org chart, or an error panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let body = match load_chart_data() {
		Ok(chart_data) => {
			let chart_signal = Signal::derive(move || chart_data.clone());
			view! { <OrgChartCanvas data=chart_signal fullscreen=true /> }.into_any()
		}
		Err(e) => {
			warn!("org-chart: {}", e);
			let message = e.to_string();
			view! {
				<div class="error-message">
					<h2>"Something went wrong"</h2>
					<p>{message}</p>
				</div>
			}
			.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Organization Chart" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-chart">
			{body}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_records_with_config() {
		let data = parse_chart_data(
			r#"{
				"records": [{"id": 1, "name": "Noor", "title": "CEO"}],
				"config": {"zoom": {"max": 3.0}, "theme": "dark", "fitOnLoad": false}
			}"#,
		)
		.unwrap();
		assert_eq!(data.records.map(|r| r.len()), Some(1));
		assert_eq!(data.config.zoom.max, 3.0);
		assert_eq!(data.config.zoom.min, 0.5);
		assert!(!data.config.fit_on_load);
		assert_eq!(
			data.config.theme,
			components::org_chart::theme::ThemeName::Dark
		);
	}

	#[test]
	fn odd_display_values_do_not_fail_the_chart() {
		let data = parse_chart_data(
			r#"{"records": [
				{"id": 1, "name": "Noor", "title": "CEO", "grade": 7, "idNumber": 1001},
				{"id": 2, "parentId": 1, "name": null, "title": "Open role", "experience": 12}
			]}"#,
		)
		.unwrap();
		let records = data.records.unwrap();
		assert_eq!(records[0].card.grade.as_deref(), Some("7"));
		assert!(records[1].card.is_vacant());
	}

	#[test]
	fn table_input_becomes_records() {
		let data = parse_chart_data(
			r#"{"table": {
				"columns": [
					{"name": "id", "roles": ["id"]},
					{"name": "name", "roles": ["name"]},
					{"name": "title", "roles": ["title"]}
				],
				"rows": [[1, "Noor", "CEO"], [2, "Sami", "CTO"]]
			}}"#,
		)
		.unwrap();
		assert_eq!(data.records.map(|r| r.len()), Some(2));
		assert!(data.table.is_none());
	}

	#[test]
	fn bad_input_is_reported() {
		assert!(matches!(parse_chart_data("{"), Err(LoadError::Parse(_))));
		let err = parse_chart_data(r#"{"table": {"columns": []}}"#).unwrap_err();
		assert_eq!(err.to_string(), "required column role `id` is missing");
	}
}
