//! Interactive organizational chart.
//!
//! Turns a flat list of people (each with an optional manager id) into a
//! hierarchy and renders it on an HTML canvas with:
//! - Expand/collapse per manager, plus expand-all and collapse-all
//! - Drag to pan, wheel and buttons to zoom (clamped), fit to view
//! - Tier-coloured cards with avatars, vacancy styling and report badges
//!
//! The hierarchy ([`tree`]) and view state ([`state`]) are plain Rust and do
//! not touch the DOM; [`ChartState`] is the handle for one chart instance.
//!
//! # Example
//!
//! ```ignore
//! use org_chart::{CardInfo, ChartData, OrgChartCanvas, Record};
//!
//! let data = ChartData::from_records(vec![
//!     Record::new(1, CardInfo::new("Noor Haddad", "Chief Executive")),
//!     Record::new(2, CardInfo::new("Sami Aziz", "CTO")).reporting_to(1),
//! ]);
//!
//! view! { <OrgChartCanvas data=Signal::derive(move || data.clone()) fullscreen=true /> }
//! ```

mod avatars;
mod component;
pub mod layout;
mod render;
pub mod scale;
pub mod state;
pub mod table;
pub mod theme;
pub mod tree;
pub mod types;

pub use component::OrgChartCanvas;
pub use state::{ChartConfig, ChartState, ExpansionState, ViewTransform, fit_to_view, visible_forest};
pub use theme::Theme;
pub use tree::{BuildOutput, Forest, ForestDiagnostic, Node, build_forest};
pub use types::{CardInfo, ChartData, Record, RecordId};
