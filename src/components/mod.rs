//! UI components.

pub mod org_chart;
