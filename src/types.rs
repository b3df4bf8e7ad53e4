//! Domain types for weather-menu.
//!
//! The transfer data is the hand-off between the menu and the graph
//! renderer: graph parameters plus the active filters.

use serde::{Deserialize, Serialize};

use crate::registry::Location;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Default time range filter, ISO-8601 start and end joined by `|`.
pub const DEFAULT_TIME_RANGE: &str = "1980-01-01T00:00:00Z|2019-12-31T23:00:00Z";

/// Default graph width and height.
pub const DEFAULT_GRAPH_SIZE: u32 = 10;

// ============================================================================
// FILTERS
// ============================================================================

/// The filter kinds the menu knows how to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Location,
    TimeRange,
}

impl FilterType {
    /// Every filter type, in menu order.
    pub const ALL: [FilterType; 2] = [FilterType::Location, FilterType::TimeRange];

    /// Human-readable label shown in the filter menu.
    pub fn label(self) -> &'static str {
        match self {
            FilterType::Location => "Location",
            FilterType::TimeRange => "Time range",
        }
    }
}

/// A single filter value. At most one filter per type is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub kind: FilterType,
    pub value: String,
}

impl Filter {
    pub fn new(kind: FilterType, value: impl Into<String>) -> Self {
        Filter {
            kind,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.value)
    }
}

// ============================================================================
// GRAPH PARAMETERS
// ============================================================================

/// Size knobs for the graph renderer. Both values are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphParameters {
    pub width: u32,
    pub height: u32,
}

impl Default for GraphParameters {
    fn default() -> Self {
        GraphParameters {
            width: DEFAULT_GRAPH_SIZE,
            height: DEFAULT_GRAPH_SIZE,
        }
    }
}

/// The graph parameter a prompt edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphField {
    Width,
    Height,
}

impl GraphField {
    pub fn label(self) -> &'static str {
        match self {
            GraphField::Width => "Width",
            GraphField::Height => "Height",
        }
    }
}

// ============================================================================
// TRANSFER DATA
// ============================================================================

/// Session-wide data shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferData {
    pub graph: GraphParameters,
    pub filters: Vec<Filter>,
}

impl TransferData {
    /// Build transfer data, falling back to the defaults for absent parts.
    pub fn new(graph: Option<GraphParameters>, filters: Option<Vec<Filter>>) -> Self {
        TransferData {
            graph: graph.unwrap_or_default(),
            filters: filters.unwrap_or_else(default_filters),
        }
    }

    /// The filter of the given type, if present.
    pub fn filter(&self, kind: FilterType) -> Option<&Filter> {
        self.filters.iter().find(|f| f.kind == kind)
    }

    /// Replace the value of the first filter of `kind` in place.
    ///
    /// Appends a new filter when none of that type exists yet.
    pub fn set_filter(&mut self, kind: FilterType, value: impl Into<String>) {
        let value = value.into();
        match self.filters.iter_mut().find(|f| f.kind == kind) {
            Some(filter) => filter.value = value,
            None => self.filters.push(Filter::new(kind, value)),
        }
    }

    pub fn set_graph_field(&mut self, field: GraphField, value: u32) {
        match field {
            GraphField::Width => self.graph.width = value,
            GraphField::Height => self.graph.height = value,
        }
    }
}

impl Default for TransferData {
    fn default() -> Self {
        TransferData::new(None, None)
    }
}

fn default_filters() -> Vec<Filter> {
    vec![
        Filter::new(FilterType::TimeRange, DEFAULT_TIME_RANGE),
        Filter::new(FilterType::Location, Location::DEFAULT.name()),
    ]
}

// ============================================================================
// DISPLAY OPTIONS
// ============================================================================

/// User-togglable rendering flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_controls: bool,
    pub show_filters: bool,
}

impl DisplayOptions {
    /// Partial update: `None` leaves a flag unchanged.
    pub fn set(&mut self, show_controls: Option<bool>, show_filters: Option<bool>) {
        if let Some(value) = show_controls {
            self.show_controls = value;
        }
        if let Some(value) = show_filters {
            self.show_filters = value;
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            show_controls: true,
            show_filters: false,
        }
    }
}

// ============================================================================
// OUTPUT FORMAT
// ============================================================================

/// How the final transfer data is printed on quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_seed_one_filter_per_type() {
        let data = TransferData::default();
        assert_eq!(data.graph, GraphParameters { width: 10, height: 10 });
        assert_eq!(data.filters.len(), 2);
        assert_eq!(
            data.filter(FilterType::TimeRange).map(|f| f.value.as_str()),
            Some(DEFAULT_TIME_RANGE)
        );
        assert_eq!(
            data.filter(FilterType::Location).map(|f| f.value.as_str()),
            Some("Germany")
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let graph = GraphParameters { width: 40, height: 12 };
        let filters = vec![Filter::new(FilterType::Location, "France")];
        let data = TransferData::new(Some(graph), Some(filters.clone()));
        assert_eq!(data.graph, graph);
        assert_eq!(data.filters, filters);
    }

    #[test]
    fn set_filter_replaces_in_place() {
        let mut data = TransferData::default();
        data.set_filter(FilterType::TimeRange, "2000-01-01T00:00:00Z|2010-01-01T00:00:00Z");
        assert_eq!(data.filters.len(), 2);
        assert_eq!(data.filters[0].kind, FilterType::TimeRange);
        assert_eq!(data.filters[0].value, "2000-01-01T00:00:00Z|2010-01-01T00:00:00Z");
    }

    #[test]
    fn set_filter_appends_missing_type() {
        let mut data = TransferData::new(None, Some(Vec::new()));
        data.set_filter(FilterType::Location, "Spain");
        assert_eq!(data.filters, vec![Filter::new(FilterType::Location, "Spain")]);
    }

    #[test]
    fn set_graph_field_touches_one_dimension() {
        let mut data = TransferData::default();
        data.set_graph_field(GraphField::Height, 25);
        assert_eq!(data.graph, GraphParameters { width: 10, height: 25 });
    }

    #[test]
    fn display_options_partial_update() {
        let mut options = DisplayOptions {
            show_controls: false,
            show_filters: true,
        };
        options.set(Some(true), None);
        assert!(options.show_controls);
        assert!(options.show_filters);

        let before = options;
        options.set(None, None);
        assert_eq!(options, before);
    }

    #[test]
    fn filter_displays_label_and_value() {
        let filter = Filter::new(FilterType::TimeRange, "a|b");
        assert_eq!(filter.to_string(), "Time range: a|b");
    }

    #[test]
    fn transfer_data_serializes_with_snake_case_kinds() {
        let json = serde_json::to_string(&TransferData::default()).unwrap();
        assert!(json.contains("\"time_range\""));
        assert!(json.contains("\"width\":10"));
    }
}
