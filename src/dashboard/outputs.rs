//! The outputs of the dashboard and the controls each of them reads.
//!
//! The browser re-requests an output whenever one of its controls changes,
//! so the dependency list below is the whole recompute graph: a change to a
//! control refreshes exactly the outputs that read it.

use crate::{controls::Control, endpoints};

/// The controls read by the filter stage, which every output depends on.
const FILTER_CONTROLS: [Control; 2] = [Control::Species, Control::Islands];

/// The independent views rendered from the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// The plain, scrolling table.
    DataTable,
    /// The sortable, paginated grid.
    DataGrid,
    /// The ECharts histogram.
    InteractiveHistogram,
    /// The server-rendered SVG histogram.
    StaticHistogram,
    /// The ECharts scatterplot.
    Scatterplot,
}

impl Output {
    /// All outputs in page order.
    pub const ALL: [Output; 5] = [
        Output::DataTable,
        Output::DataGrid,
        Output::InteractiveHistogram,
        Output::StaticHistogram,
        Output::Scatterplot,
    ];

    /// The ID of the element the output is rendered into.
    pub fn element_id(self) -> &'static str {
        match self {
            Output::DataTable => "data-table",
            Output::DataGrid => "data-grid",
            Output::InteractiveHistogram => "interactive-histogram",
            Output::StaticHistogram => "static-histogram",
            Output::Scatterplot => "scatterplot",
        }
    }

    /// The endpoint that renders the output.
    pub fn endpoint(self) -> &'static str {
        match self {
            Output::DataTable => endpoints::DATA_TABLE,
            Output::DataGrid => endpoints::DATA_GRID,
            Output::InteractiveHistogram => endpoints::INTERACTIVE_HISTOGRAM,
            Output::StaticHistogram => endpoints::STATIC_HISTOGRAM,
            Output::Scatterplot => endpoints::SCATTERPLOT,
        }
    }

    /// The heading of the card that holds the output.
    pub fn title(self) -> &'static str {
        match self {
            Output::DataTable => "Data Table",
            Output::DataGrid => "Data Grid",
            Output::InteractiveHistogram => "Interactive Histogram: Species",
            Output::StaticHistogram => "Static Histogram: Species",
            Output::Scatterplot => "Scatterplot: Species",
        }
    }

    /// The controls the output reads, besides the filter controls.
    fn own_controls(self) -> &'static [Control] {
        match self {
            Output::DataTable | Output::DataGrid => &[],
            Output::InteractiveHistogram => &[Control::Attribute, Control::InteractiveBinCount],
            Output::StaticHistogram => &[Control::Attribute, Control::StaticBinCount],
            Output::Scatterplot => &[Control::Attribute, Control::ScatterYAttribute],
        }
    }

    /// Every control whose change requires the output to be rendered again.
    pub fn dependencies(self) -> Vec<Control> {
        FILTER_CONTROLS
            .iter()
            .chain(self.own_controls())
            .copied()
            .collect()
    }

    /// The `hx-trigger` value for the output's container: render once on page
    /// load, then again on a change to any of its dependencies.
    pub fn hx_trigger(self) -> String {
        std::iter::once("load".to_owned())
            .chain(
                self.dependencies()
                    .into_iter()
                    .map(|control| format!("change from:#{}", control.element_id())),
            )
            .collect::<Vec<_>>()
            .join(", ")
    }
}
