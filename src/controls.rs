//! The sidebar controls and the form that carries their values.
//!
//! Every output request posts the whole sidebar form, so each handler can
//! rebuild the current selection state without any server-side session.

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::{
    Error,
    dataset::{Dataset, Measurement},
    filter::Selection,
};

/// The initial value of both bin count controls.
pub const DEFAULT_BIN_COUNT: i64 = 50;

/// The range of the static histogram's bin count slider.
pub const STATIC_BIN_COUNT_RANGE: RangeInclusive<i64> = 10..=344;

/// The largest bin count the server will render.
pub const MAX_BIN_COUNT: i64 = 1000;

/// The widgets in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The continuous attribute plotted on the histograms and the scatterplot x-axis.
    Attribute,
    /// The numeric input for the interactive histogram's bin count.
    InteractiveBinCount,
    /// The slider for the static histogram's bin count.
    StaticBinCount,
    /// The species checkbox group.
    Species,
    /// The island checkbox group.
    Islands,
    /// The scatterplot y-axis attribute.
    ScatterYAttribute,
}

impl Control {
    /// The form field name the control submits its value under.
    pub fn field_name(self) -> &'static str {
        match self {
            Control::Attribute => "selected_attribute",
            Control::InteractiveBinCount => "interactive_bin_count",
            Control::StaticBinCount => "static_bin_count",
            Control::Species => "selected_species",
            Control::Islands => "selected_islands",
            Control::ScatterYAttribute => "scatter_y_attribute",
        }
    }

    /// The HTML element ID of the control.
    ///
    /// For checkbox groups this is the ID of the enclosing fieldset, which
    /// receives the change events of its checkboxes.
    pub fn element_id(self) -> &'static str {
        match self {
            Control::Attribute => "selected-attribute",
            Control::InteractiveBinCount => "interactive-bin-count",
            Control::StaticBinCount => "static-bin-count",
            Control::Species => "selected-species",
            Control::Islands => "selected-islands",
            Control::ScatterYAttribute => "scatter-y-attribute",
        }
    }
}

/// The values of all sidebar controls.
///
/// Absent fields take the sidebar's initial values, except for the checkbox
/// groups: an absent group means nothing is checked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Controls {
    /// The attribute for the histograms and the scatterplot x-axis.
    #[serde(default = "default_attribute")]
    pub selected_attribute: Measurement,
    /// The requested number of bins for the interactive histogram, as typed.
    ///
    /// Kept as text so that a cleared input only affects the histogram that
    /// reads it. See [BinCount::parse].
    #[serde(default = "default_bin_count")]
    pub interactive_bin_count: String,
    /// The requested number of bins for the static histogram, as sent by the
    /// slider.
    #[serde(default = "default_bin_count")]
    pub static_bin_count: String,
    /// The checked species.
    #[serde(default)]
    pub selected_species: Vec<String>,
    /// The checked islands.
    #[serde(default)]
    pub selected_islands: Vec<String>,
    /// The attribute for the scatterplot y-axis.
    #[serde(default = "default_scatter_y_attribute")]
    pub scatter_y_attribute: Measurement,
}

fn default_attribute() -> Measurement {
    Measurement::ALL[0]
}

fn default_scatter_y_attribute() -> Measurement {
    Measurement::ALL[Measurement::ALL.len() - 1]
}

fn default_bin_count() -> String {
    DEFAULT_BIN_COUNT.to_string()
}

impl Controls {
    /// The initial state of the sidebar: every species and island checked.
    pub fn initial(dataset: &Dataset) -> Self {
        Self {
            selected_attribute: default_attribute(),
            interactive_bin_count: default_bin_count(),
            static_bin_count: default_bin_count(),
            selected_species: dataset.species().to_vec(),
            selected_islands: dataset.islands().to_vec(),
            scatter_y_attribute: default_scatter_y_attribute(),
        }
    }

    /// The species and island selection read by the filter stage.
    pub fn selection(&self) -> Selection {
        Selection::new(
            self.selected_species.iter().cloned(),
            self.selected_islands.iter().cloned(),
        )
    }
}

/// A validated number of histogram bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinCount(usize);

impl BinCount {
    /// Validate a requested bin count.
    ///
    /// # Errors
    /// Returns [Error::InvalidBinCount] if `count` is less than one or greater
    /// than [MAX_BIN_COUNT].
    pub fn new(count: i64) -> Result<Self, Error> {
        if !(1..=MAX_BIN_COUNT).contains(&count) {
            return Err(Error::InvalidBinCount(count.to_string()));
        }

        usize::try_from(count)
            .map(Self)
            .map_err(|_| Error::InvalidBinCount(count.to_string()))
    }

    /// Parse and validate a bin count submitted by the sidebar form.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns [Error::InvalidBinCount] if `text` is not a whole number or is
    /// outside of `1..=MAX_BIN_COUNT`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let count: i64 = text
            .trim()
            .parse()
            .map_err(|_| Error::InvalidBinCount(text.to_owned()))?;

        Self::new(count)
    }

    /// The number of bins.
    pub fn get(self) -> usize {
        self.0
    }
}
