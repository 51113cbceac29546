//! The filter stage: selects the rows of the dataset that match the checked
//! species and islands.
//!
//! Filtering either produces a non-empty [FilteredView] or reports [NotReady],
//! in which case nothing downstream should be rendered. The most recent view
//! is memoised in a [FilterCache] so that the outputs which all read the same
//! selection only filter the dataset once.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

use crate::{
    Error,
    dataset::{Dataset, Penguin},
};

/// The checked species and islands.
///
/// A selection is a pair of sets, so the order in which the categories were
/// checked does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    species: BTreeSet<String>,
    islands: BTreeSet<String>,
}

impl Selection {
    /// Create a selection from the checked species and islands.
    pub fn new<S, I>(species: S, islands: I) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            species: species.into_iter().map(Into::into).collect(),
            islands: islands.into_iter().map(Into::into).collect(),
        }
    }

    /// The checked species.
    pub fn species(&self) -> &BTreeSet<String> {
        &self.species
    }

    /// The checked islands.
    pub fn islands(&self) -> &BTreeSet<String> {
        &self.islands
    }

    fn matches(&self, penguin: &Penguin) -> bool {
        self.species.contains(&penguin.species) && self.islands.contains(&penguin.island)
    }
}

/// The reasons the filter stage cannot produce rows yet.
///
/// This is a suspend state rather than a failure: outputs keep showing their
/// last good content until the selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotReady {
    /// No species checkbox is checked.
    #[error("no species are selected")]
    NoSpeciesSelected,
    /// No island checkbox is checked.
    #[error("no islands are selected")]
    NoIslandsSelected,
    /// Both sets are non-empty but no row matches them.
    #[error("no rows match the selected species and islands")]
    NoMatchingRows,
    /// The matching rows have no recorded values for the plotted attribute.
    #[error("the selected rows have no values for the chosen attribute")]
    NoMeasurements,
}

/// A non-empty subset of the dataset, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    rows: Arc<[Penguin]>,
}

impl FilteredView {
    /// The matching rows.
    pub fn rows(&self) -> &[Penguin] {
        &self.rows
    }

    /// The number of matching rows, always at least one.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false, an empty view is reported as [NotReady] instead.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether both views were produced by the same filter computation.
    pub fn is_same_computation(&self, other: &FilteredView) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }
}

/// Select the rows whose species and island are both in `selection`.
///
/// # Errors
/// Returns [NotReady] if either set in `selection` is empty or if no row
/// matches. An empty table is never returned.
pub fn filter_penguins(dataset: &Dataset, selection: &Selection) -> Result<FilteredView, NotReady> {
    if selection.species.is_empty() {
        return Err(NotReady::NoSpeciesSelected);
    }

    if selection.islands.is_empty() {
        return Err(NotReady::NoIslandsSelected);
    }

    let rows: Vec<Penguin> = dataset
        .penguins()
        .iter()
        .filter(|penguin| selection.matches(penguin))
        .cloned()
        .collect();

    if rows.is_empty() {
        return Err(NotReady::NoMatchingRows);
    }

    Ok(FilteredView { rows: rows.into() })
}

#[derive(Debug)]
struct CacheEntry {
    selection: Selection,
    view: FilteredView,
}

/// A single-slot cache holding the filtered view for the latest selection.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct FilterCache {
    slot: Arc<Mutex<Option<CacheEntry>>>,
}

impl FilterCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the filtered view for `selection`, filtering `dataset` only if
    /// the cached view was computed for a different selection.
    ///
    /// A not-ready selection leaves the cached view in place.
    ///
    /// # Errors
    /// Returns [Error::NotReady] if the filter stage is not ready, or
    /// [Error::FilterCacheLock] if the cache lock is poisoned.
    pub fn get_or_compute(
        &self,
        dataset: &Dataset,
        selection: &Selection,
    ) -> Result<FilteredView, Error> {
        let mut slot = self
            .slot
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire filter cache lock: {error}"))
            .map_err(|_| Error::FilterCacheLock)?;

        if let Some(entry) = slot.as_ref() {
            if entry.selection == *selection {
                tracing::debug!("Reusing filtered view with {} rows", entry.view.len());
                return Ok(entry.view.clone());
            }
        }

        let view = filter_penguins(dataset, selection).inspect_err(|reason| {
            tracing::debug!("Filter stage not ready: {reason}");
        })?;

        tracing::debug!(
            "Filtered {} of {} rows for species {:?} and islands {:?}",
            view.len(),
            dataset.len(),
            selection.species,
            selection.islands
        );

        *slot = Some(CacheEntry {
            selection: selection.clone(),
            view: view.clone(),
        });

        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, dataset::Dataset};

    use super::{FilterCache, NotReady, Selection, filter_penguins};

    const CSV: &str = "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n\
        A,X,1,1,1,1,male,2007\n\
        B,X,2,2,2,2,female,2007\n\
        C,Y,3,3,3,3,male,2008\n\
        A,Y,4,4,4,4,female,2008\n\
        B,Z,5,5,5,5,NA,2009\n\
        A,Z,6,6,6,6,male,2009\n\
        C,Z,7,7,7,7,female,2009\n";

    fn get_test_dataset() -> Dataset {
        Dataset::from_csv_reader(CSV.as_bytes()).unwrap()
    }

    fn select_all(dataset: &Dataset) -> Selection {
        Selection::new(dataset.species().to_vec(), dataset.islands().to_vec())
    }

    #[test]
    fn filtering_is_idempotent() {
        let dataset = get_test_dataset();
        let selection = Selection::new(["A", "C"], ["Y", "Z"]);

        let first = filter_penguins(&dataset, &selection).unwrap();
        let second = filter_penguins(&dataset, &selection).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_species_is_not_ready() {
        let dataset = get_test_dataset();
        let selection = Selection::new(Vec::<String>::new(), ["X", "Y", "Z"]);

        let result = filter_penguins(&dataset, &selection);

        assert_eq!(result, Err(NotReady::NoSpeciesSelected));
    }

    #[test]
    fn empty_islands_is_not_ready() {
        let dataset = get_test_dataset();
        let selection = Selection::new(["A"], Vec::<String>::new());

        let result = filter_penguins(&dataset, &selection);

        assert_eq!(result, Err(NotReady::NoIslandsSelected));
    }

    #[test]
    fn no_matching_rows_is_not_ready() {
        let dataset = get_test_dataset();
        // C is never observed on X.
        let selection = Selection::new(["C"], ["X"]);

        let result = filter_penguins(&dataset, &selection);

        assert_eq!(result, Err(NotReady::NoMatchingRows));
    }

    #[test]
    fn selecting_everything_returns_full_dataset() {
        let dataset = get_test_dataset();

        let view = filter_penguins(&dataset, &select_all(&dataset)).unwrap();

        assert_eq!(view.rows(), dataset.penguins());
    }

    #[test]
    fn removing_a_species_removes_only_its_rows() {
        let dataset = get_test_dataset();
        let all = filter_penguins(&dataset, &select_all(&dataset)).unwrap();

        let without_b = filter_penguins(
            &dataset,
            &Selection::new(["A", "C"], dataset.islands().to_vec()),
        )
        .unwrap();

        let want: Vec<_> = all
            .rows()
            .iter()
            .filter(|penguin| penguin.species != "B")
            .cloned()
            .collect();
        assert_eq!(without_b.rows(), want.as_slice());
    }

    #[test]
    fn single_species_across_all_islands() {
        let dataset = get_test_dataset();

        let view = filter_penguins(&dataset, &Selection::new(["A"], ["X", "Y", "Z"])).unwrap();

        assert_eq!(view.len(), 3);
        assert!(view.rows().iter().all(|penguin| penguin.species == "A"));
        let islands: Vec<_> = view.rows().iter().map(|penguin| penguin.island.as_str()).collect();
        assert_eq!(islands, ["X", "Y", "Z"]);
    }

    #[test]
    fn selection_order_does_not_matter() {
        assert_eq!(
            Selection::new(["A", "B"], ["X", "Y"]),
            Selection::new(["B", "A"], ["Y", "X"])
        );
    }

    #[test]
    fn cache_reuses_view_for_same_selection() {
        let dataset = get_test_dataset();
        let cache = FilterCache::new();
        let selection = Selection::new(["A", "B"], ["X"]);

        let first = cache.get_or_compute(&dataset, &selection).unwrap();
        let second = cache
            .get_or_compute(&dataset, &Selection::new(["B", "A"], ["X"]))
            .unwrap();

        assert!(first.is_same_computation(&second));
    }

    #[test]
    fn cache_recomputes_when_selection_changes() {
        let dataset = get_test_dataset();
        let cache = FilterCache::new();

        let first = cache
            .get_or_compute(&dataset, &Selection::new(["A"], ["X", "Y", "Z"]))
            .unwrap();
        let second = cache
            .get_or_compute(&dataset, &Selection::new(["B"], ["X", "Y", "Z"]))
            .unwrap();
        let third = cache
            .get_or_compute(&dataset, &Selection::new(["A"], ["X", "Y", "Z"]))
            .unwrap();

        assert!(!first.is_same_computation(&second));
        assert_eq!(second.len(), 2);
        // Only the latest selection is kept, so switching back filters again.
        assert!(!first.is_same_computation(&third));
        assert_eq!(first, third);
    }

    #[test]
    fn cache_reports_not_ready_and_keeps_last_view() {
        let dataset = get_test_dataset();
        let cache = FilterCache::new();
        let selection = Selection::new(["A"], ["X"]);
        let view = cache.get_or_compute(&dataset, &selection).unwrap();

        let result = cache.get_or_compute(&dataset, &Selection::new(["A"], Vec::<String>::new()));
        assert_eq!(result, Err(Error::NotReady(NotReady::NoIslandsSelected)));

        let again = cache.get_or_compute(&dataset, &selection).unwrap();
        assert!(view.is_same_computation(&again));
    }
}
