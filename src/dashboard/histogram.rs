//! Equal-width binning of a measurement, counted separately for each species.
//!
//! Both histograms share this binning so that they agree on what a bin is and
//! differ only in how they draw it.

use crate::{
    controls::BinCount,
    dataset::{Measurement, Penguin},
    filter::NotReady,
};

/// The bin counts of one species.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SpeciesCounts {
    pub species: String,
    pub counts: Vec<u64>,
}

/// A measurement bucketed into equal-width bins, grouped by species.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Histogram {
    /// The bin edges: `edges[i]..edges[i + 1]` is bin `i`.
    edges: Vec<f64>,
    /// One entry per species, in the order the species first appear in the rows.
    groups: Vec<SpeciesCounts>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn groups(&self) -> &[SpeciesCounts] {
        &self.groups
    }

    /// The largest count of any species in any bin.
    pub fn max_count(&self) -> u64 {
        self.groups
            .iter()
            .flat_map(|group| group.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// A "low-high" label for each bin, used as the category axis.
    pub fn bin_labels(&self) -> Vec<String> {
        self.edges
            .windows(2)
            .map(|edge| format!("{:.1}-{:.1}", edge[0], edge[1]))
            .collect()
    }
}

/// Bucket `attribute` of `rows` into `bins` equal-width bins spanning the
/// smallest to the largest value, counting each species separately.
///
/// Rows with no recorded value are skipped. The largest value falls in the
/// last bin. If every value is the same, the range is widened by 0.5 on
/// either side so the bins still have a width.
///
/// # Errors
/// Returns [NotReady::NoMeasurements] if none of the rows has a value for
/// `attribute`.
pub(super) fn bin_values(
    rows: &[Penguin],
    attribute: Measurement,
    bins: BinCount,
) -> Result<Histogram, NotReady> {
    let values: Vec<(&str, f64)> = rows
        .iter()
        .filter_map(|penguin| {
            attribute
                .value(penguin)
                .map(|value| (penguin.species.as_str(), value))
        })
        .collect();

    if values.is_empty() {
        return Err(NotReady::NoMeasurements);
    }

    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &(_, value)| {
            (min.min(value), max.max(value))
        });

    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let bin_count = bins.get();
    let width = (max - min) / bin_count as f64;
    let edges: Vec<f64> = (0..=bin_count)
        .map(|i| if i == bin_count { max } else { min + width * i as f64 })
        .collect();

    let mut groups: Vec<SpeciesCounts> = Vec::new();

    for (species, value) in values {
        let bin = (((value - min) / width).floor() as usize).min(bin_count - 1);

        let group = match groups.iter().position(|group| group.species == species) {
            Some(index) => &mut groups[index],
            None => {
                groups.push(SpeciesCounts {
                    species: species.to_owned(),
                    counts: vec![0; bin_count],
                });
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };

        group.counts[bin] += 1;
    }

    tracing::debug!(
        "Binned {} into {} bins over {min}..{max} for {} species",
        attribute.column_name(),
        bin_count,
        groups.len()
    );

    Ok(Histogram { edges, groups })
}

#[cfg(test)]
mod tests {
    use crate::{
        controls::BinCount,
        dataset::{Dataset, Measurement},
        filter::NotReady,
    };

    use super::bin_values;

    const CSV: &str = "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n\
        A,X,1,10,100,NA,male,2007\n\
        A,Y,2,10,NA,NA,female,2007\n\
        B,X,3,10,120,NA,male,2008\n\
        B,Z,4,10,130,NA,female,2008\n\
        A,Z,5,10,140,NA,NA,2009\n";

    fn get_test_dataset() -> Dataset {
        Dataset::from_csv_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn one_bin_gives_one_bucket_per_species() {
        let dataset = get_test_dataset();

        let histogram = bin_values(
            dataset.penguins(),
            Measurement::BillLength,
            BinCount::new(1).unwrap(),
        )
        .unwrap();

        assert_eq!(histogram.bin_count(), 1);
        assert_eq!(histogram.groups().len(), 2);
        assert_eq!(histogram.groups()[0].species, "A");
        assert_eq!(histogram.groups()[0].counts, vec![3]);
        assert_eq!(histogram.groups()[1].species, "B");
        assert_eq!(histogram.groups()[1].counts, vec![2]);
    }

    #[test]
    fn more_bins_than_rows_does_not_crash() {
        let dataset = get_test_dataset();

        let histogram = bin_values(
            dataset.penguins(),
            Measurement::BillLength,
            BinCount::new(344).unwrap(),
        )
        .unwrap();

        assert_eq!(histogram.bin_count(), 344);
        assert_eq!(histogram.edges().len(), 345);
        let total: u64 = histogram
            .groups()
            .iter()
            .flat_map(|group| group.counts.iter())
            .sum();
        assert_eq!(total, 5);
        assert_eq!(histogram.max_count(), 1);
    }

    #[test]
    fn largest_value_falls_in_last_bin() {
        let dataset = get_test_dataset();

        let histogram = bin_values(
            dataset.penguins(),
            Measurement::BillLength,
            BinCount::new(4).unwrap(),
        )
        .unwrap();

        assert_eq!(histogram.edges(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        // A has 1, 2 and 5; B has 3 and 4.
        assert_eq!(histogram.groups()[0].counts, vec![1, 1, 0, 1]);
        assert_eq!(histogram.groups()[1].counts, vec![0, 0, 1, 1]);
    }

    #[test]
    fn missing_values_are_skipped() {
        let dataset = get_test_dataset();

        let histogram = bin_values(
            dataset.penguins(),
            Measurement::FlipperLength,
            BinCount::new(2).unwrap(),
        )
        .unwrap();

        let total: u64 = histogram
            .groups()
            .iter()
            .flat_map(|group| group.counts.iter())
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn identical_values_are_widened() {
        let dataset = get_test_dataset();

        let histogram = bin_values(
            dataset.penguins(),
            Measurement::BillDepth,
            BinCount::new(2).unwrap(),
        )
        .unwrap();

        assert_eq!(histogram.edges(), &[9.5, 10.0, 10.5]);
        assert_eq!(histogram.groups()[0].counts, vec![0, 3]);
        assert_eq!(histogram.bin_labels(), vec!["9.5-10.0", "10.0-10.5"]);
    }

    #[test]
    fn all_missing_is_not_ready() {
        let dataset = get_test_dataset();

        let result = bin_values(
            dataset.penguins(),
            Measurement::BodyMass,
            BinCount::new(10).unwrap(),
        );

        assert_eq!(result, Err(NotReady::NoMeasurements));
    }
}
