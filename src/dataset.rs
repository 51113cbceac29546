//! The penguin measurements dataset.
//!
//! The dataset is loaded once at startup from a CSV file with the columns
//! `species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year`
//! and is shared read-only between all request handlers. Missing values are
//! written as `NA` and are loaded as `None`.

use std::{cmp::Ordering, fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::Error;

/// The copy of the dataset that is compiled into the binary.
const BUNDLED_CSV: &str = include_str!("../data/penguins.csv");

/// The sex of a penguin as recorded in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// A female penguin.
    Female,
    /// A male penguin.
    Male,
}

impl Sex {
    /// The title-cased name used for display.
    pub fn label(self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }
}

/// A single observation in the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Penguin {
    /// The species, e.g. "Adelie".
    pub species: String,
    /// The island the penguin was observed on, e.g. "Biscoe".
    pub island: String,
    /// Bill length in millimetres.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub bill_length_mm: Option<f64>,
    /// Bill depth in millimetres.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub bill_depth_mm: Option<f64>,
    /// Flipper length in millimetres.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub flipper_length_mm: Option<f64>,
    /// Body mass in grams.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub body_mass_g: Option<f64>,
    /// The sex of the penguin, if it was recorded.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub sex: Option<Sex>,
    /// The year of the observation.
    pub year: u16,
}

/// The continuous attributes that can be plotted.
///
/// The serialized names are the raw dataset column names, which is also how
/// the attributes are sent by the dashboard's select inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Measurement {
    /// Bill length in millimetres.
    #[serde(rename = "bill_length_mm")]
    BillLength,
    /// Bill depth in millimetres.
    #[serde(rename = "bill_depth_mm")]
    BillDepth,
    /// Flipper length in millimetres.
    #[serde(rename = "flipper_length_mm")]
    FlipperLength,
    /// Body mass in grams.
    #[serde(rename = "body_mass_g")]
    BodyMass,
}

impl Measurement {
    /// All measurements in dataset column order.
    pub const ALL: [Measurement; 4] = [
        Measurement::BillLength,
        Measurement::BillDepth,
        Measurement::FlipperLength,
        Measurement::BodyMass,
    ];

    /// The raw column name in the dataset.
    pub fn column_name(self) -> &'static str {
        match self {
            Measurement::BillLength => "bill_length_mm",
            Measurement::BillDepth => "bill_depth_mm",
            Measurement::FlipperLength => "flipper_length_mm",
            Measurement::BodyMass => "body_mass_g",
        }
    }

    /// The display name, e.g. "Bill Length (mm)".
    pub fn label(self) -> String {
        format_column_name(self.column_name())
    }

    /// The value of this measurement for `penguin`, if it was recorded.
    pub fn value(self, penguin: &Penguin) -> Option<f64> {
        match self {
            Measurement::BillLength => penguin.bill_length_mm,
            Measurement::BillDepth => penguin.bill_depth_mm,
            Measurement::FlipperLength => penguin.flipper_length_mm,
            Measurement::BodyMass => penguin.body_mass_g,
        }
    }
}

/// A column of the dataset as shown in the data tables.
///
/// Deserializes from the raw column name, which is how the data grid's sort
/// links name the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Column {
    /// The species.
    #[serde(rename = "species")]
    Species,
    /// The island.
    #[serde(rename = "island")]
    Island,
    /// Bill length in millimetres.
    #[serde(rename = "bill_length_mm")]
    BillLength,
    /// Bill depth in millimetres.
    #[serde(rename = "bill_depth_mm")]
    BillDepth,
    /// Flipper length in millimetres.
    #[serde(rename = "flipper_length_mm")]
    FlipperLength,
    /// Body mass in grams.
    #[serde(rename = "body_mass_g")]
    BodyMass,
    /// The sex, which may be missing.
    #[serde(rename = "sex")]
    Sex,
    /// The year of the observation.
    #[serde(rename = "year")]
    Year,
}

impl Column {
    /// All columns in dataset order.
    pub const ALL: [Column; 8] = [
        Column::Species,
        Column::Island,
        Column::BillLength,
        Column::BillDepth,
        Column::FlipperLength,
        Column::BodyMass,
        Column::Sex,
        Column::Year,
    ];

    /// The raw column name in the dataset.
    pub fn name(self) -> &'static str {
        match self.measurement() {
            Some(measurement) => measurement.column_name(),
            None => match self {
                Column::Species => "species",
                Column::Island => "island",
                Column::Sex => "sex",
                _ => "year",
            },
        }
    }

    /// The display name of the column header.
    pub fn label(self) -> String {
        format_column_name(self.name())
    }

    fn measurement(self) -> Option<Measurement> {
        match self {
            Column::BillLength => Some(Measurement::BillLength),
            Column::BillDepth => Some(Measurement::BillDepth),
            Column::FlipperLength => Some(Measurement::FlipperLength),
            Column::BodyMass => Some(Measurement::BodyMass),
            _ => None,
        }
    }

    /// The text shown in a table cell for `penguin`.
    ///
    /// Missing values are shown as "NA", matching the source data.
    pub fn cell_text(self, penguin: &Penguin) -> String {
        if let Some(measurement) = self.measurement() {
            return match measurement.value(penguin) {
                Some(value) => format!("{value:.1}"),
                None => "NA".to_owned(),
            };
        }

        match self {
            Column::Species => penguin.species.clone(),
            Column::Island => penguin.island.clone(),
            Column::Sex => penguin.sex.map_or("NA", Sex::label).to_owned(),
            _ => penguin.year.to_string(),
        }
    }

    /// Whether `penguin` has no recorded value in this column.
    pub fn is_missing(self, penguin: &Penguin) -> bool {
        match self.measurement() {
            Some(measurement) => measurement.value(penguin).is_none(),
            None => self == Column::Sex && penguin.sex.is_none(),
        }
    }

    /// Orders two penguins by this column. Missing values sort last.
    pub fn compare(self, a: &Penguin, b: &Penguin) -> Ordering {
        if let Some(measurement) = self.measurement() {
            return compare_missing_last(measurement.value(a), measurement.value(b), f64::total_cmp);
        }

        match self {
            Column::Species => a.species.cmp(&b.species),
            Column::Island => a.island.cmp(&b.island),
            Column::Sex => compare_missing_last(a.sex, b.sex, |a, b| a.cmp(b)),
            _ => a.year.cmp(&b.year),
        }
    }
}

fn compare_missing_last<T>(
    a: Option<T>,
    b: Option<T>,
    compare: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Converts a raw column name into a display name.
///
/// Measurement columns end with their unit, which is moved into brackets:
/// `bill_length_mm` becomes `Bill Length (mm)`. Columns without a unit are
/// title-cased: `species` becomes `Species`.
pub fn format_column_name(name: &str) -> String {
    let is_measurement = Measurement::ALL
        .iter()
        .any(|measurement| measurement.column_name() == name);

    match name.rsplit_once('_') {
        Some((stem, unit)) if is_measurement => format!("{} ({unit})", title_case(stem)),
        _ => title_case(name),
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The immutable in-memory table of penguin observations.
#[derive(Debug)]
pub struct Dataset {
    penguins: Vec<Penguin>,
    species: Vec<String>,
    islands: Vec<String>,
}

impl Dataset {
    /// Create a dataset from already parsed rows.
    ///
    /// # Errors
    /// Returns [Error::EmptyDataset] if `penguins` is empty.
    pub fn new(penguins: Vec<Penguin>) -> Result<Self, Error> {
        if penguins.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let species = distinct_in_order(penguins.iter().map(|penguin| &penguin.species));
        let islands = distinct_in_order(penguins.iter().map(|penguin| &penguin.island));

        Ok(Self {
            penguins,
            species,
            islands,
        })
    }

    /// Parse a dataset from CSV text with a header row.
    ///
    /// # Errors
    /// Returns [Error::DatasetLoad] if a row cannot be parsed, or
    /// [Error::EmptyDataset] if there are no rows.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut reader = csv::Reader::from_reader(reader);

        let penguins = reader
            .deserialize::<Penguin>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| Error::DatasetLoad(error.to_string()))?;

        Self::new(penguins)
    }

    /// Load the dataset from the CSV file at `path`.
    ///
    /// # Errors
    /// Returns [Error::DatasetLoad] if the file cannot be opened or parsed.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|error| {
            Error::DatasetLoad(format!("could not open {}: {error}", path.display()))
        })?;

        Self::from_csv_reader(file)
    }

    /// Load the copy of the dataset compiled into the binary.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_csv_reader(BUNDLED_CSV.as_bytes())
    }

    /// All rows in dataset order.
    pub fn penguins(&self) -> &[Penguin] {
        &self.penguins
    }

    /// The distinct species in order of first appearance.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// The distinct islands in order of first appearance.
    pub fn islands(&self) -> &[String] {
        &self.islands
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.penguins.len()
    }

    /// Always false, a dataset cannot be constructed without rows.
    pub fn is_empty(&self) -> bool {
        self.penguins.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();

    for value in values {
        if !distinct.contains(value) {
            distinct.push(value.clone());
        }
    }

    distinct
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::Error;

    use super::{Column, Dataset, Measurement, Sex, format_column_name};

    const HEADER: &str =
        "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n";

    #[test]
    fn bundled_dataset_loads() {
        let dataset = Dataset::bundled().unwrap();

        assert!(!dataset.is_empty());
        assert_eq!(dataset.species(), ["Adelie", "Gentoo", "Chinstrap"]);
        assert_eq!(dataset.islands(), ["Torgersen", "Biscoe", "Dream"]);
    }

    #[test]
    fn missing_values_load_as_none() {
        let csv = format!(
            "{HEADER}Adelie,Torgersen,NA,NA,NA,NA,NA,2007\nGentoo,Biscoe,46.1,13.2,211,4500,female,2007\n"
        );

        let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();

        let missing = &dataset.penguins()[0];
        assert_eq!(missing.bill_length_mm, None);
        assert_eq!(missing.body_mass_g, None);
        assert_eq!(missing.sex, None);
        assert_eq!(missing.year, 2007);

        let present = &dataset.penguins()[1];
        assert_eq!(present.bill_length_mm, Some(46.1));
        assert_eq!(present.flipper_length_mm, Some(211.0));
        assert_eq!(present.sex, Some(Sex::Female));
    }

    #[test]
    fn rejects_empty_dataset() {
        let result = Dataset::from_csv_reader(HEADER.as_bytes());

        assert_eq!(result.unwrap_err(), Error::EmptyDataset);
    }

    #[test]
    fn rejects_malformed_rows() {
        let csv = format!("{HEADER}Adelie,Torgersen,39.1,18.7,181,3750,male,not a year\n");

        let result = Dataset::from_csv_reader(csv.as_bytes());

        assert!(matches!(result, Err(Error::DatasetLoad(_))));
    }

    #[test]
    fn categories_keep_order_of_first_appearance() {
        let csv = format!(
            "{HEADER}Gentoo,Biscoe,1,1,1,1,male,2007\n\
            Adelie,Dream,1,1,1,1,male,2007\n\
            Gentoo,Dream,1,1,1,1,female,2008\n"
        );

        let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.species(), ["Gentoo", "Adelie"]);
        assert_eq!(dataset.islands(), ["Biscoe", "Dream"]);
    }

    #[test]
    fn formats_measurement_names_with_units() {
        assert_eq!(format_column_name("bill_length_mm"), "Bill Length (mm)");
        assert_eq!(format_column_name("body_mass_g"), "Body Mass (g)");
        assert_eq!(Measurement::FlipperLength.label(), "Flipper Length (mm)");
    }

    #[test]
    fn formats_categorical_names_as_title_case() {
        assert_eq!(format_column_name("species"), "Species");
        assert_eq!(format_column_name("year"), "Year");
        assert_eq!(Column::Sex.label(), "Sex");
    }

    #[test]
    fn missing_values_sort_last() {
        let csv = format!(
            "{HEADER}Adelie,Torgersen,NA,NA,NA,NA,NA,2007\nAdelie,Torgersen,39.1,18.7,181,3750,male,2007\n"
        );
        let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
        let [missing, present] = dataset.penguins() else {
            panic!("want two rows");
        };

        assert_eq!(Column::BillLength.compare(present, missing), Ordering::Less);
        assert_eq!(Column::Sex.compare(missing, present), Ordering::Greater);
        assert_eq!(Column::BillLength.cell_text(missing), "NA");
        assert_eq!(Column::BillLength.cell_text(present), "39.1");
        assert_eq!(Column::Sex.cell_text(present), "Male");
    }
}
