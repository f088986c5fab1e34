//! Reference data provider: facts, assumptions and per-municipality entries.
//!
//! The dataset is four CSV files:
//!
//! - `facts.csv` and `assumptions.csv` with columns `label,value,description`
//! - `municipalities.csv` with columns `ags,name`
//! - `entries.csv` with columns `ags,label,value` (one row per entry)
//!
//! A copy of the dataset is embedded in the crate and available through
//! [`RefData::builtin`]. Once loaded, reference data is never mutated;
//! [`RefData::with_assumption_overrides`] returns a new value.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{BalanceError, BalanceResult, Table};

/// Year the 2018 balance refers to.
pub const YEAR_REF: i32 = 2018;
/// Year investments start to be spread from.
pub const YEAR_TODAY: i32 = 2022;
/// Year of full climate neutrality.
pub const YEAR_NEUTRAL: i32 = 2050;

const FACTS_CSV: &str = include_str!("../data/facts.csv");
const ASSUMPTIONS_CSV: &str = include_str!("../data/assumptions.csv");
const MUNICIPALITIES_CSV: &str = include_str!("../data/municipalities.csv");
const ENTRIES_CSV: &str = include_str!("../data/entries.csv");

#[derive(Debug, Deserialize)]
struct LabelRow {
    label: String,
    value: f64,
    #[serde(default)]
    #[allow(dead_code)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MunicipalityRow {
    ags: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct EntryRow {
    ags: String,
    label: String,
    value: f64,
}

/// Closed set of labelled values; unknown labels are an error.
#[derive(Debug, Clone)]
pub struct DataTable {
    kind: Table,
    values: HashMap<String, f64>,
}

impl DataTable {
    fn from_csv(kind: Table, source_name: &str, text: &str) -> BalanceResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        let mut values = HashMap::new();
        for (idx, row) in rdr.deserialize::<LabelRow>().enumerate() {
            let row = row?;
            if values.insert(row.label.clone(), row.value).is_some() {
                return Err(BalanceError::DataFormat {
                    source_name: source_name.to_string(),
                    line: idx as u64 + 2,
                    message: format!("duplicate label \"{}\"", row.label),
                });
            }
        }
        Ok(DataTable { kind, values })
    }

    /// Value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::UnknownKey`] if `key` is not part of the table.
    pub fn get(&self, key: &str) -> BalanceResult<f64> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| BalanceError::unknown_key(self.kind, key))
    }

    /// True if `key` is part of the table.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of labels in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the table holds no labels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Raw entries of one municipality.
#[derive(Debug, Clone)]
pub struct Municipality {
    /// Official municipality key.
    pub ags: String,
    /// Display name.
    pub name: String,
    values: HashMap<String, f64>,
}

/// Facts and assumptions, shared by all municipalities.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    facts: &'a DataTable,
    assumptions: &'a DataTable,
}

impl Lookup<'_> {
    /// Observed constant.
    ///
    /// # Errors
    ///
    /// [`BalanceError::UnknownKey`] for an unknown fact.
    pub fn fact(&self, key: &str) -> BalanceResult<f64> {
        self.facts.get(key)
    }

    /// Projection parameter.
    ///
    /// # Errors
    ///
    /// [`BalanceError::UnknownKey`] for an unknown assumption.
    pub fn ass(&self, key: &str) -> BalanceResult<f64> {
        self.assumptions.get(key)
    }
}

/// Entries of one municipality resolved for one target year.
#[derive(Debug, Clone)]
pub struct Entries {
    /// Official municipality key.
    pub ags: String,
    /// Display name.
    pub name: String,
    /// Target year of the 203X scenario.
    pub year_target: i32,
    /// Years from today to the target year.
    pub duration_target: f64,
    /// Years from the target year to climate neutrality.
    pub duration_neutral: f64,
    values: HashMap<String, f64>,
}

impl Entries {
    /// Entry value, including the derived year and duration entries.
    ///
    /// # Errors
    ///
    /// [`BalanceError::UnknownKey`] for an unknown entry.
    pub fn get(&self, key: &str) -> BalanceResult<f64> {
        match key {
            "In_M_year_target" => Ok(f64::from(self.year_target)),
            "In_M_year_today" => Ok(f64::from(YEAR_TODAY)),
            "In_M_year_ref" => Ok(f64::from(YEAR_REF)),
            "In_M_duration_target" => Ok(self.duration_target),
            "In_M_duration_neutral" => Ok(self.duration_neutral),
            _ => self
                .values
                .get(key)
                .copied()
                .ok_or_else(|| BalanceError::unknown_key(Table::Entry, key)),
        }
    }
}

/// The complete reference dataset.
#[derive(Debug, Clone)]
pub struct RefData {
    facts: DataTable,
    assumptions: DataTable,
    municipalities: BTreeMap<String, Municipality>,
}

impl RefData {
    /// Parses the dataset embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded CSV is malformed.
    pub fn builtin() -> BalanceResult<Self> {
        Self::from_csv_strs(FACTS_CSV, ASSUMPTIONS_CSV, MUNICIPALITIES_CSV, ENTRIES_CSV)
    }

    /// Reads `facts.csv`, `assumptions.csv`, `municipalities.csv` and
    /// `entries.csv` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or is malformed.
    pub fn load(dir: &Path) -> BalanceResult<Self> {
        debug!("loading reference data from {}", dir.display());
        let facts = fs::read_to_string(dir.join("facts.csv"))?;
        let assumptions = fs::read_to_string(dir.join("assumptions.csv"))?;
        let municipalities = fs::read_to_string(dir.join("municipalities.csv"))?;
        let entries = fs::read_to_string(dir.join("entries.csv"))?;
        Self::from_csv_strs(&facts, &assumptions, &municipalities, &entries)
    }

    /// Builds reference data from the text of the four CSV files.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed rows, duplicate labels or entries of
    /// municipalities missing from `municipalities`.
    pub fn from_csv_strs(
        facts: &str,
        assumptions: &str,
        municipalities: &str,
        entries: &str,
    ) -> BalanceResult<Self> {
        let facts = DataTable::from_csv(Table::Fact, "facts.csv", facts)?;
        let assumptions = DataTable::from_csv(Table::Assumption, "assumptions.csv", assumptions)?;

        let mut by_ags = BTreeMap::new();
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(municipalities.as_bytes());
        for row in rdr.deserialize::<MunicipalityRow>() {
            let row = row?;
            by_ags.insert(
                row.ags.clone(),
                Municipality {
                    ags: row.ags,
                    name: row.name,
                    values: HashMap::new(),
                },
            );
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(entries.as_bytes());
        for (idx, row) in rdr.deserialize::<EntryRow>().enumerate() {
            let row = row?;
            let line = idx as u64 + 2;
            let municipality = by_ags
                .get_mut(&row.ags)
                .ok_or_else(|| BalanceError::DataFormat {
                    source_name: "entries.csv".to_string(),
                    line,
                    message: format!("municipality \"{}\" is not listed", row.ags),
                })?;
            if municipality.values.insert(row.label.clone(), row.value).is_some() {
                return Err(BalanceError::DataFormat {
                    source_name: "entries.csv".to_string(),
                    line,
                    message: format!("duplicate entry \"{}\" for {}", row.label, row.ags),
                });
            }
        }

        debug!(
            facts = facts.len(),
            assumptions = assumptions.len(),
            municipalities = by_ags.len(),
            "reference data loaded"
        );

        Ok(RefData {
            facts,
            assumptions,
            municipalities: by_ags,
        })
    }

    /// Facts and assumptions lookup.
    pub fn facts_and_assumptions(&self) -> Lookup<'_> {
        Lookup {
            facts: &self.facts,
            assumptions: &self.assumptions,
        }
    }

    /// Entries of `ags` resolved for `year`.
    ///
    /// # Errors
    ///
    /// [`BalanceError::UnknownMunicipality`] for an unknown AGS and
    /// [`BalanceError::InvalidTargetYear`] for a year outside
    /// `2023..=2050`.
    pub fn entries(&self, ags: &str, year: i32) -> BalanceResult<Entries> {
        let municipality = self
            .municipalities
            .get(ags)
            .ok_or_else(|| BalanceError::UnknownMunicipality(ags.to_string()))?;
        if year <= YEAR_TODAY || year > YEAR_NEUTRAL {
            return Err(BalanceError::InvalidTargetYear {
                year,
                min: YEAR_TODAY + 1,
                max: YEAR_NEUTRAL,
            });
        }
        Ok(Entries {
            ags: municipality.ags.clone(),
            name: municipality.name.clone(),
            year_target: year,
            duration_target: f64::from(year - YEAR_TODAY),
            duration_neutral: f64::from(YEAR_NEUTRAL - year),
            values: municipality.values.clone(),
        })
    }

    /// Known municipalities in AGS order.
    pub fn municipalities(&self) -> impl Iterator<Item = &Municipality> {
        self.municipalities.values()
    }

    /// Returns a copy with some assumptions replaced.
    ///
    /// # Errors
    ///
    /// [`BalanceError::UnknownKey`] if an override names an assumption that
    /// does not exist.
    pub fn with_assumption_overrides(&self, overrides: &BTreeMap<String, f64>) -> BalanceResult<Self> {
        let mut data = self.clone();
        for (key, value) in overrides {
            let previous = data.assumptions.get(key)?;
            warn!("assumption {key} overridden: {previous} -> {value}");
            data.assumptions.values.insert(key.clone(), *value);
        }
        Ok(data)
    }
}
