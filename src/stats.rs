//! Single-pass statistics accumulation for tabular data.
//!
//! `ColumnStats` tracks one column: inferred data type, empty/non-empty
//! counts, type-appropriate min/max bounds, and a capped distinct-value
//! frequency map. `TableStats` owns the ordered column set, dispatches
//! each row's fields, and grows the set when rows arrive wider than
//! expected. Memory stays bounded at `O(columns * unique_max)` no
//! matter how many rows are streamed through.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use log::warn;
use serde::Serialize;

use crate::{data::Value, error::ProfileError};

/// Inferred data type of a column, widened monotonically as values
/// arrive. `Mixed` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    Unknown,
    DigitString,
    CharString,
    Number,
    Date,
    Mixed,
}

/// Kind of one observed non-empty value, as seen by the lattice.
#[derive(Debug, Clone, Copy)]
enum SeenKind {
    DigitText,
    CharText,
    Number,
    Date,
}

impl DataType {
    /// Join-lattice transition: the type after seeing `seen` when the
    /// column is currently `self`. Commutative and associative over any
    /// sequence of observations.
    fn widen(self, seen: SeenKind) -> DataType {
        use DataType::*;
        match (self, seen) {
            (Unknown, SeenKind::DigitText) => DigitString,
            (Unknown, SeenKind::CharText) => CharString,
            (Unknown, SeenKind::Number) => Number,
            (Unknown, SeenKind::Date) => Date,
            (DigitString, SeenKind::DigitText) => DigitString,
            (DigitString, SeenKind::CharText) => CharString,
            (CharString, SeenKind::DigitText | SeenKind::CharText) => CharString,
            (Number, SeenKind::Number) => Number,
            (Date, SeenKind::Date) => Date,
            (
                DigitString | CharString | Number | Date | Mixed,
                SeenKind::DigitText | SeenKind::CharText | SeenKind::Number | SeenKind::Date,
            ) => Mixed,
        }
    }

    pub fn is_textual(self) -> bool {
        matches!(self, DataType::DigitString | DataType::CharString)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Unknown => "Unknown",
            DataType::DigitString => "Digitstring",
            DataType::CharString => "Charstring",
            DataType::Number => "Number",
            DataType::Date => "Date",
            DataType::Mixed => "Mixed",
        };
        write!(f, "{name}")
    }
}

/// Distinct-value count for one column: exact while the frequency map
/// fits under the cap, a lower bound once it has overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DistinctCount {
    Exact(usize),
    OverLimit(usize),
}

impl fmt::Display for DistinctCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistinctCount::Exact(count) => write!(f, "{count}"),
            DistinctCount::OverLimit(cap) => write!(f, "> {cap}"),
        }
    }
}

/// Read-only snapshot of one column, consumed by the report renderers.
/// Bounds that do not apply to the inferred type are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub index: usize,
    pub name: Option<String>,
    pub datatype: DataType,
    pub empty: u64,
    pub nonempty: u64,
    pub density: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_number: Option<f64>,
    pub max_number: Option<f64>,
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    pub distinct: DistinctCount,
    pub frequencies: Option<BTreeMap<String, u64>>,
}

/// Accumulates descriptive statistics for a single column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    index: usize,
    name: Option<String>,
    unique_max: usize,
    datatype: DataType,
    empty: u64,
    nonempty: u64,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min_number: Option<f64>,
    max_number: Option<f64>,
    min_date: Option<NaiveDateTime>,
    max_date: Option<NaiveDateTime>,
    frequencies: BTreeMap<Value, u64>,
    frequencies_full: bool,
}

impl ColumnStats {
    pub fn new(index: usize, name: Option<String>, unique_max: usize) -> Self {
        Self {
            index,
            name,
            unique_max,
            datatype: DataType::Unknown,
            empty: 0,
            nonempty: 0,
            min_length: None,
            max_length: None,
            min_number: None,
            max_number: None,
            min_date: None,
            max_date: None,
            frequencies: BTreeMap::new(),
            frequencies_full: false,
        }
    }

    /// Hot path: called once per field per row.
    pub fn analyze_value(&mut self, value: &Value) -> Result<(), ProfileError> {
        self.track_frequency(value);
        match value {
            Value::Empty => self.empty += 1,
            Value::Text(text) => {
                if text.trim().is_empty() {
                    // Blank text is semantically empty; type inference
                    // and length bounds stay untouched.
                    self.empty += 1;
                } else {
                    self.nonempty += 1;
                    let seen = if text.chars().all(|c| c.is_ascii_digit()) {
                        SeenKind::DigitText
                    } else {
                        SeenKind::CharText
                    };
                    self.datatype = self.datatype.widen(seen);
                    let length = text.chars().count();
                    self.min_length = Some(self.min_length.map_or(length, |m| m.min(length)));
                    self.max_length = Some(self.max_length.map_or(length, |m| m.max(length)));
                }
            }
            Value::Integer(i) => self.observe_number(*i as f64),
            Value::Float(f) => self.observe_number(*f),
            Value::DateTime(dt) => {
                self.nonempty += 1;
                self.datatype = self.datatype.widen(SeenKind::Date);
                self.min_date = Some(self.min_date.map_or(*dt, |m| m.min(*dt)));
                self.max_date = Some(self.max_date.map_or(*dt, |m| m.max(*dt)));
            }
            Value::Boolean(_) => {
                return Err(ProfileError::UnsupportedValueKind {
                    column: self.index,
                    kind: value.kind_name(),
                });
            }
        }
        Ok(())
    }

    fn observe_number(&mut self, numeric: f64) {
        self.nonempty += 1;
        self.datatype = self.datatype.widen(SeenKind::Number);
        self.min_number = Some(self.min_number.map_or(numeric, |m| m.min(numeric)));
        self.max_number = Some(self.max_number.map_or(numeric, |m| m.max(numeric)));
    }

    // Counts distinct values up to the cap. Once latched, new keys are
    // dropped and existing counts are frozen, never evicted. A key that
    // is already tracked keeps counting while under the cap.
    fn track_frequency(&mut self, value: &Value) {
        if self.frequencies_full {
            return;
        }
        if let Some(count) = self.frequencies.get_mut(value) {
            *count += 1;
        } else if self.frequencies.len() < self.unique_max {
            self.frequencies.insert(value.clone(), 1);
        } else {
            self.frequencies_full = true;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    pub fn empty_count(&self) -> u64 {
        self.empty
    }

    pub fn nonempty_count(&self) -> u64 {
        self.nonempty
    }

    pub fn frequencies_full(&self) -> bool {
        self.frequencies_full
    }

    pub fn distinct_tracked(&self) -> usize {
        self.frequencies.len()
    }

    /// Fraction of observed values that were non-empty, or `None` when
    /// the column has no observations at all.
    pub fn density(&self) -> Option<f64> {
        let total = self.empty + self.nonempty;
        (total > 0).then(|| self.nonempty as f64 / total as f64)
    }

    /// Snapshot for report rendering. Frequencies are re-keyed by their
    /// display form (sorted, hence deterministic) and omitted entirely
    /// once the map has overflowed.
    pub fn report(&self) -> ColumnReport {
        let distinct = if self.frequencies_full {
            DistinctCount::OverLimit(self.unique_max)
        } else {
            DistinctCount::Exact(self.frequencies.len())
        };
        let frequencies = (!self.frequencies_full).then(|| {
            let mut rendered: BTreeMap<String, u64> = BTreeMap::new();
            for (value, count) in &self.frequencies {
                *rendered.entry(value.as_display()).or_insert(0) += count;
            }
            rendered
        });
        let textual = self.datatype.is_textual();
        let numeric = self.datatype == DataType::Number;
        let dated = self.datatype == DataType::Date;
        ColumnReport {
            index: self.index,
            name: self.name.clone(),
            datatype: self.datatype,
            empty: self.empty,
            nonempty: self.nonempty,
            density: self.density(),
            min_length: if textual { self.min_length } else { None },
            max_length: if textual { self.max_length } else { None },
            min_number: if numeric { self.min_number } else { None },
            max_number: if numeric { self.max_number } else { None },
            min_date: if dated { self.min_date } else { None },
            max_date: if dated { self.max_date } else { None },
            distinct,
            frequencies,
        }
    }
}

/// Accumulates statistics for a whole table, one `ColumnStats` per
/// column in row order. Owned exclusively by one caller; rows must be
/// fed strictly sequentially.
#[derive(Debug, Clone)]
pub struct TableStats {
    unique_max: usize,
    row_count: u64,
    columns: Vec<ColumnStats>,
}

impl TableStats {
    /// `column_names` may be empty (no columns known yet) and names may
    /// be empty strings. Fails when the distinct-value cap is zero.
    pub fn new(unique_max: usize, column_names: &[String]) -> Result<Self, ProfileError> {
        if unique_max == 0 {
            return Err(ProfileError::InvalidArgument);
        }
        let columns = column_names
            .iter()
            .enumerate()
            .map(|(index, name)| ColumnStats::new(index, Some(name.clone()), unique_max))
            .collect();
        Ok(Self {
            unique_max,
            row_count: 0,
            columns,
        })
    }

    /// Analyzes one data row. Rows wider than the known column set grow
    /// it permanently (with a warning when the table started with named
    /// columns); narrower rows leave the missing trailing columns
    /// untouched for this row.
    pub fn analyze_row(&mut self, values: &[Value]) -> Result<(), ProfileError> {
        self.row_count += 1;
        if values.len() > self.columns.len() {
            if !self.columns.is_empty() {
                warn!(
                    "row {} has {} columns but expected {}",
                    self.row_count,
                    values.len(),
                    self.columns.len()
                );
            }
            self.extend_to_width(values.len());
        }
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.analyze_value(value)?;
        }
        Ok(())
    }

    /// Grows the column set to `width` with unnamed columns inheriting
    /// the cap. Idempotent; never shrinks.
    pub fn extend_to_width(&mut self, width: usize) {
        while self.columns.len() < width {
            self.columns
                .push(ColumnStats::new(self.columns.len(), None, self.unique_max));
        }
    }

    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn unique_max(&self) -> usize {
        self.unique_max
    }

    pub fn columns(&self) -> &[ColumnStats] {
        &self.columns
    }
}
