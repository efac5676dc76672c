use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DatasetError;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

pub const PRODUCT_LINE: &str = "ProductLine";
pub const QUANTITY_ON_HAND: &str = "QuantityOnHand";
pub const QUANTITY_ON_PURCHASE_ORDER: &str = "QuantityOnPurchaseOrder";
pub const QUANTITY_ON_SALES_ORDER: &str = "QuantityOnSalesOrder";
pub const QUANTITY_ON_BACK_ORDER: &str = "QuantityOnBackOrder";
pub const THREE_MONTH_COVERAGE: &str = "3MCov";
pub const PRIOR_STOCK: &str = "StockPrev";
/// Derived column appended by the derivation stage.
pub const PROP_ORDER: &str = "PropOrder";

/// The five numeric fields that are coerced, summed, tabulated and charted.
pub const SUMMED_FIELDS: [&str; 5] = [
    QUANTITY_ON_HAND,
    QUANTITY_ON_PURCHASE_ORDER,
    QUANTITY_ON_SALES_ORDER,
    QUANTITY_ON_BACK_ORDER,
    PROP_ORDER,
];

/// Columns a source file must carry to be accepted.
pub const REQUIRED_COLUMNS: [&str; 15] = [
    PRODUCT_LINE,
    "Category1",
    "Category2",
    "Category3",
    "Category4",
    "UDF_SEASON_CLASS",
    "UDF_GENDER",
    "UDF_PRODUCT_CATEGORY",
    "ProductLineDesc",
    QUANTITY_ON_HAND,
    QUANTITY_ON_PURCHASE_ORDER,
    QUANTITY_ON_SALES_ORDER,
    QUANTITY_ON_BACK_ORDER,
    THREE_MONTH_COVERAGE,
    PRIOR_STOCK,
];

// ---------------------------------------------------------------------------
// GroupingColumn – the categorical columns a summary can be grouped by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupingColumn {
    #[default]
    Category1,
    Category2,
    Category3,
    Category4,
    #[serde(rename = "UDF_SEASON_CLASS")]
    SeasonClass,
    #[serde(rename = "UDF_GENDER")]
    Gender,
    #[serde(rename = "UDF_PRODUCT_CATEGORY")]
    ProductCategory,
    #[serde(rename = "ProductLineDesc")]
    ProductLineDesc,
}

impl GroupingColumn {
    pub const ALL: [GroupingColumn; 8] = [
        GroupingColumn::Category1,
        GroupingColumn::Category2,
        GroupingColumn::Category3,
        GroupingColumn::Category4,
        GroupingColumn::SeasonClass,
        GroupingColumn::Gender,
        GroupingColumn::ProductCategory,
        GroupingColumn::ProductLineDesc,
    ];

    /// Column name as it appears in the source file.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingColumn::Category1 => "Category1",
            GroupingColumn::Category2 => "Category2",
            GroupingColumn::Category3 => "Category3",
            GroupingColumn::Category4 => "Category4",
            GroupingColumn::SeasonClass => "UDF_SEASON_CLASS",
            GroupingColumn::Gender => "UDF_GENDER",
            GroupingColumn::ProductCategory => "UDF_PRODUCT_CATEGORY",
            GroupingColumn::ProductLineDesc => "ProductLineDesc",
        }
    }
}

impl fmt::Display for GroupingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupingColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("'{s}' is not a grouping column"))
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the inventory table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what spreadsheet readers hand back.
/// Used as a grouping key, so it must be `Eq + Hash`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

// -- Manual Eq/Hash so CellValue can key a HashMap (floats by bit pattern) --
// A whole-number float equals the integer of the same value.

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        use CellValue::*;
        if let (Some(a), Some(b)) = (self.as_whole_number(), other.as_whole_number()) {
            return a == b;
        }
        match (self, other) {
            (String(a), String(b)) | (Date(a), Date(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Bool(a), Bool(b)) => a == b,
            (Null, Null) => true,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if let Some(i) = self.as_whole_number() {
            0u8.hash(state);
            i.hash(state);
            return;
        }
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) | CellValue::Date(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Integer value of an `Integer`, or of a `Float` with no fractional part.
    fn as_whole_number(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    /// Null, or a float that is not a number.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Interpret a cell read from a text format (csv, untyped sheets).
    pub fn infer(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// InventoryTable – a column-ordered table of inventory records
// ---------------------------------------------------------------------------

/// Rows of inventory records sharing one ordered column list.
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl InventoryTable {
    /// Build a table, padding short rows with `Null` and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        InventoryTable { columns, rows }
    }

    /// Build a table from loaded records and check it has the inventory schema.
    pub fn from_records(
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(DatasetError::DuplicateColumn(col.clone()));
            }
        }
        let missing = missing_columns(&columns);
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }
        Ok(InventoryTable::new(columns, rows))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom. Empty if the column is absent.
    pub fn column_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a CellValue> + 'a {
        let idx = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    /// Distinct non-missing values of a column in order of first appearance.
    pub fn unique_values(&self, name: &str) -> Vec<CellValue> {
        let mut seen = HashSet::new();
        self.column_values(name)
            .filter(|v| !v.is_missing() && seen.insert(*v))
            .cloned()
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Required columns absent from `columns`, in declaration order.
pub fn missing_columns(columns: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|req| !columns.iter().any(|c| c == *req))
        .map(|req| req.to_string())
        .collect()
}
