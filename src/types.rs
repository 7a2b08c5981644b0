use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------- Request/Response types ----------

/// One flight record as posted to `/predict`. Field names follow the
/// training data's column names; all five fields are required.
#[derive(Deserialize, Debug, Clone)]
pub struct FlightRecord {
    pub opera: String,
    pub mes: u32,
    pub tipo_vuelo: String,
    pub sigla_des: String,
    pub dia_nom: String,
}

/// Response: 0 means no delay, 1 means delay.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub prediction: u8,
}

// ---------- Tabular representation ----------

/// A single table cell. The encoder treats text cells as categorical and
/// numeric cells as pass-through features.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Str(String),
    Num(f32),
}

/// Single-row table keyed by canonical column names, the unit handed to the
/// encoder.
#[derive(Debug, Clone, Default)]
pub struct TabularRow {
    cells: HashMap<String, Cell>,
}

impl TabularRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell under the canonical form of `column`.
    pub fn insert(&mut self, column: &str, cell: Cell) {
        self.cells.insert(canonical_column(column), cell);
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

/// Canonical column naming the encoder was fitted with: uppercase, with
/// underscore separators stripped. `tipo_vuelo` -> `TIPOVUELO`. Must stay
/// byte-for-byte stable or the encoder rejects the row.
pub fn canonical_column(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

impl FlightRecord {
    /// Converts the record into a one-row table with canonical column names.
    pub fn to_row(&self) -> TabularRow {
        let mut row = TabularRow::new();
        row.insert("opera", Cell::Str(self.opera.clone()));
        row.insert("mes", Cell::Num(self.mes as f32));
        row.insert("tipo_vuelo", Cell::Str(self.tipo_vuelo.clone()));
        row.insert("sigla_des", Cell::Str(self.sigla_des.clone()));
        row.insert("dia_nom", Cell::Str(self.dia_nom.clone()));
        row
    }
}
