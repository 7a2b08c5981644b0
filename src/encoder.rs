use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::{Cell, TabularRow};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("encoder artifact not found at {0}")]
    ArtifactNotFound(String),
    #[error("invalid encoder artifact: {0}")]
    Artifact(String),
    #[error("column mismatch: {0}")]
    ColumnMismatch(String),
}

/// How the fitted encoder treats one column.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpec {
    /// Categorical column: each category seen at fit time maps to an ordinal,
    /// emitted as a fixed-width binary code. Categories not in the vocabulary
    /// take ordinal 0, the all-zero code.
    Binary {
        name: String,
        categories: HashMap<String, u32>,
        width: u32,
    },
    /// Numeric column forwarded unchanged as one feature.
    Passthrough { name: String },
}

impl ColumnSpec {
    pub fn name(&self) -> &str {
        match self {
            ColumnSpec::Binary { name, .. } => name,
            ColumnSpec::Passthrough { name } => name,
        }
    }

    fn width(&self) -> usize {
        match self {
            ColumnSpec::Binary { width, .. } => *width as usize,
            ColumnSpec::Passthrough { .. } => 1,
        }
    }
}

/// Pre-fitted categorical binary encoder, deserialized from a JSON artifact
/// produced by the training pipeline. Immutable once loaded; shared read-only
/// across requests.
#[derive(Deserialize, Debug, Clone)]
pub struct BinaryEncoder {
    columns: Vec<ColumnSpec>,
}

impl BinaryEncoder {
    /// Loads the encoder artifact from `path` and validates the fitted
    /// vocabulary against the declared code widths.
    pub fn load(path: &str) -> Result<Self, EncodeError> {
        if !Path::new(path).exists() {
            return Err(EncodeError::ArtifactNotFound(path.to_string()));
        }
        let txt = fs::read_to_string(path)
            .map_err(|e| EncodeError::Artifact(format!("failed to read {path}: {e}")))?;
        let encoder: BinaryEncoder = serde_json::from_str(&txt)
            .map_err(|e| EncodeError::Artifact(format!("failed to parse {path}: {e}")))?;
        encoder.validate()?;
        Ok(encoder)
    }

    /// Builds an encoder directly from column specs. Used by tests in place
    /// of a serialized artifact.
    pub fn from_columns(columns: Vec<ColumnSpec>) -> Result<Self, EncodeError> {
        let encoder = BinaryEncoder { columns };
        encoder.validate()?;
        Ok(encoder)
    }

    fn validate(&self) -> Result<(), EncodeError> {
        let mut seen = std::collections::HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.name()) {
                return Err(EncodeError::Artifact(format!(
                    "duplicate column {}",
                    col.name()
                )));
            }
            if let ColumnSpec::Binary {
                name,
                categories,
                width,
            } = col
            {
                if *width == 0 || *width >= 32 {
                    return Err(EncodeError::Artifact(format!(
                        "column {name} has unusable code width {width}"
                    )));
                }
                if let Some(max) = categories.values().max() {
                    if *max >= 1 << width {
                        return Err(EncodeError::Artifact(format!(
                            "column {name}: ordinal {max} does not fit in {width} bits"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Width of the encoded vector, which is also the classifier's expected
    /// input dimensionality.
    pub fn output_width(&self) -> usize {
        self.columns.iter().map(ColumnSpec::width).sum()
    }

    /// Names of the columns the encoder expects, in encoding order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(ColumnSpec::name).collect()
    }

    /// Encodes a single row into a fixed-width feature vector. The row's
    /// column set must exactly match the columns the encoder was fitted on;
    /// any mismatch is an error, never a silent default.
    pub fn transform(&self, row: &TabularRow) -> Result<Vec<f32>, EncodeError> {
        if row.len() != self.columns.len() {
            return Err(EncodeError::ColumnMismatch(format!(
                "row has {} columns, encoder expects {} ({:?})",
                row.len(),
                self.columns.len(),
                self.column_names()
            )));
        }

        let mut out = Vec::with_capacity(self.output_width());
        for col in &self.columns {
            let cell = row.get(col.name()).ok_or_else(|| {
                EncodeError::ColumnMismatch(format!("row is missing column {}", col.name()))
            })?;
            match (col, cell) {
                (ColumnSpec::Binary {
                    categories, width, ..
                }, Cell::Str(value)) => {
                    let ordinal = categories.get(value).copied().unwrap_or(0);
                    for bit in (0..*width).rev() {
                        out.push(((ordinal >> bit) & 1) as f32);
                    }
                }
                (ColumnSpec::Passthrough { .. }, Cell::Num(value)) => out.push(*value),
                (col, _) => {
                    return Err(EncodeError::ColumnMismatch(format!(
                        "column {} holds the wrong kind of value",
                        col.name()
                    )));
                }
            }
        }
        Ok(out)
    }
}
