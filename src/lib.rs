//! Flight-delay prediction service: a single `POST /predict` endpoint that
//! binary-encodes a flight record with a pre-fitted encoder and runs a
//! pre-trained classifier on the result.

pub mod config;
pub mod encoder;
pub mod model;
pub mod server;
pub mod types;

pub use config::{Config, ConfigError};
pub use encoder::{BinaryEncoder, ColumnSpec, EncodeError};
pub use model::{Classifier, ModelError, TorchClassifier};
pub use server::{router, AppState};
pub use types::{canonical_column, Cell, FlightRecord, Prediction, TabularRow};
