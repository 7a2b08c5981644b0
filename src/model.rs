use std::path::Path;
use tch::{CModule, Device, Tensor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found at {0}")]
    ArtifactNotFound(String),
    #[error("failed to load TorchScript module: {0}")]
    Load(String),
    #[error("feature length mismatch: got {got}, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },
    #[error("unexpected model output shape {0:?}")]
    OutputShape(Vec<i64>),
    #[error("inference failed: {0}")]
    Inference(#[from] tch::TchError),
}

/// Inference seam over the loaded classifier artifact. The real artifact is
/// a TorchScript module; tests substitute mocks.
pub trait Classifier: Send + Sync {
    /// Runs the classifier on one encoded vector and returns the delay label,
    /// always 0 or 1.
    fn predict(&self, features: &[f32]) -> Result<u8, ModelError>;
}

/// Pre-trained binary classifier backed by a TorchScript module.
#[derive(Debug)]
pub struct TorchClassifier {
    module: CModule,
    device: Device,
    in_dim: usize,
}

impl TorchClassifier {
    /// Loads the TorchScript artifact and probes it with a zero forward so
    /// shape problems surface at boot, not on the first request. The module
    /// must map `[1, in_dim]` to either a single logit `[1, 1]` or two class
    /// scores `[1, 2]`.
    pub fn load(path: &str, in_dim: usize) -> Result<Self, ModelError> {
        let device = Device::Cpu;
        if !Path::new(path).exists() {
            return Err(ModelError::ArtifactNotFound(path.to_string()));
        }
        let module = CModule::load_on_device(path, device)
            .map_err(|e| ModelError::Load(format!("{path}: {e}")))?;

        let classifier = Self {
            module,
            device,
            in_dim,
        };
        classifier.forward(&vec![0.0; in_dim])?;
        Ok(classifier)
    }

    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    fn forward(&self, features: &[f32]) -> Result<Tensor, ModelError> {
        let input = Tensor::from_slice(features)
            .reshape([1, self.in_dim as i64])
            .to_device(self.device);
        let out = self.module.forward_ts(&[input])?;
        match out.size().as_slice() {
            [1, 1] | [1, 2] => Ok(out),
            other => Err(ModelError::OutputShape(other.to_vec())),
        }
    }
}

impl Classifier for TorchClassifier {
    fn predict(&self, features: &[f32]) -> Result<u8, ModelError> {
        if features.len() != self.in_dim {
            return Err(ModelError::DimensionMismatch {
                got: features.len(),
                expected: self.in_dim,
            });
        }

        let out = self.forward(features)?;
        let label = match out.size().as_slice() {
            // single logit head: sigmoid(z) >= 0.5 iff z >= 0
            [1, 1] => (out.double_value(&[0, 0]) >= 0.0) as u8,
            // two-class head: argmax
            [1, 2] => (out.double_value(&[0, 1]) > out.double_value(&[0, 0])) as u8,
            other => return Err(ModelError::OutputShape(other.to_vec())),
        };
        Ok(label)
    }
}
