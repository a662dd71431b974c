use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::vectorize::FeatureVector;

/// Inference-only handle to a trained binary classifier.
///
/// `decision` returns a signed margin; non-negative means the stage's
/// affirmative label. Implementations must not mutate themselves on
/// inference, so one handle can serve every worker thread.
pub trait BinaryClassifier: Send + Sync + std::fmt::Debug {
    fn n_features(&self) -> usize;
    fn decision(&self, vector: &FeatureVector) -> f64;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelFile {
    Linear {
        weights: Vec<f32>,
        bias: f32,
        #[serde(default)]
        n_features: Option<usize>,
    },
}

/// Linear decision function, the shape of an exported linear SVM.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearModel {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model {}", path.display()))?;
        let file: ModelFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse model {}", path.display()))?;
        Self::from_file(file).with_context(|| format!("invalid model {}", path.display()))
    }

    pub fn from_file(file: ModelFile) -> Result<Self> {
        match file {
            ModelFile::Linear {
                weights,
                bias,
                n_features,
            } => {
                if let Some(n) = n_features {
                    if n != weights.len() {
                        bail!(
                            "n_features ({}) does not match weights length ({})",
                            n,
                            weights.len()
                        );
                    }
                }
                if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
                    bail!("non-finite model parameter");
                }
                Ok(Self::new(weights, bias))
            }
        }
    }
}

impl BinaryClassifier for LinearModel {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn decision(&self, vector: &FeatureVector) -> f64 {
        let mut sum = self.bias as f64;
        for (w, x) in self.weights.iter().zip(vector.as_slice()) {
            sum += (*w as f64) * (*x as f64);
        }
        sum
    }
}
