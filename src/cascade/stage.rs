use crate::cascade::StageResult;
use crate::error::CascadeError;
use crate::labels::{Marker, StageKind};
use crate::model::{FeatureMap, StageModel};
use crate::vectorize::{FeatureVector, ReportFeatures};

/// One trained binary classifier bound to its stage and feature schema.
#[derive(Debug, Clone)]
pub struct StageClassifier {
    model: StageModel,
}

impl StageClassifier {
    pub fn new(model: StageModel) -> Self {
        Self { model }
    }

    pub fn marker(&self) -> Marker {
        self.model.marker
    }

    pub fn stage(&self) -> StageKind {
        self.model.stage
    }

    pub fn features(&self) -> &FeatureMap {
        &self.model.features
    }

    /// Fresh vector in this stage's schema.
    pub fn vectorize(&self, features: &ReportFeatures) -> FeatureVector {
        self.model.features.project(features)
    }

    pub fn classify(&self, vector: &FeatureVector) -> Result<StageResult, CascadeError> {
        let expected = self.model.model.n_features();
        if vector.len() != expected {
            return Err(CascadeError::LengthMismatch {
                marker: self.marker(),
                stage: self.stage(),
                expected,
                got: vector.len(),
            });
        }
        let margin = self.model.model.decision(vector);
        if !margin.is_finite() {
            return Err(CascadeError::Config {
                marker: self.marker(),
                stage: self.stage(),
                message: format!("model produced non-finite decision value {}", margin),
            });
        }
        Ok(StageResult::from_margin(self.stage(), self.marker(), margin))
    }
}
