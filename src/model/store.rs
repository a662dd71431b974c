use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::error::CascadeError;
use crate::labels::{Marker, StageKind};
use crate::model::{BinaryClassifier, FeatureMap, LinearModel};

pub const FEATURES_FILE: &str = "features.txt";
pub const MODEL_FILE: &str = "model.json";

#[derive(Debug, Clone)]
pub struct StageModel {
    pub marker: Marker,
    pub stage: StageKind,
    pub features: Arc<FeatureMap>,
    pub model: Arc<dyn BinaryClassifier>,
}

/// Every loaded (marker, stage) artifact pair. Built once before a run and
/// only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    stages: BTreeMap<(Marker, StageKind), StageModel>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_dir(root: &Path, marker: Marker, stage: StageKind) -> PathBuf {
        root.join(marker.dir_name()).join(stage.name())
    }

    /// Loads all four stages for each marker, failing on the first missing
    /// or inconsistent artifact.
    pub fn load(root: &Path, markers: &[Marker]) -> Result<Self> {
        let mut store = Self::new();
        for &marker in markers {
            for stage in StageKind::ALL {
                let dir = Self::stage_dir(root, marker, stage);
                if !dir.is_dir() {
                    return Err(CascadeError::MissingStage { marker, stage })
                        .with_context(|| format!("expected model directory {}", dir.display()));
                }
                let features = FeatureMap::load(&dir.join(FEATURES_FILE))
                    .with_context(|| format!("{}/{}: feature map", marker, stage))?;
                let model = LinearModel::load(&dir.join(MODEL_FILE))
                    .with_context(|| format!("{}/{}: model", marker, stage))?;
                info!(
                    marker = %marker,
                    stage = %stage,
                    features = features.size(),
                    "stage_model_loaded"
                );
                store.insert(marker, stage, features, model)?;
            }
        }
        Ok(store)
    }

    pub fn insert<M>(
        &mut self,
        marker: Marker,
        stage: StageKind,
        features: FeatureMap,
        model: M,
    ) -> Result<(), CascadeError>
    where
        M: BinaryClassifier + 'static,
    {
        if features.size() != model.n_features() {
            return Err(CascadeError::LengthMismatch {
                marker,
                stage,
                expected: model.n_features(),
                got: features.size(),
            });
        }
        self.stages.insert(
            (marker, stage),
            StageModel {
                marker,
                stage,
                features: Arc::new(features),
                model: Arc::new(model),
            },
        );
        Ok(())
    }

    pub fn get(&self, marker: Marker, stage: StageKind) -> Result<&StageModel, CascadeError> {
        self.stages
            .get(&(marker, stage))
            .ok_or(CascadeError::MissingStage { marker, stage })
    }

    pub fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = self.stages.keys().map(|(m, _)| *m).collect();
        markers.dedup();
        markers
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
