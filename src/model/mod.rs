pub mod feature_map;
pub mod linear;
pub mod store;

pub use feature_map::FeatureMap;
pub use linear::{BinaryClassifier, LinearModel, ModelFile};
pub use store::{ModelStore, StageModel};
