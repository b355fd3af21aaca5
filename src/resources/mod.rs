pub mod dataset_file;
pub mod dataset_group;
pub mod predictor;

pub use dataset_file::DatasetFile;
pub use dataset_group::{DatasetGroupSnapshot, DatasetGroupSource, DatasetInfo, RemoteDatasetGroup};
pub use predictor::{PredictorSource, StaticPredictor};
