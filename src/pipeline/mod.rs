pub mod errors;
pub mod merger;
pub mod paths;
pub mod run_guard;
pub mod staging;
pub mod train_info;

pub use errors::{MergeError, RunGuardError, SnapshotError};
pub use merger::{Merger, merge_relevance_outputs};
pub use paths::{MERGED_OUTPUT_FILE_NAME, ProjectPaths};
pub use run_guard::RunGuard;
pub use train_info::{TrainInfo, save_train_info};
