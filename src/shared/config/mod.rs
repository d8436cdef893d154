mod model;

pub use model::{
    BucketSettings, GeneralSettings, LoggingSettings, MainSettings, S3Settings,
    TrainModelSettings, load_main_settings, load_s3_settings,
};
