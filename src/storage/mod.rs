pub mod errors;
pub mod list_objects;
pub mod object_store;
pub mod s3;
pub mod sigv4;

pub use errors::StorageError;
pub use object_store::{BucketCredentials, ObjectStore};
pub use s3::S3ObjectStore;
