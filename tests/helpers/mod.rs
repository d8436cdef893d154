pub mod factories;
pub mod factory;
pub mod recording_store;

pub use factory::Factory;
pub use recording_store::RecordingStore;
