pub mod logging;
pub mod pipeline;
pub mod shared;
pub mod storage;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
