#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod bench;
pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod search;
pub mod stats;

pub use error::{Error, Result};
