pub mod csc;
pub mod generate;

pub use csc::CompressedSparseColumn;
pub use generate::{generate, GeneratorConfig};
