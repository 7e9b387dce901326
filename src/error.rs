use std::path::PathBuf;

use thiserror::Error;

use crate::search::Strategy;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("density must lie in [0, 1], got {0}")]
    InvalidDensity(f64),

    #[error("triplet arrays differ in length: rows={rows}, cols={cols}, values={values}")]
    TripletLengthMismatch {
        rows: usize,
        cols: usize,
        values: usize,
    },

    #[error("triplet ({row}, {col}) out of bounds for a {nrow} x {ncol} matrix")]
    TripletOutOfBounds {
        row: usize,
        col: usize,
        nrow: usize,
        ncol: usize,
    },

    #[error("duplicate entry at ({row}, {col})")]
    DuplicateEntry { row: usize, col: usize },

    #[error("{nrow} rows do not fit the row index type")]
    TooManyRows { nrow: usize },

    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{strategy} reported {actual} hits, reference reported {expected}")]
    HitCountMismatch {
        strategy: Strategy,
        expected: usize,
        actual: usize,
    },
}
