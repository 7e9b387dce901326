use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::Index;
use crate::error::{Error, Result};
use crate::matrix::CompressedSparseColumn;

/// 随机稀疏矩阵参数。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub nrow: usize,
    pub ncol: usize,
    pub density: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nrow: 10_000,
            ncol: 100_000,
            density: 0.1,
            seed: 1_234_567,
        }
    }
}

/// splitmix64：把 (seed, column) 打散成互不相关的列种子。
fn column_seed(seed: u64, column: usize) -> u64 {
    let mut z = seed ^ (column as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn generate_column(config: &GeneratorConfig, column: usize) -> (Vec<Index>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(column_seed(config.seed, column));
    let expected = (config.nrow as f64 * config.density).ceil() as usize;
    let mut rows = Vec::with_capacity(expected);
    let mut values = Vec::with_capacity(expected);
    for r in 0..config.nrow {
        if rng.gen_bool(config.density) {
            rows.push(r as Index);
            values.push(rng.gen_range(-1.0..1.0));
        }
    }
    (rows, values)
}

/// 按列并行生成；每列独立 RNG，结果与线程数无关。
pub fn generate(config: &GeneratorConfig) -> Result<CompressedSparseColumn> {
    if !(0.0..=1.0).contains(&config.density) {
        return Err(Error::InvalidDensity(config.density));
    }
    if Index::try_from(config.nrow).is_err() {
        return Err(Error::TooManyRows { nrow: config.nrow });
    }

    let start = Instant::now();
    let columns: Vec<(Vec<Index>, Vec<f64>)> = (0..config.ncol)
        .into_par_iter()
        .map(|c| generate_column(config, c))
        .collect();
    let matrix = CompressedSparseColumn::from_columns(config.nrow, columns)?;

    tracing::info!(
        "Generated {} x {} matrix: {} non-zeros (density {}) in {:?}",
        matrix.nrow(),
        matrix.ncol(),
        matrix.nnz(),
        config.density,
        start.elapsed()
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(density: f64, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            nrow: 200,
            ncol: 50,
            density,
            seed,
        }
    }

    #[test]
    fn same_seed_same_matrix() {
        let a = generate(&small(0.2, 7)).unwrap();
        let b = generate(&small(0.2, 7)).unwrap();
        assert_eq!(a, b);
        let c = generate(&small(0.2, 8)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn extreme_densities() {
        let empty = generate(&small(0.0, 1)).unwrap();
        assert_eq!(empty.nnz(), 0);
        assert_eq!(empty.ncol(), 50);

        let full = generate(&small(1.0, 1)).unwrap();
        assert_eq!(full.nnz(), 200 * 50);
        assert_eq!(full.column(3).len(), 200);
    }

    #[test]
    fn columns_are_strictly_increasing_and_in_range() {
        let m = generate(&small(0.3, 99)).unwrap();
        for c in 0..m.ncol() {
            let col = m.column(c);
            assert!(col.windows(2).all(|w| w[0] < w[1]));
            assert!(col.iter().all(|&r| (r as usize) < m.nrow()));
            assert!(m.column_values(c).iter().all(|v| (-1.0..1.0).contains(v)));
        }
        // 0.3 * 200 * 50 = 3000，允许较宽的随机波动
        assert!((2400..3600).contains(&m.nnz()), "nnz = {}", m.nnz());
    }

    #[test]
    fn rejects_invalid_density() {
        assert!(matches!(generate(&small(1.5, 1)), Err(Error::InvalidDensity(_))));
        assert!(matches!(generate(&small(f64::NAN, 1)), Err(Error::InvalidDensity(_))));
    }
}
