use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::search::Strategy;

/// 单个策略的遍历结果
#[derive(Clone, Debug, Serialize)]
pub struct StrategyResult {
    pub strategy: Strategy,
    /// 全程命中总数
    pub hits: usize,
    /// 遍历耗时（毫秒）
    pub elapsed_ms: f64,
    /// 与参考策略（缓存线性）的命中总数一致
    pub matches_reference: bool,
}

/// 基准报告：矩阵规模 + 各策略耗时与校验结果
#[derive(Clone, Debug, Serialize)]
pub struct BenchReport {
    pub nrow: usize,
    pub ncol: usize,
    /// 非零元素个数（= 期望命中总数）
    pub nnz: usize,
    pub reference_hits: usize,
    pub results: Vec<StrategyResult>,
}

impl BenchReport {
    pub fn density(&self) -> f64 {
        let cells = self.nrow as f64 * self.ncol as f64;
        if cells == 0.0 {
            0.0
        } else {
            self.nnz as f64 / cells
        }
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &StrategyResult> + '_ {
        self.results.iter().filter(|r| !r.matches_reference)
    }

    /// 任一策略与参考不一致即视为实现缺陷。
    pub fn verify(&self) -> Result<()> {
        match self.mismatches().next() {
            Some(r) => Err(Error::HitCountMismatch {
                strategy: r.strategy,
                expected: self.reference_hits,
                actual: r.hits,
            }),
            None => Ok(()),
        }
    }
}

fn human_millis(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else if ms >= 1.0 {
        format!("{:.2} ms", ms)
    } else {
        format!("{:.1} µs", ms * 1000.0)
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════════════╗")?;
        writeln!(f, "║           sparse-rowscan Benchmark Report        ║")?;
        writeln!(f, "╠══════════════════════════════════════════════════╣")?;
        writeln!(
            f,
            "║ Matrix: {:>12} x {:<12}               ║",
            self.nrow, self.ncol
        )?;
        writeln!(
            f,
            "║   non-zeros:    {:>10}  (density {:>8.4})     ║",
            self.nnz,
            self.density()
        )?;
        writeln!(
            f,
            "║   reference:    {:>10}                       ║",
            self.reference_hits
        )?;
        writeln!(f, "╠──────────────────────────────────────────────────╣")?;
        for r in &self.results {
            writeln!(
                f,
                "║ {:<13} {:>10} hits {:>12}  {:<5} ║",
                r.strategy.as_str(),
                r.hits,
                human_millis(r.elapsed_ms),
                if r.matches_reference { "ok" } else { "DIFF" }
            )?;
        }
        writeln!(f, "╚══════════════════════════════════════════════════╝")?;
        Ok(())
    }
}
