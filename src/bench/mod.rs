//! 遍历驱动：按行 0..nrow 逐个喂入查询，计时并与参考策略交叉校验。

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::core::Index;
use crate::matrix::CompressedSparseColumn;
use crate::search::{create_search, SecondarySearch, Strategy};
use crate::stats::{BenchReport, StrategyResult};

/// 一次完整遍历的结果。
#[derive(Clone, Copy, Debug)]
pub struct Traversal {
    pub hits: usize,
    pub elapsed: Duration,
}

/// 单个命中：第 `list` 列的第 `position` 个元素等于 `query`。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hit {
    pub list: usize,
    pub query: Index,
    pub position: usize,
}

/// 完整遍历一次并计时。
///
/// 命中的列号与值会被拷进行缓冲区（模拟真实的按行取数），
/// 避免整个循环被优化掉。
pub fn traverse(search: &mut dyn SecondarySearch, matrix: &CompressedSparseColumn) -> Traversal {
    let mut index_buffer = vec![0usize; matrix.ncol()];
    let mut value_buffer = vec![0.0f64; matrix.ncol()];
    let mut hits = 0usize;

    let start = Instant::now();
    for r in 0..matrix.max_index() {
        let mut n = 0usize;
        search.search(r, &mut |list, position| {
            index_buffer[n] = list;
            value_buffer[n] = matrix.value_at(list, position).unwrap_or_default();
            n += 1;
        });
        black_box((&index_buffer, &value_buffer));
        hits += n;
    }
    let elapsed = start.elapsed();

    tracing::debug!(
        "{} traversal: {} hits in {:?}",
        search.strategy(),
        hits,
        elapsed
    );
    Traversal { hits, elapsed }
}

/// 收集 0..max_index 上的全部命中，按 (query, list) 排序。
pub fn collect_hits(search: &mut dyn SecondarySearch, max_index: Index) -> Vec<Hit> {
    let mut out = Vec::new();
    for query in 0..max_index {
        let start = out.len();
        search.search(query, &mut |list, position| {
            out.push(Hit {
                list,
                query,
                position,
            })
        });
        out[start..].sort_unstable_by_key(|h| h.list);
    }
    out
}

/// 先跑参考策略（缓存线性），再跑选中的策略并比对命中总数。
pub fn run(matrix: &CompressedSparseColumn, strategies: &[Strategy]) -> BenchReport {
    let lists = matrix.lists();
    let max_index = matrix.max_index();

    let reference = {
        let mut search = create_search(Strategy::Cached, &lists, max_index);
        traverse(search.as_mut(), matrix)
    };
    tracing::info!(
        "Reference (cached) traversal: {} hits in {:?}",
        reference.hits,
        reference.elapsed
    );
    if reference.hits != matrix.nnz() {
        tracing::warn!(
            "Reference hit count {} differs from non-zero count {}",
            reference.hits,
            matrix.nnz()
        );
    }

    let mut selected: Vec<Strategy> = Vec::with_capacity(strategies.len());
    for &s in strategies {
        if !selected.contains(&s) {
            selected.push(s);
        }
    }

    let results = selected
        .into_iter()
        .map(|strategy| {
            let traversal = if strategy == Strategy::Cached {
                reference
            } else {
                let mut search = create_search(strategy, &lists, max_index);
                traverse(search.as_mut(), matrix)
            };
            let matches_reference = traversal.hits == reference.hits;
            if matches_reference {
                tracing::info!(
                    "{} traversal: {} hits in {:?}",
                    strategy,
                    traversal.hits,
                    traversal.elapsed
                );
            } else {
                tracing::warn!(
                    "{} reported {} hits, reference reported {}",
                    strategy,
                    traversal.hits,
                    reference.hits
                );
            }
            StrategyResult {
                strategy,
                hits: traversal.hits,
                elapsed_ms: traversal.elapsed.as_secs_f64() * 1000.0,
                matches_reference,
            }
        })
        .collect();

    BenchReport {
        nrow: matrix.nrow(),
        ncol: matrix.ncol(),
        nnz: matrix.nnz(),
        reference_hits: reference.hits,
        results,
    }
}
