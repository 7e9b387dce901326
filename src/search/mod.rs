//! 增量多列表定位搜索。
//!
//! 给定 P 条严格递增的列表与一串严格递增的查询值，
//! 每次查询报告哪些列表包含该值以及所在位置。
//! 三种策略语义等价，只在内部簿记与复杂度上不同：
//!
//! - [`CachedLinearSearch`]：每次查询扫描全部游标，O(P)。
//! - [`ShortcircuitLinearSearch`]：额外维护全局最小值，查询低于它时整轮跳过。
//! - [`HeapScheduledSearch`]：最小堆调度 + 活跃集，只触碰与命中相邻的列表。
//!
//! ## 契约（重要）
//! - 查询值必须严格递增，且按单位步长逐一访问（0, 1, 2, ...）。
//!   违反时游标状态未定义；仅在 debug 构建中断言。
//! - 线性策略的 `max_index` 必须严格大于所有列表中的任一值。

pub mod cached;
pub mod heap;
pub mod shortcircuit;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Index, PositionedList};

pub use cached::CachedLinearSearch;
pub use heap::HeapScheduledSearch;
pub use shortcircuit::ShortcircuitLinearSearch;

/// 搜索策略抽象：一个会话内按递增顺序逐个喂入查询值。
pub trait SecondarySearch {
    /// 对每个命中调用一次 `on_hit(list_id, position)`。
    fn search(&mut self, secondary: Index, on_hit: &mut dyn FnMut(usize, usize));

    fn strategy(&self) -> Strategy;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Cached,
    Shortcircuit,
    Heap,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Cached, Strategy::Shortcircuit, Strategy::Heap];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Cached => "cached",
            Strategy::Shortcircuit => "shortcircuit",
            Strategy::Heap => "heap",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 策略工厂：按枚举构造，列表在会话期间被借用。
pub fn create_search<'a>(
    strategy: Strategy,
    lists: &'a [PositionedList<'a>],
    max_index: Index,
) -> Box<dyn SecondarySearch + 'a> {
    match strategy {
        Strategy::Cached => Box::new(CachedLinearSearch::new(lists, max_index)),
        Strategy::Shortcircuit => Box::new(ShortcircuitLinearSearch::new(lists, max_index)),
        Strategy::Heap => Box::new(HeapScheduledSearch::new(lists)),
    }
}
