use crate::core::{Cursor, Index, PositionedList};
use crate::search::cached::LinearCursors;
use crate::search::{SecondarySearch, Strategy};

/// 线性扫描 + 全局最小值短路。
///
/// 没有任何游标的缓存值会低于 `global_minimum`，
/// 所以小于它的查询可以直接返回空结果。
pub struct ShortcircuitLinearSearch<'a> {
    inner: LinearCursors<'a>,
    global_minimum: Index,
}

impl<'a> ShortcircuitLinearSearch<'a> {
    pub fn new(lists: &'a [PositionedList<'a>], max_index: Index) -> Self {
        let inner = LinearCursors::new(lists, max_index);
        let global_minimum = inner.min_cached();
        Self {
            inner,
            global_minimum,
        }
    }

    pub fn global_minimum(&self) -> Index {
        self.global_minimum
    }

    pub fn cursors(&self) -> &[Cursor] {
        self.inner.cursors()
    }
}

impl SecondarySearch for ShortcircuitLinearSearch<'_> {
    fn search(&mut self, secondary: Index, on_hit: &mut dyn FnMut(usize, usize)) {
        if secondary < self.global_minimum {
            self.inner.note_query(secondary);
            return;
        }

        if self.inner.scan(secondary, on_hit) {
            // 命中的游标停在 secondary 上，其余游标都不小于它
            self.global_minimum = secondary;
        } else {
            // 最小值来源已被推走，只能全量重算
            self.global_minimum = self.inner.min_cached();
        }
    }

    fn strategy(&self) -> Strategy {
        Strategy::Shortcircuit
    }
}
