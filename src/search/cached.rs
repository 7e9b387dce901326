use crate::core::{Cursor, Index, PositionedList};
use crate::search::{SecondarySearch, Strategy};

/// 每列一个游标的线性扫描状态，供两种线性策略共用。
pub(crate) struct LinearCursors<'a> {
    lists: &'a [PositionedList<'a>],
    cursors: Vec<Cursor>,
    max_index: Index,
    last_query: Option<Index>,
}

impl<'a> LinearCursors<'a> {
    pub(crate) fn new(lists: &'a [PositionedList<'a>], max_index: Index) -> Self {
        debug_assert!(
            lists.iter().filter_map(|l| l.last()).all(|v| v < max_index),
            "max_index must exceed every list value"
        );
        let cursors = lists.iter().map(|l| Cursor::start(l, max_index)).collect();
        Self {
            lists,
            cursors,
            max_index,
            last_query: None,
        }
    }

    /// 逐列比较并至多前进一步；返回本轮是否有命中。
    pub(crate) fn scan(&mut self, secondary: Index, on_hit: &mut dyn FnMut(usize, usize)) -> bool {
        self.note_query(secondary);

        let mut found = false;
        for (id, (cursor, list)) in self.cursors.iter_mut().zip(self.lists).enumerate() {
            let current = cursor.cached();
            if current > secondary {
                continue;
            }
            if current == secondary {
                on_hit(id, cursor.position());
                found = true;
                continue;
            }
            // 只窥视下一个元素，不做 seek
            if cursor.advance(list, self.max_index) == secondary {
                on_hit(id, cursor.position());
                found = true;
            }
        }
        found
    }

    pub(crate) fn note_query(&mut self, secondary: Index) {
        debug_assert!(
            self.last_query.map_or(true, |last| secondary > last),
            "queries must be strictly increasing: {:?} then {}",
            self.last_query,
            secondary
        );
        self.last_query = Some(secondary);
    }

    /// 所有游标缓存值的最小值（全部耗尽时为哨兵）。
    pub(crate) fn min_cached(&self) -> Index {
        self.cursors
            .iter()
            .map(Cursor::cached)
            .min()
            .unwrap_or(self.max_index)
    }

    pub(crate) fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }
}

/// 缓存线性扫描：每次查询都访问全部列表。
pub struct CachedLinearSearch<'a> {
    inner: LinearCursors<'a>,
}

impl<'a> CachedLinearSearch<'a> {
    pub fn new(lists: &'a [PositionedList<'a>], max_index: Index) -> Self {
        Self {
            inner: LinearCursors::new(lists, max_index),
        }
    }

    pub fn cursors(&self) -> &[Cursor] {
        self.inner.cursors()
    }
}

impl SecondarySearch for CachedLinearSearch<'_> {
    fn search(&mut self, secondary: Index, on_hit: &mut dyn FnMut(usize, usize)) {
        self.inner.scan(secondary, on_hit);
    }

    fn strategy(&self) -> Strategy {
        Strategy::Cached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lists_from;

    #[test]
    fn hit_without_advance_then_step_on_next_query() {
        let columns = vec![vec![0, 1, 4]];
        let lists = lists_from(&columns);
        let mut s = CachedLinearSearch::new(&lists, 5);

        let mut hits = Vec::new();
        s.search(0, &mut |l, p| hits.push((l, p)));
        assert_eq!(hits, vec![(0, 0)]);
        // 命中不前进
        assert_eq!(s.cursors()[0].position(), 0);

        hits.clear();
        s.search(1, &mut |l, p| hits.push((l, p)));
        assert_eq!(hits, vec![(0, 1)]);

        hits.clear();
        s.search(2, &mut |l, p| hits.push((l, p)));
        assert!(hits.is_empty());
        assert_eq!(s.cursors()[0].cached(), 4);
    }

    #[test]
    fn exhausted_cursor_holds_sentinel() {
        let columns = vec![vec![0], vec![1]];
        let lists = lists_from(&columns);
        let mut s = CachedLinearSearch::new(&lists, 3);
        let mut n = 0;
        for q in 0..3 {
            s.search(q, &mut |_, _| n += 1);
        }
        assert_eq!(n, 2);
        assert!(s.cursors().iter().all(|c| c.cached() == 3));
    }

    #[test]
    fn visits_in_list_id_order() {
        let columns = vec![vec![2], vec![0, 2], vec![1, 2]];
        let lists = lists_from(&columns);
        let mut s = CachedLinearSearch::new(&lists, 3);
        let mut ids = Vec::new();
        for q in 0..3 {
            s.search(q, &mut |l, _| {
                if q == 2 {
                    ids.push(l);
                }
            });
        }
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
