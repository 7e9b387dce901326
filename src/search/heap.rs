use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::core::{Cursor, Index, PositionedList};
use crate::search::{SecondarySearch, Strategy};

/// 堆调度策略内部使用的列尾哨兵；堆里永远不会出现该值。
const PAST_END: Index = Index::MAX;

/// 最小堆调度搜索。
///
/// - 堆：非活跃且未耗尽的列表，每列至多一个 `(next_value, list_id)`。
/// - 活跃集：上一轮命中的列表，下一轮开头直接前进并复查，不经过堆。
///
/// 每轮开销 O(|上轮命中| + log P · |本轮出堆|)，命中稀疏时远低于 O(P)。
pub struct HeapScheduledSearch<'a> {
    lists: &'a [PositionedList<'a>],
    cursors: Vec<Cursor>,
    heap: BinaryHeap<Reverse<(Index, usize)>>,
    active: Vec<usize>,
    previous: Vec<usize>,
    last_query: Option<Index>,
}

impl<'a> HeapScheduledSearch<'a> {
    pub fn new(lists: &'a [PositionedList<'a>]) -> Self {
        let cursors: Vec<Cursor> = lists.iter().map(|l| Cursor::start(l, PAST_END)).collect();
        // 初始化扫描：每个非空列表的首元素入堆
        let heap = cursors
            .iter()
            .enumerate()
            .filter(|(id, c)| !c.is_past_end(&lists[*id]))
            .map(|(id, c)| Reverse((c.cached(), id)))
            .collect();
        Self {
            lists,
            cursors,
            heap,
            active: Vec::new(),
            previous: Vec::new(),
            last_query: None,
        }
    }

    /// 当前活跃集（上一轮的命中列表）。
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    /// 堆中待调度的 `(value, list_id)`，顺序未定义。
    pub fn pending(&self) -> impl Iterator<Item = (Index, usize)> + '_ {
        self.heap.iter().map(|Reverse(entry)| *entry)
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// 前进一步后把列表归位：命中进活跃集，否则回堆，耗尽则丢弃。
    fn reschedule(&mut self, id: usize, secondary: Index) {
        let list = &self.lists[id];
        let cursor = &mut self.cursors[id];
        let next = cursor.advance(list, PAST_END);
        if cursor.is_past_end(list) {
            return;
        }
        if next == secondary {
            self.active.push(id);
        } else {
            self.heap.push(Reverse((next, id)));
        }
    }
}

impl SecondarySearch for HeapScheduledSearch<'_> {
    fn search(&mut self, secondary: Index, on_hit: &mut dyn FnMut(usize, usize)) {
        debug_assert!(
            self.last_query.map_or(true, |last| secondary > last),
            "queries must be strictly increasing: {:?} then {}",
            self.last_query,
            secondary
        );
        self.last_query = Some(secondary);

        std::mem::swap(&mut self.active, &mut self.previous);
        self.active.clear();

        let previous = std::mem::take(&mut self.previous);
        for &id in &previous {
            self.reschedule(id, secondary);
        }
        self.previous = previous;

        while let Some(&Reverse((value, id))) = self.heap.peek() {
            if value > secondary {
                break;
            }
            self.heap.pop();
            if value == secondary {
                // 游标不动，下一轮开头再前进
                self.active.push(id);
            } else {
                // 单位步长下不会发生；与线性策略一样只前进一步再归位
                self.reschedule(id, secondary);
            }
        }

        for &id in &self.active {
            on_hit(id, self.cursors[id].position());
        }
    }

    fn strategy(&self) -> Strategy {
        Strategy::Heap
    }
}
