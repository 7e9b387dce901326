use crate::core::Index;

/// 一条主维度轨道（一列）：严格递增的次维度下标序列。
///
/// 只读视图，底层存储由调用方持有（通常是 `CompressedSparseColumn`），
/// 生命周期必须覆盖整个搜索会话。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionedList<'a> {
    values: &'a [Index],
}

impl<'a> PositionedList<'a> {
    pub fn new(values: &'a [Index]) -> Self {
        debug_assert!(
            values.windows(2).all(|w| w[0] < w[1]),
            "list must be strictly increasing"
        );
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Index> {
        self.values.get(position).copied()
    }

    /// 越界时返回哨兵，调用方统一用比较处理列尾。
    #[inline]
    pub fn value_or(&self, position: usize, sentinel: Index) -> Index {
        match self.values.get(position) {
            Some(&v) => v,
            None => sentinel,
        }
    }

    pub fn last(&self) -> Option<Index> {
        self.values.last().copied()
    }

    pub fn as_slice(&self) -> &'a [Index] {
        self.values
    }
}

impl<'a> From<&'a [Index]> for PositionedList<'a> {
    fn from(values: &'a [Index]) -> Self {
        Self::new(values)
    }
}

impl<'a> From<&'a Vec<Index>> for PositionedList<'a> {
    fn from(values: &'a Vec<Index>) -> Self {
        Self::new(values.as_slice())
    }
}

/// 从一组向量借出列表视图（测试与小规模调用方常用）。
pub fn lists_from(columns: &[Vec<Index>]) -> Vec<PositionedList<'_>> {
    columns.iter().map(PositionedList::from).collect()
}

/// 严格大于所有列表中任一值的最小哨兵。
pub fn min_sentinel(lists: &[PositionedList<'_>]) -> Index {
    lists
        .iter()
        .filter_map(|l| l.last())
        .max()
        .map(|m| m + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_or_returns_sentinel_past_end() {
        let data = vec![2, 5, 9];
        let list = PositionedList::from(&data);
        assert_eq!(list.value_or(0, 100), 2);
        assert_eq!(list.value_or(2, 100), 9);
        assert_eq!(list.value_or(3, 100), 100);
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn min_sentinel_covers_every_list() {
        let columns = vec![vec![1, 3], vec![], vec![0, 7]];
        let lists = lists_from(&columns);
        assert_eq!(min_sentinel(&lists), 8);
        assert_eq!(min_sentinel(&lists_from(&[vec![], vec![]])), 0);
    }
}
