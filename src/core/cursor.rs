use crate::core::{Index, PositionedList};

/// 单列游标：当前位置 + 该位置上的值。
///
/// 越过列尾时 `cached` 被置为哨兵（严格大于任何真实值），
/// 这样所有分支都只需做整数比较，不必单独判断列尾。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    cached: Index,
}

impl Cursor {
    /// 定位到列首。
    pub fn start(list: &PositionedList<'_>, sentinel: Index) -> Self {
        Self {
            position: 0,
            cached: list.value_or(0, sentinel),
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn cached(&self) -> Index {
        self.cached
    }

    #[inline]
    pub fn is_past_end(&self, list: &PositionedList<'_>) -> bool {
        self.position >= list.len()
    }

    /// 前进一步并返回新值（列尾则返回哨兵）。已在列尾时保持不动。
    #[inline]
    pub fn advance(&mut self, list: &PositionedList<'_>, sentinel: Index) -> Index {
        if self.position < list.len() {
            self.position += 1;
        }
        self.cached = list.value_or(self.position, sentinel);
        self.cached
    }
}
