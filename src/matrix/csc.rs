use crate::core::{Index, PositionedList};
use crate::error::{Error, Result};

/// 压缩稀疏列（CSC）矩阵。
///
/// 第 `c` 列的行下标位于 `row_indices[indptrs[c]..indptrs[c + 1]]`，严格递增。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompressedSparseColumn {
    nrow: usize,
    ncol: usize,
    values: Vec<f64>,
    row_indices: Vec<Index>,
    indptrs: Vec<usize>,
}

fn checked_nrow(nrow: usize) -> Result<Index> {
    // nrow 本身充当哨兵，必须能用 Index 表示
    Index::try_from(nrow).map_err(|_| Error::TooManyRows { nrow })
}

impl CompressedSparseColumn {
    /// 由 (row, col, value) 三元组构建；输入顺序任意，重复坐标报错。
    pub fn from_triplets(
        nrow: usize,
        ncol: usize,
        rows: &[usize],
        cols: &[usize],
        values: &[f64],
    ) -> Result<Self> {
        checked_nrow(nrow)?;
        if rows.len() != cols.len() || rows.len() != values.len() {
            return Err(Error::TripletLengthMismatch {
                rows: rows.len(),
                cols: cols.len(),
                values: values.len(),
            });
        }
        if let Some((&row, &col)) = rows
            .iter()
            .zip(cols)
            .find(|&(&r, &c)| r >= nrow || c >= ncol)
        {
            return Err(Error::TripletOutOfBounds { row, col, nrow, ncol });
        }

        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_unstable_by_key(|&i| (cols[i], rows[i]));

        if let Some(w) = order
            .windows(2)
            .find(|w| cols[w[0]] == cols[w[1]] && rows[w[0]] == rows[w[1]])
        {
            return Err(Error::DuplicateEntry {
                row: rows[w[0]],
                col: cols[w[0]],
            });
        }

        let mut indptrs = vec![0usize; ncol + 1];
        for &c in cols {
            indptrs[c + 1] += 1;
        }
        for c in 0..ncol {
            indptrs[c + 1] += indptrs[c];
        }

        // rows[i] < nrow <= Index::MAX，转换不会截断
        let row_indices = order.iter().map(|&i| rows[i] as Index).collect();
        let values = order.iter().map(|&i| values[i]).collect();

        Ok(Self {
            nrow,
            ncol,
            values,
            row_indices,
            indptrs,
        })
    }

    /// 由已排好序的逐列数据拼接（生成器使用）。
    pub(crate) fn from_columns(nrow: usize, columns: Vec<(Vec<Index>, Vec<f64>)>) -> Result<Self> {
        checked_nrow(nrow)?;
        let ncol = columns.len();
        let nnz = columns.iter().map(|(r, _)| r.len()).sum();

        let mut indptrs = Vec::with_capacity(ncol + 1);
        let mut row_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        indptrs.push(0);
        for (rows, vals) in columns {
            debug_assert_eq!(rows.len(), vals.len());
            debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
            row_indices.extend(rows);
            values.extend(vals);
            indptrs.push(row_indices.len());
        }

        Ok(Self {
            nrow,
            ncol,
            values,
            row_indices,
            indptrs,
        })
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    pub fn nnz(&self) -> usize {
        self.row_indices.len()
    }

    pub fn indptrs(&self) -> &[usize] {
        &self.indptrs
    }

    pub fn column(&self, c: usize) -> &[Index] {
        &self.row_indices[self.indptrs[c]..self.indptrs[c + 1]]
    }

    pub fn column_values(&self, c: usize) -> &[f64] {
        &self.values[self.indptrs[c]..self.indptrs[c + 1]]
    }

    pub fn value_at(&self, c: usize, position: usize) -> Option<f64> {
        self.column_values(c).get(position).copied()
    }

    /// 行数即哨兵：严格大于任何行下标。
    pub fn max_index(&self) -> Index {
        // 构造时已校验
        self.nrow as Index
    }

    /// 每列一个只读列表视图，按列号排列。
    pub fn lists(&self) -> Vec<PositionedList<'_>> {
        (0..self.ncol)
            .map(|c| PositionedList::new(self.column(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triplets_are_sorted_into_columns() {
        // 3 x 3，故意乱序
        let rows = [2, 0, 1, 0, 2];
        let cols = [0, 2, 0, 0, 1];
        let vals = [1.0, 2.0, 3.0, 4.0, 5.0];
        let m = CompressedSparseColumn::from_triplets(3, 3, &rows, &cols, &vals).unwrap();

        assert_eq!(m.nnz(), 5);
        assert_eq!(m.indptrs(), &[0, 3, 4, 5]);
        assert_eq!(m.column(0), &[0, 1, 2]);
        assert_eq!(m.column_values(0), &[4.0, 3.0, 1.0]);
        assert_eq!(m.column(1), &[2]);
        assert_eq!(m.column(2), &[0]);
        assert_eq!(m.value_at(2, 0), Some(2.0));
        assert_eq!(m.value_at(2, 1), None);
        assert_eq!(m.max_index(), 3);
    }

    #[test]
    fn empty_columns_yield_empty_lists() {
        let m = CompressedSparseColumn::from_triplets(4, 3, &[1], &[1], &[0.5]).unwrap();
        let lists = m.lists();
        assert_eq!(lists.len(), 3);
        assert!(lists[0].is_empty());
        assert_eq!(lists[1].as_slice(), &[1]);
        assert!(lists[2].is_empty());
    }

    #[test]
    fn rejects_bad_triplets() {
        assert!(matches!(
            CompressedSparseColumn::from_triplets(2, 2, &[0, 1], &[0], &[1.0, 2.0]),
            Err(Error::TripletLengthMismatch { .. })
        ));
        assert!(matches!(
            CompressedSparseColumn::from_triplets(2, 2, &[2], &[0], &[1.0]),
            Err(Error::TripletOutOfBounds { row: 2, col: 0, .. })
        ));
        assert!(matches!(
            CompressedSparseColumn::from_triplets(2, 2, &[1, 1], &[1, 1], &[1.0, 2.0]),
            Err(Error::DuplicateEntry { row: 1, col: 1 })
        ));
    }

    #[test]
    fn from_columns_matches_from_triplets() {
        let a = CompressedSparseColumn::from_columns(
            3,
            vec![(vec![0, 2], vec![1.0, 2.0]), (vec![], vec![]), (vec![1], vec![3.0])],
        )
        .unwrap();
        let b = CompressedSparseColumn::from_triplets(3, 3, &[0, 2, 1], &[0, 0, 2], &[1.0, 2.0, 3.0])
            .unwrap();
        assert_eq!(a, b);
    }
}
