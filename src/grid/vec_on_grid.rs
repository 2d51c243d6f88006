use std::ops;

use super::{Grid, Pos};

/// `VecOnGrid` は `Grid` 上の `Pos` に対応付けた値を格納し `Pos` でアクセスできるコンテナを提供する.
///
/// 要素はページ番号順に並ぶ.
#[derive(Clone, PartialEq, Eq)]
pub struct VecOnGrid<T> {
    vec: Vec<T>,
    grid: Grid,
}

impl<T> VecOnGrid<T> {
    /// ページ番号順に `f` を呼んで要素を作る. `f` が失敗したらそこで止める.
    pub fn try_from_fn<E>(grid: Grid, mut f: impl FnMut(Pos) -> Result<T, E>) -> Result<Self, E> {
        let vec = grid.all_pos().map(&mut f).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { vec, grid })
    }

    #[cfg(test)]
    pub(crate) fn from_vec(grid: Grid, vec: Vec<T>) -> Option<Self> {
        if vec.len() != grid.len() {
            return None;
        }

        Some(Self { grid, vec })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// 要素にアクセスする.
    pub fn get(&self, pos: Pos) -> Option<&T> {
        if !self.grid.is_pos_valid(pos) {
            return None;
        }
        self.vec.get(self.grid.pos_as_index(pos))
    }

    /// 借用のイテレータを作る.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.into_iter()
    }

    /// 各 Pos のタプルとなるイテレータを作る.
    pub fn iter_with_pos(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.grid.all_pos().zip(self.iter())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for VecOnGrid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "[")?;
            for y in 0..self.grid.height() {
                write!(f, "    ")?;
                for x in 0..self.grid.width() {
                    if x != 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", self[self.grid.pos(x, y)])?;
                }
                writeln!(f)?;
            }
            write!(f, "]")
        } else {
            self.vec.fmt(f)
        }
    }
}

impl<'a, T> std::iter::IntoIterator for &'a VecOnGrid<T> {
    type Item = &'a T;

    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

impl<T> ops::Index<Pos> for VecOnGrid<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        &self.vec[self.grid.pos_as_index(index)]
    }
}

#[test]
fn test_index_follows_page_order() {
    let grid = Grid::new(2, 3);
    let vec = VecOnGrid::from_vec(grid, (1..=6).collect::<Vec<_>>()).unwrap();
    assert_eq!(vec[grid.pos(0, 2)], 3);
    assert_eq!(vec[grid.pos(1, 0)], 4);
    assert_eq!(vec.get(grid.pos(1, 2)), Some(&6));
    for (pos, n) in vec.iter_with_pos() {
        assert_eq!(grid.page_number(pos), *n);
    }
    assert_eq!(format!("{:#?}", vec), "[\n    1 4\n    2 5\n    3 6\n]");

    assert!(VecOnGrid::from_vec(grid, vec![0; 5]).is_none());

    let failed = VecOnGrid::try_from_fn(grid, |pos| {
        if grid.page_number(pos) < 4 {
            Ok(pos)
        } else {
            Err(grid.page_number(pos))
        }
    });
    assert_eq!(failed, Err(4));
}
