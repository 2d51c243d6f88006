mod vec_on_grid;

pub use vec_on_grid::VecOnGrid;

/// `Pos` は `Grid` に存在するページの位置を表す.
///
/// `x` は左から数えた列, `y` は上から数えた行. それぞれは必ず `Grid` の `width` と `height` 未満になる.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    x: u32,
    y: u32,
}

impl std::fmt::Debug for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Pos {
    fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

/// `RangePos` は `Grid` 上の全ページを列ごとに上から走査する `Iterator`.
pub struct RangePos {
    grid: Grid,
    x: u32,
    y: u32,
}

impl Iterator for RangePos {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.grid.height == 0 || self.grid.width <= self.x {
            return None;
        }
        let ret = Pos::new(self.x, self.y);
        self.y += 1;
        if self.grid.height <= self.y {
            self.x += 1;
            self.y = 0;
        }
        Some(ret)
    }
}

/// `Grid` はポスターをページに分ける時の分割グリッドを表す. `width` は横に並ぶページ数, `height` は縦に並ぶページ数. `Pos` はこれを介してのみ作成できる.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// ページの総数.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_pos_valid(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn pos(&self, x: u32, y: u32) -> Pos {
        debug_assert!(x < self.width);
        debug_assert!(y < self.height);
        Pos::new(x, y)
    }

    /// 全ページの位置をページ番号順に返す. 外側が列, 内側が行.
    pub fn all_pos(&self) -> RangePos {
        RangePos {
            grid: *self,
            x: 0,
            y: 0,
        }
    }

    /// 1 始まりのページ番号.
    pub fn page_number(&self, pos: Pos) -> usize {
        self.pos_as_index(pos) + 1
    }

    fn pos_as_index(&self, pos: Pos) -> usize {
        pos.x as usize * self.height as usize + pos.y as usize
    }
}

#[test]
fn test_all_pos_is_column_major() {
    let grid = Grid::new(3, 2);
    assert_eq!(
        grid.all_pos().map(|p| (p.x(), p.y())).collect::<Vec<_>>(),
        vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)],
    );
    assert_eq!(grid.len(), 6);
    assert_eq!(grid.page_number(grid.pos(0, 0)), 1);
    assert_eq!(grid.page_number(grid.pos(0, 1)), 2);
    assert_eq!(grid.page_number(grid.pos(2, 1)), 6);
    assert!(!grid.is_pos_valid(Pos::new(3, 0)));
}

#[test]
fn test_empty_grid() {
    assert_eq!(Grid::new(0, 4).all_pos().count(), 0);
    assert_eq!(Grid::new(4, 0).all_pos().count(), 0);
    assert!(Grid::new(4, 0).is_empty());
}
