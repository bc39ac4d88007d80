//! Fixed-size cell grid with precomputed Moore neighborhoods.
//!
//! Cells live in a dense row-major vector and are addressed by [`CellId`].
//! Each cell's up-to-8 neighbors are computed once at construction; only the
//! color field ever changes afterwards.

use crate::color::Color;

/// Row-major cell index (`y * width + x`).
///
/// Ordering on `CellId` is ordering by `(y, x)`, which the engine uses as
/// its positional tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u32);

impl CellId {
    /// Sentinel for "no cell". Never a valid grid index, since grids hold at
    /// most `256³` cells.
    pub const VACANT: CellId = CellId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_vacant(self) -> bool {
        self.0 == u32::MAX
    }
}

/// Up to 8 neighbor ids stored inline.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    ids: [CellId; 8],
    len: u8,
}

impl Neighbors {
    fn new() -> Self {
        Self {
            ids: [CellId::VACANT; 8],
            len: 0,
        }
    }

    fn push(&mut self, id: CellId) {
        self.ids[self.len as usize] = id;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[CellId] {
        &self.ids[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A single grid cell.
#[derive(Debug, Clone)]
pub struct Cell {
    x: u32,
    y: u32,
    color: Option<Color>,
    neighbors: Neighbors,
}

impl Cell {
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Assigned color, `None` while empty.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }

    /// Moore neighborhood, clipped at the grid edges, self excluded.
    #[inline]
    pub fn neighbors(&self) -> &[CellId] {
        self.neighbors.as_slice()
    }
}

/// Dense `width x height` grid of cells.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    filled: usize,
}

impl Grid {
    /// Allocate an empty grid and precompute every neighborhood.
    ///
    /// Dimension validation belongs to the caller; see
    /// [`EngineConfig::validate`](crate::EngineConfig::validate).
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let mut neighbors = Neighbors::new();
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                            continue;
                        }
                        neighbors.push(CellId::new((ny as u32) * width + nx as u32));
                    }
                }
                cells.push(Cell {
                    x,
                    y,
                    color: None,
                    neighbors,
                });
            }
        }

        Self {
            width,
            height,
            cells,
            filled: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells holding a color.
    #[inline]
    pub fn filled(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    /// Id of the cell at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn id_at(&self, x: u32, y: u32) -> Option<CellId> {
        (x < self.width && y < self.height).then(|| CellId::new(y * self.width + x))
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Color at `(x, y)`; `None` when empty or out of bounds.
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        self.id_at(x, y).and_then(|id| self.cell(id).color)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Designated first cell: the midpoint `(width / 2, height / 2)`.
    #[inline]
    pub fn seed_cell(&self) -> CellId {
        CellId::new((self.height / 2) * self.width + self.width / 2)
    }

    /// Write a color into an empty cell. Returns `false` if the cell was
    /// already filled, leaving it untouched.
    pub(crate) fn fill(&mut self, id: CellId, color: Color) -> bool {
        let cell = &mut self.cells[id.index()];
        if cell.color.is_some() {
            return false;
        }
        cell.color = Some(color);
        self.filled += 1;
        true
    }

    /// Reset every cell to empty. Cells and neighbor lists are kept.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.color = None;
        }
        self.filled = 0;
    }

    /// `true` if `id` is empty and touches at least one filled cell.
    pub fn is_frontier_candidate(&self, id: CellId) -> bool {
        let cell = self.cell(id);
        cell.is_empty()
            && cell
                .neighbors()
                .iter()
                .any(|&n| !self.cell(n).is_empty())
    }

    /// Row-major RGB bytes, 3 per cell. Empty cells are written as black.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|cell| cell.color.unwrap_or(Color::BLACK).to_bytes())
            .collect()
    }

    /// Row-major colors; `None` for empty cells.
    pub fn colors(&self) -> Vec<Option<Color>> {
        self.cells.iter().map(|cell| cell.color).collect()
    }
}
