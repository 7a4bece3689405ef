use super::cell::Cell;
use super::generator::MineGenerator;
use crate::state::SnapshotError;

/// Growable mine grid.
///
/// Cells are stored row-major in a single buffer so every row has exactly
/// `cols` cells by construction. Rows are only ever appended; the height
/// never exceeds `max_rows`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    max_rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Generates rows `0..initial_rows` (clamped to `max_rows`).
    pub fn generate(
        cols: u32,
        initial_rows: u32,
        max_rows: u32,
        generator: &mut dyn MineGenerator,
    ) -> Self {
        let rows = initial_rows.min(max_rows);
        Self {
            cols,
            rows,
            max_rows,
            cells: generator.generate_rows(0, rows, cols),
        }
    }

    /// Rebuilds a grid from persisted rows, rejecting any shape violation.
    pub fn from_rows(
        cols: u32,
        rows: Vec<Vec<Cell>>,
        max_rows: u32,
    ) -> Result<Self, SnapshotError> {
        if cols == 0 {
            return Err(SnapshotError::ZeroColumns);
        }
        if rows.is_empty() {
            return Err(SnapshotError::EmptyGrid);
        }
        let height = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        if height > max_rows {
            return Err(SnapshotError::TooManyRows {
                rows: height,
                max_rows,
            });
        }

        let mut cells = Vec::with_capacity(rows.len() * cols as usize);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols as usize {
                return Err(SnapshotError::RaggedRow {
                    row: index as u32,
                    len: row.len(),
                    cols,
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            cols,
            rows: height,
            max_rows,
            cells,
        })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    pub fn is_capped(&self) -> bool {
        self.rows >= self.max_rows
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.cols && (y as u32) < self.rows
    }

    /// Appends up to `extra_rows` generated rows without exceeding the cap.
    ///
    /// Returns the number of rows actually added; zero once capped.
    pub fn expand(&mut self, extra_rows: u32, generator: &mut dyn MineGenerator) -> u32 {
        let target = self.rows.saturating_add(extra_rows).min(self.max_rows);
        if target <= self.rows {
            return 0;
        }
        let added = target - self.rows;
        let fresh = generator.generate_rows(self.rows, target, self.cols);
        debug_assert_eq!(fresh.len(), added as usize * self.cols as usize);
        self.cells.extend(fresh);
        self.rows = target;
        added
    }

    /// Returns the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics when the coordinates are outside the grid; callers check
    /// bounds first.
    pub fn cell_at(&self, row: u32, col: u32) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn get(&self, row: u32, col: u32) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| self.cell_at(row, col))
    }

    /// Overwrites the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics when the coordinates are outside the grid.
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        let index = self.index(row, col);
        self.cells[index] = cell;
    }

    pub fn row(&self, row: u32) -> &[Cell] {
        let start = self.index(row, 0);
        &self.cells[start..start + self.cols as usize]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.cols as usize)
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(<[Cell]>::to_vec).collect()
    }

    fn index(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row as usize * self.cols as usize + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::UniformGenerator;

    fn coal_grid(rows: u32) -> Grid {
        Grid::generate(10, rows, 200, &mut UniformGenerator(Cell::COAL))
    }

    #[test]
    fn expand_appends_requested_rows() {
        let mut grid = coal_grid(15);
        let added = grid.expand(10, &mut UniformGenerator(Cell::GOLD));
        assert_eq!(added, 10);
        assert_eq!(grid.rows(), 25);
        assert_eq!(grid.cell_at(14, 9), Cell::COAL);
        assert_eq!(grid.cell_at(15, 0), Cell::GOLD);
        assert!(grid.iter_rows().all(|row| row.len() == 10));
    }

    #[test]
    fn expand_clamps_at_cap_then_noops() {
        let mut grid = coal_grid(195);
        assert_eq!(grid.expand(10, &mut UniformGenerator(Cell::Wall)), 5);
        assert_eq!(grid.rows(), 200);
        assert!(grid.is_capped());
        assert_eq!(grid.expand(10, &mut UniformGenerator(Cell::Wall)), 0);
        assert_eq!(grid.rows(), 200);
    }

    #[test]
    fn set_cell_mutates_one_position() {
        let mut grid = coal_grid(3);
        grid.set_cell(1, 4, Cell::Empty);
        assert_eq!(grid.cell_at(1, 4), Cell::Empty);
        assert_eq!(grid.cell_at(1, 3), Cell::COAL);
        assert_eq!(grid.row(1).iter().filter(|c| c.is_empty()).count(), 1);
    }

    #[test]
    fn bounds_checks() {
        let grid = coal_grid(15);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(9, 14));
        assert!(!grid.contains(10, 0));
        assert!(!grid.contains(0, 15));
        assert!(!grid.contains(-1, 3));
        assert_eq!(grid.get(15, 0), None);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_cell_access_panics() {
        coal_grid(2).cell_at(2, 0);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![vec![Cell::Wall; 4], vec![Cell::Wall; 3]];
        assert_eq!(
            Grid::from_rows(4, rows, 200),
            Err(SnapshotError::RaggedRow {
                row: 1,
                len: 3,
                cols: 4
            })
        );
        assert_eq!(
            Grid::from_rows(4, Vec::new(), 200),
            Err(SnapshotError::EmptyGrid)
        );
    }

    #[test]
    fn from_rows_round_trips_to_rows() {
        let grid = Grid::generate(6, 8, 200, &mut crate::mine::RandomGenerator::seeded(3));
        let rebuilt = Grid::from_rows(6, grid.to_rows(), 200).unwrap();
        assert_eq!(rebuilt, grid);
    }
}
