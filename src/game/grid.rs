//! Square grid of cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Cell, FactionId};

/// A coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Get orthogonal neighbors in the order up, right, down, left.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, size: u16) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.y > 0 {
            result[count as usize] = Coord::new(self.x, self.y - 1); // up
            count += 1;
        }
        if self.x < size.saturating_sub(1) {
            result[count as usize] = Coord::new(self.x + 1, self.y); // right
            count += 1;
        }
        if self.y < size.saturating_sub(1) {
            result[count as usize] = Coord::new(self.x, self.y + 1); // down
            count += 1;
        }
        if self.x > 0 {
            result[count as usize] = Coord::new(self.x - 1, self.y); // left
            count += 1;
        }

        (result, count)
    }

    /// Whether two coordinates share an edge.
    #[must_use]
    pub const fn is_adjacent_to(&self, other: Coord) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The game board: `size * size` cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Side length.
    size: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of fresh unowned cells.
    ///
    /// Returns `None` if `size` is zero.
    #[must_use]
    pub fn new(size: u16) -> Option<Self> {
        if size == 0 {
            return None;
        }

        let cells = (0..size)
            .flat_map(|y| (0..size).map(move |x| Cell::new(Coord::new(x, y))))
            .collect();

        Some(Self { size, cells })
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// All cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if a coordinate is within the grid.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.size) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Bounds-checked lookup; out-of-range coordinates yield `None`.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.coord_to_index(coord).map(|idx| &self.cells[idx])
    }

    /// Mutable bounds-checked lookup.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.coord_to_index(coord).map(|idx| &mut self.cells[idx])
    }

    /// Mutable access to two distinct cells at once.
    ///
    /// Returns `None` if either coordinate is out of bounds or both are equal.
    #[must_use]
    pub fn get_pair_mut(&mut self, a: Coord, b: Coord) -> Option<(&mut Cell, &mut Cell)> {
        let ia = self.coord_to_index(a)?;
        let ib = self.coord_to_index(b)?;
        match ia.cmp(&ib) {
            std::cmp::Ordering::Less => {
                let (head, tail) = self.cells.split_at_mut(ib);
                Some((&mut head[ia], &mut tail[0]))
            }
            std::cmp::Ordering::Greater => {
                let (head, tail) = self.cells.split_at_mut(ia);
                Some((&mut tail[0], &mut head[ib]))
            }
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Existing orthogonal neighbors of `coord`, ordered up, right, down, left.
    #[must_use]
    pub fn adjacent_cells(&self, coord: Coord) -> Vec<&Cell> {
        if !self.in_bounds(coord) {
            return Vec::new();
        }
        let (adjacent, count) = coord.adjacent(self.size);
        adjacent[..count as usize]
            .iter()
            .filter_map(|c| self.get(*c))
            .collect()
    }

    /// All cells owned by a faction, in row-major order.
    pub fn cells_by_faction(&self, faction: FactionId) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |cell| cell.is_owned_by(faction))
    }

    /// Mutable iterator over every owned cell.
    pub fn owned_cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().filter(|cell| cell.owner().is_some())
    }

    /// Number of cells a faction owns.
    #[must_use]
    pub fn count_cells(&self, faction: FactionId) -> usize {
        self.cells_by_faction(faction).count()
    }

    /// Sum of population over a faction's cells.
    #[must_use]
    pub fn total_population(&self, faction: FactionId) -> u32 {
        self.cells_by_faction(faction)
            .map(Cell::population)
            .fold(0, u32::saturating_add)
    }

    /// Sum of troops over a faction's cells.
    #[must_use]
    pub fn total_troops(&self, faction: FactionId) -> u32 {
        self.cells_by_faction(faction)
            .map(Cell::troops)
            .fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_adjacent_order() {
        let (adj, count) = Coord::new(5, 5).adjacent(10);
        assert_eq!(count, 4);
        assert_eq!(
            adj,
            [
                Coord::new(5, 4),
                Coord::new(6, 5),
                Coord::new(5, 6),
                Coord::new(4, 5)
            ]
        );
    }

    #[test]
    fn test_coord_adjacent_corner() {
        let (adj, count) = Coord::new(0, 0).adjacent(10);
        assert_eq!(count, 2);
        assert_eq!(&adj[..2], &[Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn test_grid_zero_size() {
        assert!(Grid::new(0).is_none());
    }

    #[test]
    fn test_grid_row_major_layout() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.cells().len(), 9);
        assert_eq!(grid.cells()[5].coord(), Coord::new(2, 1));
        assert_eq!(grid.get(Coord::new(2, 1)).unwrap().coord(), Coord::new(2, 1));
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(4).unwrap();
        assert!(grid.get(Coord::new(3, 3)).is_some());
        assert!(grid.get(Coord::new(4, 0)).is_none());
        assert!(grid.get(Coord::new(0, 4)).is_none());
    }

    #[test]
    fn test_adjacent_counts() {
        let grid = Grid::new(5).unwrap();
        assert_eq!(grid.adjacent_cells(Coord::new(0, 0)).len(), 2);
        assert_eq!(grid.adjacent_cells(Coord::new(4, 4)).len(), 2);
        assert_eq!(grid.adjacent_cells(Coord::new(2, 0)).len(), 3);
        assert_eq!(grid.adjacent_cells(Coord::new(0, 2)).len(), 3);
        assert_eq!(grid.adjacent_cells(Coord::new(2, 2)).len(), 4);
        assert!(grid.adjacent_cells(Coord::new(9, 9)).is_empty());
    }

    #[test]
    fn test_cells_by_faction_scan_order() {
        let mut grid = Grid::new(4).unwrap();
        grid.get_mut(Coord::new(3, 2)).unwrap().assign_to(1);
        grid.get_mut(Coord::new(1, 0)).unwrap().assign_to(1);
        grid.get_mut(Coord::new(0, 3)).unwrap().assign_to(0);

        let coords: Vec<_> = grid.cells_by_faction(1).map(Cell::coord).collect();
        assert_eq!(coords, vec![Coord::new(1, 0), Coord::new(3, 2)]);
        assert_eq!(grid.count_cells(0), 1);
        assert_eq!(grid.total_population(1), 10);
    }

    #[test]
    fn test_get_pair_mut() {
        let mut grid = Grid::new(3).unwrap();
        let (a, b) = grid
            .get_pair_mut(Coord::new(2, 2), Coord::new(0, 0))
            .unwrap();
        a.set_troops(7);
        b.set_troops(3);
        assert_eq!(grid.get(Coord::new(2, 2)).unwrap().troops(), 7);
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap().troops(), 3);
        assert!(grid.get_pair_mut(Coord::new(1, 1), Coord::new(1, 1)).is_none());
    }

    #[test]
    fn test_is_adjacent_to() {
        assert!(Coord::new(1, 1).is_adjacent_to(Coord::new(1, 2)));
        assert!(!Coord::new(1, 1).is_adjacent_to(Coord::new(2, 2)));
        assert!(!Coord::new(1, 1).is_adjacent_to(Coord::new(1, 1)));
    }
}
