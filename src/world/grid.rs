//! Tile grid the rays march through.
//!
//! Row-major arena with fixed bounds.  A cell value of [`OPEN`] means
//! walkable space; anything else is the material id of a solid wall tile.
//! Everything outside the bounds is open as well.

use std::{fs, io, path::Path};

use glam::IVec2;
use thiserror::Error;

/// Wall material; selects the wall texture.
pub type MaterialId = u8;

/// Sentinel for walkable cells.
pub const OPEN: MaterialId = 0;

/// Material reported by a ray that never reached a wall.
pub const DEFAULT_MATERIAL: MaterialId = 1;

/// The built-in level (16×9).
const DEFAULT_LEVEL: [[MaterialId; 16]; 9] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 3, 3, 3],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3],
    [1, 0, 0, 2, 2, 2, 2, 0, 0, 0, 5, 5, 5, 0, 0, 3],
    [1, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 5, 0, 0, 3],
    [1, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 5, 0, 0, 3],
    [1, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 3],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3],
    [1, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 3],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 3, 3],
];

/// Errors raised while building a map.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("map has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {ch:?} at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },
}

/// Immutable tile map (one per level).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<MaterialId>,
}

impl GridMap {
    /// Build from a rectangular matrix; zero entries are open.
    pub fn from_rows<R: AsRef<[MaterialId]>>(rows: &[R]) -> Result<Self, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().len();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        if width == 0 {
            return Err(MapError::Empty);
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Parse the plain-text level format.
    ///
    /// ```text
    /// 1111
    /// 1..2
    /// 1111
    /// ```
    ///
    /// Digits `1`–`9` are walls of that material; `.`, `_`, `0` and spaces
    /// are open.  Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let row = rows.len();
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '.' | '_' | ' ' | '0' => Ok(OPEN),
                    '1'..='9' => Ok(ch as u8 - b'0'),
                    _ => Err(MapError::BadCell { row, col, ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        Self::from_rows(&rows)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let map = Self::parse(&fs::read_to_string(path.as_ref())?)?;
        tracing::info!(
            path = %path.as_ref().display(),
            width = map.width,
            height = map.height,
            "map loaded"
        );
        Ok(map)
    }

    pub fn default_level() -> Self {
        Self {
            width: DEFAULT_LEVEL[0].len(),
            height: DEFAULT_LEVEL.len(),
            cells: DEFAULT_LEVEL.iter().flatten().copied().collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Material of the wall at `(col, row)`, or `None` for open space.
    #[inline]
    pub fn lookup(&self, col: i32, row: i32) -> Option<MaterialId> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        match self.cells[row as usize * self.width + col as usize] {
            OPEN => None,
            m => Some(m),
        }
    }

    #[inline]
    pub fn is_open(&self, col: i32, row: i32) -> bool {
        self.lookup(col, row).is_none()
    }

    /// Every wall tile in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = (IVec2, MaterialId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, &m)| {
            (m != OPEN).then(|| {
                (
                    IVec2::new((i % self.width) as i32, (i / self.width) as i32),
                    m,
                )
            })
        })
    }
}

impl Default for GridMap {
    fn default() -> Self {
        Self::default_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cells_are_open() {
        let rows: [[MaterialId; 3]; 2] = [[1, 0, 2], [0, 0, 0]];
        let map = GridMap::from_rows(&rows).unwrap();
        assert_eq!(map.lookup(0, 0), Some(1));
        assert_eq!(map.lookup(1, 0), None);
        assert_eq!(map.lookup(2, 0), Some(2));
        assert!(map.is_open(1, 1));
    }

    #[test]
    fn out_of_bounds_is_open() {
        let rows: [[MaterialId; 2]; 2] = [[1, 1], [1, 1]];
        let map = GridMap::from_rows(&rows).unwrap();
        assert_eq!(map.lookup(-1, 0), None);
        assert_eq!(map.lookup(0, 2), None);
        assert_eq!(map.lookup(i32::MAX, i32::MIN), None);
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows: Vec<Vec<MaterialId>> = vec![vec![1, 1, 1], vec![1, 1]];
        match GridMap::from_rows(&rows) {
            Err(MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2,
            }) => {}
            other => panic!("unexpected {other:?}"),
        }
        let empty: [[MaterialId; 0]; 0] = [];
        assert!(matches!(GridMap::from_rows(&empty), Err(MapError::Empty)));
    }

    #[test]
    fn parse_text_level() {
        let map = GridMap::parse("# test\n1112\n1..2\n\n1_32\n").unwrap();
        assert_eq!((map.width(), map.height()), (4, 3));
        assert_eq!(map.lookup(3, 0), Some(2));
        assert_eq!(map.lookup(1, 1), None);
        assert_eq!(map.lookup(1, 2), None);
        assert_eq!(map.lookup(2, 2), Some(3));

        let err = GridMap::parse("11\n1x\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::BadCell {
                row: 1,
                col: 1,
                ch: 'x'
            }
        ));
    }

    #[test]
    fn default_level_layout() {
        let map = GridMap::default_level();
        assert_eq!((map.width(), map.height()), (16, 9));
        assert_eq!(map.lookup(13, 0), Some(3));
        assert_eq!(map.lookup(10, 2), Some(5));
        // viewer start tile is walkable
        assert!(map.is_open(1, 5));
        assert_eq!(map.walls().count(), map.cells.iter().filter(|&&m| m != OPEN).count());
    }
}
