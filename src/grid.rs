//! Grid engine: tile ranks, free spots, spawning, gravity with merges, terminal states.

use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest rank a tile can reach (2^17 = 131072).
pub const MAX_RANK: u8 = 17;

/// Rank that counts as a win (2^11 = 2048).
pub const WIN_RANK: u8 = 11;

/// Longest mode name echoed back in an error message.
const MODE_ECHO_LIMIT: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid direction index: {0} (expected 0..4)")]
    InvalidDirection(usize),
    #[error("unknown spawn mode: {0}")]
    InvalidMode(String),
}

/// Edge the tiles fall toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Index order: 0 up, 1 down, 2 left, 3 right.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn from_index(index: usize) -> Result<Self, EngineError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(EngineError::InvalidDirection(index))
    }
}

/// Spawn-rank table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnMode {
    /// Opening tiles: always a 2.
    Start,
    /// 90% 2, 10% 4.
    #[default]
    Normal,
    /// 80% 2, 15% 4, 5% 64.
    Hell,
}

impl SpawnMode {
    /// Map a uniform draw `u` in [0, 1) to a tile rank.
    pub fn draw_rank(self, u: f64) -> u8 {
        match self {
            Self::Start => 1,
            Self::Normal => {
                if u <= 0.1 {
                    2
                } else {
                    1
                }
            }
            Self::Hell => {
                if u <= 0.05 {
                    6
                } else if u <= 0.2 {
                    2
                } else {
                    1
                }
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Normal => "normal",
            Self::Hell => "hell",
        }
    }
}

impl fmt::Display for SpawnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpawnMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "normal" => Ok(Self::Normal),
            "hell" => Ok(Self::Hell),
            other => {
                let mut echoed: String = other.chars().take(MODE_ECHO_LIMIT).collect();
                if other.chars().count() > MODE_ECHO_LIMIT {
                    echoed.push_str("...");
                }
                Err(EngineError::InvalidMode(echoed))
            }
        }
    }
}

/// Displayed value of a rank: 0 for an empty cell, otherwise 2^rank.
#[inline]
pub fn tile_value(rank: u8) -> u32 {
    if rank == 0 { 0 } else { 1 << rank }
}

/// Geometry of one pull: `lines` parallel lines of `len` cells each.
/// Depth 0 is the leading edge; `along` steps one cell away from it.
#[derive(Debug, Clone, Copy)]
struct Pull {
    lines: usize,
    len: usize,
    edge: isize,
    across: isize,
    along: isize,
}

impl Pull {
    fn new(direction: Direction, width: usize, height: usize) -> Self {
        let (w, h) = (width as isize, height as isize);
        match direction {
            Direction::Left => Self { lines: height, len: width, edge: 0, across: w, along: 1 },
            Direction::Right => Self { lines: height, len: width, edge: w - 1, across: w, along: -1 },
            Direction::Up => Self { lines: width, len: height, edge: 0, across: 1, along: w },
            Direction::Down => Self {
                lines: width,
                len: height,
                edge: (h - 1) * w,
                across: 1,
                along: -w,
            },
        }
    }

    #[inline]
    fn index(&self, line: usize, depth: usize) -> usize {
        (self.edge + line as isize * self.across + depth as isize * self.along) as usize
    }
}

/// Game grid. Cells are stored row-major; `free` shadows the rank-0 cells.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    /// Linear indices of empty cells. Ordered so seeded spawns replay identically.
    free: BTreeSet<usize>,
    score: u64,
    max_rank: u8,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        let (w, h) = (width.max(1) as usize, height.max(1) as usize);
        Self {
            width: w,
            height: h,
            cells: vec![0; w * h],
            free: (0..w * h).collect(),
            score: 0,
            max_rank: 0,
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

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn max_rank(&self) -> u8 {
        self.max_rank
    }

    /// Rank at (row, col); 0 when empty.
    #[inline]
    pub fn rank(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.width + col]
    }

    /// All ranks, row-major.
    pub fn ranks(&self) -> &[u8] {
        &self.cells
    }

    #[allow(dead_code)]
    pub fn free_spots(&self) -> &BTreeSet<usize> {
        &self.free
    }

    #[inline]
    pub fn is_free(&self, index: usize) -> bool {
        self.free.contains(&index)
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Full grid with no two orthogonally adjacent equal ranks that could still merge.
    pub fn is_lost(&self) -> bool {
        self.is_full() && !self.has_adjacent_pair()
    }

    pub fn is_won(&self) -> bool {
        self.max_rank >= WIN_RANK
    }

    fn has_adjacent_pair(&self) -> bool {
        (0..self.height).any(|row| {
            (0..self.width).any(|col| {
                let rank = self.rank(row, col);
                if rank >= MAX_RANK {
                    return false;
                }
                (col + 1 < self.width && self.rank(row, col + 1) == rank)
                    || (row + 1 < self.height && self.rank(row + 1, col) == rank)
            })
        })
    }

    /// Place up to `count` tiles on distinct free cells, ranks drawn from `mode`.
    /// Returns how many were placed; stops quietly once the grid is full.
    pub fn spawn<R: Rng + ?Sized>(&mut self, count: usize, mode: SpawnMode, rng: &mut R) -> usize {
        let count = count.min(self.free.len());
        for _ in 0..count {
            let pick = rng.random_range(0..self.free.len());
            let Some(&index) = self.free.iter().nth(pick) else {
                break;
            };
            let rank = mode.draw_rank(rng.random::<f64>());
            self.free.remove(&index);
            self.cells[index] = rank;
            self.max_rank = self.max_rank.max(rank);
        }
        count
    }

    /// Like [`Grid::apply_gravity`], with the direction given as an index (0 up, 1 down, 2 left, 3 right).
    #[allow(dead_code)]
    pub fn apply_gravity_index(&mut self, index: usize) -> Result<bool, EngineError> {
        let direction = Direction::from_index(index)?;
        Ok(self.apply_gravity(direction))
    }

    /// Pull every tile toward `direction` once, merging equal neighbours.
    /// A tile produced by a merge is not merged again in the same pull.
    /// Returns true if any cell changed.
    pub fn apply_gravity(&mut self, direction: Direction) -> bool {
        let pull = Pull::new(direction, self.width, self.height);
        let mut changed = false;
        for line in 0..pull.lines {
            let mut fused: Option<usize> = None;
            for depth in 1..pull.len {
                let from = pull.index(line, depth);
                if self.is_free(from) {
                    continue;
                }
                let rank = self.cells[from];

                let mut dest = depth;
                while dest > 0 && self.is_free(pull.index(line, dest - 1)) {
                    dest -= 1;
                }
                let at = pull.index(line, dest);
                if dest != depth {
                    self.cells.swap(from, at);
                    self.free.insert(from);
                    self.free.remove(&at);
                    changed = true;
                }

                if dest == 0 || fused == Some(dest - 1) || rank >= MAX_RANK {
                    continue;
                }
                let target = pull.index(line, dest - 1);
                if self.cells[target] == rank {
                    let merged = rank + 1;
                    self.cells[target] = merged;
                    self.cells[at] = 0;
                    self.free.insert(at);
                    self.score += u64::from(tile_value(merged));
                    self.max_rank = self.max_rank.max(merged);
                    fused = Some(dest - 1);
                    changed = true;
                }
            }
        }
        changed
    }

    /// Build a grid from row-major ranks.
    #[cfg(test)]
    pub fn from_ranks(width: u16, height: u16, ranks: &[u8]) -> Self {
        let mut grid = Self::new(width, height);
        assert_eq!(ranks.len(), grid.cells.len(), "rank count must match grid size");
        for (index, &rank) in ranks.iter().enumerate() {
            assert!(rank <= MAX_RANK, "rank {rank} out of range");
            grid.cells[index] = rank;
            if rank != 0 {
                grid.free.remove(&index);
            }
            grid.max_rank = grid.max_rank.max(rank);
        }
        grid
    }
}
