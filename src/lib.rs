//! Best placement of an axis-aligned square over weighted grid targets.
//!
//! Target values are folded onto a dense grid, the grid is turned in place
//! into a 2D prefix-sum table, and every window position is then scored with
//! four corner lookups. Only targets strictly inside the square count.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::{FromStr, SplitWhitespace};

use gridly::prelude::*;
use gridly_grids::VecGrid;
use rayon::prelude::*;

/// Largest coordinate (and window side) the grid supports.
pub const GRID_CAPACITY: isize = 5000;

/// Array extent: capacity plus the zero sentinel at index 0 plus slack.
pub const GRID_EXTENT: isize = GRID_CAPACITY + 5;

/// Most targets a single problem may contain.
pub const MAX_TARGETS: usize = 10_000;

/// Largest value a single target may carry.
pub const MAX_VALUE: i64 = 99;

/// One weighted point on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub x: isize,
    pub y: isize,
    pub value: i64,
}

/// A parsed, validated problem: the window side and the targets to cover.
#[derive(Debug, Clone)]
pub struct Problem {
    pub window: isize,
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    UnexpectedEnd { field: &'static str },
    MalformedToken { field: &'static str, token: String },
    CountOutOfRange { count: i64 },
    WindowOutOfRange { window: i64 },
    CoordinateOutOfRange { axis: &'static str, coordinate: i64 },
    ValueOutOfRange { value: i64 },
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            InputError::UnexpectedEnd { field } => {
                write!(f, "ran out of input while reading {}", field)
            }
            InputError::MalformedToken { field, token } => {
                write!(f, "failed to parse {} from {:?}", field, token)
            }
            InputError::CountOutOfRange { count } => {
                write!(f, "target count {} outside 1..={}", count, MAX_TARGETS)
            }
            InputError::WindowOutOfRange { window } => {
                write!(f, "window side {} outside 1..={}", window, GRID_CAPACITY)
            }
            InputError::CoordinateOutOfRange { axis, coordinate } => {
                write!(f, "{} coordinate {} outside 0..={}", axis, coordinate, GRID_CAPACITY)
            }
            InputError::ValueOutOfRange { value } => {
                write!(f, "target value {} outside 1..={}", value, MAX_VALUE)
            }
        }
    }
}

impl Error for InputError {}

struct Tokens<'a>(SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn int(&mut self, field: &'static str) -> Result<i64, InputError> {
        let token = self
            .0
            .next()
            .ok_or(InputError::UnexpectedEnd { field })?;

        token.parse().map_err(|_| InputError::MalformedToken {
            field,
            token: token.to_string(),
        })
    }

    fn coordinate(&mut self, axis: &'static str) -> Result<isize, InputError> {
        let coordinate = self.int(axis)?;

        if coordinate < 0 || coordinate > GRID_CAPACITY as i64 {
            return Err(InputError::CoordinateOutOfRange { axis, coordinate });
        }

        Ok(coordinate as isize)
    }
}

impl FromStr for Problem {
    type Err = InputError;

    /// Parses `n m` followed by `n` triples of `x y value`, validating every
    /// range before any grid exists. Tokens past the final triple are
    /// ignored.
    fn from_str(input: &str) -> Result<Self, InputError> {
        let mut tokens = Tokens(input.split_whitespace());

        let count = tokens.int("n")?;
        if count < 1 || count > MAX_TARGETS as i64 {
            return Err(InputError::CountOutOfRange { count });
        }

        let window = tokens.int("m")?;
        if window < 1 || window > GRID_CAPACITY as i64 {
            return Err(InputError::WindowOutOfRange { window });
        }

        let targets = (0..count)
            .map(|_| {
                let x = tokens.coordinate("x")?;
                let y = tokens.coordinate("y")?;

                let value = tokens.int("value")?;
                if value < 1 || value > MAX_VALUE {
                    return Err(InputError::ValueOutOfRange { value });
                }

                Ok(Target { x, y, value })
            })
            .collect::<Result<Vec<Target>, InputError>>()?;

        Ok(Problem {
            window: window as isize,
            targets,
        })
    }
}

/// Folds the targets onto a fresh zeroed grid of the given extent. Targets
/// land at `(x + 1, y + 1)`, leaving row and column 0 as the all-zero base
/// case for the prefix sums; targets sharing a coordinate add up.
pub fn accumulate(targets: &[Target], extent: isize) -> VecGrid<i64> {
    let mut grid = VecGrid::new(Rows(extent) + Columns(extent)).unwrap();

    for target in targets {
        grid[(Row(target.x + 1), Column(target.y + 1))] += target.value;
    }

    grid
}

/// Transforms the accumulator in place into a 2D prefix-sum table: each cell
/// becomes the total value in the rectangle from the origin to that cell.
/// Row-major order so every cell's three neighbors are already final.
pub fn build_prefix_sums(grid: &mut VecGrid<i64>) {
    let Rows(rows) = grid.num_rows();
    let Columns(columns) = grid.num_columns();

    for row in 1..rows {
        for column in 1..columns {
            let above = grid[(Row(row - 1), Column(column))];
            let left = grid[(Row(row), Column(column - 1))];
            let diagonal = grid[(Row(row - 1), Column(column - 1))];

            grid[(Row(row), Column(column))] += above + left - diagonal;
        }
    }
}

/// Scores every window placement against the prefix-sum table and returns
/// the best total, or 0 when nothing fits.
///
/// Each placement spans a full `window` grid steps, not `window - 1`: the
/// square sits anywhere on the plane, so it can always shift by an
/// infinitesimal amount to drop targets on its boundary while keeping the
/// strictly-interior ones. Targets exactly `window` apart can never share a
/// placement; anything inside an open `window`-wide span can.
pub fn scan_windows(table: &VecGrid<i64>, window: isize) -> i64 {
    let Rows(rows) = table.num_rows();
    let Columns(columns) = table.num_columns();

    (window..rows)
        .into_par_iter()
        .map(|row| {
            (window..columns)
                .map(|column| {
                    table[(Row(row), Column(column))]
                        - table[(Row(row - window), Column(column))]
                        - table[(Row(row), Column(column - window))]
                        + table[(Row(row - window), Column(column - window))]
                })
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
}

/// Runs the three phases at full extent and returns the answer.
pub fn best_window_value(problem: &Problem) -> i64 {
    let mut grid = accumulate(&problem.targets, GRID_EXTENT);
    build_prefix_sums(&mut grid);
    scan_windows(&grid, problem.window)
}
