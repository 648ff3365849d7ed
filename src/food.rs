use rand::Rng;
use tracing::{debug, warn};

use crate::config::GridSize;
use crate::error::EngineError;
use crate::snake::{Cell, Snake};

/// Rejection-sampling draws before falling back to enumerating free cells.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Source of uniformly distributed integers, used only for food placement.
pub trait RandomSource {
    /// Returns a value in `low..=high`. Every value in range must be
    /// reachable with non-zero probability.
    fn uniform_in_range(&mut self, low: u32, high: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_in_range(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}

/// Picks a cell not occupied by `snake`.
///
/// Samples random cells first; once the snake covers most of the board, or
/// sampling keeps hitting the body, picks uniformly among the free cells
/// instead. Fails only when no free cell exists, which includes a board with
/// zero width or height.
pub fn place_food<R: RandomSource + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Result<Cell, EngineError> {
    let board_full = EngineError::BoardFull {
        width: bounds.width,
        height: bounds.height,
    };
    if bounds.total_cells() == 0 {
        return Err(board_full);
    }

    let sparse = snake.len() * 2 <= bounds.total_cells();

    if sparse {
        for attempt in 1..=MAX_REJECTION_ATTEMPTS {
            let Some(cell) = random_cell(rng, bounds) else {
                continue;
            };
            if !snake.occupies(cell) {
                debug!(x = cell.x, y = cell.y, attempt, "placed food");
                return Ok(cell);
            }
        }
        warn!(
            attempts = MAX_REJECTION_ATTEMPTS,
            "food sampling kept hitting the snake, enumerating free cells"
        );
    }

    let free = free_cells(bounds, snake);

    let Some(last_index) = free.len().checked_sub(1) else {
        return Err(board_full);
    };
    let last_index = u32::try_from(last_index).map_err(|_| board_full)?;

    let index = rng.uniform_in_range(0, last_index);
    let cell = usize::try_from(index)
        .ok()
        .and_then(|index| free.get(index).copied())
        .ok_or(board_full)?;

    debug!(x = cell.x, y = cell.y, free = free.len(), "placed food from free cells");
    Ok(cell)
}

/// Draws one cell. `bounds` must be non-empty; a draw outside it (only
/// possible from a misbehaving source) is returned as `None` and counted as a
/// rejected attempt.
fn random_cell<R: RandomSource + ?Sized>(rng: &mut R, bounds: GridSize) -> Option<Cell> {
    debug_assert!(bounds.width > 0 && bounds.height > 0);

    let x = rng.uniform_in_range(0, u32::from(bounds.width) - 1);
    let y = rng.uniform_in_range(0, u32::from(bounds.height) - 1);

    let cell = Cell::new(u16::try_from(x).ok()?, u16::try_from(y).ok()?);
    cell.is_within_bounds(bounds).then_some(cell)
}

fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Cell> {
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..bounds.height {
        for x in 0..bounds.width {
            let cell = Cell::new(x, y);
            if !snake.occupies(cell) {
                candidates.push(cell);
            }
        }
    }

    candidates
}
