use crate::config::GridSize;
use crate::input::Heading;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x < bounds.width && self.y < bounds.height
    }

    /// Returns the neighbouring cell one step towards `heading`, or `None`
    /// when that step leaves `[0, width-1] x [0, height-1]`.
    #[must_use]
    pub fn stepped(self, heading: Heading, bounds: GridSize) -> Option<Self> {
        let (dx, dy) = heading.offset();
        let x = u16::try_from(i32::from(self.x) + dx).ok()?;
        let y = u16::try_from(i32::from(self.y) + dy).ok()?;

        let next = Self { x, y };
        next.is_within_bounds(bounds).then_some(next)
    }
}

/// Body of the snake as one contiguous sequence, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Creates the two-cell start snake: head at the board centre, tail
    /// directly below it.
    #[must_use]
    pub fn centered(bounds: GridSize) -> Self {
        let x = bounds.width / 2;
        let y = bounds.height / 2;

        Self {
            body: vec![Cell::new(x, y), Cell::new(x, y + 1)],
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least a head");
        Self { body: segments }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .first()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .last()
            .expect("snake body must always contain at least one segment")
    }

    /// Moves the head in place to `next` without touching the body.
    ///
    /// Returns true when the new head now shares its cell with any other
    /// segment, the tail included.
    pub fn place_head(&mut self, next: Cell) -> bool {
        if let Some(head) = self.body.first_mut() {
            *head = next;
        }

        self.body.iter().filter(|segment| **segment == next).count() > 1
    }

    /// Shifts every non-head segment into the position its predecessor held
    /// before this turn, starting from `previous_head`.
    ///
    /// Returns the cell that fell off the tail end.
    pub fn ripple(&mut self, previous_head: Cell) -> Cell {
        let mut hold = previous_head;
        for segment in self.body.iter_mut().skip(1) {
            hold = std::mem::replace(segment, hold);
        }
        hold
    }

    /// Appends a new tail segment at `cell`.
    pub fn grow(&mut self, cell: Cell) {
        self.body.push(cell);
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Heading;

    use super::{Cell, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 9,
        height: 9,
    };

    #[test]
    fn centered_snake_has_head_above_tail() {
        let snake = Snake::centered(GridSize {
            width: 10,
            height: 13,
        });

        let segments: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(segments, vec![Cell::new(5, 6), Cell::new(5, 7)]);
    }

    #[test]
    fn stepping_off_any_edge_returns_none() {
        assert_eq!(Cell::new(0, 4).stepped(Heading::Left, BOUNDS), None);
        assert_eq!(Cell::new(8, 4).stepped(Heading::Right, BOUNDS), None);
        assert_eq!(Cell::new(4, 0).stepped(Heading::Up, BOUNDS), None);
        assert_eq!(Cell::new(4, 8).stepped(Heading::Down, BOUNDS), None);

        assert_eq!(
            Cell::new(0, 0).stepped(Heading::Down, BOUNDS),
            Some(Cell::new(0, 1))
        );
    }

    #[test]
    fn ripple_shifts_body_and_returns_vacated_tail() {
        let mut snake = Snake::from_segments(vec![
            Cell::new(4, 4),
            Cell::new(4, 5),
            Cell::new(4, 6),
        ]);
        let previous_head = snake.head();

        assert!(!snake.place_head(Cell::new(3, 4)));
        let vacated = snake.ripple(previous_head);

        let segments: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Cell::new(3, 4), Cell::new(4, 4), Cell::new(4, 5)]
        );
        assert_eq!(vacated, Cell::new(4, 6));
    }

    #[test]
    fn placing_head_on_tail_counts_as_overlap() {
        // Square loop: moving the head down lands on the tail, which has not
        // vacated yet.
        let mut snake = Snake::from_segments(vec![
            Cell::new(2, 2),
            Cell::new(3, 2),
            Cell::new(3, 3),
            Cell::new(2, 3),
        ]);

        assert!(snake.place_head(Cell::new(2, 3)));
        assert_eq!(snake.head(), Cell::new(2, 3));
    }

    #[test]
    fn growth_appends_at_tail() {
        let mut snake = Snake::centered(BOUNDS);
        snake.grow(Cell::new(4, 6));

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(4, 6));
        assert!(snake.occupies(Cell::new(4, 5)));
    }
}
