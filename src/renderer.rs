use crate::config::{GLYPH_BLANK, GLYPH_BORDER, GLYPH_FOOD, GLYPH_SNAKE, GridSize};
use crate::game::GridEngine;
use crate::snake::Cell;

/// Characters per logical cell; two keep the board visually square.
pub const CELL_WIDTH: usize = 2;

/// Border cells on each side of the board.
pub const BORDER_CELLS: usize = 1;

pub const LINE_BREAK: char = '\n';

const SNAKE_CELL: [char; CELL_WIDTH] = [GLYPH_SNAKE, GLYPH_SNAKE];
const FOOD_CELL: [char; CELL_WIDTH] = [GLYPH_FOOD, GLYPH_BLANK];
const BLANK_CELL: [char; CELL_WIDTH] = [GLYPH_BLANK, GLYPH_BLANK];
const BORDER_CELL: [char; CELL_WIDTH] = [GLYPH_BORDER, GLYPH_BORDER];

/// Index arithmetic for a bordered board laid out row by row.
///
/// Each row holds `width + 2` cells of [`CELL_WIDTH`] characters followed by
/// a line break; there are `height + 2` rows including the border rows.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BufferLayout {
    bounds: GridSize,
}

impl BufferLayout {
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self { bounds }
    }

    #[must_use]
    pub fn bounds(self) -> GridSize {
        self.bounds
    }

    /// Cells per row, border included.
    #[must_use]
    pub fn row_cells(self) -> usize {
        usize::from(self.bounds.width) + 2 * BORDER_CELLS
    }

    /// Rows in the buffer, border rows included.
    #[must_use]
    pub fn rows(self) -> usize {
        usize::from(self.bounds.height) + 2 * BORDER_CELLS
    }

    /// Characters between the starts of two consecutive rows.
    #[must_use]
    pub fn row_stride(self) -> usize {
        self.row_cells() * CELL_WIDTH + 1
    }

    /// Total characters in the buffer.
    #[must_use]
    pub fn len(self) -> usize {
        self.rows() * self.row_stride()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Offset of the first character of an interior cell.
    #[must_use]
    pub fn cell_offset(self, cell: Cell) -> usize {
        let row = usize::from(cell.y) + BORDER_CELLS;
        let column = usize::from(cell.x) + BORDER_CELLS;
        row * self.row_stride() + column * CELL_WIDTH
    }
}

/// Owns the text buffer for one engine and keeps it in sync.
///
/// The border and line breaks are written once by [`Renderer::initial_layout`];
/// later updates only rewrite interior cells.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    layout: Option<BufferLayout>,
    buffer: Vec<char>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `engine` and returns the buffer.
    ///
    /// With `first_call` the static skeleton is (re)built and the interior
    /// left blank. Otherwise only interior cells are rewritten, laying out
    /// first if no skeleton for these bounds exists yet. The slice stays
    /// valid until the next call.
    pub fn render<R>(&mut self, engine: &GridEngine<R>, first_call: bool) -> &[char] {
        let bounds = engine.bounds();
        let needs_layout = self.layout.is_none_or(|layout| layout.bounds() != bounds);

        if first_call {
            self.initial_layout(bounds);
        } else {
            if needs_layout {
                self.initial_layout(bounds);
            }
            self.update_interior(engine);
        }

        &self.buffer
    }

    /// Allocates the buffer and writes the border, blank interior and line
    /// breaks.
    pub fn initial_layout(&mut self, bounds: GridSize) {
        let layout = BufferLayout::new(bounds);
        let last_row = layout.rows() - 1;
        let last_column = layout.row_cells() - 1;

        self.buffer.clear();
        self.buffer.reserve_exact(layout.len());

        for row in 0..layout.rows() {
            for column in 0..layout.row_cells() {
                let is_border =
                    row == 0 || row == last_row || column == 0 || column == last_column;
                let glyphs = if is_border { BORDER_CELL } else { BLANK_CELL };
                self.buffer.extend_from_slice(&glyphs);
            }
            self.buffer.push(LINE_BREAK);
        }

        debug_assert_eq!(self.buffer.len(), layout.len());
        self.layout = Some(layout);
    }

    /// Rewrites every interior cell from `engine`; border and line breaks are
    /// left untouched. Does nothing before [`Renderer::initial_layout`].
    pub fn update_interior<R>(&mut self, engine: &GridEngine<R>) {
        let Some(layout) = self.layout else {
            return;
        };
        let bounds = layout.bounds();

        for y in 0..bounds.height {
            for x in 0..bounds.width {
                self.write_cell(layout, Cell::new(x, y), BLANK_CELL);
            }
        }

        // Snake is drawn last so it wins over anything beneath it.
        if let Some(food) = engine.food() {
            self.write_cell(layout, food, FOOD_CELL);
        }
        for segment in engine.snake().segments() {
            self.write_cell(layout, *segment, SNAKE_CELL);
        }
    }

    /// Current buffer contents.
    #[must_use]
    pub fn buffer(&self) -> &[char] {
        &self.buffer
    }

    /// Current buffer collected into a displayable string.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.buffer.iter().collect()
    }

    fn write_cell(&mut self, layout: BufferLayout, cell: Cell, glyphs: [char; CELL_WIDTH]) {
        if !cell.is_within_bounds(layout.bounds()) {
            return;
        }

        let offset = layout.cell_offset(cell);
        if let Some(slot) = self.buffer.get_mut(offset..offset + CELL_WIDTH) {
            slot.copy_from_slice(&glyphs);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GridSize, GLYPH_BORDER};
    use crate::game::GridEngine;
    use crate::input::Heading;
    use crate::snake::Cell;

    use super::{BufferLayout, Renderer, LINE_BREAK};

    const BOUNDS: GridSize = GridSize {
        width: 9,
        height: 9,
    };

    fn engine() -> GridEngine {
        GridEngine::new_with_seed(BOUNDS, 5, 0, 17).expect("valid configuration")
    }

    fn cell_text(renderer: &Renderer, cell: Cell) -> String {
        let offset = BufferLayout::new(BOUNDS).cell_offset(cell);
        renderer.buffer()[offset..offset + 2].iter().collect()
    }

    #[test]
    fn layout_length_counts_border_cells_and_line_breaks() {
        let layout = BufferLayout::new(GridSize {
            width: 40,
            height: 20,
        });

        assert_eq!(layout.row_stride(), 42 * 2 + 1);
        assert_eq!(layout.len(), 22 * 42 * 2 + 22);
    }

    #[test]
    fn first_render_draws_border_and_blank_interior() {
        let mut renderer = Renderer::new();
        let text: String = renderer.render(&engine(), true).iter().collect();

        let rows: Vec<&str> = text.lines().collect();
        let border_row: String = std::iter::repeat_n(GLYPH_BORDER, 22).collect();
        let edge = format!("{GLYPH_BORDER}{GLYPH_BORDER}");
        let interior_row = format!("{edge}{}{edge}", " ".repeat(18));

        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0], border_row);
        assert_eq!(rows[10], border_row);
        for row in &rows[1..10] {
            assert_eq!(*row, interior_row);
        }
        assert!(text.ends_with(LINE_BREAK));
    }

    #[test]
    fn later_renders_draw_snake_and_food() {
        let engine = engine();
        let mut renderer = Renderer::new();
        renderer.render(&engine, true);
        renderer.render(&engine, false);

        assert_eq!(cell_text(&renderer, Cell::new(4, 4)), "\u{2588}\u{2588}");
        assert_eq!(cell_text(&renderer, Cell::new(4, 5)), "\u{2588}\u{2588}");
        let food = engine.food().expect("food is placed at construction");
        assert_eq!(cell_text(&renderer, food), "\u{25cf} ");

        let drawn = renderer.buffer().iter().filter(|c| **c == '\u{2588}').count();
        assert_eq!(drawn, 4);
    }

    #[test]
    fn interior_update_clears_vacated_cells_and_keeps_border() {
        let mut engine = engine();
        let mut renderer = Renderer::new();
        renderer.render(&engine, true);
        let skeleton = renderer.as_string();
        renderer.render(&engine, false);

        engine.advance(Heading::Left).expect("turn");
        renderer.render(&engine, false);

        if engine.snake().len() == 2 {
            assert_eq!(cell_text(&renderer, Cell::new(4, 5)), "  ");
        }
        assert_eq!(cell_text(&renderer, Cell::new(3, 4)), "\u{2588}\u{2588}");

        let after = renderer.as_string();
        for (before, now) in skeleton.chars().zip(after.chars()) {
            if before == GLYPH_BORDER || before == LINE_BREAK {
                assert_eq!(before, now);
            }
        }
    }

    #[test]
    fn consecutive_renders_are_identical() {
        let engine = engine();
        let mut renderer = Renderer::new();
        renderer.render(&engine, true);

        let first = renderer.render(&engine, false).to_vec();
        let second = renderer.render(&engine, false).to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn render_without_layout_lays_out_first() {
        let engine = engine();
        let mut renderer = Renderer::new();

        let len = renderer.render(&engine, false).len();

        assert_eq!(len, BufferLayout::new(BOUNDS).len());
        assert_eq!(cell_text(&renderer, Cell::new(4, 4)), "\u{2588}\u{2588}");
    }
}
