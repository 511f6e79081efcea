use rand::Rng;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    FOOD_COLORS, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, INITIAL_FOOD_COLOR,
    INITIAL_SNAKE_COLOR,
};
use crate::game::{GameState, GameStatus};
use crate::geometry::{Cell, Grid};
use crate::ui::hud::status_line;
use crate::ui::menu::render_game_over_menu;

/// Colours currently used for the snake and the outstanding food.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub snake: Color,
    pub food: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: INITIAL_SNAKE_COLOR,
            food: INITIAL_FOOD_COLOR,
        }
    }
}

impl Palette {
    /// Hands the eaten food's colour to the snake and picks a new food colour.
    pub fn food_eaten<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.snake = self.food;
        self.food = FOOD_COLORS[rng.gen_range(0..FOOD_COLORS.len())];
    }
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, palette: Palette) {
    let area = frame.area();
    let board = board_area(area, state.grid());

    if state.status() == GameStatus::GameOver {
        render_game_over_menu(frame, board, state.score(), state.end_reason());
        return;
    }

    let block = Block::bordered()
        .title(status_line(state.score()))
        .border_style(Style::new().fg(Color::DarkGray));
    frame.render_widget(block, board);

    render_food(frame, board, state, palette);
    render_snake(frame, board, state, palette);
}

/// Terminal rectangle covered by the grid, clipped to the screen.
fn board_area(area: Rect, grid: Grid) -> Rect {
    Rect::new(
        area.x,
        area.y,
        grid.width().min(area.width),
        grid.height().min(area.height),
    )
}

fn render_food(frame: &mut Frame<'_>, board: Rect, state: &GameState, palette: Palette) {
    let buffer = frame.buffer_mut();
    for food in state.food().iter() {
        if let Some((x, y)) = logical_to_terminal(board, *food) {
            buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(palette.food));
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, board: Rect, state: &GameState, palette: Palette) {
    let buffer = frame.buffer_mut();
    for (index, segment) in state.snake().segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(board, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new().fg(palette.snake).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(palette.snake));
        }
    }
}

fn logical_to_terminal(board: Rect, cell: Cell) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(cell.x).ok()?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = board.x.saturating_add(x_offset);
    let y = board.y.saturating_add(y_offset);
    if x >= board.right() || y >= board.bottom() {
        return None;
    }

    Some((x, y))
}
