use std::io::{self, Write};

use lib_2048::Board;

const SQUARE_HEIGHT: usize = 3;
const PAD_ABOVE: usize = (SQUARE_HEIGHT - 1) / 2;
const PAD_BELOW: usize = SQUARE_HEIGHT - 1 - PAD_ABOVE;
const TOP_ROW: &[u8] = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n".as_bytes();
const SEPERATOR_ROW: &[u8] = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n".as_bytes();
const BOTTOM_ROW: &[u8] = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n".as_bytes();
const EMPTY_ROW: &[u8] = "┃       ┃       ┃       ┃       ┃\n".as_bytes();
const EMPTY_CELL: &[u8] = "┃       ".as_bytes();

// 256-colour palette entries for 2, 4, 8, ..., 2048.
const COLOUR_TABLE: [u8; 11] = [254, 230, 215, 209, 203, 202, 222, 221, 220, 184, 178];
const FALLBACK_COLOUR: u8 = 181;

// Lines from the score line down to the line below the bottom border.
const SCORE_LINE: usize = SQUARE_HEIGHT * 4 + 6;

fn tile_colour(value: u32) -> u8 {
    value
        .trailing_zeros()
        .checked_sub(1)
        .and_then(|index| COLOUR_TABLE.get(index as usize))
        .copied()
        .unwrap_or(FALLBACK_COLOUR)
}

/// Draws the board with box-drawing characters, rewriting only what changed between frames.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    colour: bool,
}

impl Renderer {
    pub const fn new(colour: bool) -> Self {
        Self { colour }
    }

    fn draw_padding(self, out: &mut impl Write, row: [u32; 4]) -> io::Result<()> {
        for value in row {
            if value != 0 && self.colour {
                write!(out, "┃\x1b[48;5;{}m       \x1b[m", tile_colour(value))?;
            } else {
                out.write_all(EMPTY_CELL)?;
            }
        }

        Ok(())
    }

    fn draw_numbers(self, out: &mut impl Write, row: [u32; 4]) -> io::Result<()> {
        for value in row {
            if value == 0 {
                out.write_all(EMPTY_CELL)?;
            } else if self.colour {
                write!(
                    out,
                    "┃\x1b[48;5;{}m\x1b[30m{value:^7}\x1b[m",
                    tile_colour(value)
                )?;
            } else {
                write!(out, "┃{value:^7}")?;
            }
        }

        Ok(())
    }

    /// Rewrites the cells of one row. Starts at the top line of the row and leaves the cursor on
    /// its bottom line.
    fn draw_board_row(self, out: &mut impl Write, row: [u32; 4]) -> io::Result<()> {
        for _ in 0..PAD_ABOVE {
            self.draw_padding(out, row)?;
            out.write_all(b"\x1b[E")?;
        }

        self.draw_numbers(out, row)?;

        for _ in 0..PAD_BELOW {
            out.write_all(b"\x1b[E")?;
            self.draw_padding(out, row)?;
        }

        Ok(())
    }

    /// Draws a fresh frame below the cursor.
    pub fn draw_board(self, out: &mut impl Write, board: Board, score: u32) -> io::Result<()> {
        write!(out, "\nScore: {score}\n")?;
        out.write_all(TOP_ROW)?;

        for i in 0..4 {
            if i != 0 {
                out.write_all(SEPERATOR_ROW)?;
            }

            for _ in 0..SQUARE_HEIGHT {
                out.write_all(EMPTY_ROW)?;
            }
        }

        out.write_all(BOTTOM_ROW)?;

        self.redraw_board(out, Board::EMPTY, board, score, score)
    }

    /// Updates the frame most recently drawn by [`Renderer::draw_board`], which must end on the
    /// line above the cursor.
    pub fn redraw_board(
        self,
        out: &mut impl Write,
        old_board: Board,
        new_board: Board,
        old_score: u32,
        new_score: u32,
    ) -> io::Result<()> {
        let mut current_line = if new_score != old_score {
            write!(out, "\x1b[{SCORE_LINE}FScore: {new_score}\x1b[K")?;

            SCORE_LINE
        } else {
            0
        };

        let (old_rows, new_rows) = (old_board.rows(), new_board.rows());
        let changed_rows = (0..4).filter(|&i| old_rows[i] != new_rows[i]);

        for row in changed_rows {
            let final_row_to_end = SQUARE_HEIGHT + 1;
            let between_rows = SQUARE_HEIGHT + 1;
            let target_line = final_row_to_end + between_rows * (3 - row);

            if target_line > current_line {
                write!(out, "\x1b[{}F", target_line - current_line)?;
            } else if target_line < current_line {
                write!(out, "\x1b[{}E", current_line - target_line)?;
            } else {
                out.write_all(b"\r")?;
            }

            self.draw_board_row(out, new_rows[row])?;
            current_line = target_line - (SQUARE_HEIGHT - 1);
        }

        if current_line != 0 {
            write!(out, "\x1b[{current_line}E")?;
        }

        out.flush()
    }

    pub fn game_over(self, out: &mut impl Write, board: Board, score: u32) -> io::Result<()> {
        writeln!(
            out,
            "Game over! Score {score}, largest tile {}",
            board.max_tile()
        )
    }
}
