use std::fmt;

use core_2048::{
    get_cell, get_row,
    row::{self, cell_exponent, cell_value, MAX_EXPONENT},
    transpose_board,
};

use crate::error::BoardError;

/// A 4x4 board packed as 16 exponent nibbles in a `u64`.
///
/// Row `r` lives in bits `16r..16r + 16` and column `c` of that row in the nibble at `4c`, so the
/// leftmost cell of each row is its low nibble.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board(u64);

impl Board {
    pub const EMPTY: Self = Self(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Builds a board from tile values, `rows[r][c]` being the cell in row `r`, column `c`.
    pub fn from_rows(rows: [[u32; 4]; 4]) -> Result<Self, BoardError> {
        let mut raw = 0;

        for (i, values) in rows.into_iter().enumerate() {
            let packed = u64::from(row::pack_row(line_exponents(values)?));
            raw |= packed << (i * 16);
        }

        Ok(Self(raw))
    }

    pub fn rows(self) -> [[u32; 4]; 4] {
        [0, 1, 2, 3].map(|i| row::unpack_row(get_row(self.0, i)).map(cell_value))
    }

    pub const fn cell(self, row: usize, column: usize) -> u32 {
        cell_value(get_cell(self.0, row, column))
    }

    pub const fn count_empty(self) -> u32 {
        mark_empty_cells(self.0).count_ones()
    }

    pub const fn is_full(self) -> bool {
        self.count_empty() == 0
    }

    pub fn max_tile(self) -> u32 {
        (0..16)
            .map(|i| ((self.0 >> (i * 4)) & 0xf) as u8)
            .max()
            .map_or(0, cell_value)
    }

    pub fn tile_sum(self) -> u32 {
        (0..16)
            .map(|i| cell_value(((self.0 >> (i * 4)) & 0xf) as u8))
            .sum()
    }

    /// True when the board is full and no two orthogonal neighbours can merge, so no move can
    /// change it. Two tiles of the largest value count as unequal.
    pub fn is_terminal(self) -> bool {
        self.is_full()
            && !has_adjacent_pair(self.0)
            && !has_adjacent_pair(transpose_board(self.0))
    }
}

pub(crate) fn line_exponents(values: [u32; 4]) -> Result<[u8; 4], BoardError> {
    let mut cells = [0; 4];

    for (cell, value) in cells.iter_mut().zip(values) {
        *cell = cell_exponent(value).ok_or(BoardError::InvalidCell(value))?;
    }

    Ok(cells)
}

/// Sets the low bit of every nibble that is zero, clearing everything else.
pub(crate) const fn mark_empty_cells(board: u64) -> u64 {
    let table = board | (board >> 1);
    let table = table | (table >> 2);

    !table & 0x1111_1111_1111_1111
}

fn has_adjacent_pair(board: u64) -> bool {
    (0..4).any(|i| {
        let cells = row::unpack_row(get_row(board, i));

        cells
            .windows(2)
            .any(|pair| pair[0] != 0 && pair[0] == pair[1] && pair[0] < MAX_EXPONENT)
    })
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.rows()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (j, value) in row.into_iter().enumerate() {
                if j != 0 {
                    f.write_str(" ")?;
                }

                if value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{value:>5}")?;
                }
            }

            f.write_str("\n")?;
        }

        Ok(())
    }
}

impl TryFrom<[[u32; 4]; 4]> for Board {
    type Error = BoardError;

    fn try_from(rows: [[u32; 4]; 4]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}
