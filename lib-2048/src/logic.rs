use rand::Rng;

use core_2048::{mirror_board, row, transpose_board, transpose_rotate_board};

use crate::{
    board::{self, Board},
    direction::Direction,
    error::BoardError,
};

static MOVE_TABLE: [u16; 1 << 16] = include!(concat!(env!("OUT_DIR"), "/move_table.rs"));
static SCORE_TABLE: [u32; 1 << 16] = include!(concat!(env!("OUT_DIR"), "/score_table.rs"));

const MOVE_FUNCTIONS: [fn(u64) -> (u64, u32); 4] = [move_up, move_down, move_right, move_left];

/// Merges every row towards its leftmost cell.
pub fn do_move(board: u64) -> (u64, u32) {
    (0..4)
        .map(|i| {
            let row = (board >> (i * 16)) as u16;
            (i, MOVE_TABLE[row as usize], SCORE_TABLE[row as usize])
        })
        .fold((0, 0), |(new_board, score), (i, row, row_score)| {
            (new_board | (u64::from(row) << (i * 16)), score + row_score)
        })
}

fn move_up(board: u64) -> (u64, u32) {
    let (new_board, score) = do_move(transpose_board(board));

    (transpose_board(new_board), score)
}

fn move_down(board: u64) -> (u64, u32) {
    let (new_board, score) = do_move(transpose_rotate_board(board));

    (transpose_rotate_board(new_board), score)
}

fn move_right(board: u64) -> (u64, u32) {
    let (new_board, score) = do_move(mirror_board(board));

    (mirror_board(new_board), score)
}

fn move_left(board: u64) -> (u64, u32) {
    do_move(board)
}

/// Slides the board in `direction`, returning the new board and the value of the merges made.
pub fn shift(board: Board, direction: Direction) -> (Board, u32) {
    let (new_board, score) = MOVE_FUNCTIONS[direction as usize](board.raw());

    (Board::from_raw(new_board), score)
}

/// Pure form of a move: the board after sliding, the running score with this move's merges added,
/// and whether anything moved. No tile is spawned. The score saturates at `u32::MAX`.
pub fn apply_move(board: Board, score: u32, direction: Direction) -> (Board, u32, bool) {
    let (new_board, gained) = shift(board, direction);

    (new_board, score.saturating_add(gained), new_board != board)
}

pub fn try_move(board: Board, direction: Direction) -> Option<(Board, u32)> {
    let (new_board, score) = shift(board, direction);

    (new_board != board).then_some((new_board, score))
}

/// Result of every direction, indexed by `Direction as usize`. `None` marks a direction that
/// leaves the board unchanged.
pub fn try_all_moves(board: Board) -> [Option<(Board, u32)>; 4] {
    Direction::ALL.map(|direction| try_move(board, direction))
}

/// Merges a single line of tile values towards its first cell.
pub fn merge_line(line: [u32; 4]) -> Result<([u32; 4], u32), BoardError> {
    let packed = row::pack_row(board::line_exponents(line)?);
    let (merged, score) = row::merge_row(packed);

    Ok((row::unpack_row(merged).map(row::cell_value), score))
}

/// Places a 2 (80%) or a 4 (20%) in an empty cell chosen uniformly at random. A full board is
/// returned unchanged.
pub fn spawn_tile(rng: &mut impl Rng, board: Board) -> Board {
    let slot_count = board.count_empty();

    if slot_count > 0 {
        let rand = rng.gen_range(0..(slot_count * 5));

        let slot_idx = rand / 5;
        let cell: u64 = if rand % 5 == 0 { 2 } else { 1 };

        let empty_cells = board::mark_empty_cells(board.raw());

        let init_slot = empty_cells.trailing_zeros();

        let slot = (0..slot_idx).fold(init_slot, |slot, _| {
            let slot = slot + 4;

            slot + (empty_cells >> slot).trailing_zeros()
        });

        Board::from_raw(board.raw() | (cell << slot))
    } else {
        board
    }
}
