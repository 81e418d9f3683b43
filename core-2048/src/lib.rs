pub mod row;

/// Reverses the order of the cells within every row.
pub const fn mirror_board(board: u64) -> u64 {
    let board = ((board << 4) & 0xf0f0_f0f0_f0f0_f0f0) | ((board >> 4) & 0x0f0f_0f0f_0f0f_0f0f);
    ((board << 8) & 0xff00_ff00_ff00_ff00) | ((board >> 8) & 0x00ff_00ff_00ff_00ff)
}

/// Reflects the board about its main diagonal, so columns become rows.
pub const fn transpose_board(board: u64) -> u64 {
    let keep = board & 0xf0f0_0f0f_f0f0_0f0f;
    let left = board & 0x0000_f0f0_0000_f0f0;
    let right = board & 0x0f0f_0000_0f0f_0000;
    let board = keep | (left << 12) | (right >> 12);

    let keep = board & 0xff00_ff00_00ff_00ff;
    let left = board & 0x0000_0000_ff00_ff00;
    let right = board & 0x00ff_00ff_0000_0000;

    keep | (left << 24) | (right >> 24)
}

/// Reflects the board about its anti-diagonal. Columns become rows with the bottom cell first.
pub const fn transpose_rotate_board(board: u64) -> u64 {
    let keep = board & 0x0f0f_f0f0_0f0f_f0f0;
    let left = board & 0x0000_0f0f_0000_0f0f;
    let right = board & 0xf0f0_0000_f0f0_0000;
    let board = keep | (left << 20) | (right >> 20);

    let keep = board & 0x00ff_00ff_ff00_ff00;
    let left = board & 0x0000_0000_00ff_00ff;
    let right = board & 0xff00_ff00_0000_0000;

    keep | (left << 40) | (right >> 40)
}

pub const fn get_cell(board: u64, row: usize, column: usize) -> u8 {
    ((board >> (row * 16 + column * 4)) & 0xf) as u8
}

pub const fn get_row(board: u64, row: usize) -> u16 {
    (board >> (row * 16)) as u16
}
