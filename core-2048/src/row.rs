//! A row is four cells packed into a `u16`, leftmost cell in the low nibble. Each nibble holds
//! the exponent of the tile value, with 0 meaning an empty cell.

/// Exponent of the largest tile a nibble can hold, 2^15 = 32768.
pub const MAX_EXPONENT: u8 = 15;

pub const fn cell_value(exponent: u8) -> u32 {
    if exponent == 0 {
        0
    } else {
        1 << exponent
    }
}

/// Inverse of [`cell_value`]. Returns `None` for values that are neither 0 nor a power of two in
/// `2..=32768`.
pub const fn cell_exponent(value: u32) -> Option<u8> {
    if value == 0 {
        Some(0)
    } else if value.is_power_of_two() && value >= 2 && value.trailing_zeros() <= MAX_EXPONENT as u32
    {
        Some(value.trailing_zeros() as u8)
    } else {
        None
    }
}

pub const fn unpack_row(row: u16) -> [u8; 4] {
    [
        (row & 0xf) as u8,
        ((row >> 4) & 0xf) as u8,
        ((row >> 8) & 0xf) as u8,
        (row >> 12) as u8,
    ]
}

pub const fn pack_row(cells: [u8; 4]) -> u16 {
    (cells[0] as u16 & 0xf)
        | ((cells[1] as u16 & 0xf) << 4)
        | ((cells[2] as u16 & 0xf) << 8)
        | ((cells[3] as u16 & 0xf) << 12)
}

pub const fn reverse_row(row: u16) -> u16 {
    let [a, b, c, d] = unpack_row(row);

    pack_row([d, c, b, a])
}

/// Slides the row towards its first cell, merging each pair of equal neighbours once.
///
/// Returns the new row and the sum of the values of the merged tiles. A tile produced by a merge
/// is never merged again in the same pass, and two tiles of [`MAX_EXPONENT`] are left apart.
pub fn merge_row(row: u16) -> (u16, u32) {
    let mut merged = [0u8; 4];
    let mut len = 0;
    let mut score = 0;
    let mut pending = None;

    for cell in unpack_row(row).into_iter().filter(|&cell| cell != 0) {
        match pending.take() {
            Some(prev) if prev == cell && cell < MAX_EXPONENT => {
                merged[len] = cell + 1;
                len += 1;
                score += cell_value(cell + 1);
            }
            Some(prev) => {
                merged[len] = prev;
                len += 1;
                pending = Some(cell);
            }
            None => pending = Some(cell),
        }
    }

    if let Some(prev) = pending {
        merged[len] = prev;
    }

    (pack_row(merged), score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [u8; 4]) -> u16 {
        pack_row(cells)
    }

    #[test]
    fn exponents_round_trip_through_values() {
        assert_eq!(cell_value(0), 0);
        assert_eq!(cell_value(1), 2);
        assert_eq!(cell_value(11), 2048);
        assert_eq!(cell_exponent(2048), Some(11));
        assert_eq!(cell_exponent(0), Some(0));
    }

    #[test]
    fn rejects_values_that_are_not_tiles() {
        assert_eq!(cell_exponent(1), None);
        assert_eq!(cell_exponent(3), None);
        assert_eq!(cell_exponent(6), None);
        assert_eq!(cell_exponent(1 << 16), None);
    }

    #[test]
    fn packs_leftmost_cell_low() {
        assert_eq!(row([1, 2, 3, 4]), 0x4321);
        assert_eq!(unpack_row(0x4321), [1, 2, 3, 4]);
        assert_eq!(reverse_row(0x4321), 0x1234);
    }

    #[test]
    fn merges_two_pairs() {
        assert_eq!(merge_row(row([1, 1, 1, 1])), (row([2, 2, 0, 0]), 8));
    }

    #[test]
    fn compacts_before_merging() {
        assert_eq!(merge_row(row([0, 1, 0, 1])), (row([2, 0, 0, 0]), 4));
        assert_eq!(merge_row(row([1, 0, 0, 2])), (row([1, 2, 0, 0]), 0));
    }

    #[test]
    fn merged_tile_does_not_cascade() {
        assert_eq!(merge_row(row([1, 2, 2, 1])), (row([1, 3, 1, 0]), 8));
        assert_eq!(merge_row(row([2, 1, 1, 0])), (row([2, 2, 0, 0]), 4));
    }

    #[test]
    fn leftmost_pair_merges_first() {
        assert_eq!(merge_row(row([1, 1, 1, 0])), (row([2, 1, 0, 0]), 4));
    }

    #[test]
    fn stuck_row_is_unchanged() {
        assert_eq!(merge_row(row([1, 2, 1, 2])), (row([1, 2, 1, 2]), 0));
        assert_eq!(merge_row(0), (0, 0));
    }

    #[test]
    fn largest_tiles_stay_apart() {
        assert_eq!(
            merge_row(row([MAX_EXPONENT, MAX_EXPONENT, 0, 0])),
            (row([MAX_EXPONENT, MAX_EXPONENT, 0, 0]), 0)
        );
        assert_eq!(
            merge_row(row([14, 14, MAX_EXPONENT, 0])),
            (row([MAX_EXPONENT, MAX_EXPONENT, 0, 0]), 32768)
        );
    }
}
