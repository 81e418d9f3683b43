use log::debug;
use rand::Rng;

use crate::{board::Board, direction::Direction, logic};

/// What a single key press did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The move changed nothing; no tile was spawned.
    Unchanged,
    /// Tiles moved and a new one was spawned. `gained` is the value of the merges.
    Moved { gained: u32 },
    /// The board after the move was terminal. The game has already been reset; `board` and
    /// `score` are the final position of the finished game.
    GameOver { board: Board, score: u32 },
}

/// A single game: board, score and the random source used for spawning tiles.
pub struct Game<R> {
    rng: R,
    board: Board,
    score: u32,
}

impl<R> Game<R>
where
    R: Rng,
{
    /// Starts a game with two spawned tiles.
    pub fn new(rng: R) -> Self {
        let mut game = Self::with_board(rng, Board::EMPTY, 0);
        game.reset();

        game
    }

    /// Resumes from an existing position without spawning anything.
    pub const fn with_board(rng: R, board: Board, score: u32) -> Self {
        Self { rng, board, score }
    }

    pub const fn board(&self) -> Board {
        self.board
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.score = 0;

        self.spawn_tile();
        self.spawn_tile();

        debug!("new game\n{}", self.board);
    }

    pub fn spawn_tile(&mut self) {
        self.board = logic::spawn_tile(&mut self.rng, self.board);
    }

    /// Slides the board in `direction`. Returns whether anything changed. Does not spawn.
    pub fn shift(&mut self, direction: Direction) -> bool {
        let (board, score, changed) = logic::apply_move(self.board, self.score, direction);

        self.board = board;
        self.score = score;

        changed
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    /// Runs one full turn: move, spawn if anything moved, then check for the end of the game on
    /// the resulting board. A finished game is reset before returning.
    pub fn play(&mut self, direction: Direction) -> Turn {
        let before = self.score;

        let turn = if self.shift(direction) {
            self.spawn_tile();

            Turn::Moved {
                gained: self.score - before,
            }
        } else {
            Turn::Unchanged
        };

        if self.is_terminal() {
            let (board, score) = (self.board, self.score);

            debug!("game over with score {score}\n{board}");

            self.reset();

            Turn::GameOver { board, score }
        } else {
            turn
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0x2048)
    }

    #[test]
    fn new_game_has_two_tiles() {
        let game = Game::new(rng());

        assert_eq!(game.board().count_empty(), 14);
        assert_eq!(game.score(), 0);
        assert!(game.board().tile_sum() >= 4 && game.board().tile_sum() <= 8);
    }

    #[test]
    fn reset_clears_score() {
        let board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(rng(), board, 100);

        assert_eq!(game.play(Direction::Left), Turn::Moved { gained: 4 });
        assert_eq!(game.score(), 104);

        game.reset();

        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn unchanged_move_spawns_nothing() {
        let board = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(rng(), board, 0);

        assert_eq!(game.play(Direction::Left), Turn::Unchanged);
        assert_eq!(game.play(Direction::Up), Turn::Unchanged);
        assert_eq!(game.board(), board);
    }

    #[test]
    fn changed_move_spawns_one_tile() {
        let board = Board::from_rows([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(rng(), board, 0);

        assert_eq!(game.play(Direction::Left), Turn::Moved { gained: 0 });
        assert_eq!(game.board().cell(0, 0), 2);
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn filling_the_last_gap_ends_and_restarts_the_game() {
        // Sliding the top row right leaves one gap at (0, 0). Whatever spawns there, 2 or 4,
        // the board is full and the new tile is blocked by its neighbours.
        let board = Board::from_rows([
            [8, 16, 8, 0],
            [16, 32, 64, 32],
            [32, 64, 128, 64],
            [64, 128, 256, 128],
        ])
        .unwrap();
        let mut game = Game::with_board(rng(), board, 500);

        match game.play(Direction::Right) {
            Turn::GameOver { board, score } => {
                assert_eq!(score, 500);
                assert_eq!(board.max_tile(), 256);
                assert!(board.is_terminal());
                assert!(matches!(board.cell(0, 0), 2 | 4));
            }
            turn => panic!("expected game over, got {turn:?}"),
        }

        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn stuck_pair_of_largest_tiles_ends_the_game() {
        let board = Board::from_rows([
            [32768, 32768, 2, 4],
            [2, 4, 8, 16],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
        ])
        .unwrap();
        let mut game = Game::with_board(rng(), board, 1000);

        match game.play(Direction::Left) {
            Turn::GameOver { board: final_board, score } => {
                assert_eq!(final_board, board);
                assert_eq!(score, 1000);
            }
            turn => panic!("expected game over, got {turn:?}"),
        }

        assert_eq!(game.score(), 0);
    }

    #[test]
    fn score_never_decreases_during_play() {
        let mut game = Game::new(rng());
        let mut last_score = 0;

        for direction in Direction::ALL.into_iter().cycle().take(400) {
            match game.play(direction) {
                Turn::GameOver { score, .. } => {
                    assert!(score >= last_score);
                    last_score = 0;
                }
                Turn::Moved { gained } => {
                    assert_eq!(game.score(), last_score + gained);
                    last_score = game.score();
                }
                Turn::Unchanged => assert_eq!(game.score(), last_score),
            }

            assert!(!game.is_terminal());
        }
    }
}
