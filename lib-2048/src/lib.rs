pub use core_2048::*;

pub mod board;
pub mod direction;
pub mod error;
pub mod game;
pub mod logic;

pub use board::Board;
pub use direction::Direction;
pub use error::BoardError;
pub use game::{Game, Turn};
