use std::io::{self, Read, Write};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use lib_2048::{Game, Turn};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod input;
mod render;
mod terminal;

use input::{Key, KeyDecoder};
use render::Renderer;

/// Play 2048 in the terminal with the arrow keys (or w/a/s/d). r starts a new game, q quits.
#[derive(Parser, Debug)]
#[command(name = "term-2048", version)]
struct Args {
    /// Seed for tile spawning, for a reproducible game. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Draw tiles without colour.
    #[arg(long = "no-colour", alias = "no-color")]
    no_colour: bool,
}

fn play_interactive(
    out: &mut impl Write,
    input: &mut impl Read,
    game: &mut Game<impl Rng>,
    renderer: Renderer,
) -> anyhow::Result<()> {
    let mut decoder = KeyDecoder::new().context("building key decoder")?;
    let mut buf = [0u8; 128];

    renderer.draw_board(out, game.board(), game.score())?;

    'play: loop {
        let len = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(len) => len,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                if terminal::interrupted() {
                    break;
                }

                continue;
            }
            Err(err) => return Err(err).context("reading keys"),
        };

        for key in decoder.decode(&buf[..len]) {
            let (board, score) = (game.board(), game.score());

            match key {
                Key::Quit => break 'play,
                Key::Reset => {
                    info!("new game at player's request, score was {score}");

                    game.reset();
                    renderer.redraw_board(out, board, game.board(), score, game.score())?;
                }
                Key::Move(direction) => match game.play(direction) {
                    Turn::Unchanged => trace!("{direction} does not change the board"),
                    Turn::Moved { gained } => {
                        debug!("moved {direction}, gained {gained}");

                        renderer.redraw_board(out, board, game.board(), score, game.score())?;
                    }
                    Turn::GameOver {
                        board: final_board,
                        score: final_score,
                    } => {
                        info!(
                            "game over with score {final_score}, largest tile {}",
                            final_board.max_tile()
                        );

                        renderer.redraw_board(out, board, final_board, score, final_score)?;
                        renderer.game_over(out, final_board, final_score)?;
                        renderer.draw_board(out, game.board(), game.score())?;
                    }
                },
            }
        }
    }

    out.write_all(b"\n")?;
    out.flush()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed {seed}");

    let mut game = Game::new(ChaCha8Rng::seed_from_u64(seed));
    let renderer = Renderer::new(!args.no_colour);

    let mut stdout = io::stdout().lock();
    let mut stdin = io::stdin().lock();

    terminal::set_interrupt_handler().context("installing SIGINT handler")?;
    let _raw_mode = terminal::RawMode::enable(&stdin).context("switching terminal to raw mode")?;

    play_interactive(&mut stdout, &mut stdin, &mut game, renderer)
}

#[cfg(test)]
mod tests {
    use lib_2048::Board;

    use super::*;

    fn play(game: &mut Game<ChaCha8Rng>, keys: &[u8]) -> String {
        let mut out = Vec::new();
        let mut input = keys;

        play_interactive(&mut out, &mut input, game, Renderer::new(false)).unwrap();

        String::from_utf8(out).unwrap()
    }

    #[test]
    fn moves_until_input_ends() {
        let board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(ChaCha8Rng::seed_from_u64(1), board, 0);

        let output = play(&mut game, b"\x1b[D");

        assert_eq!(game.score(), 4);
        assert_eq!(game.board().cell(0, 0), 4);
        assert!(output.contains("Score: 4"));
    }

    #[test]
    fn quit_stops_reading_keys() {
        let board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(ChaCha8Rng::seed_from_u64(1), board, 0);

        play(&mut game, b"qa");

        assert_eq!(game.board(), board);
    }

    #[test]
    fn game_over_is_announced_and_a_new_game_drawn() {
        let board = Board::from_rows([
            [8, 16, 8, 0],
            [16, 32, 64, 32],
            [32, 64, 128, 64],
            [64, 128, 256, 128],
        ])
        .unwrap();
        let mut game = Game::with_board(ChaCha8Rng::seed_from_u64(1), board, 300);

        let output = play(&mut game, b"d");

        assert!(output.contains("Game over! Score 300, largest tile 256"));
        assert_eq!(output.matches("Score: 0").count(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn reset_key_starts_over() {
        let board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(ChaCha8Rng::seed_from_u64(1), board, 64);

        let output = play(&mut game, b"r");

        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), 14);
        assert!(output.contains("Score: 0"));
    }
}
