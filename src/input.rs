use aho_corasick::{AhoCorasick, BuildError, MatchKind};
use lib_2048::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Reset,
    Quit,
}

const KEYS: [(&[u8], Key); 10] = [
    (b"\x1b[A", Key::Move(Direction::Up)),
    (b"\x1b[B", Key::Move(Direction::Down)),
    (b"\x1b[C", Key::Move(Direction::Right)),
    (b"\x1b[D", Key::Move(Direction::Left)),
    (b"w", Key::Move(Direction::Up)),
    (b"s", Key::Move(Direction::Down)),
    (b"d", Key::Move(Direction::Right)),
    (b"a", Key::Move(Direction::Left)),
    (b"r", Key::Reset),
    (b"q", Key::Quit),
];

/// Turns raw terminal bytes into keys. An escape sequence split across two reads is held back
/// until the rest of it arrives.
pub struct KeyDecoder {
    searcher: AhoCorasick,
    pending: Vec<u8>,
}

impl KeyDecoder {
    pub fn new() -> Result<Self, BuildError> {
        let searcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(KEYS.map(|(pattern, _)| pattern))?;

        Ok(Self {
            searcher,
            pending: Vec::new(),
        })
    }

    pub fn decode(&mut self, input: &[u8]) -> Vec<Key> {
        self.pending.extend_from_slice(input);

        let keys = self
            .searcher
            .find_iter(&self.pending)
            .map(|m| KEYS[m.pattern().as_usize()].1)
            .collect();

        let keep = match self.pending.as_slice() {
            [.., 0x1b, b'['] => 2,
            [.., 0x1b] => 1,
            _ => 0,
        };

        self.pending.drain(..self.pending.len() - keep);

        keys
    }
}
