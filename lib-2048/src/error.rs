#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell value {0} is not 0 or a power of two between 2 and 32768")]
    InvalidCell(u32),
}
