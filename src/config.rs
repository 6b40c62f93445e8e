/// Default server port.
pub const DEFAULT_PORT: u16 = 4444;
/// Default square board size when neither `--size` nor `--file` is given.
pub const DEFAULT_SIZE: usize = 10;
/// Probability that a randomly generated cell holds a mine.
pub const MINE_PROBABILITY: f64 = 0.25;
