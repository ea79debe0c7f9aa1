use serde::{Deserialize, Serialize};

use crate::lcg_cpu::GeneratorParams;

/// Default modulus, 2^31.
pub const DEFAULT_MODULUS: i64 = 1 << 31;

/// Default multiplier, the one used by the classic ANSI C `rand()`.
pub const DEFAULT_MULTIPLIER: i64 = 1103515245;

/// Default increment, paired with [`DEFAULT_MULTIPLIER`].
pub const DEFAULT_INCREMENT: i64 = 12345;

pub const DEFAULT_SEED: i64 = 42;

pub const DEFAULT_SEQUENCE_LENGTH: usize = 50;

/// Longest sequence a host should offer; a usability limit, the session itself accepts any length.
pub const MAX_SEQUENCE_LENGTH: usize = 500;

/// Everything a host collects from its input widgets before calling into the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub params: GeneratorParams,
    pub seed: i64,
    pub length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            params: GeneratorParams::default(),
            seed: DEFAULT_SEED,
            length: DEFAULT_SEQUENCE_LENGTH,
        }
    }
}
