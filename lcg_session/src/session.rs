use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{InvalidParameter, Result};
use crate::lcg_cpu::{GeneratorParams, LinearCongruential};
use crate::summary::SequenceSummary;

/// One generated value, as rendered by a host in its table and chart.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SequenceEntry {
    /// 1-based position in the sequence.
    pub index: usize,
    /// Raw generator output.
    pub integer: i64,
    /// `integer / modulus`, in `[0, 1)`.
    pub normalized: f64,
}

/// The inputs a generator was last built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub params: GeneratorParams,
    pub seed: i64,
}

impl SessionSnapshot {
    /// Whether live inputs have drifted from the ones recorded here.
    pub fn is_stale(&self, params: &GeneratorParams, seed: i64) -> bool {
        self.params != *params || self.seed != seed
    }
}

/// What the last user action did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    AwaitingConfiguration,
    Ready,
    Generated(usize),
    Stepped,
    Cleared,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::AwaitingConfiguration => write!(f, "Awaiting configuration"),
            SessionStatus::Ready => write!(f, "Generator ready"),
            SessionStatus::Generated(n) => write!(f, "Generated {n} values"),
            SessionStatus::Stepped => write!(f, "Generated next value"),
            SessionStatus::Cleared => write!(f, "Output cleared"),
        }
    }
}

/// Per-session state behind the interactive controls.
///
/// A host owns one controller for the lifetime of an interactive session and
/// passes the live widget values into every action. The controller keeps the
/// displayed sequence consistent with those values: whenever they differ from
/// the ones the current generator was built with, the generator is rebuilt and
/// the old output dropped before anything new is produced.
#[derive(Debug, Default)]
pub struct SessionController {
    generator: Option<LinearCongruential>,
    sequence: Vec<SequenceEntry>,
    snapshot: Option<SessionSnapshot>,
    status: SessionStatus,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> &[SequenceEntry] {
        &self.sequence
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn generator(&self) -> Option<&LinearCongruential> {
        self.generator.as_ref()
    }

    pub fn summary(&self) -> Option<SequenceSummary> {
        SequenceSummary::from_entries(&self.sequence)
    }

    /// True when there is no snapshot or it differs from the live inputs.
    pub fn is_stale(&self, params: &GeneratorParams, seed: i64) -> bool {
        self.snapshot
            .map_or(true, |snapshot| snapshot.is_stale(params, seed))
    }

    /// Rebuild the generator and reseed it, with an empty output.
    pub fn apply_settings(&mut self, params: &GeneratorParams, seed: i64) {
        self.rebuild(params, seed).reseed(seed);
        self.sequence.clear();
        self.status = SessionStatus::Ready;
    }

    /// Replace the output with `length` fresh values from `seed`.
    pub fn generate(
        &mut self,
        params: &GeneratorParams,
        seed: i64,
        length: usize,
    ) -> Result<&[SequenceEntry]> {
        if length < 1 {
            return Err(InvalidParameter::EmptySequence.into());
        }
        let generator = self.rebuild(params, seed);
        generator.reseed(seed);
        let sequence = (1..=length)
            .map(|index| entry(generator, index))
            .collect();
        self.sequence = sequence;
        self.status = SessionStatus::Generated(length);
        info!(length, seed, "generated sequence");
        Ok(&self.sequence)
    }

    /// Fill the output with an initial sequence if nothing has happened yet.
    pub fn prime(
        &mut self,
        params: &GeneratorParams,
        seed: i64,
        length: usize,
    ) -> Result<&[SequenceEntry]> {
        if self.status == SessionStatus::AwaitingConfiguration && self.sequence.is_empty() {
            return self.generate(params, seed, length);
        }
        Ok(&self.sequence)
    }

    /// Append one value, restarting from `seed` if the inputs changed.
    pub fn step(&mut self, params: &GeneratorParams, seed: i64) -> SequenceEntry {
        if self.is_stale(params, seed) {
            debug!("inputs changed since last build, discarding {} values", self.sequence.len());
            self.rebuild(params, seed);
            self.sequence.clear();
        }
        let restart = self.sequence.is_empty();
        let index = self.sequence.len() + 1;
        let generator = self.live_generator(params, seed);
        if restart {
            generator.reseed(seed);
        }
        let next = entry(generator, index);
        trace!(index, integer = next.integer, "stepped");
        self.sequence.push(next);
        self.status = SessionStatus::Stepped;
        next
    }

    /// Clear the output and restart the generator from `seed`.
    pub fn reset(&mut self, params: &GeneratorParams, seed: i64) {
        if self.is_stale(params, seed) {
            self.rebuild(params, seed);
        }
        self.live_generator(params, seed).reseed(seed);
        self.sequence.clear();
        self.status = SessionStatus::Cleared;
        info!(seed, "output cleared");
    }

    /// Construct a generator from the live inputs and record them.
    fn rebuild(&mut self, params: &GeneratorParams, seed: i64) -> &mut LinearCongruential {
        debug!(
            modulus = params.modulus(),
            multiplier = params.multiplier(),
            increment = params.increment(),
            seed,
            "building generator"
        );
        self.snapshot = Some(SessionSnapshot {
            params: *params,
            seed,
        });
        self.generator.insert(LinearCongruential::from_params(*params, seed))
    }

    /// The held generator. Callers rebuild first when stale, so it is only
    /// ever empty here if that invariant is broken.
    fn live_generator(&mut self, params: &GeneratorParams, seed: i64) -> &mut LinearCongruential {
        self.generator
            .get_or_insert_with(|| LinearCongruential::from_params(*params, seed))
    }
}

fn entry(generator: &mut LinearCongruential, index: usize) -> SequenceEntry {
    let integer = generator.next_int();
    SequenceEntry {
        index,
        integer,
        normalized: generator.normalize(integer),
    }
}
