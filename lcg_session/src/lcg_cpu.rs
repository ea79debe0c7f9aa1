use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_INCREMENT, DEFAULT_MODULUS, DEFAULT_MULTIPLIER};
use crate::error::{InvalidParameter, Result};

/// Largest f64 strictly below one.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Parameters of the recurrence x(n) = a*x(n-1) + c mod m.
///
/// The multiplier and increment are stored reduced into `[0, modulus)`, so two
/// parameter sets that drive identical generators compare equal.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParams")]
pub struct GeneratorParams {
    modulus: i64,
    multiplier: i64,
    increment: i64,
}

/// Unvalidated form used when deserializing.
#[derive(Deserialize)]
struct RawParams {
    modulus: i64,
    multiplier: i64,
    increment: i64,
}

impl TryFrom<RawParams> for GeneratorParams {
    type Error = InvalidParameter;

    fn try_from(raw: RawParams) -> std::result::Result<Self, Self::Error> {
        Self::validated(raw.modulus, raw.multiplier, raw.increment)
    }
}

impl GeneratorParams {
    /// Validate the modulus and normalize multiplier and increment into `[0, modulus)`.
    pub fn new(modulus: i64, multiplier: i64, increment: i64) -> Result<Self> {
        Ok(Self::validated(modulus, multiplier, increment)?)
    }

    fn validated(
        modulus: i64,
        multiplier: i64,
        increment: i64,
    ) -> std::result::Result<Self, InvalidParameter> {
        if modulus <= 0 {
            return Err(InvalidParameter::NonPositiveModulus(modulus));
        }
        Ok(Self {
            modulus,
            multiplier: multiplier.rem_euclid(modulus),
            increment: increment.rem_euclid(modulus),
        })
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    pub fn multiplier(&self) -> i64 {
        self.multiplier
    }

    pub fn increment(&self) -> i64 {
        self.increment
    }

    /// Reduce an arbitrary seed into a valid state for these parameters.
    pub fn reduce(&self, seed: i64) -> i64 {
        seed.rem_euclid(self.modulus)
    }
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS,
            multiplier: DEFAULT_MULTIPLIER,
            increment: DEFAULT_INCREMENT,
        }
    }
}

/// Implements a linear congruential generator; x(n)=a*x(n-1) + c mod m
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct LinearCongruential {
    params: GeneratorParams,

    /// Current state, always in `[0, modulus)`.
    state: i64,
}

impl LinearCongruential {
    /// Build a generator from raw inputs, normalizing everything into `[0, modulus)`.
    pub fn new(modulus: i64, multiplier: i64, increment: i64, seed: i64) -> Result<Self> {
        let params = GeneratorParams::new(modulus, multiplier, increment)?;
        Ok(Self::from_params(params, seed))
    }

    /// Build a generator from parameters that are already validated.
    pub fn from_params(params: GeneratorParams, seed: i64) -> Self {
        Self {
            params,
            state: params.reduce(seed),
        }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Access to the current state.
    pub fn state(&self) -> i64 {
        self.state
    }

    /// Restart from `seed`, keeping the parameters.
    pub fn reseed(&mut self, seed: i64) {
        self.state = self.params.reduce(seed);
    }

    /// Advance the generator and return the new state.
    pub fn next_int(&mut self) -> i64 {
        let p = &self.params;
        // Both factors are below 2^63, so the product fits comfortably in 128 bits.
        let wide = p.multiplier as i128 * self.state as i128 + p.increment as i128;
        self.state = wide.rem_euclid(p.modulus as i128) as i64;
        self.state
    }

    /// Advance the generator and return the new state scaled into `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        let value = self.next_int();
        self.normalize(value)
    }

    /// Scale a generator output into `[0, 1)`.
    pub fn normalize(&self, value: i64) -> f64 {
        let scaled = value as f64 / self.params.modulus as f64;
        // Above 2^53 both operands round, and the quotient can land on 1.0.
        if scaled < 1.0 {
            scaled
        } else {
            BELOW_ONE
        }
    }
}

impl std::fmt::Debug for LinearCongruential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[a={} c={} m={} x={}]",
            self.params.multiplier, self.params.increment, self.params.modulus, self.state
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_lcg() -> Result<()> {
        let mut rng = LinearCongruential::new(1 << 31, 1103515245, 12345, 42)?;
        assert_eq!(rng.next_int(), 1250496027);
        assert_eq!(rng.next_int(), 1116302264);
        assert_eq!(rng.next_int(), 1000676753);
        assert_eq!(rng.next_int(), 1668674806);
        assert_eq!(rng.next_int(), 908095735);
        Ok(())
    }

    #[test]
    fn test_first_value_matches_recurrence() -> Result<()> {
        let mut rng = LinearCongruential::new(1 << 31, 1103515245, 12345, 42)?;
        let expected = ((1103515245i128 * 42 + 12345) % (1i128 << 31)) as i64;
        assert_eq!(expected, 1250496027);
        assert_eq!(rng.next_int(), expected);
        Ok(())
    }

    #[test]
    fn test_rejects_non_positive_modulus() {
        assert_eq!(
            LinearCongruential::new(0, 1, 1, 1),
            Err(Error::InvalidParameter(InvalidParameter::NonPositiveModulus(0)))
        );
        assert_eq!(
            GeneratorParams::new(-5, 1, 1),
            Err(Error::InvalidParameter(InvalidParameter::NonPositiveModulus(-5)))
        );
    }

    #[test]
    fn test_negative_inputs_use_floor_modulo() -> Result<()> {
        let mut rng = LinearCongruential::new(10, -3, -1, -7)?;
        assert_eq!(rng.params().multiplier(), 7);
        assert_eq!(rng.params().increment(), 9);
        assert_eq!(rng.state(), 3);
        assert_eq!(rng.next_int(), 0);
        Ok(())
    }

    #[test]
    fn test_equivalent_params_compare_equal() -> Result<()> {
        assert_eq!(GeneratorParams::new(100, 107, -97)?, GeneratorParams::new(100, 7, 3)?);
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<()> {
        let mut a = LinearCongruential::new(1_000_003, -17, 99, 123_456_789)?;
        let mut b = LinearCongruential::new(1_000_003, -17, 99, 123_456_789)?;
        for _ in 0..1000 {
            assert_eq!(a.next_int(), b.next_int());
        }
        Ok(())
    }

    #[test]
    fn test_state_stays_in_range() -> Result<()> {
        for &(m, a, c, seed) in &[
            (1i64, 5i64, 7i64, 9i64),
            (97, -45, 1_000, -1),
            (1 << 31, 1103515245, 12345, 42),
            (i64::MAX, i64::MAX - 1, i64::MAX - 2, i64::MIN),
        ] {
            let mut rng = LinearCongruential::new(m, a, c, seed)?;
            for _ in 0..200 {
                let value = rng.next_int();
                assert!((0..m).contains(&value));
                assert_eq!(value, rng.state());
            }
        }
        Ok(())
    }

    #[test]
    fn test_no_overflow_near_i64_max() -> Result<()> {
        let m = i64::MAX;
        let mut rng = LinearCongruential::new(m, m - 1, m - 2, m - 3)?;
        assert_eq!(rng.next_int(), 1);
        assert_eq!(rng.next_int(), 9223372036854775804);
        assert_eq!(rng.next_int(), 1);
        Ok(())
    }

    #[test]
    fn test_float_stays_below_one() -> Result<()> {
        let m = i64::MAX;
        // From state 1 the next state is m - 3, which rounds to 1.0 in f64 division.
        let mut rng = LinearCongruential::new(m, m - 1, m - 2, 1)?;
        let value = rng.next_float();
        assert!(value < 1.0);
        assert!(value > 0.99);

        let mut rng = LinearCongruential::new(1 << 31, 1103515245, 12345, 42)?;
        for _ in 0..1000 {
            let value = rng.next_float();
            assert!((0.0..1.0).contains(&value));
        }
        Ok(())
    }

    #[test]
    fn test_float_is_int_over_modulus() -> Result<()> {
        let mut ints = LinearCongruential::new(100, 7, 3, 5)?;
        let mut floats = ints;
        assert_eq!(ints.next_int(), 38);
        assert_eq!(floats.next_float(), 0.38);
        Ok(())
    }

    #[test]
    fn test_modulus_one_is_constant() -> Result<()> {
        let mut rng = LinearCongruential::new(1, 1103515245, -12345, 987)?;
        for _ in 0..20 {
            assert_eq!(rng.next_int(), 0);
        }
        assert_eq!(rng.next_float(), 0.0);
        Ok(())
    }

    #[test]
    fn test_reseed_matches_fresh_construction() -> Result<()> {
        let mut rng = LinearCongruential::new(100, 7, 3, 5)?;
        for _ in 0..10 {
            rng.next_int();
        }
        rng.reseed(-195);
        assert_eq!(rng.state(), 5);

        let mut fresh = LinearCongruential::new(100, 7, 3, 5)?;
        for _ in 0..10 {
            assert_eq!(rng.next_int(), fresh.next_int());
        }
        Ok(())
    }

    #[test]
    fn test_deserialize_validates() {
        let params: GeneratorParams =
            serde_json::from_str(r#"{"modulus":100,"multiplier":-1,"increment":103}"#).unwrap();
        assert_eq!(params.multiplier(), 99);
        assert_eq!(params.increment(), 3);

        let err = serde_json::from_str::<GeneratorParams>(
            r#"{"modulus":0,"multiplier":1,"increment":1}"#,
        );
        assert!(err.is_err());
    }
}
