use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Per-session parameters shared by every rule. Fixed once the session
/// starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameContext {
    session_id: String,
    required_sum: u32,
}

impl GameContext {
    pub fn new(session_id: impl Into<String>, required_sum: u32) -> Self {
        Self {
            session_id: session_id.into(),
            required_sum,
        }
    }

    /// Deterministic context for a seed, with `required_sum` drawn from
    /// `min_sum..=max_sum`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_sum > max_sum`.
    pub fn generate(seed: u64, min_sum: u32, max_sum: u32) -> Result<Self, ValidationError> {
        if min_sum > max_sum {
            return Err(ValidationError::InvalidValue {
                field: "required_sum".into(),
                message: format!("range {min_sum}..={max_sum} is empty"),
            });
        }
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let session_id = uuid::Builder::from_random_bytes(bytes).into_uuid();
        let required_sum = rng.gen_range(min_sum..=max_sum);
        Ok(Self {
            session_id: session_id.to_string(),
            required_sum,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn required_sum(&self) -> u32 {
        self.required_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_context() {
        let a = GameContext::generate(7, 10, 40).unwrap();
        let b = GameContext::generate(7, 10, 40).unwrap();
        assert_eq!(a, b);
        assert!((10..=40).contains(&a.required_sum()));
        assert!(uuid::Uuid::parse_str(a.session_id()).is_ok());
    }

    #[test]
    fn different_seeds_differ_in_session_id() {
        let a = GameContext::generate(1, 10, 40).unwrap();
        let b = GameContext::generate(2, 10, 40).unwrap();
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(GameContext::generate(1, 41, 40).is_err());
        assert_eq!(GameContext::generate(1, 12, 12).unwrap().required_sum(), 12);
    }
}
