use super::alphabet::Alphabet;
use crate::error::WordfinderError;
use serde::{Deserialize, Serialize};

/// Longest target the exponential policy accepts before `2^len` leaves `f64` range.
pub const MAX_EXPONENTIAL_TARGET_LEN: usize = 1023;

/// How a candidate string is scored against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessPolicy {
    /// `2^matches - 1`: every extra matching position doubles the score.
    #[default]
    Exponential,
    /// Number of matching positions.
    Linear,
    /// Partial credit per position, by circular distance on the alphabet.
    Closeness,
}

impl std::str::FromStr for FitnessPolicy {
    type Err = WordfinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exponential" => Ok(FitnessPolicy::Exponential),
            "linear" => Ok(FitnessPolicy::Linear),
            "closeness" => Ok(FitnessPolicy::Closeness),
            other => Err(WordfinderError::Configuration(format!(
                "Unknown fitness policy '{}' (expected exponential, linear or closeness)",
                other
            ))),
        }
    }
}

/// Scores DNA against a fixed target under one policy.
#[derive(Debug, Clone)]
pub struct FitnessFunction {
    policy: FitnessPolicy,
    target: Vec<char>,
    alphabet: Alphabet,
    max_score: f64,
}

impl FitnessFunction {
    pub fn new(
        policy: FitnessPolicy,
        target: &str,
        alphabet: Alphabet,
    ) -> Result<Self, WordfinderError> {
        let target: Vec<char> = target.chars().collect();
        if target.is_empty() {
            return Err(WordfinderError::Configuration(
                "Target must not be empty".to_string(),
            ));
        }
        if let Some(c) = target.iter().find(|c| !alphabet.contains(**c)) {
            return Err(WordfinderError::Configuration(format!(
                "Target character {:?} is not in the alphabet {}",
                c, alphabet
            )));
        }
        if policy == FitnessPolicy::Exponential && target.len() > MAX_EXPONENTIAL_TARGET_LEN {
            return Err(WordfinderError::Configuration(format!(
                "Exponential fitness supports targets up to {} characters, got {}",
                MAX_EXPONENTIAL_TARGET_LEN,
                target.len()
            )));
        }

        let max_score = match policy {
            FitnessPolicy::Exponential => 2f64.powi(target.len() as i32) - 1.0,
            FitnessPolicy::Linear => target.len() as f64,
            FitnessPolicy::Closeness => (alphabet.max_distance() * target.len()) as f64,
        };

        Ok(Self {
            policy,
            target,
            alphabet,
            max_score,
        })
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Score reached exactly when the candidate equals the target.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn score(&self, dna: &[char]) -> f64 {
        debug_assert_eq!(dna.len(), self.target.len());
        match self.policy {
            FitnessPolicy::Exponential => 2f64.powi(self.matches(dna) as i32) - 1.0,
            FitnessPolicy::Linear => self.matches(dna) as f64,
            FitnessPolicy::Closeness => self.closeness(dna) as f64,
        }
    }

    pub fn is_perfect(&self, score: f64) -> bool {
        score >= self.max_score
    }

    fn matches(&self, dna: &[char]) -> usize {
        dna.iter()
            .zip(&self.target)
            .filter(|(c, t)| c == t)
            .count()
    }

    fn closeness(&self, dna: &[char]) -> usize {
        let max_distance = self.alphabet.max_distance();
        dna.iter()
            .zip(&self.target)
            .map(|(&c, &t)| {
                match (self.alphabet.index_of(c), self.alphabet.index_of(t)) {
                    (Some(ci), Some(ti)) => {
                        max_distance - self.alphabet.circular_distance(ci, ti)
                    }
                    // Symbols outside the alphabet earn nothing
                    _ => 0,
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_exact_match_scores_maximum() {
        for policy in [
            FitnessPolicy::Exponential,
            FitnessPolicy::Linear,
            FitnessPolicy::Closeness,
        ] {
            let f = FitnessFunction::new(policy, "hello world", Alphabet::default()).unwrap();
            assert_eq!(f.score(&chars("hello world")), f.max_score());
            assert!(f.is_perfect(f.score(&chars("hello world"))));
        }
    }

    #[test]
    fn test_all_positions_differ_scores_zero() {
        let target = "unicorn";
        let miss = "xxxxxxx";
        for policy in [FitnessPolicy::Exponential, FitnessPolicy::Linear] {
            let f = FitnessFunction::new(policy, target, Alphabet::default()).unwrap();
            assert_eq!(f.score(&chars(miss)), 0.0);
        }
    }

    #[test]
    fn test_exponential_doubles_per_match() {
        let f = FitnessFunction::new(FitnessPolicy::Exponential, "abcd", Alphabet::default())
            .unwrap();
        assert_eq!(f.max_score(), 15.0);
        assert_eq!(f.score(&chars("axxx")), 1.0);
        assert_eq!(f.score(&chars("abxx")), 3.0);
        assert_eq!(f.score(&chars("abcx")), 7.0);
    }

    #[test]
    fn test_closeness_rewards_near_misses() {
        let alphabet = Alphabet::from_range('a', 'j').unwrap();
        let f = FitnessFunction::new(FitnessPolicy::Closeness, "aa", alphabet).unwrap();
        assert_eq!(f.max_score(), 10.0);
        // 'b' is one step away, 'j' wraps around to one step away
        assert_eq!(f.score(&chars("bj")), 8.0);
        // 'f' is the farthest symbol from 'a'
        assert_eq!(f.score(&chars("ff")), 0.0);
        assert!(f.score(&chars("ab")) > f.score(&chars("ac")));
    }

    #[test]
    fn test_invalid_targets_rejected() {
        let alphabet = Alphabet::new("ok").unwrap();
        assert!(FitnessFunction::new(FitnessPolicy::Linear, "", alphabet.clone()).is_err());
        assert!(FitnessFunction::new(FitnessPolicy::Linear, "no", alphabet).is_err());

        let long = "a".repeat(MAX_EXPONENTIAL_TARGET_LEN + 1);
        assert!(FitnessFunction::new(FitnessPolicy::Exponential, &long, Alphabet::default())
            .is_err());
        assert!(FitnessFunction::new(FitnessPolicy::Linear, &long, Alphabet::default()).is_ok());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Closeness".parse::<FitnessPolicy>().unwrap(), FitnessPolicy::Closeness);
        assert!("quadratic".parse::<FitnessPolicy>().is_err());
    }
}
