use crate::error::WordfinderError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// First and last symbols of the default alphabet (space through tilde).
pub const PRINTABLE_ASCII_FIRST: char = ' ';
pub const PRINTABLE_ASCII_LAST: char = '~';

/// Ordered set of symbols a DNA string is drawn from.
///
/// The alphabet is treated as circular: the symbol after the last one is the
/// first one again. Distances and drift offsets are measured on symbol indices,
/// not on code points, so any set of characters works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from an explicit symbol string. Order is preserved.
    pub fn new(symbols: &str) -> Result<Self, WordfinderError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(WordfinderError::Configuration(
                "Alphabet must contain at least one symbol".to_string(),
            ));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(WordfinderError::Configuration(format!(
                    "Alphabet contains duplicate symbol {:?}",
                    c
                )));
            }
        }
        Ok(Self { symbols })
    }

    /// Contiguous code point range, inclusive on both ends.
    pub fn from_range(first: char, last: char) -> Result<Self, WordfinderError> {
        if first > last {
            return Err(WordfinderError::Configuration(format!(
                "Alphabet range {:?}..={:?} is empty",
                first, last
            )));
        }
        Ok(Self {
            symbols: (first..=last).collect(),
        })
    }

    pub fn printable_ascii() -> Self {
        Self {
            symbols: (PRINTABLE_ASCII_FIRST..=PRINTABLE_ASCII_LAST).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    pub fn index_of(&self, c: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == c)
    }

    /// Symbol at `index`, wrapping around the end of the alphabet.
    pub fn symbol(&self, index: usize) -> char {
        self.symbols[index % self.symbols.len()]
    }

    /// Uniformly drawn symbol.
    pub fn random_symbol<R: Rng>(&self, rng: &mut R) -> char {
        self.symbol(rng.gen_range(0..self.symbols.len()))
    }

    /// Largest possible circular distance between two symbols.
    pub fn max_distance(&self) -> usize {
        self.symbols.len() / 2
    }

    /// Circular distance between two symbol indices.
    pub fn circular_distance(&self, a: usize, b: usize) -> usize {
        let n = self.symbols.len();
        let forward = (a + n - b % n) % n;
        forward.min(n - forward)
    }

    /// Symbol `offset` steps away from `c`, wrapping around both ends.
    /// Characters outside the alphabet are returned unchanged.
    pub fn shift(&self, c: char, offset: i64) -> char {
        match self.index_of(c) {
            Some(index) => {
                let n = self.symbols.len() as i64;
                self.symbol((index as i64 + offset).rem_euclid(n) as usize)
            }
            None => c,
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::printable_ascii()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = WordfinderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.symbols.first(), self.symbols.last()) {
            (Some(first), Some(last)) if self.symbols.len() > 8 => {
                write!(f, "{:?}..={:?} ({} symbols)", first, last, self.symbols.len())
            }
            _ => write!(f, "{:?}", self.symbols.iter().collect::<String>()),
        }
    }
}
