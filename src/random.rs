//! Random string and number generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    core::constants::{DEFAULT_RANDOM_STRING_LENGTH, MAX_LUCKY_NUMBER_LENGTH},
    MapError, Result,
};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
/// The 32 ASCII punctuation characters
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Length and alphabet of a random string. Lowercase letters are always in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomStringOptions {
    pub length: usize,
    pub upper: bool,
    pub digits: bool,
    pub punctuation: bool,
}

impl Default for RandomStringOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_RANDOM_STRING_LENGTH,
            upper: false,
            digits: false,
            punctuation: false,
        }
    }
}

impl RandomStringOptions {
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Characters a generated string may contain
    pub fn alphabet(&self) -> Vec<char> {
        let mut alphabet: Vec<char> = LOWERCASE.chars().collect();
        if self.upper {
            alphabet.extend(UPPERCASE.chars());
        }
        if self.digits {
            alphabet.extend(DIGITS.chars());
        }
        if self.punctuation {
            alphabet.extend(PUNCTUATION.chars());
        }
        alphabet
    }
}

/// `options.length` characters drawn uniformly from the selected alphabet.
pub fn generate_random_string(options: &RandomStringOptions) -> Result<String> {
    generate_random_string_with_rng(options, &mut rand::rng())
}

pub fn generate_random_string_with_rng<R: Rng>(
    options: &RandomStringOptions,
    rng: &mut R,
) -> Result<String> {
    if options.length == 0 {
        return Err(MapError::InvalidArgument(
            "random string length must be at least 1".into(),
        ));
    }
    let alphabet = options.alphabet();
    Ok((0..options.length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect())
}

/// `length` random decimal digits read as a number.
///
/// Leading zeros are kept during generation, so the result may print with
/// fewer than `length` digits.
pub fn generate_lucky_number(length: usize) -> Result<u64> {
    generate_lucky_number_with_rng(length, &mut rand::rng())
}

pub fn generate_lucky_number_with_rng<R: Rng>(length: usize, rng: &mut R) -> Result<u64> {
    if length == 0 || length > MAX_LUCKY_NUMBER_LENGTH {
        return Err(MapError::InvalidArgument(format!(
            "lucky number length must be within 1..={}, got {}",
            MAX_LUCKY_NUMBER_LENGTH, length
        )));
    }
    Ok((0..length).fold(0u64, |n, _| n * 10 + rng.random_range(0..10u64)))
}
