use crate::utils::error::{Result, ToolError};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fmt;

pub const MIN_CUSTOM_LENGTH: usize = 4;
pub const MAX_CUSTOM_LENGTH: usize = 10;

const DIGITS: &[u8] = b"0123456789";
const UPPER_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MIXED: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SEPARATORS: [char; 4] = ['-', '_', '.', '~'];
const NOISE: [char; 4] = ['*', '#', '@', '+'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    fn alphabet(&self) -> &'static [u8] {
        match self {
            Difficulty::Easy => DIGITS,
            Difficulty::Medium => UPPER_DIGITS,
            Difficulty::Hard => MIXED,
        }
    }

    fn default_lengths(&self) -> std::ops::RangeInclusive<usize> {
        match self {
            Difficulty::Easy | Difficulty::Medium => 4..=5,
            Difficulty::Hard => 5..=7,
        }
    }

    pub fn case_sensitive(&self) -> bool {
        *self == Difficulty::Hard
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ToolError::validation(format!(
                "Unknown difficulty '{}'. Use easy, medium or hard.",
                other
            ))),
        }
    }
}

pub fn clamp_length(length: i64) -> usize {
    length.clamp(MIN_CUSTOM_LENGTH as i64, MAX_CUSTOM_LENGTH as i64) as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    pub text: String,
    pub display: String,
    pub difficulty: Difficulty,
}

impl Captcha {
    pub fn generate(difficulty: Difficulty, length: Option<usize>) -> Self {
        Self::generate_with(&mut rand::rng(), difficulty, length)
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, length: Option<usize>) -> Self {
        let length = length.unwrap_or_else(|| rng.random_range(difficulty.default_lengths()));
        let alphabet = difficulty.alphabet();
        let text: String = (0..length)
            .filter_map(|_| alphabet.choose(rng).map(|b| *b as char))
            .collect();
        let display = format_display(rng, &text, difficulty);
        Self {
            text,
            display,
            difficulty,
        }
    }

    pub fn hint(&self) -> String {
        let n = self.text.chars().count();
        match self.difficulty {
            Difficulty::Easy => format!("Enter the {} numbers you see", n),
            Difficulty::Medium => format!(
                "Enter the {} alphanumeric characters (case-insensitive)",
                n
            ),
            Difficulty::Hard => format!(
                "Enter the {} characters exactly as shown (case-sensitive)",
                n
            ),
        }
    }

    pub fn verify(&self, input: &str) -> bool {
        let input = input.trim();
        if self.difficulty.case_sensitive() {
            self.text == input
        } else {
            self.text.to_lowercase() == input.to_lowercase()
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[char]) -> char {
    options.choose(rng).copied().unwrap_or(options[0])
}

/// Easy joins with a separator, medium adds a noise frame, hard alternates case and trails every char with the separator.
fn format_display<R: Rng + ?Sized>(rng: &mut R, text: &str, difficulty: Difficulty) -> String {
    let sep = pick(rng, &SEPARATORS);
    let joined = || {
        text.chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(&sep.to_string())
    };
    match difficulty {
        Difficulty::Easy => joined(),
        Difficulty::Medium => {
            let noise = pick(rng, &NOISE);
            format!("{} {} {}", noise, joined(), noise)
        }
        Difficulty::Hard => text
            .chars()
            .enumerate()
            .flat_map(|(i, c)| {
                let shown = if i % 2 == 0 {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                };
                [shown, sep]
            })
            .collect(),
    }
}
