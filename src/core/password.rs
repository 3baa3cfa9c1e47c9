use crate::utils::error::{Result, ToolError};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::fmt;

pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const STRONG_LENGTH: usize = 8;
pub const SYMBOLS: &str = "!@#$%^&*()_-+=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrengthPolicy {
    /// Length, upper, lower, digit.
    #[default]
    Classic,
    /// Classic plus a symbol.
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criteria {
    pub long_enough: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl Criteria {
    pub fn evaluate(password: &str) -> Self {
        Self {
            long_enough: password.chars().count() >= STRONG_LENGTH,
            has_upper: password.chars().any(char::is_uppercase),
            has_lower: password.chars().any(char::is_lowercase),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    pub fn score(&self, policy: StrengthPolicy) -> usize {
        let mut checks = vec![self.long_enough, self.has_upper, self.has_lower, self.has_digit];
        if policy == StrengthPolicy::Extended {
            checks.push(self.has_symbol);
        }
        checks.into_iter().filter(|c| *c).count()
    }
}

impl StrengthPolicy {
    pub fn max_score(&self) -> usize {
        match self {
            StrengthPolicy::Classic => 4,
            StrengthPolicy::Extended => 5,
        }
    }

    /// Monotonic in `score`.
    pub fn classify(&self, score: usize) -> Strength {
        if score <= 2 {
            Strength::Weak
        } else if score < self.max_score() {
            Strength::Medium
        } else {
            Strength::Strong
        }
    }
}

pub fn validate_password_input(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(ToolError::validation(
            "Password cannot be empty. Please enter a password.",
        ));
    }
    if password.trim().is_empty() {
        return Err(ToolError::validation(
            "Password cannot be only whitespace. Please enter a valid password.",
        ));
    }
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ToolError::validation(format!(
            "Password is too short ({} characters). Please use at least {} characters.",
            len, MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub fn check_password_strength(password: &str, policy: StrengthPolicy) -> Result<Strength> {
    validate_password_input(password)?;
    let score = Criteria::evaluate(password).score(policy);
    Ok(policy.classify(score))
}

/// 3-5 lowercase, 3-5 uppercase, 2-4 symbols and 2-4 digits, shuffled.
pub fn generate_password() -> String {
    let mut rng = rand::rng();
    let lower: Vec<char> = ('a'..='z').collect();
    let upper: Vec<char> = ('A'..='Z').collect();
    let digits: Vec<char> = ('0'..='9').collect();
    let symbols: Vec<char> = SYMBOLS.chars().collect();

    let mut chars = Vec::new();
    for (pool, min, max) in [
        (&lower, 3, 5),
        (&upper, 3, 5),
        (&symbols, 2, 4),
        (&digits, 2, 4),
    ] {
        let count = rng.random_range(min..=max);
        for _ in 0..count {
            if let Some(c) = pool.choose(&mut rng) {
                chars.push(*c);
            }
        }
    }
    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password_input("password123").is_ok());
        assert!(validate_password_input(&"a".repeat(MIN_PASSWORD_LENGTH)).is_ok());
    }

    #[test]
    fn test_empty_password() {
        let err = validate_password_input("").unwrap_err();
        assert!(err.to_string().to_lowercase().contains("empty"));
    }

    #[test]
    fn test_whitespace_only_password() {
        let err = validate_password_input("   ").unwrap_err();
        assert!(err.to_string().to_lowercase().contains("whitespace"));
        let err = check_password_strength("    ", StrengthPolicy::Classic).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("whitespace"));
    }

    #[test]
    fn test_too_short_password() {
        let err = validate_password_input("ab").unwrap_err();
        let message = err.to_string().to_lowercase();
        assert!(message.contains("too short"));
        assert!(message.contains(&MIN_PASSWORD_LENGTH.to_string()));
    }

    #[test]
    fn test_classic_strength_levels() {
        let policy = StrengthPolicy::Classic;
        assert_eq!(check_password_strength("password", policy).unwrap(), Strength::Weak);
        assert_eq!(check_password_strength("pass", policy).unwrap(), Strength::Weak);
        assert_eq!(check_password_strength("Password", policy).unwrap(), Strength::Medium);
        assert_eq!(check_password_strength("Password1", policy).unwrap(), Strength::Strong);
    }

    #[test]
    fn test_extended_policy_requires_symbol_for_strong() {
        let policy = StrengthPolicy::Extended;
        assert_eq!(check_password_strength("Password1", policy).unwrap(), Strength::Medium);
        assert_eq!(check_password_strength("Password1!", policy).unwrap(), Strength::Strong);
    }

    #[test]
    fn test_classification_is_monotonic() {
        for policy in [StrengthPolicy::Classic, StrengthPolicy::Extended] {
            let levels: Vec<Strength> = (0..=policy.max_score()).map(|s| policy.classify(s)).collect();
            assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_generated_password_composition() {
        for _ in 0..20 {
            let password = generate_password();
            let len = password.chars().count();
            assert!((10..=18).contains(&len), "unexpected length {}", len);

            let criteria = Criteria::evaluate(&password);
            assert!(criteria.has_upper && criteria.has_lower && criteria.has_digit && criteria.has_symbol);
            assert_eq!(
                check_password_strength(&password, StrengthPolicy::Extended).unwrap(),
                Strength::Strong
            );
        }
    }
}
