//! Advisory password strength scoring
//!
//! The score never gates an operation; only the fixed minimum length in
//! [`crate::validate`] does.

use std::fmt;

/// Score in `{0, 20, 40, 60, 80, 100}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MAX: StrengthScore = StrengthScore(100);

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn level(self) -> StrengthLevel {
        match self.0 {
            0 => StrengthLevel::Empty,
            1..=39 => StrengthLevel::Weak,
            40..=79 => StrengthLevel::Moderate,
            _ => StrengthLevel::Strong,
        }
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Coarse label for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLevel {
    /// Nothing scored, typically an empty password.
    Empty,
    Weak,
    Moderate,
    Strong,
}

impl StrengthLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::Empty => "None",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Moderate => "Moderate",
            StrengthLevel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score a password: +20 each for length > 8, length > 12, an ASCII
/// uppercase letter, an ASCII digit, and any character outside `[A-Za-z0-9]`.
///
/// Length is counted in characters.
pub fn score_password_strength(password: &str) -> StrengthScore {
    let length = password.chars().count();
    let criteria = [
        length > 8,
        length > 12,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let met = criteria.iter().filter(|met| **met).count() as u8;
    StrengthScore(met * 20)
}
