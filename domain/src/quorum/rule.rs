//! Quorum rules
//!
//! This module defines how the minimum attendance for doing business is
//! resolved against a participant count.

use serde::{Deserialize, Serialize};

/// Fraction of the participant count required for quorum
///
/// Serialized as `"majority"`, `"1/3"`, `"2/3"` or a bare number such as `0.4`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FractionRepr", into = "FractionRepr")]
pub enum QuorumFraction {
    /// floor(n/2) + 1
    Majority,
    /// ceil(n/3)
    OneThird,
    /// ceil(2n/3)
    TwoThirds,
    /// ceil(n * f), with 0 < f <= 1
    Ratio(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FractionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<FractionRepr> for QuorumFraction {
    type Error = String;

    fn try_from(repr: FractionRepr) -> Result<Self, Self::Error> {
        match repr {
            FractionRepr::Number(f) => QuorumFraction::ratio(f),
            FractionRepr::Text(s) => s.parse(),
        }
    }
}

impl From<QuorumFraction> for FractionRepr {
    fn from(fraction: QuorumFraction) -> Self {
        match fraction {
            QuorumFraction::Ratio(f) => FractionRepr::Number(f),
            other => FractionRepr::Text(other.to_string()),
        }
    }
}

impl QuorumFraction {
    fn ratio(f: f64) -> Result<Self, String> {
        if f > 0.0 && f <= 1.0 {
            Ok(QuorumFraction::Ratio(f))
        } else {
            Err(format!("Quorum fraction must be in (0, 1], got {}", f))
        }
    }

    pub fn resolve(&self, n: u32) -> u32 {
        match self {
            QuorumFraction::Majority => n / 2 + 1,
            QuorumFraction::OneThird => n.div_ceil(3),
            QuorumFraction::TwoThirds => (2 * n).div_ceil(3),
            QuorumFraction::Ratio(f) => (n as f64 * f).ceil() as u32,
        }
    }
}

impl std::fmt::Display for QuorumFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuorumFraction::Majority => write!(f, "majority"),
            QuorumFraction::OneThird => write!(f, "1/3"),
            QuorumFraction::TwoThirds => write!(f, "2/3"),
            QuorumFraction::Ratio(r) => write!(f, "{}", r),
        }
    }
}

impl std::str::FromStr for QuorumFraction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(QuorumFraction::Majority),
            "1/3" => Ok(QuorumFraction::OneThird),
            "2/3" => Ok(QuorumFraction::TwoThirds),
            s if s.contains('/') => {
                let (num, den) = s.split_once('/').ok_or("Invalid fraction")?;
                let num: f64 = num.trim().parse().map_err(|_| "Invalid numerator")?;
                let den: f64 = den.trim().parse().map_err(|_| "Invalid denominator")?;
                if den == 0.0 {
                    return Err("Denominator must not be zero".to_string());
                }
                QuorumFraction::ratio(num / den)
            }
            s => {
                let f: f64 = s
                    .parse()
                    .map_err(|_| format!("Unknown quorum fraction: {}", s))?;
                QuorumFraction::ratio(f)
            }
        }
    }
}

/// Rule for determining quorum
///
/// # Example
///
/// ```
/// use gavel_domain::quorum::{QuorumFraction, QuorumRule};
///
/// let rule = QuorumRule::Fraction(QuorumFraction::TwoThirds);
/// assert_eq!(rule.resolve(10), 7);
///
/// let fixed = QuorumRule::FixedNumber(5);
/// assert_eq!(fixed.resolve(20), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum QuorumRule {
    /// A fixed head count (at least 1)
    FixedNumber(u32),
    /// A fraction of the participant count
    Fraction(QuorumFraction),
    /// floor(n/2) + 1
    #[default]
    MajorityOfPresent,
}

impl QuorumRule {
    /// Resolve this rule to a concrete head count for `participant_count`
    pub fn resolve(&self, participant_count: u32) -> u32 {
        match self {
            QuorumRule::FixedNumber(n) => (*n).max(1),
            QuorumRule::Fraction(fraction) => fraction.resolve(participant_count),
            QuorumRule::MajorityOfPresent => participant_count / 2 + 1,
        }
    }

    /// Check if `present` members satisfy the rule
    pub fn is_met(&self, present: u32, participant_count: u32) -> bool {
        present >= self.resolve(participant_count)
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            QuorumRule::FixedNumber(n) => format!("at least {} members", (*n).max(1)),
            QuorumRule::Fraction(fraction) => format!("{} of the membership", fraction),
            QuorumRule::MajorityOfPresent => "majority of those present".to_string(),
        }
    }
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "majority-of-present" | "majority_of_present" | "present" => {
                Ok(QuorumRule::MajorityOfPresent)
            }
            s if s.starts_with("fixed:") => {
                let n: u32 = s
                    .trim_start_matches("fixed:")
                    .parse()
                    .map_err(|_| "Invalid number for fixed")?;
                Ok(QuorumRule::FixedNumber(n))
            }
            s if s.starts_with("fraction:") => {
                Ok(QuorumRule::Fraction(s.trim_start_matches("fraction:").parse()?))
            }
            s if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() => {
                let n: u32 = s.parse().map_err(|_| "Invalid number")?;
                Ok(QuorumRule::FixedNumber(n))
            }
            s => s.parse::<QuorumFraction>().map(QuorumRule::Fraction).map_err(|_| {
                format!(
                    "Unknown quorum rule: {}. Valid: majority-of-present, fixed:N, fraction:2/3, majority, 1/3, 0.4",
                    s
                )
            }),
        }
    }
}
