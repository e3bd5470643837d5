//! Types for effect size representation

use std::fmt;

/// Types of effect sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSizeType {
    /// Probability-based measure (A12 / CLES), range `[0, 1]`
    Probability,
    /// Signed dominance measure (`2 * A12 - 1`), range `[-1, 1]`
    Dominance,
}

impl EffectSizeType {
    /// Get the name of the effect size type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Probability => "Probability",
            Self::Dominance => "Dominance",
        }
    }

    /// Get the range for this effect size type
    pub fn typical_range(&self) -> (f64, f64) {
        match self {
            Self::Probability => (0.0, 1.0),
            Self::Dominance => (-1.0, 1.0),
        }
    }

    /// Value meaning "no difference between the groups"
    pub fn neutral(&self) -> f64 {
        match self {
            Self::Probability => 0.5,
            Self::Dominance => 0.0,
        }
    }
}

/// An effect size measurement with magnitude and interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSize {
    /// The effect size magnitude, NaN when undefined
    pub magnitude: f64,
    /// The type of effect size
    pub effect_type: EffectSizeType,
    /// Interpretation of the magnitude
    pub interpretation: EffectSizeInterpretation,
    /// Sample sizes (group1, group2)
    pub sample_sizes: Option<(usize, usize)>,
}

impl EffectSize {
    /// Create a new effect size
    pub fn new(
        magnitude: f64,
        effect_type: EffectSizeType,
        sample_sizes: Option<(usize, usize)>,
    ) -> Self {
        let interpretation = EffectSizeInterpretation::from_magnitude(magnitude, effect_type);

        Self {
            magnitude,
            effect_type,
            interpretation,
            sample_sizes,
        }
    }

    /// Whether the statistic could be computed at all
    pub fn is_defined(&self) -> bool {
        !self.magnitude.is_nan()
    }

    /// Check if the effect favours group 1 (the first sample)
    pub fn favors_group1(&self) -> bool {
        self.magnitude > self.effect_type.neutral()
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.3} ({})",
            self.effect_type.name(),
            self.magnitude,
            self.interpretation
        )
    }
}

/// Interpretation of effect size magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSizeInterpretation {
    /// The statistic is undefined (empty sample)
    Undefined,
    /// Negligible effect (very small)
    Negligible,
    /// Small effect
    Small,
    /// Medium effect
    Medium,
    /// Large effect
    Large,
}

impl EffectSizeInterpretation {
    /// Get interpretation from magnitude based on effect size type
    pub fn from_magnitude(magnitude: f64, effect_type: EffectSizeType) -> Self {
        if magnitude.is_nan() {
            return Self::Undefined;
        }

        match effect_type {
            EffectSizeType::Dominance => {
                // Cliff's delta thresholds
                let abs_magnitude = magnitude.abs();
                if abs_magnitude < 0.147 {
                    Self::Negligible
                } else if abs_magnitude < 0.33 {
                    Self::Small
                } else if abs_magnitude < 0.474 {
                    Self::Medium
                } else {
                    Self::Large
                }
            }
            EffectSizeType::Probability => {
                // distance from chance
                let distance_from_chance = (magnitude - 0.5).abs();
                if distance_from_chance < 0.06 {
                    Self::Negligible
                } else if distance_from_chance < 0.14 {
                    Self::Small
                } else if distance_from_chance < 0.21 {
                    Self::Medium
                } else {
                    Self::Large
                }
            }
        }
    }
}

impl fmt::Display for EffectSizeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Undefined => "undefined",
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        write!(f, "{}", s)
    }
}
