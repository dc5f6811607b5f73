//! Scoring rubric — the fixed 7-criterion assessment definition.
//!
//! Declaration order is a contract: report rendering splits the sequence
//! positionally into the first 3 (role-based, marked 0/2/4) and the last 4
//! (cultural fit, marked 0/1/2). The `tier` field restates that split for
//! self-documentation but is never consulted for sectioning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of role-based criteria at the head of the rubric.
pub const ROLE_BASED_COUNT: usize = 3;
/// Maximum aggregate score: 3 role-based × 4 + 4 cultural-fit × 2.
pub const MAX_TOTAL_SCORE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    RoleBased,
    CulturalFit,
}

/// Qualitative assessment level. The level is the authoritative judgment;
/// marks are derived from it via the criterion's scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Poor,
    Basic,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Poor => "Poor",
            Level::Basic => "Basic",
            Level::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown rubric criterion: {0}")]
pub struct UnknownCriterion(pub String);

/// One rubric dimension with its three level descriptions.
#[derive(Debug, Clone)]
pub struct RubricCriterion {
    pub name: &'static str,
    pub tier: Tier,
    pub poor: &'static str,
    pub basic: &'static str,
    pub advanced: &'static str,
}

impl RubricCriterion {
    pub const fn max_score(&self) -> u32 {
        match self.tier {
            Tier::RoleBased => 4,
            Tier::CulturalFit => 2,
        }
    }

    pub fn mark_for(&self, level: Level) -> u32 {
        mark_on_scale(level, self.max_score())
    }
}

/// Maps a level to its mark on a given scale: 0/2/4 when the criterion maxes
/// at 4, 0/1/2 when it maxes at 2.
pub fn mark_on_scale(level: Level, max_score: u32) -> u32 {
    match level {
        Level::Poor => 0,
        Level::Basic => max_score / 2,
        Level::Advanced => max_score,
    }
}

const CRITERIA: [RubricCriterion; 7] = [
    RubricCriterion {
        name: "Analytical thinking and problem solving",
        tier: Tier::RoleBased,
        poor: "Struggles to break down problems and identify root causes. Requires significant guidance.",
        basic: "Can identify straightforward problems and apply basic logic to resolve them with some assistance.",
        advanced: "Thinks critically and creatively to solve complex problems. Anticipates potential challenges and mitigates risks effectively.",
    },
    RubricCriterion {
        name: "Mastering analytical toolset (Python, ...)",
        tier: Tier::RoleBased,
        poor: "Familiar with some of the basic tools (pandas, simple dashboard on metabase), but struggles to use them effectively.",
        basic: "Has basic familiarity with analytics tools but struggles to use them effectively without support.",
        advanced: "Extensive knowledge of toolsets; integrates multiple tools seamlessly to create robust workflows and solve complex problems.",
    },
    RubricCriterion {
        name: "Communication with stakeholders",
        tier: Tier::RoleBased,
        poor: "Struggles to articulate findings and lacks clarity in communication.",
        basic: "Can convey straightforward findings in a clear manner but may miss nuances or tailored messaging.",
        advanced: "Excels in storytelling through data, crafting narratives that resonate with diverse audiences. Anticipates stakeholder needs proactively.",
    },
    RubricCriterion {
        name: "Ambition / High standards",
        tier: Tier::CulturalFit,
        poor: "Accepts average or adequate results; rarely pushes beyond minimum requirements or seeks opportunities for improvement.",
        basic: "Expects personal performance and team performance to be nothing short of the best.",
        advanced: "Continuously sets aggressive, pioneering goals for self and team. Drives excellence and inspires others to achieve world-class outcomes.",
    },
    RubricCriterion {
        name: "Curiosity",
        tier: Tier::CulturalFit,
        poor: "Focuses strictly on assigned tasks; rarely asks probing questions or seeks external information for context.",
        basic: "Asks different questions across different subjects to have more context / learn.",
        advanced: "Exhibits intellectual hunger, actively connects disparate ideas, and investigates underlying 'why's' to drive innovative solutions.",
    },
    RubricCriterion {
        name: "Honesty / Integrity",
        tier: Tier::CulturalFit,
        poor: "May occasionally bend the truth or withhold crucial information when facing pressure or mistakes.",
        basic: "Earns trust and maintains confidence. Does what is right, not just what is politically expedient. Speaks plainly and truthfully.",
        advanced: "Serves as a moral compass for the team; consistently models transparent and ethical behavior, even when it involves significant personal or professional cost.",
    },
    RubricCriterion {
        name: "Work ethic",
        tier: Tier::CulturalFit,
        poor: "Completes tasks only within set working hours; exhibits resistance to going the extra mile, often missing deadlines due to lack of effort.",
        basic: "Possesses a strong willingness to work hard and sometimes long hours to get the job done. Has a track record of working hard.",
        advanced: "Demonstrates relentless commitment and ownership; focuses efforts efficiently for maximum impact, consistently exceeding output expectations without prompting.",
    },
];

/// All criteria in declaration (and report) order.
pub fn criteria() -> &'static [RubricCriterion; 7] {
    &CRITERIA
}

/// Looks up a criterion by its exact name.
pub fn find(name: &str) -> Option<&'static RubricCriterion> {
    CRITERIA.iter().find(|c| c.name == name)
}

/// Maximum mark for the named criterion. Callers reconciling LLM output
/// should default to 4 (role-based scale) instead of propagating this error,
/// to tolerate minor misspellings of criterion names.
pub fn max_score_for(name: &str) -> Result<u32, UnknownCriterion> {
    find(name)
        .map(|c| c.max_score())
        .ok_or_else(|| UnknownCriterion(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_seven_criteria() {
        assert_eq!(criteria().len(), 7);
    }

    #[test]
    fn test_first_three_are_role_based_last_four_cultural_fit() {
        for c in &criteria()[..ROLE_BASED_COUNT] {
            assert_eq!(c.tier, Tier::RoleBased);
            assert_eq!(c.max_score(), 4);
        }
        for c in &criteria()[ROLE_BASED_COUNT..] {
            assert_eq!(c.tier, Tier::CulturalFit);
            assert_eq!(c.max_score(), 2);
        }
    }

    #[test]
    fn test_max_total_score_is_sum_of_max_scores() {
        let sum: u32 = criteria().iter().map(|c| c.max_score()).sum();
        assert_eq!(sum, MAX_TOTAL_SCORE);
    }

    #[test]
    fn test_role_based_mark_scale() {
        let c = &criteria()[0];
        assert_eq!(c.mark_for(Level::Poor), 0);
        assert_eq!(c.mark_for(Level::Basic), 2);
        assert_eq!(c.mark_for(Level::Advanced), 4);
    }

    #[test]
    fn test_cultural_fit_mark_scale() {
        let c = &criteria()[4];
        assert_eq!(c.mark_for(Level::Poor), 0);
        assert_eq!(c.mark_for(Level::Basic), 1);
        assert_eq!(c.mark_for(Level::Advanced), 2);
    }

    #[test]
    fn test_max_score_for_known_criterion() {
        assert_eq!(max_score_for("Curiosity").unwrap(), 2);
        assert_eq!(
            max_score_for("Communication with stakeholders").unwrap(),
            4
        );
    }

    #[test]
    fn test_max_score_for_unknown_criterion_errors() {
        let err = max_score_for("Vibes").unwrap_err();
        assert!(err.to_string().contains("Vibes"));
    }

    #[test]
    fn test_level_serde_wire_strings() {
        let level: Level = serde_json::from_str(r#""Advanced""#).unwrap();
        assert_eq!(level, Level::Advanced);
        assert_eq!(serde_json::to_string(&Level::Poor).unwrap(), r#""Poor""#);
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in criteria().iter().enumerate() {
            for b in &criteria()[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
