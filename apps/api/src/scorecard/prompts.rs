//! LLM prompt construction for transcript scoring.
//!
//! The whole rubric is serialized into the system instruction so a single
//! call scores all 7 criteria; the instruction ends with the exact JSON
//! schema the engine validates against.

use std::fmt::Write;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::scorecard::rubric::{self, Tier};

/// Low temperature for consistent scoring across runs.
pub const SCORING_TEMPERATURE: f32 = 0.3;

const SCORING_PREAMBLE: &str = "You are an expert Interview Assessment AI. \
    Your task is to analyze the provided interview transcript and assess the \
    candidate based on the following 7 criteria. For each criterion, you must \
    assign a **Level** (Poor, Basic, or Advanced) and provide a concise \
    **Justification** based solely on the transcript evidence.\n\n";

const FEEDBACK_DIRECTIVE: &str = "\n--- FEEDBACK GENERATION ---\n\
    In addition to the scores, you must generate feedback arguments for the candidate:\n\
    - 2 positive arguments (things the candidate did well or strengths demonstrated)\n\
    - 2 negative arguments (areas for improvement or weaknesses observed)\n\
    These should be specific, constructive, and based on evidence from the transcript.\n\
    IMPORTANT: Write the feedback arguments using 'you' to directly address the candidate \
    (e.g., 'You demonstrated...' not 'The candidate demonstrated...'). Make it personal and direct.\n";

const OUTPUT_SCHEMA: &str = r#"
The JSON MUST have this EXACT structure:
{
  "scores": [
    {"criterion": "Analytical thinking and problem solving", "level": "Advanced", "mark": 4, "justification": "..."},
    {"criterion": "Mastering analytical toolset (Python, ...)", "level": "Basic", "mark": 2, "justification": "..."},
    ... (7 total score objects, one for each criterion)
  ],
  "feedback": {
    "positive": ["arg1", "arg2"],
    "negative": ["arg3", "arg4"]
  }
}

CRITICAL: The 'scores' array MUST contain objects, NOT numbers. Each object must have 'criterion', 'level', 'mark', and 'justification' fields.
IMPORTANT: For Cultural Fit criteria (last 4), marks are: Poor=0, Basic=1, Advanced=2. For Role-based Skills (first 3), marks are: Poor=0, Basic=2, Advanced=4."#;

/// Builds the full scoring system instruction from the rubric table.
pub fn build_scoring_instruction() -> String {
    let mut instruction = String::from(SCORING_PREAMBLE);

    instruction.push_str("--- SCORING SYSTEM ---\n");
    instruction.push_str(
        "**Role-based Skills (first 3 criteria):** Poor (0), Basic (2), Advanced (4) - Max score: 4 per criterion\n",
    );
    instruction.push_str(
        "**Cultural Fit (last 4 criteria):** Poor (0), Basic (1), Advanced (2) - Max score: 2 per criterion\n\n",
    );

    instruction.push_str("--- SCORECARD CRITERIA ---\n");
    for criterion in rubric::criteria() {
        let heading = match criterion.tier {
            Tier::RoleBased => "ROLE-BASED SKILL",
            Tier::CulturalFit => "CULTURAL FIT",
        };
        let max = criterion.max_score();
        // Writes to a String cannot fail.
        let _ = write!(
            instruction,
            "\n**{heading}: {}**\nPoor (0): {}\nBasic ({}): {}\nAdvanced ({}): {}\n",
            criterion.name,
            criterion.poor,
            max / 2,
            criterion.basic,
            max,
            criterion.advanced,
        );
    }

    instruction.push_str(FEEDBACK_DIRECTIVE);

    instruction.push_str("\n--- OUTPUT FORMAT ---\n");
    instruction.push_str(JSON_ONLY_SYSTEM);
    instruction.push_str(OUTPUT_SCHEMA);

    instruction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_every_criterion() {
        let instruction = build_scoring_instruction();
        for criterion in rubric::criteria() {
            assert!(
                instruction.contains(criterion.name),
                "instruction missing criterion {:?}",
                criterion.name
            );
        }
    }

    #[test]
    fn test_instruction_annotates_both_scales() {
        let instruction = build_scoring_instruction();
        assert!(instruction.contains("Poor (0), Basic (2), Advanced (4)"));
        assert!(instruction.contains("Poor (0), Basic (1), Advanced (2)"));
    }

    #[test]
    fn test_instruction_carries_schema_example_and_json_directive() {
        let instruction = build_scoring_instruction();
        assert!(instruction.contains(r#""scores""#));
        assert!(instruction.contains(r#""feedback""#));
        assert!(instruction.contains("MUST respond ONLY with a single JSON object"));
    }

    #[test]
    fn test_cultural_fit_levels_use_small_scale() {
        let instruction = build_scoring_instruction();
        // Curiosity is cultural fit: Basic must be annotated (1), not (2).
        let curiosity = instruction
            .split("CULTURAL FIT: Curiosity")
            .nth(1)
            .expect("Curiosity section present");
        assert!(curiosity.starts_with("**\nPoor (0):"));
        assert!(curiosity.contains("Basic (1):"));
        assert!(curiosity.contains("Advanced (2):"));
    }
}
