//! Scorecard rendering and flat-file export.
//!
//! `ScorecardRenderer` is the seam to the presentational collaborator: it
//! takes a complete, schema-valid scorecard and returns a text artifact. The
//! engine never concerns itself with document layout. Sectioning is purely
//! positional: the first 3 entries are the role-based block, the last 4 the
//! cultural-fit block, whatever each entry's own criterion metadata says.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::scorecard::engine::Scorecard;
use crate::scorecard::rubric::ROLE_BASED_COUNT;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders a normalized scorecard into one presentational artifact.
pub trait ScorecardRenderer {
    fn render(&self, scorecard: &Scorecard) -> Result<String, ExportError>;
    fn extension(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// Markdown renderer
// ────────────────────────────────────────────────────────────────────────────

pub struct MarkdownRenderer;

impl ScorecardRenderer for MarkdownRenderer {
    fn render(&self, scorecard: &Scorecard) -> Result<String, ExportError> {
        let mut out = String::new();

        out.push_str("# Interview Scorecard Report\n\n");
        out.push_str(&format!(
            "**Generated:** {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        out.push_str("## Overall Grade\n\n");
        out.push_str(&format!("### {}\n\n", scorecard.aggregate.grade));

        out.push_str("## Summary\n\n");
        out.push_str("| Metric | Value |\n|--------|-------|\n");
        out.push_str(&format!(
            "| Word Count | {} |\n",
            scorecard.metrics.word_count
        ));
        out.push_str(&format!(
            "| Transcript Length | {} characters |\n",
            scorecard.metrics.char_count
        ));
        out.push_str(&format!(
            "| Percentage | {:.1}% |\n\n",
            scorecard.aggregate.percentage
        ));

        out.push_str("## Role-based Skills\n\n");
        push_criteria_table(&mut out, &scorecard.scores[..ROLE_BASED_COUNT], 0);

        out.push_str("## Cultural Fit\n\n");
        push_criteria_table(
            &mut out,
            &scorecard.scores[ROLE_BASED_COUNT..],
            ROLE_BASED_COUNT,
        );

        out.push_str("## Feedback\n\n### Strengths\n\n");
        for item in &scorecard.feedback.positive {
            out.push_str(&format!("- {item}\n"));
        }
        out.push_str("\n### Areas for Improvement\n\n");
        for item in &scorecard.feedback.negative {
            out.push_str(&format!("- {item}\n"));
        }

        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

fn push_criteria_table(
    out: &mut String,
    entries: &[crate::scorecard::engine::ScoreEntry],
    offset: usize,
) {
    out.push_str("| # | Criterion | Level | Mark | Justification |\n");
    out.push_str("|---|-----------|-------|------|---------------|\n");
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            offset + i + 1,
            entry.criterion,
            entry.level.as_str(),
            entry.mark,
            entry.justification.replace('\n', " "),
        ));
    }
    out.push('\n');
}

// ────────────────────────────────────────────────────────────────────────────
// CSV renderer
// ────────────────────────────────────────────────────────────────────────────

pub struct CsvRenderer;

impl ScorecardRenderer for CsvRenderer {
    fn render(&self, scorecard: &Scorecard) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(["Category", "Score", "Max Score", "Percentage", "Details"])?;
        writer.write_record([
            "Overall Grade",
            scorecard.aggregate.grade.as_str(),
            "",
            "",
            "",
        ])?;

        for (i, entry) in scorecard.scores.iter().enumerate() {
            // Positional max: first 3 entries score out of 4, the rest out of 2.
            let max_score: u32 = if i < ROLE_BASED_COUNT { 4 } else { 2 };
            let percentage = f64::from(entry.mark) / f64::from(max_score) * 100.0;
            let mark = entry.mark.to_string();
            let max = max_score.to_string();
            let percent = format!("{percentage:.1}%");
            writer.write_record([
                entry.criterion.as_str(),
                mark.as_str(),
                max.as_str(),
                percent.as_str(),
                entry.justification.as_str(),
            ])?;
        }

        writer.write_record(["", "", "", "", ""])?;
        writer.write_record(["Metadata", "Value", "", "", ""])?;
        let word_count = scorecard.metrics.word_count.to_string();
        writer.write_record(["Word Count", word_count.as_str(), "", "", ""])?;
        let char_count = scorecard.metrics.char_count.to_string();
        writer.write_record(["Transcript Length", char_count.as_str(), "", "", ""])?;

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flat-file export
// ────────────────────────────────────────────────────────────────────────────

/// Paths of the files one export call produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedFiles {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub markdown: PathBuf,
}

/// Writes JSON, CSV, and Markdown exports of the scorecard into `output_dir`
/// under timestamped names (`scorecard_<YYYYmmdd_HHMMSS>.*`), creating the
/// directory if needed. Timestamped names keep concurrent calls from
/// colliding.
pub fn export_scorecard(
    output_dir: &Path,
    scorecard: &Scorecard,
) -> Result<ExportedFiles, ExportError> {
    fs::create_dir_all(output_dir)?;

    let base = format!("scorecard_{}", Local::now().format("%Y%m%d_%H%M%S"));

    let json = output_dir.join(format!("{base}.json"));
    fs::write(&json, serde_json::to_string_pretty(scorecard)?)?;

    let csv = output_dir.join(format!("{base}.{}", CsvRenderer.extension()));
    fs::write(&csv, CsvRenderer.render(scorecard)?)?;

    let markdown = output_dir.join(format!("{base}.{}", MarkdownRenderer.extension()));
    fs::write(&markdown, MarkdownRenderer.render(scorecard)?)?;

    Ok(ExportedFiles {
        json,
        csv,
        markdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorecard::engine::{
        AggregateScore, Feedback, ScoreEntry, TranscriptMetrics,
    };
    use crate::scorecard::rubric::{self, Level};

    fn sample_scorecard() -> Scorecard {
        let scores: Vec<ScoreEntry> = rubric::criteria()
            .iter()
            .map(|c| ScoreEntry {
                criterion: c.name.to_string(),
                level: Level::Basic,
                mark: c.mark_for(Level::Basic),
                justification: "Some evidence.".to_string(),
            })
            .collect();
        let total: u32 = scores.iter().map(|e| e.mark).sum();
        Scorecard {
            scores,
            feedback: Feedback {
                positive: vec!["You were concise.".into(), "You used data.".into()],
                negative: vec!["You rambled once.".into(), "No questions asked.".into()],
            },
            aggregate: AggregateScore {
                total_score: total,
                max_score: 20,
                percentage: f64::from(total) / 20.0 * 100.0,
                grade: format!("{total}/20"),
            },
            metrics: TranscriptMetrics {
                char_count: 120,
                word_count: 24,
                preview: "Interviewer: ...".to_string(),
            },
        }
    }

    #[test]
    fn test_markdown_sections_split_positionally() {
        let md = MarkdownRenderer.render(&sample_scorecard()).unwrap();
        let role_based = md
            .split("## Role-based Skills")
            .nth(1)
            .and_then(|s| s.split("## Cultural Fit").next())
            .unwrap();
        let cultural = md.split("## Cultural Fit").nth(1).unwrap();

        for c in &rubric::criteria()[..3] {
            assert!(role_based.contains(c.name));
        }
        for c in &rubric::criteria()[3..] {
            assert!(cultural.contains(c.name));
            assert!(!role_based.contains(c.name));
        }
    }

    #[test]
    fn test_markdown_carries_grade_and_feedback() {
        let md = MarkdownRenderer.render(&sample_scorecard()).unwrap();
        assert!(md.contains("### 10/20"));
        assert!(md.contains("- You were concise."));
        assert!(md.contains("- You rambled once."));
    }

    #[test]
    fn test_csv_has_overall_grade_and_one_row_per_criterion() {
        let csv = CsvRenderer.render(&sample_scorecard()).unwrap();
        assert!(csv.starts_with("Category,Score,Max Score,Percentage,Details"));
        assert!(csv.contains("Overall Grade,10/20"));
        for c in rubric::criteria() {
            assert!(csv.lines().any(|l| l.contains(c.name)));
        }
        // Basic on a role-based criterion is 2/4 = 50%.
        assert!(csv.contains("50.0%"));
    }

    #[test]
    fn test_csv_percentage_uses_positional_max() {
        let mut scorecard = sample_scorecard();
        // All Advanced: role-based rows 4/4, cultural rows 2/2 — both 100%.
        for (i, entry) in scorecard.scores.iter_mut().enumerate() {
            entry.level = Level::Advanced;
            entry.mark = if i < 3 { 4 } else { 2 };
        }
        let csv = CsvRenderer.render(&scorecard).unwrap();
        assert_eq!(csv.matches("100.0%").count(), 7);
    }

    #[test]
    fn test_export_writes_three_files_with_shared_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_scorecard(dir.path(), &sample_scorecard()).unwrap();

        assert!(files.json.exists());
        assert!(files.csv.exists());
        assert!(files.markdown.exists());

        let stem = |p: &PathBuf| p.file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(stem(&files.json), stem(&files.csv));
        assert_eq!(stem(&files.csv), stem(&files.markdown));
        assert!(stem(&files.json).starts_with("scorecard_"));
    }

    #[test]
    fn test_exported_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_scorecard(dir.path(), &sample_scorecard()).unwrap();
        let raw = fs::read_to_string(&files.json).unwrap();
        let recovered: Scorecard = serde_json::from_str(&raw).unwrap();
        assert_eq!(recovered.scores.len(), 7);
        assert_eq!(recovered.aggregate.grade, "10/20");
    }
}
