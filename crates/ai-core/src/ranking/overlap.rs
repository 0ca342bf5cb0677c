//! Keyword-overlap candidate scoring. Deterministic and model-free: when the
//! model's grading cannot be recovered, partial credit from plain keyword
//! coverage beats failing the whole ranking request.

use serde_json::{json, Value};

use crate::pipeline::Synthesizer;

/// Words too common in job descriptions to signal anything.
const STOPWORDS: &[&str] = &[
    "and", "the", "for", "with", "you", "are", "our", "your", "will", "have", "has", "that",
    "this", "from", "work", "working", "team", "teams", "role", "job", "who", "what", "all",
    "can", "able", "years", "year", "plus", "must", "nice", "strong", "experience", "skills",
    "knowledge", "ability", "looking", "join", "about", "more", "other", "such", "well", "not",
    "including", "required", "preferred", "requirements", "responsibilities",
];

/// Counts meaningful lowercase keywords in a job description.
fn job_keywords(job_description: &str) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for word in job_description
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 3)
    {
        let word = word.to_lowercase();
        if STOPWORDS.contains(&word.as_str()) || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        match counts.iter_mut().find(|(w, _)| *w == word) {
            Some((_, n)) => *n += 1,
            None => counts.push((word, 1)),
        }
    }

    // Frequent first; ties keep first-seen order, which follows the text.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Scores one resume against one job description by keyword coverage,
/// weighted by how often the job description repeats each keyword.
pub struct OverlapSynthesizer {
    resume_text: String,
    job_description: String,
}

impl OverlapSynthesizer {
    pub fn new(resume_text: &str, job_description: &str) -> Self {
        Self {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
        }
    }
}

impl Synthesizer for OverlapSynthesizer {
    fn synthesize(&self) -> Value {
        let keywords = job_keywords(&self.job_description);
        let resume = self.resume_text.to_lowercase();

        let mut matched = Vec::new();
        let mut gaps = Vec::new();
        let mut total_weight = 0u32;
        let mut matched_weight = 0u32;

        for (keyword, frequency) in &keywords {
            total_weight += frequency;
            if resume.contains(keyword.as_str()) {
                matched_weight += frequency;
                matched.push(keyword.clone());
            } else {
                gaps.push(keyword.clone());
            }
        }

        let score = if total_weight > 0 {
            ((matched_weight as f64 / total_weight as f64) * 100.0).round()
        } else {
            0.0
        };

        json!({
            "score": score,
            "matchedKeywords": matched,
            "summary": build_summary(score as u32, &matched, &gaps),
        })
    }
}

fn build_summary(score: u32, matched: &[String], gaps: &[String]) -> String {
    let top = |words: &[String]| -> String {
        words
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    if score >= 80 {
        "Strong keyword alignment with the role.".to_string()
    } else if score >= 50 {
        format!(
            "Moderate keyword alignment ({score}/100). Covers: {}.",
            top(matched)
        )
    } else {
        format!(
            "Low keyword alignment ({score}/100). Not covered: {}.",
            top(gaps)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::shape;

    const JD: &str = "Senior Rust engineer. Rust services on Kubernetes, PostgreSQL storage.";

    #[test]
    fn test_full_overlap_scores_high() {
        let synth = OverlapSynthesizer::new(
            "Senior Rust engineer, built services on Kubernetes with PostgreSQL storage.",
            JD,
        );
        let value = synth.synthesize();
        assert!(value["score"].as_f64().unwrap() >= 80.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let synth = OverlapSynthesizer::new("Watercolor painter and muralist.", JD);
        let value = synth.synthesize();
        assert_eq!(value["score"], json!(0.0));
        assert!(value["matchedKeywords"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_repeated_jd_keywords_weigh_more() {
        // "rust" appears twice in the JD, so covering it alone outweighs
        // covering "postgresql" alone.
        let rust_only = OverlapSynthesizer::new("rust", JD).synthesize();
        let pg_only = OverlapSynthesizer::new("postgresql", JD).synthesize();
        assert!(rust_only["score"].as_f64().unwrap() > pg_only["score"].as_f64().unwrap());
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        let value = OverlapSynthesizer::new("anything", "").synthesize();
        assert_eq!(value["score"], json!(0.0));
    }

    #[test]
    fn test_output_is_deterministic() {
        let synth = OverlapSynthesizer::new("Rust on Kubernetes", JD);
        assert_eq!(synth.synthesize(), synth.synthesize());
    }

    #[test]
    fn test_output_satisfies_ranking_shape() {
        let synth = OverlapSynthesizer::new("Rust on Kubernetes", JD);
        assert!(shape().conform(&synth.synthesize()).is_ok());
    }

    #[test]
    fn test_summary_names_gaps_on_low_score() {
        let value = OverlapSynthesizer::new("nothing relevant", JD).synthesize();
        let summary = value["summary"].as_str().unwrap();
        assert!(summary.contains("Not covered"));
    }
}
