use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const REQUIRED_SKILLS: [&str; 12] = [
    "python",
    "java",
    "javascript",
    "sql",
    "html",
    "css",
    "flask",
    "django",
    "react",
    "git",
    "api",
    "machine learning",
];

pub const ACTION_VERBS: [&str; 9] = [
    "developed",
    "designed",
    "implemented",
    "optimized",
    "built",
    "created",
    "led",
    "improved",
    "managed",
];

pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeAnalysis {
    pub score: u32,
    pub skills_found: Vec<&'static str>,
    pub feedback: Vec<&'static str>,
}

fn heading_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[A-Z][a-z]+").expect("static regex"))
}

/// Keyword-based ATS style score out of 100. Skills and verbs match as substrings.
pub fn analyze_resume(text: &str) -> ResumeAnalysis {
    let lower = text.to_lowercase();
    let mut score = 0u32;
    let mut feedback = Vec::new();

    let word_count = text.split_whitespace().count();
    if (300..=800).contains(&word_count) {
        score += 20;
    } else {
        feedback.push("Resume length should be between 300–800 words.");
    }

    let skills_found: Vec<&'static str> = REQUIRED_SKILLS
        .iter()
        .copied()
        .filter(|s| lower.contains(s))
        .collect();
    score += (skills_found.len() as u32 * 4).min(40);
    if skills_found.len() < 5 {
        feedback.push("Add more technical skills relevant to the job.");
    }

    if ACTION_VERBS.iter().any(|v| lower.contains(v)) {
        score += 20;
    } else {
        feedback.push("Use strong action verbs (e.g., developed, implemented).");
    }

    if heading_pattern().is_match(text) {
        score += 10;
    } else {
        feedback.push("Use clear section headings (Experience, Skills, Projects).");
    }

    let density = skills_found.len() as f64 / word_count.max(1) as f64;
    if density >= 0.02 {
        score += 10;
    } else {
        feedback.push("Increase keyword density for ATS optimization.");
    }

    ResumeAnalysis {
        score: score.min(MAX_SCORE),
        skills_found,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resume() {
        let a = analyze_resume("");
        assert_eq!(a.score, 0);
        assert!(a.skills_found.is_empty());
        assert_eq!(a.feedback.len(), 5);
    }

    #[test]
    fn test_short_dense_resume() {
        let text = "Summary\nDeveloped python sql and react apps with git";
        let a = analyze_resume(text);
        // skills 4*4 + verbs 20 + heading 10 + density 10
        assert_eq!(a.skills_found, vec!["python", "sql", "react", "git"]);
        assert_eq!(a.score, 56);
        assert!(a.feedback.iter().any(|f| f.contains("300–800")));
    }

    #[test]
    fn test_full_marks_are_capped() {
        let mut text = String::from("Experience\nLed and built ");
        text.push_str("python java javascript sql html css flask django react git api ");
        text.push_str(&"work ".repeat(300));
        let a = analyze_resume(&text);
        assert_eq!(a.score, 100);
        assert!(a.feedback.is_empty());
    }
}
