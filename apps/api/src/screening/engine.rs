//! Screening engine — scores extracted résumé text against a role's keyword list.
//!
//! Pure and synchronous: no I/O, no shared state. The role keyword list is
//! handed in by the caller, so identical inputs always produce identical output.
//!
//! Policy:
//! 1. word_count = number of whitespace-separated tokens (empty text → 0)
//! 2. found = keywords present as whole words, case-insensitive, in role order
//! 3. required = 1 if fewer than 3 keywords, else ceil(n × 0.3)
//! 4. Accepted iff 200 < word_count < 1200 and (found ≥ required or n == 0)

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Word counts at or below this are rejected.
pub const MIN_WORDS_EXCLUSIVE: usize = 200;
/// Word counts at or above this are rejected.
pub const MAX_WORDS_EXCLUSIVE: usize = 1200;
/// Characters of extracted text kept in the stored snippet.
pub const SNIPPET_CHARS: usize = 500;
const SNIPPET_MARKER: &str = "...";

/// Outcome of the threshold policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    pub fn is_accepted(self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

/// Result of analysing one résumé against one role.
///
/// Field names on the wire: `wordCount`, `foundKeywords`, `expectedKeywords`,
/// `fullText` (the snippet) and `finalResult` (the decision).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub word_count: usize,
    pub found_keywords: Vec<String>,
    pub expected_keywords: Vec<String>,
    #[serde(rename = "fullText")]
    pub text_snippet: String,
    #[serde(rename = "finalResult")]
    pub decision: Decision,
}

/// Analyses `text` against `keywords`. Total over its input: never fails.
pub fn analyze(text: &str, keywords: &[String]) -> AnalysisResult {
    let word_count = count_words(text);
    let found_keywords = match_keywords(text, keywords);
    let decision = decide(word_count, found_keywords.len(), keywords.len());

    AnalysisResult {
        word_count,
        found_keywords,
        expected_keywords: keywords.to_vec(),
        text_snippet: snippet(text),
        decision,
    }
}

/// Counts whitespace-separated tokens. Empty or whitespace-only text counts as 0.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Returns the keywords that occur in `text` as whole words, ignoring case,
/// in the order they appear in `keywords`.
pub fn match_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| contains_word(text, kw))
        .cloned()
        .collect()
}

/// Keywords are escaped before being wrapped in `\b…\b`, so metacharacters
/// such as `+` or `.` match literally.
fn contains_word(text: &str, keyword: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(keyword));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(text),
        Err(e) => {
            warn!("Keyword {keyword:?} could not be compiled into a matcher: {e}");
            false
        }
    }
}

/// Number of keywords that must be found: 1 below three keywords, else ceil(n × 0.3).
pub fn required_keyword_count(keyword_count: usize) -> usize {
    if keyword_count < 3 {
        1
    } else {
        // ceil(n * 0.3) in integer arithmetic
        (keyword_count * 3).div_ceil(10)
    }
}

pub fn decide(word_count: usize, found_count: usize, keyword_count: usize) -> Decision {
    let length_ok = word_count > MIN_WORDS_EXCLUSIVE && word_count < MAX_WORDS_EXCLUSIVE;
    let keywords_ok =
        keyword_count == 0 || found_count >= required_keyword_count(keyword_count);

    if length_ok && keywords_ok {
        Decision::Accepted
    } else {
        Decision::Rejected
    }
}

/// First `SNIPPET_CHARS` characters of `text`, always followed by `...`.
pub fn snippet(text: &str) -> String {
    let mut out: String = text.chars().take(SNIPPET_CHARS).collect();
    out.push_str(SNIPPET_MARKER);
    out
}
