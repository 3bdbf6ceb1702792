//! The AI feedback-analysis service.
//!
//! Analysis is three sequential completion calls over the same corpus:
//! sentiment classification, theme extraction, then a narrative summary.
//! The upstream rate limit is the bottleneck, so the calls stay sequential.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::{LlmClient, TRACING_TARGET_ANALYSIS, prompt};

/// The collected feedback of a project, flattened to plain text items.
///
/// Pin comments, enquiry messages and form answers all end up here; the
/// analysis does not care which channel an item came through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackCorpus {
    items: Vec<String>,
}

impl FeedbackCorpus {
    /// Creates a corpus from pre-flattened items, dropping empty ones.
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| item.trim().to_owned())
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }

    /// Returns the corpus items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the corpus has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the fingerprint of this corpus.
    pub fn fingerprint(&self) -> String {
        content_fingerprint(&self.items)
    }
}

/// Computes the change-detection fingerprint of a feedback corpus.
///
/// SHA-256 over the length-prefixed items, hex-encoded. Length prefixing
/// keeps `["ab", "c"]` and `["a", "bc"]` distinct.
pub fn content_fingerprint(items: &[String]) -> String {
    let mut hasher = Sha256::new();

    for item in items {
        hasher.update(u64::to_le_bytes(item.len() as u64));
        hasher.update(item.as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// Sentiment breakdown across the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    /// Items supportive of the scheme
    pub positive: u32,
    /// Items with no clear leaning
    pub neutral: u32,
    /// Items opposed to the scheme
    pub negative: u32,
    /// Overall classification (`positive`, `neutral`, `negative`, `mixed`)
    pub overall: String,
}

/// One recurring theme raised in the feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Short theme name
    pub name: String,
    /// Number of items raising the theme
    pub mentions: u32,
    /// One representative quote
    #[serde(default)]
    pub example: Option<String>,
}

/// The combined output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Sentiment breakdown
    pub sentiment: SentimentBreakdown,
    /// Extracted themes, most-mentioned first
    pub themes: Vec<Theme>,
    /// Narrative summary
    pub summary: String,
    /// Model that produced the report
    pub model: String,
    /// Fingerprint of the analysed corpus
    pub content_hash: String,
}

/// Runs the three-call analysis chain over a feedback corpus.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    client: LlmClient,
}

impl AnalysisService {
    /// Creates a new analysis service with the given LLM client.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client.
    pub fn client(&self) -> &LlmClient {
        &self.client
    }

    /// Analyses a feedback corpus.
    ///
    /// # Errors
    ///
    /// Fails when the corpus is empty, when any completion call fails, or
    /// when the model's structured output cannot be parsed.
    pub async fn analyse(&self, corpus: &FeedbackCorpus) -> Result<AnalysisOutcome> {
        if corpus.is_empty() {
            return Err(Error::MalformedOutput(
                "cannot analyse an empty feedback corpus".into(),
            ));
        }

        tracing::info!(
            target: TRACING_TARGET_ANALYSIS,
            items = corpus.len(),
            model = %self.client.model(),
            "starting feedback analysis"
        );

        let sentiment = self.analyse_sentiment(corpus).await?;
        let themes = self.analyse_themes(corpus).await?;
        let summary = self.summarise(corpus).await?;

        tracing::info!(
            target: TRACING_TARGET_ANALYSIS,
            themes = themes.len(),
            overall = %sentiment.overall,
            "feedback analysis finished"
        );

        Ok(AnalysisOutcome {
            sentiment,
            themes,
            summary,
            model: self.client.model().to_owned(),
            content_hash: corpus.fingerprint(),
        })
    }

    /// Call 1: sentiment classification.
    async fn analyse_sentiment(&self, corpus: &FeedbackCorpus) -> Result<SentimentBreakdown> {
        let raw = self
            .client
            .complete(prompt::sentiment_system(), &prompt::sentiment_user(corpus))
            .await?;

        parse_model_json(&raw)
    }

    /// Call 2: theme extraction.
    async fn analyse_themes(&self, corpus: &FeedbackCorpus) -> Result<Vec<Theme>> {
        let raw = self
            .client
            .complete(prompt::themes_system(), &prompt::themes_user(corpus))
            .await?;

        parse_model_json(&raw)
    }

    /// Call 3: narrative summary. Plain prose, so no parsing beyond trimming.
    async fn summarise(&self, corpus: &FeedbackCorpus) -> Result<String> {
        let raw = self
            .client
            .complete(prompt::summary_system(), &prompt::summary_user(corpus))
            .await?;

        let summary = strip_code_fence(&raw).trim().to_owned();
        if summary.is_empty() {
            return Err(Error::MalformedOutput("summary came back empty".into()));
        }

        Ok(summary)
    }
}

/// Parses a JSON value out of model output, tolerating code fences.
fn parse_model_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    let cleaned = strip_code_fence(raw);

    serde_json::from_str(cleaned.trim())
        .map_err(|err| Error::MalformedOutput(format!("{err}: {cleaned}")))
}

/// Removes a surrounding Markdown code fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (`json`, `JSON`, ...) on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_info, body)) => body,
        None => rest,
    };

    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let items = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(content_fingerprint(&items), content_fingerprint(&items));
    }

    #[test]
    fn test_fingerprint_detects_changes() {
        let before = vec!["more benches".to_owned()];
        let after = vec!["more benches".to_owned(), "fewer cars".to_owned()];
        assert_ne!(content_fingerprint(&before), content_fingerprint(&after));
    }

    #[test]
    fn test_fingerprint_length_prefixing() {
        let left = vec!["ab".to_owned(), "c".to_owned()];
        let right = vec!["a".to_owned(), "bc".to_owned()];
        assert_ne!(content_fingerprint(&left), content_fingerprint(&right));
    }

    #[test]
    fn test_corpus_drops_empty_items() {
        let corpus = FeedbackCorpus::new(vec![
            "  ".to_owned(),
            "real feedback".to_owned(),
            String::new(),
        ]);

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.items(), ["real feedback"]);
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[1,2]\n```"), "[1,2]");
    }

    #[test]
    fn test_parse_model_json_sentiment() {
        let raw = "```json\n{\"positive\": 4, \"neutral\": 2, \"negative\": 1, \"overall\": \"positive\"}\n```";
        let sentiment: SentimentBreakdown = parse_model_json(raw).unwrap();
        assert_eq!(sentiment.positive, 4);
        assert_eq!(sentiment.overall, "positive");
    }

    #[test]
    fn test_parse_model_json_themes() {
        let raw = r#"[{"name": "Traffic", "mentions": 5, "example": "too many cars"}]"#;
        let themes: Vec<Theme> = parse_model_json(raw).unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].name, "Traffic");
        assert_eq!(themes[0].example.as_deref(), Some("too many cars"));
    }

    #[test]
    fn test_parse_model_json_rejects_prose() {
        let result: Result<SentimentBreakdown> = parse_model_json("Sure! Here is the JSON you asked for");
        assert!(result.is_err());
    }
}
