//! Prompt templates for the feedback-analysis calls.
//!
//! Each analysis stage has a system prompt fixing the output contract and a
//! user prompt carrying the rendered corpus. The prompts insist on bare JSON
//! (no code fences, no commentary); parsing still tolerates fenced output
//! because models add fences anyway.

use crate::analysis::FeedbackCorpus;

/// Renders the corpus as a numbered list for inclusion in user prompts.
pub(crate) fn render_corpus(corpus: &FeedbackCorpus) -> String {
    corpus
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}. {}", index + 1, item.replace('\n', " ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// System prompt for the sentiment-classification call.
pub(crate) fn sentiment_system() -> &'static str {
    "You analyse public consultation feedback for an urban planning team. \
     Classify the sentiment of each feedback item towards the proposed scheme. \
     Respond with a single JSON object, no code fences and no commentary, in \
     exactly this shape: \
     {\"positive\": <count>, \"neutral\": <count>, \"negative\": <count>, \
     \"overall\": \"positive\"|\"neutral\"|\"negative\"|\"mixed\"}"
}

/// User prompt for the sentiment-classification call.
pub(crate) fn sentiment_user(corpus: &FeedbackCorpus) -> String {
    format!(
        "Classify the sentiment of the following {} feedback items:\n\n{}",
        corpus.len(),
        render_corpus(corpus)
    )
}

/// System prompt for the theme-extraction call.
pub(crate) fn themes_system() -> &'static str {
    "You analyse public consultation feedback for an urban planning team. \
     Extract the recurring themes raised across the feedback. Respond with a \
     single JSON array, no code fences and no commentary, of at most 8 \
     objects in exactly this shape: \
     [{\"name\": <short theme name>, \"mentions\": <count of items raising it>, \
     \"example\": <one representative quote>}] \
     ordered by mentions, highest first."
}

/// User prompt for the theme-extraction call.
pub(crate) fn themes_user(corpus: &FeedbackCorpus) -> String {
    format!(
        "Extract the themes from the following {} feedback items:\n\n{}",
        corpus.len(),
        render_corpus(corpus)
    )
}

/// System prompt for the summary call.
pub(crate) fn summary_system() -> &'static str {
    "You analyse public consultation feedback for an urban planning team. \
     Write a neutral narrative summary of the feedback in at most 200 words, \
     suitable for a report to the project team. Mention points of agreement, \
     points of contention, and anything raised unusually often. Respond with \
     plain prose only."
}

/// User prompt for the summary call.
pub(crate) fn summary_user(corpus: &FeedbackCorpus) -> String {
    format!(
        "Summarise the following {} feedback items:\n\n{}",
        corpus.len(),
        render_corpus(corpus)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_corpus_numbers_items() {
        let corpus = FeedbackCorpus::new(vec![
            "More trees please".to_owned(),
            "The junction is\ndangerous".to_owned(),
        ]);

        let rendered = render_corpus(&corpus);
        assert_eq!(
            rendered,
            "1. More trees please\n2. The junction is dangerous"
        );
    }

    #[test]
    fn test_user_prompts_carry_counts() {
        let corpus = FeedbackCorpus::new(vec!["ok".to_owned()]);
        assert!(sentiment_user(&corpus).contains("1 feedback items"));
        assert!(themes_user(&corpus).contains("1 feedback items"));
        assert!(summary_user(&corpus).contains("1 feedback items"));
    }
}
