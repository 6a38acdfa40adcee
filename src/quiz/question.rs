use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix that turns a prompt token into a blank marker, e.g. `{blank0}`.
pub const BLANK_PREFIX: &str = "{blank";

/// Stable identity of an option, assigned once when a question is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "traditional", alias = "single-choice")]
    SingleChoice,
    #[serde(rename = "fill-in-the-blanks", alias = "fill-in-blank")]
    FillInBlank,
}

impl Modality {
    pub fn label(self) -> &'static str {
        match self {
            Modality::SingleChoice => "Single choice",
            Modality::FillInBlank => "Fill in the blanks",
        }
    }
}

/// Question as it appears in course content files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    #[serde(default = "default_category")]
    pub category: Modality,
    #[serde(default)]
    pub options: Vec<RawOption>,
}

fn default_category() -> Modality {
    Modality::SingleChoice
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptSpan {
    Text(String),
    Blank {
        ordinal: usize,
        marker: String,
        /// Correct option bound to this blank, shown when reviewing.
        expected: Option<OptionId>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub modality: Modality,
    pub spans: Vec<PromptSpan>,
    pub options: Vec<AnswerOption>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    NoOptions,
    CorrectOptionCount { found: usize },
    BlankMismatch { blanks: usize, correct: usize },
    DuplicateBlankMarker(String),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::NoOptions => write!(f, "single-choice question has no options"),
            IssueKind::CorrectOptionCount { found } => {
                write!(f, "expected exactly one correct option, found {found}")
            }
            IssueKind::BlankMismatch { blanks, correct } => {
                write!(f, "{blanks} blank(s) but {correct} correct option(s)")
            }
            IssueKind::DuplicateBlankMarker(marker) => {
                write!(f, "blank marker {marker} appears more than once")
            }
        }
    }
}

/// A question that was rejected at load time. `index` is its position in the
/// raw question list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionIssue {
    pub index: usize,
    pub kind: IssueKind,
}

impl fmt::Display for QuestionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "question {}: {}", self.index + 1, self.kind)
    }
}

/// Split a prompt into literal text and blank spans, in original order.
/// Consecutive words are merged into one text span.
pub fn tokenize_prompt(prompt: &str) -> Vec<PromptSpan> {
    let mut spans = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    let mut ordinal = 0;

    for token in prompt.split_whitespace() {
        if !token.starts_with(BLANK_PREFIX) {
            words.push(token);
            continue;
        }
        if !words.is_empty() {
            spans.push(PromptSpan::Text(words.join(" ")));
            words.clear();
        }
        let (marker, rest) = match token.find('}') {
            Some(close) => token.split_at(close + 1),
            None => (token, ""),
        };
        spans.push(PromptSpan::Blank {
            ordinal,
            marker: marker.to_string(),
            expected: None,
        });
        ordinal += 1;
        if !rest.is_empty() {
            words.push(rest);
        }
    }
    if !words.is_empty() {
        spans.push(PromptSpan::Text(words.join(" ")));
    }
    spans
}

impl Question {
    /// Decode and check a raw question. Option ids are `first_id..`, so ids
    /// stay unique across a whole question set.
    pub fn from_raw(raw: &RawQuestion, first_id: u32) -> Result<Self, IssueKind> {
        let options: Vec<AnswerOption> = raw
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| AnswerOption {
                id: OptionId(first_id + i as u32),
                text: o.text.clone(),
                is_correct: o.is_correct,
            })
            .collect();
        let correct: Vec<OptionId> = options.iter().filter(|o| o.is_correct).map(|o| o.id).collect();

        let spans = match raw.category {
            Modality::SingleChoice => {
                if options.is_empty() {
                    return Err(IssueKind::NoOptions);
                }
                if correct.len() != 1 {
                    return Err(IssueKind::CorrectOptionCount {
                        found: correct.len(),
                    });
                }
                vec![PromptSpan::Text(raw.question.trim().to_string())]
            }
            Modality::FillInBlank => {
                let mut spans = tokenize_prompt(&raw.question);
                let mut seen = HashSet::new();
                let mut blanks = 0;
                for span in &mut spans {
                    if let PromptSpan::Blank {
                        marker, expected, ..
                    } = span
                    {
                        if !seen.insert(marker.clone()) {
                            return Err(IssueKind::DuplicateBlankMarker(marker.clone()));
                        }
                        *expected = correct.get(blanks).copied();
                        blanks += 1;
                    }
                }
                if blanks != correct.len() {
                    return Err(IssueKind::BlankMismatch {
                        blanks,
                        correct: correct.len(),
                    });
                }
                spans
            }
        };

        Ok(Self {
            modality: raw.category,
            spans,
            options,
        })
    }

    pub fn blank_count(&self) -> usize {
        self.spans
            .iter()
            .filter(|s| matches!(s, PromptSpan::Blank { .. }))
            .count()
    }

    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// The correct option of a single-choice question.
    pub fn correct_option(&self) -> Option<OptionId> {
        self.options.iter().find(|o| o.is_correct).map(|o| o.id)
    }

    /// Prompt as plain text, blanks shown as underscores.
    pub fn prompt_text(&self) -> String {
        self.spans
            .iter()
            .map(|s| match s {
                PromptSpan::Text(t) => t.as_str(),
                PromptSpan::Blank { .. } => "______",
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The valid questions of one quiz, plus whatever was rejected.
#[derive(Clone, Debug, Default)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
    pub issues: Vec<QuestionIssue>,
}

impl QuestionSet {
    pub fn load(raw: &[RawQuestion]) -> Self {
        let mut set = QuestionSet::default();
        let mut next_id = 0u32;
        for (index, rq) in raw.iter().enumerate() {
            match Question::from_raw(rq, next_id) {
                Ok(q) => set.questions.push(q),
                Err(kind) => {
                    tracing::warn!(index, %kind, "skipping malformed quiz question");
                    set.issues.push(QuestionIssue { index, kind });
                }
            }
            next_id += rq.options.len() as u32;
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(question: &str, category: Modality, options: &[(&str, bool)]) -> RawQuestion {
        RawQuestion {
            question: question.to_string(),
            category,
            options: options
                .iter()
                .map(|(t, c)| RawOption {
                    text: t.to_string(),
                    is_correct: *c,
                })
                .collect(),
        }
    }

    #[test]
    fn tokenize_keeps_order_and_merges_words() {
        let spans = tokenize_prompt("The {blank0} is  {blank1} today");
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0], PromptSpan::Text("The".into()));
        assert!(matches!(&spans[1], PromptSpan::Blank { ordinal: 0, marker, .. } if marker == "{blank0}"));
        assert_eq!(spans[2], PromptSpan::Text("is".into()));
        assert_eq!(
            spans[3],
            PromptSpan::Blank {
                ordinal: 1,
                marker: "{blank1}".into(),
                expected: None
            }
        );
        assert_eq!(spans[4], PromptSpan::Text("today".into()));
    }

    #[test]
    fn tokenize_splits_trailing_punctuation() {
        let spans = tokenize_prompt("Rust is {blank0}.");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2], PromptSpan::Text(".".into()));
    }

    #[test]
    fn tokenize_without_blanks_is_one_text_span() {
        let spans = tokenize_prompt("no blanks here");
        assert_eq!(spans, vec![PromptSpan::Text("no blanks here".into())]);
    }

    #[test]
    fn blanks_bind_correct_options_in_order() {
        let q = Question::from_raw(
            &raw(
                "{blank0} and {blank1}",
                Modality::FillInBlank,
                &[("salt", true), ("sugar", false), ("pepper", true)],
            ),
            10,
        )
        .unwrap();
        let expected: Vec<Option<OptionId>> = q
            .spans
            .iter()
            .filter_map(|s| match s {
                PromptSpan::Blank { expected, .. } => Some(*expected),
                PromptSpan::Text(_) => None,
            })
            .collect();
        assert_eq!(expected, vec![Some(OptionId(10)), Some(OptionId(12))]);
    }

    #[test]
    fn single_choice_needs_options_and_one_correct() {
        let empty = raw("Q?", Modality::SingleChoice, &[]);
        assert_eq!(Question::from_raw(&empty, 0), Err(IssueKind::NoOptions));

        let none_correct = raw("Q?", Modality::SingleChoice, &[("a", false)]);
        assert_eq!(
            Question::from_raw(&none_correct, 0),
            Err(IssueKind::CorrectOptionCount { found: 0 })
        );
    }

    #[test]
    fn blank_count_must_match_correct_options() {
        let q = raw("{blank0} {blank1}", Modality::FillInBlank, &[("a", true)]);
        assert_eq!(
            Question::from_raw(&q, 0),
            Err(IssueKind::BlankMismatch { blanks: 2, correct: 1 })
        );
    }

    #[test]
    fn duplicate_marker_is_rejected() {
        let q = raw(
            "{blank0} {blank0}",
            Modality::FillInBlank,
            &[("a", true), ("b", true)],
        );
        assert_eq!(
            Question::from_raw(&q, 0),
            Err(IssueKind::DuplicateBlankMarker("{blank0}".into()))
        );
    }

    #[test]
    fn zero_blank_question_is_valid() {
        let q = raw("Nothing to fill", Modality::FillInBlank, &[("x", false)]);
        let q = Question::from_raw(&q, 0).unwrap();
        assert_eq!(q.blank_count(), 0);
    }

    #[test]
    fn question_set_skips_malformed_and_keeps_ids_unique() {
        let set = QuestionSet::load(&[
            raw("A?", Modality::SingleChoice, &[("x", true), ("y", false)]),
            raw("B?", Modality::SingleChoice, &[]),
            raw("C?", Modality::SingleChoice, &[("z", true)]),
        ]);
        assert_eq!(set.questions.len(), 2);
        assert_eq!(set.issues.len(), 1);
        assert_eq!(set.issues[0].index, 1);
        assert_eq!(set.questions[1].options[0].id, OptionId(2));
    }

    #[test]
    fn raw_question_parses_source_json() {
        let json = r#"{
            "question": "Capital of {blank0}?",
            "category": "fill-in-the-blanks",
            "options": [{ "text": "France", "isCorrect": true }]
        }"#;
        let rq: RawQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(rq.category, Modality::FillInBlank);
        assert!(rq.options[0].is_correct);
    }
}
