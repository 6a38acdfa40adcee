//! Renderer-agnostic view of one question: what to draw and how to mark it.

use crate::quiz::answer::AnswerRecord;
use crate::quiz::assignment::DragPayload;
use crate::quiz::question::{Modality, OptionId, PromptSpan, Question};
use crate::quiz::session::{Phase, QuizSession};

/// Review colouring of an option or blank. Always `Neutral` outside review.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    SelectedCorrect,
    SelectedIncorrect,
    MissedCorrect,
    Neutral,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceItem<'a> {
    pub id: OptionId,
    pub text: &'a str,
    pub selected: bool,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Blank {
        ordinal: usize,
        occupant: Option<&'a DragPayload>,
        /// Text of the bound answer, filled in only while reviewing.
        expected: Option<&'a str>,
        mark: OptionMark,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PoolItem<'a> {
    pub id: OptionId,
    pub text: &'a str,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuestionView<'a> {
    Choice {
        prompt: String,
        items: Vec<ChoiceItem<'a>>,
    },
    Blanks {
        segments: Vec<Segment<'a>>,
        pool: Vec<PoolItem<'a>>,
    },
}

impl QuestionView<'_> {
    /// Number of focusable entries: choices, or blanks followed by pool items.
    pub fn target_count(&self) -> usize {
        match self {
            QuestionView::Choice { items, .. } => items.len(),
            QuestionView::Blanks { segments, pool } => {
                segments
                    .iter()
                    .filter(|s| matches!(s, Segment::Blank { .. }))
                    .count()
                    + pool.len()
            }
        }
    }

    /// What the focus cursor points at. Blanks come before pool items.
    pub fn target(&self, cursor: usize) -> Option<FocusTarget> {
        match self {
            QuestionView::Choice { items, .. } => items.get(cursor).map(|i| FocusTarget::Choice(i.id)),
            QuestionView::Blanks { segments, pool } => {
                let blanks: Vec<usize> = segments
                    .iter()
                    .filter_map(|s| match s {
                        Segment::Blank { ordinal, .. } => Some(*ordinal),
                        Segment::Text(_) => None,
                    })
                    .collect();
                match blanks.get(cursor) {
                    Some(&ordinal) => Some(FocusTarget::Blank(ordinal)),
                    None => pool
                        .get(cursor - blanks.len())
                        .map(|p| FocusTarget::Pool(p.id)),
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Choice(OptionId),
    Blank(usize),
    Pool(OptionId),
}

fn choice_mark(selected: bool, correct: bool, reviewing: bool) -> OptionMark {
    if !reviewing {
        return OptionMark::Neutral;
    }
    match (selected, correct) {
        (true, true) => OptionMark::SelectedCorrect,
        (true, false) => OptionMark::SelectedIncorrect,
        (false, true) => OptionMark::MissedCorrect,
        (false, false) => OptionMark::Neutral,
    }
}

/// Build the view for question `index` from its own slice of the answer
/// record. Nothing is carried over from other questions.
pub fn render_question<'a>(
    question: &'a Question,
    answers: &'a AnswerRecord,
    index: usize,
    phase: Phase,
) -> QuestionView<'a> {
    let reviewing = phase == Phase::Reviewing;
    match question.modality {
        Modality::SingleChoice => {
            let selected = answers.selected(index);
            let items = question
                .options
                .iter()
                .map(|o| {
                    let is_selected = selected == Some(o.id);
                    ChoiceItem {
                        id: o.id,
                        text: &o.text,
                        selected: is_selected,
                        mark: choice_mark(is_selected, o.is_correct, reviewing),
                    }
                })
                .collect();
            QuestionView::Choice {
                prompt: question.prompt_text(),
                items,
            }
        }
        Modality::FillInBlank => {
            let board = answers.board(index);
            let segments = question
                .spans
                .iter()
                .map(|span| match span {
                    PromptSpan::Text(t) => Segment::Text(t.as_str()),
                    PromptSpan::Blank {
                        ordinal, expected, ..
                    } => {
                        let occupant = board.and_then(|b| b.assigned(*ordinal));
                        let mark = match (reviewing, occupant) {
                            (false, _) => OptionMark::Neutral,
                            (true, Some(p)) if p.is_correct => OptionMark::SelectedCorrect,
                            (true, Some(_)) => OptionMark::SelectedIncorrect,
                            (true, None) => OptionMark::MissedCorrect,
                        };
                        let expected = if reviewing {
                            expected
                                .and_then(|id| question.option(id))
                                .map(|o| o.text.as_str())
                        } else {
                            None
                        };
                        Segment::Blank {
                            ordinal: *ordinal,
                            occupant,
                            expected,
                            mark,
                        }
                    }
                })
                .collect();
            let pool = match board {
                Some(b) => b
                    .pool()
                    .filter(|a| b.lifted().is_none_or(|l| l.id != a.id()))
                    .map(|a| PoolItem {
                        id: a.id(),
                        text: a.text(),
                    })
                    .collect(),
                None => question
                    .options
                    .iter()
                    .map(|o| PoolItem {
                        id: o.id,
                        text: &o.text,
                    })
                    .collect(),
            };
            QuestionView::Blanks { segments, pool }
        }
    }
}

/// View of the session's current question, if one is visible.
pub fn current_view(session: &QuizSession) -> Option<QuestionView<'_>> {
    let question = session.current_question()?;
    Some(render_question(
        question,
        session.answers(),
        session.current_index(),
        session.phase(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::question::{QuestionSet, RawOption, RawQuestion};

    fn set() -> QuestionSet {
        QuestionSet::load(&[
            RawQuestion {
                question: "Largest planet?".into(),
                category: Modality::SingleChoice,
                options: vec![
                    RawOption { text: "Mars".into(), is_correct: false },
                    RawOption { text: "Jupiter".into(), is_correct: true },
                    RawOption { text: "Venus".into(), is_correct: false },
                ],
            },
            RawQuestion {
                question: "Water is {blank0} and {blank1}".into(),
                category: Modality::FillInBlank,
                options: vec![
                    RawOption { text: "wet".into(), is_correct: true },
                    RawOption { text: "clear".into(), is_correct: true },
                    RawOption { text: "solid".into(), is_correct: false },
                ],
            },
        ])
    }

    #[test]
    fn choice_marks_are_neutral_while_answering() {
        let mut s = QuizSession::new(set());
        s.start();
        s.select(s.questions()[0].options[0].id);
        let Some(QuestionView::Choice { items, prompt }) = current_view(&s) else {
            panic!("expected choice view");
        };
        assert_eq!(prompt, "Largest planet?");
        assert!(items[0].selected);
        assert!(items.iter().all(|i| i.mark == OptionMark::Neutral));
    }

    #[test]
    fn review_marks_selected_and_missed() {
        let mut s = QuizSession::new(set());
        s.start();
        s.select(s.questions()[0].options[0].id);
        s.next();
        s.next();
        s.show_answers();
        let Some(QuestionView::Choice { items, .. }) = current_view(&s) else {
            panic!("expected choice view");
        };
        let marks: Vec<OptionMark> = items.iter().map(|i| i.mark).collect();
        assert_eq!(
            marks,
            vec![
                OptionMark::SelectedIncorrect,
                OptionMark::MissedCorrect,
                OptionMark::Neutral
            ]
        );
    }

    #[test]
    fn blanks_view_hides_placed_and_lifted_options() {
        let mut s = QuizSession::new(set());
        s.start();
        s.next();
        let ids: Vec<OptionId> = s.questions()[1].options.iter().map(|o| o.id).collect();
        s.lift(ids[0]);
        s.commit(crate::quiz::board::DropTarget::Slot(1));
        s.lift(ids[2]);
        let Some(QuestionView::Blanks { segments, pool }) = current_view(&s) else {
            panic!("expected blanks view");
        };
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].text, "clear");
        let occupied: Vec<Option<&str>> = segments
            .iter()
            .filter_map(|seg| match seg {
                Segment::Blank { occupant, .. } => Some(occupant.map(|p| p.text.as_str())),
                Segment::Text(_) => None,
            })
            .collect();
        assert_eq!(occupied, vec![None, Some("wet")]);
    }

    #[test]
    fn switching_questions_rederives_pool() {
        let mut s = QuizSession::new(set());
        s.start();
        s.next();
        let first = s.questions()[1].options[0].id;
        s.lift(first);
        s.commit(crate::quiz::board::DropTarget::Slot(0));
        s.back();
        s.next();
        let Some(QuestionView::Blanks { pool, .. }) = current_view(&s) else {
            panic!("expected blanks view");
        };
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|p| p.id != first));
    }

    #[test]
    fn cursor_walks_blanks_then_pool() {
        let mut s = QuizSession::new(set());
        s.start();
        s.next();
        let view = current_view(&s).unwrap();
        assert_eq!(view.target_count(), 5);
        assert_eq!(view.target(0), Some(FocusTarget::Blank(0)));
        assert_eq!(view.target(1), Some(FocusTarget::Blank(1)));
        let first = s.questions()[1].options[0].id;
        assert_eq!(view.target(2), Some(FocusTarget::Pool(first)));
        assert_eq!(view.target(5), None);
    }

    #[test]
    fn review_shows_expected_answer_for_blanks() {
        let mut s = QuizSession::new(set());
        s.start();
        s.next();
        s.next();
        s.show_answers();
        s.next();
        let Some(QuestionView::Blanks { segments, .. }) = current_view(&s) else {
            panic!("expected blanks view");
        };
        let Segment::Blank { expected, mark, .. } = &segments[1] else {
            panic!("expected a blank");
        };
        assert_eq!(*expected, Some("wet"));
        assert_eq!(*mark, OptionMark::MissedCorrect);
    }
}
