use std::collections::BTreeMap;

use rand::Rng;

use crate::quiz::board::BlankBoard;
use crate::quiz::question::{Modality, OptionId, Question};

/// What the learner has entered so far, per question index.
#[derive(Clone, Debug, Default)]
pub struct AnswerRecord {
    choices: BTreeMap<usize, OptionId>,
    boards: BTreeMap<usize, BlankBoard>,
}

impl AnswerRecord {
    pub fn new(questions: &[Question]) -> Self {
        let boards = questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.modality == Modality::FillInBlank)
            .map(|(i, q)| (i, BlankBoard::new(q)))
            .collect();
        Self {
            choices: BTreeMap::new(),
            boards,
        }
    }

    pub fn shuffle_pools<R: Rng>(&mut self, rng: &mut R) {
        for board in self.boards.values_mut() {
            board.shuffle_pool(rng);
        }
    }

    /// Record a single-choice answer. Returns whether anything changed.
    pub fn select(&mut self, question: usize, option: OptionId) -> bool {
        self.choices.insert(question, option) != Some(option)
    }

    pub fn selected(&self, question: usize) -> Option<OptionId> {
        self.choices.get(&question).copied()
    }

    pub fn board(&self, question: usize) -> Option<&BlankBoard> {
        self.boards.get(&question)
    }

    pub fn board_mut(&mut self, question: usize) -> Option<&mut BlankBoard> {
        self.boards.get_mut(&question)
    }

    pub fn answered_count(&self) -> usize {
        self.choices.len() + self.boards.values().filter(|b| b.filled_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty() && self.boards.values().all(BlankBoard::is_untouched)
    }

    pub fn clear(&mut self) {
        self.choices.clear();
        for board in self.boards.values_mut() {
            board.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::question::{RawOption, RawQuestion};

    fn questions() -> Vec<Question> {
        let sc = RawQuestion {
            question: "Pick".into(),
            category: Modality::SingleChoice,
            options: vec![
                RawOption { text: "a".into(), is_correct: true },
                RawOption { text: "b".into(), is_correct: false },
            ],
        };
        let fib = RawQuestion {
            question: "{blank0} x".into(),
            category: Modality::FillInBlank,
            options: vec![RawOption { text: "c".into(), is_correct: true }],
        };
        vec![
            Question::from_raw(&sc, 0).unwrap(),
            Question::from_raw(&fib, 2).unwrap(),
        ]
    }

    #[test]
    fn boards_exist_only_for_fill_in_blank() {
        let record = AnswerRecord::new(&questions());
        assert!(record.board(0).is_none());
        assert!(record.board(1).is_some());
        assert!(record.is_empty());
    }

    #[test]
    fn reselecting_same_option_is_a_noop() {
        let mut record = AnswerRecord::new(&questions());
        assert!(record.select(0, OptionId(1)));
        assert!(!record.select(0, OptionId(1)));
        assert_eq!(record.selected(0), Some(OptionId(1)));
        assert!(record.select(0, OptionId(0)));
        assert_eq!(record.selected(0), Some(OptionId(0)));
    }

    #[test]
    fn clear_empties_choices_and_boards() {
        let mut record = AnswerRecord::new(&questions());
        record.select(0, OptionId(0));
        record.board_mut(1).unwrap().place(OptionId(2), 0);
        assert_eq!(record.answered_count(), 2);
        record.clear();
        assert!(record.is_empty());
        assert_eq!(record.answered_count(), 0);
    }
}
