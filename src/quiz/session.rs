use rand::Rng;

use crate::quiz::answer::AnswerRecord;
use crate::quiz::assignment::{DragPayload, DropOutcome};
use crate::quiz::board::{BlankBoard, DropTarget};
use crate::quiz::question::{Modality, OptionId, Question, QuestionIssue, QuestionSet};
use crate::quiz::result::ScoreResult;

/// Whatever moves the learner past a finished quiz.
pub trait ContentNavigator {
    fn next_content(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Submitted,
    Reviewing,
}

/// What a `next()` press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Submitted,
    ExitedReview,
    Ignored,
}

/// One quiz run over a fixed question set.
pub struct QuizSession {
    questions: Vec<Question>,
    issues: Vec<QuestionIssue>,
    phase: Phase,
    current: usize,
    answers: AnswerRecord,
    score: Option<ScoreResult>,
}

impl QuizSession {
    pub fn new(set: QuestionSet) -> Self {
        let answers = AnswerRecord::new(&set.questions);
        Self {
            questions: set.questions,
            issues: set.issues,
            phase: Phase::NotStarted,
            current: 0,
            answers,
            score: None,
        }
    }

    pub fn shuffle_pools<R: Rng>(&mut self, rng: &mut R) {
        self.answers.shuffle_pools(rng);
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn issues(&self) -> &[QuestionIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress | Phase::Reviewing => self.questions.get(self.current),
            Phase::NotStarted | Phase::Submitted => None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn score(&self) -> Option<&ScoreResult> {
        self.score.as_ref()
    }

    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        if self.questions.is_empty() {
            tracing::info!("quiz has no questions, staying on the empty state");
            return;
        }
        self.answers.clear();
        self.current = 0;
        self.score = None;
        self.phase = Phase::InProgress;
        tracing::info!(questions = self.questions.len(), "quiz started");
    }

    /// Advance one question. A lift still in flight goes back where it came
    /// from before the question changes.
    pub fn next(&mut self) -> Advance {
        self.cancel_drag();
        match self.phase {
            Phase::InProgress | Phase::Reviewing if !self.is_last() => {
                self.current += 1;
                Advance::Moved
            }
            Phase::InProgress => {
                self.submit();
                Advance::Submitted
            }
            Phase::Reviewing => {
                self.phase = Phase::Submitted;
                Advance::ExitedReview
            }
            Phase::NotStarted | Phase::Submitted => Advance::Ignored,
        }
    }

    pub fn back(&mut self) {
        self.cancel_drag();
        if matches!(self.phase, Phase::InProgress | Phase::Reviewing) && self.current > 0 {
            self.current -= 1;
        }
    }

    pub fn select(&mut self, option: OptionId) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        if question.modality != Modality::SingleChoice || question.option(option).is_none() {
            return false;
        }
        self.answers.select(self.current, option)
    }

    pub fn lift(&mut self, option: OptionId) -> Option<DragPayload> {
        self.current_board_mut()?.lift(option)
    }

    pub fn commit(&mut self, target: DropTarget) -> DropOutcome {
        match self.current_board_mut() {
            Some(board) => board.commit(target),
            None => DropOutcome::Rejected,
        }
    }

    pub fn cancel_drag(&mut self) {
        if let Some(board) = self.current_board_mut() {
            board.cancel();
        }
    }

    pub fn return_to_pool(&mut self, option: OptionId) -> DropOutcome {
        match self.current_board_mut() {
            Some(board) => board.return_to_pool(option),
            None => DropOutcome::Rejected,
        }
    }

    pub fn current_board(&self) -> Option<&BlankBoard> {
        self.answers.board(self.current)
    }

    pub fn show_answers(&mut self) {
        if self.phase == Phase::Submitted {
            self.current = 0;
            self.phase = Phase::Reviewing;
        }
    }

    pub fn retake(&mut self) {
        if matches!(self.phase, Phase::Submitted | Phase::Reviewing) {
            self.answers.clear();
            self.score = None;
            self.current = 0;
            self.phase = Phase::InProgress;
            tracing::info!("quiz retake");
        }
    }

    /// Hand control to the navigator once the quiz is submitted.
    pub fn continue_on<N: ContentNavigator + ?Sized>(&self, navigator: &mut N) -> bool {
        if self.phase != Phase::Submitted {
            return false;
        }
        navigator.next_content();
        true
    }

    pub fn is_correct(&self, index: usize) -> bool {
        let Some(question) = self.questions.get(index) else {
            return false;
        };
        match question.modality {
            Modality::SingleChoice => {
                let selected = self.answers.selected(index);
                selected.is_some() && selected == question.correct_option()
            }
            Modality::FillInBlank => self.answers.board(index).is_some_and(BlankBoard::all_correct),
        }
    }

    fn submit(&mut self) {
        let correct = (0..self.questions.len())
            .filter(|&i| self.is_correct(i))
            .count();
        let result = ScoreResult::new(correct, self.questions.len());
        tracing::info!(
            correct = result.correct,
            total = result.total,
            passed = result.passed,
            "quiz submitted"
        );
        self.score = Some(result);
        self.phase = Phase::Submitted;
    }

    fn current_board_mut(&mut self) -> Option<&mut BlankBoard> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.answers.board_mut(self.current)
    }
}
