use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use coursedeck::course::Course;
use coursedeck::course::outline::{ContentKind, CourseOutline};
use coursedeck::quiz::assignment::Location;
use coursedeck::quiz::board::DropTarget;
use coursedeck::quiz::question::{RawOption, RawQuestion};
use coursedeck::quiz::session::Advance;
use coursedeck::quiz::{Modality, OptionId, Phase, QuestionSet, QuizSession};

// ── Helpers ──────────────────────────────────────────────────────────────

fn single(prompt: &str, correct: usize, count: usize) -> RawQuestion {
    RawQuestion {
        question: prompt.to_string(),
        category: Modality::SingleChoice,
        options: (0..count)
            .map(|i| RawOption {
                text: format!("option {i}"),
                is_correct: i == correct,
            })
            .collect(),
    }
}

fn blanks(prompt: &str, options: &[(&str, bool)]) -> RawQuestion {
    RawQuestion {
        question: prompt.to_string(),
        category: Modality::FillInBlank,
        options: options
            .iter()
            .map(|(text, is_correct)| RawOption {
                text: text.to_string(),
                is_correct: *is_correct,
            })
            .collect(),
    }
}

fn session(raw: &[RawQuestion]) -> QuizSession {
    let mut s = QuizSession::new(QuestionSet::load(raw));
    s.start();
    s
}

fn option_id(s: &QuizSession, question: usize, text: &str) -> OptionId {
    s.questions()[question]
        .options
        .iter()
        .find(|o| o.text == text)
        .map(|o| o.id)
        .unwrap()
}

fn correct_id(s: &QuizSession, question: usize) -> OptionId {
    s.questions()[question].correct_option().unwrap()
}

fn wrong_id(s: &QuizSession, question: usize) -> OptionId {
    s.questions()[question]
        .options
        .iter()
        .find(|o| !o.is_correct)
        .map(|o| o.id)
        .unwrap()
}

fn finish(s: &mut QuizSession) {
    while s.phase() == Phase::InProgress {
        s.next();
    }
}

// ── Scoring ──────────────────────────────────────────────────────────────

#[test]
fn total_matches_question_count_and_correct_never_exceeds_it() {
    for n in 1..=6 {
        let raw: Vec<RawQuestion> = (0..n).map(|i| single(&format!("q{i}"), 1, 3)).collect();
        let mut s = session(&raw);
        for q in 0..n {
            let id = correct_id(&s, q);
            s.select(id);
            s.next();
        }
        let score = s.score().unwrap();
        assert_eq!(score.total, n);
        assert!(score.correct <= score.total);
        assert_eq!(score.correct, n);
    }
}

#[test]
fn four_of_five_passes_on_the_boundary() {
    let raw: Vec<RawQuestion> = (0..5).map(|i| single(&format!("q{i}"), 0, 4)).collect();
    let mut s = session(&raw);
    for q in 0..5 {
        let id = if q == 2 { wrong_id(&s, q) } else { correct_id(&s, q) };
        s.select(id);
        s.next();
    }
    let score = s.score().unwrap();
    assert_eq!(score.correct, 4);
    assert_eq!(score.total, 5);
    assert!(score.passed);
}

#[test]
fn partly_correct_blanks_score_nothing() {
    let mut s = session(&[blanks(
        "The {blank0} is {blank1}",
        &[("sky", true), ("blue", true), ("grass", false)],
    )]);
    let sky = option_id(&s, 0, "sky");
    let grass = option_id(&s, 0, "grass");
    s.lift(sky);
    s.commit(DropTarget::Slot(0));
    s.lift(grass);
    s.commit(DropTarget::Slot(1));
    s.next();
    let score = s.score().unwrap();
    assert_eq!(score.correct, 0);
    assert_eq!(score.total, 1);
}

#[test]
fn fill_in_blank_without_blanks_counts_as_correct() {
    let mut s = session(&[blanks("Nothing to fill here", &[("spare", false)])]);
    assert_eq!(s.questions()[0].blank_count(), 0);
    s.next();
    let score = s.score().unwrap();
    assert_eq!((score.correct, score.total), (1, 1));
}

#[test]
fn mixed_modalities_score_per_question() {
    let mut s = session(&[
        single("pick", 1, 2),
        blanks("{blank0} then {blank1}", &[("a", true), ("b", true), ("c", false)]),
    ]);
    let right = correct_id(&s, 0);
    s.select(right);
    s.next();
    let a = option_id(&s, 1, "a");
    let b = option_id(&s, 1, "b");
    s.lift(a);
    s.commit(DropTarget::Slot(0));
    s.lift(b);
    s.commit(DropTarget::Slot(1));
    s.next();
    assert_eq!(s.score().unwrap().correct, 2);
}

// ── Answer capture ───────────────────────────────────────────────────────

#[test]
fn reselecting_the_same_option_is_idempotent() {
    let mut s = session(&[single("q", 0, 3)]);
    let id = correct_id(&s, 0);
    assert!(s.select(id));
    let before = s.answers().selected(0);
    assert!(!s.select(id));
    assert_eq!(s.answers().selected(0), before);
    assert_eq!(s.answers().answered_count(), 1);
}

#[test]
fn moving_between_slots_keeps_single_ownership() {
    let mut s = session(&[blanks(
        "{blank0} {blank1} {blank2}",
        &[("x", true), ("y", true), ("z", true)],
    )]);
    let x = option_id(&s, 0, "x");
    s.lift(x);
    s.commit(DropTarget::Slot(0));
    s.lift(x);
    s.commit(DropTarget::Slot(2));

    let board = s.current_board().unwrap();
    assert!(board.assigned(0).is_none());
    assert_eq!(board.assigned(2).map(|p| p.id), Some(x));
    assert_eq!(board.location_of(x), Some(Location::Slot(2)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn random_drag_sequences_never_duplicate_an_option() {
    let options = [("a", true), ("b", true), ("c", true), ("d", false), ("e", false)];
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..50 {
        let mut s = session(&[blanks("{blank0} {blank1} {blank2}", &options)]);
        let ids: Vec<OptionId> = s.questions()[0].options.iter().map(|o| o.id).collect();

        for _ in 0..40 {
            let id = ids[rng.gen_range(0..ids.len())];
            s.lift(id);
            let target = match rng.gen_range(0..5) {
                0 => DropTarget::Pool,
                1 => DropTarget::Outside,
                n => DropTarget::Slot(n - 2),
            };
            s.commit(target);

            let board = s.current_board().unwrap();
            let placed: Vec<OptionId> = (0..3)
                .filter_map(|i| board.assigned(i).map(|p| p.id))
                .collect();
            let unique: HashSet<OptionId> = placed.iter().copied().collect();
            assert_eq!(unique.len(), placed.len(), "option placed twice");
            assert_eq!(placed.len() + board.pool_len(), ids.len());
            assert!(board.lifted().is_none());
        }
    }
}

#[test]
fn dropping_onto_a_filled_slot_evicts_to_the_pool() {
    let mut s = session(&[blanks("{blank0}", &[("keep", true), ("swap", false)])]);
    let keep = option_id(&s, 0, "keep");
    let swap = option_id(&s, 0, "swap");
    s.lift(swap);
    s.commit(DropTarget::Slot(0));
    s.lift(keep);
    s.commit(DropTarget::Slot(0));

    let board = s.current_board().unwrap();
    assert_eq!(board.assigned(0).map(|p| p.id), Some(keep));
    assert_eq!(board.location_of(swap), Some(Location::Pool));
    assert_eq!(board.pool_len(), 1);
}

// ── Navigation and phases ────────────────────────────────────────────────

#[test]
fn back_on_first_question_is_a_no_op() {
    let mut s = session(&[single("a", 0, 2), single("b", 0, 2)]);
    s.back();
    assert_eq!(s.current_index(), 0);
    assert_eq!(s.phase(), Phase::InProgress);
}

#[test]
fn retake_clears_answers_and_keeps_questions() {
    let mut s = session(&[
        single("a", 0, 2),
        blanks("{blank0}", &[("yes", true), ("no", false)]),
    ]);
    let questions = s.questions().to_vec();
    let id = correct_id(&s, 0);
    s.select(id);
    s.next();
    let yes = option_id(&s, 1, "yes");
    s.lift(yes);
    s.commit(DropTarget::Slot(0));
    s.next();
    assert_eq!(s.phase(), Phase::Submitted);

    s.retake();
    assert_eq!(s.phase(), Phase::InProgress);
    assert_eq!(s.current_index(), 0);
    assert!(s.answers().is_empty());
    assert!(s.score().is_none());
    assert_eq!(s.questions(), questions.as_slice());
}

#[test]
fn reviewing_to_the_end_returns_to_submitted_with_same_score() {
    let mut s = session(&[single("a", 0, 2), single("b", 1, 2), single("c", 0, 2)]);
    let id = correct_id(&s, 0);
    s.select(id);
    finish(&mut s);
    let before = s.score().cloned().unwrap();

    s.show_answers();
    assert_eq!(s.phase(), Phase::Reviewing);
    assert_eq!(s.current_index(), 0);
    assert_eq!(s.next(), Advance::Moved);
    assert_eq!(s.next(), Advance::Moved);
    assert_eq!(s.next(), Advance::ExitedReview);

    assert_eq!(s.phase(), Phase::Submitted);
    assert_eq!(s.score(), Some(&before));
}

#[test]
fn review_is_read_only() {
    let mut s = session(&[single("a", 0, 2)]);
    finish(&mut s);
    s.show_answers();
    let id = correct_id(&s, 0);
    assert!(!s.select(id));
    assert!(s.answers().selected(0).is_none());
}

#[test]
fn empty_question_set_stays_not_started() {
    let mut s = QuizSession::new(QuestionSet::load(&[]));
    s.start();
    assert_eq!(s.phase(), Phase::NotStarted);
    assert_eq!(s.next(), Advance::Ignored);
    assert!(s.score().is_none());
}

#[test]
fn malformed_questions_are_excluded_and_reported() {
    let raw = [
        single("fine", 0, 2),
        RawQuestion {
            question: "no options".into(),
            category: Modality::SingleChoice,
            options: Vec::new(),
        },
        blanks("{blank0} {blank1}", &[("only one", true)]),
    ];
    let s = QuizSession::new(QuestionSet::load(&raw));
    assert_eq!(s.len(), 1);
    let indices: Vec<usize> = s.issues().iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![1, 2]);
}

// ── Course integration ───────────────────────────────────────────────────

#[test]
fn sample_course_quizzes_load_cleanly() {
    let course = Course::sample().unwrap();
    for item in &course.content {
        let set = QuestionSet::load(&item.quizzes);
        assert!(set.issues.is_empty(), "{}: {:?}", item.title, set.issues);
        assert_eq!(set.questions.len(), item.quizzes.len());
    }
}

#[test]
fn continue_moves_the_outline_to_the_next_lesson() {
    let course = Course::sample().unwrap();
    let mut outline = CourseOutline::new(&course);
    let mut s = session(&course.content[0].quizzes);

    assert!(!s.continue_on(&mut outline));
    finish(&mut s);
    assert!(s.continue_on(&mut outline));
    assert_eq!(outline.active.index, 1);
    assert_eq!(outline.active.kind, ContentKind::Lesson);
}
