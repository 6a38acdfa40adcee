use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::course::Course;
use crate::course::outline::{ActiveContent, ContentKind, CourseOutline};
use crate::course::reader::ReaderState;
use crate::quiz::board::DropTarget;
use crate::quiz::question::QuestionSet;
use crate::quiz::session::{Advance, Phase, QuizSession};
use crate::quiz::view::{self, FocusTarget};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Outline,
    Content,
}

pub struct App {
    pub course: Course,
    pub outline: CourseOutline,
    pub quiz: Option<QuizSession>,
    /// Index into the focusable targets of the current question.
    pub quiz_cursor: usize,
    pub reader: Option<ReaderState>,
    pub focus: Pane,
    pub notice: Option<String>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(course: Course, config: Config, theme: &'static Theme) -> Self {
        let mut outline = CourseOutline::new(&course);
        if config.expand_all_sections {
            outline.expand_all();
        }
        let mut app = Self {
            course,
            outline,
            quiz: None,
            quiz_cursor: 0,
            reader: None,
            focus: Pane::Outline,
            notice: None,
            theme,
            config,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        };
        if !app.course.is_empty() {
            app.mount(app.outline.active);
        }
        app
    }

    pub fn active(&self) -> ActiveContent {
        self.outline.active
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Outline => Pane::Content,
            Pane::Content => Pane::Outline,
        };
    }

    /// Open the outline row under the selection, or fold its section.
    pub fn open_selected(&mut self) {
        if let Some(content) = self.outline.activate_selected() {
            self.mount(content);
            self.focus = Pane::Content;
        }
    }

    pub fn open(&mut self, content: ActiveContent) {
        self.outline.open(content);
        self.mount(self.outline.active);
    }

    /// Swap the content pane to `content`. Any quiz in progress is dropped; a
    /// quiz always starts fresh when reopened.
    fn mount(&mut self, content: ActiveContent) {
        self.quiz = None;
        self.reader = None;
        self.quiz_cursor = 0;
        self.notice = None;

        let Some(item) = self.course.item(content.index) else {
            return;
        };
        match content.kind {
            ContentKind::Lesson => {}
            ContentKind::Document(d) => {
                let pages = item.documents.get(d).map_or(0, |doc| doc.pages.len());
                self.reader = Some(ReaderState::new(pages));
            }
            ContentKind::Quiz => {
                let set = QuestionSet::load(&item.quizzes);
                if !set.issues.is_empty() {
                    self.notice = Some(format!(
                        "{} question(s) in \"{}\" could not be used",
                        set.issues.len(),
                        item.title
                    ));
                }
                let mut session = QuizSession::new(set);
                if self.config.shuffle_pool {
                    session.shuffle_pools(&mut self.rng);
                }
                self.quiz = Some(session);
            }
        }
        tracing::debug!(index = content.index, kind = ?content.kind, "content mounted");
    }

    pub fn quiz_phase(&self) -> Option<Phase> {
        self.quiz.as_ref().map(QuizSession::phase)
    }

    fn focused_target(&self) -> Option<FocusTarget> {
        let session = self.quiz.as_ref()?;
        view::current_view(session)?.target(self.quiz_cursor)
    }

    fn target_count(&self) -> usize {
        self.quiz
            .as_ref()
            .and_then(view::current_view)
            .map_or(0, |v| v.target_count())
    }

    fn clamp_cursor(&mut self) {
        let count = self.target_count();
        self.quiz_cursor = self.quiz_cursor.min(count.saturating_sub(1));
    }

    pub fn cursor_next(&mut self) {
        let count = self.target_count();
        if count > 0 {
            self.quiz_cursor = (self.quiz_cursor + 1) % count;
        }
    }

    pub fn cursor_prev(&mut self) {
        let count = self.target_count();
        if count > 0 {
            self.quiz_cursor = (self.quiz_cursor + count - 1) % count;
        }
    }

    pub fn start_quiz(&mut self) {
        if let Some(session) = self.quiz.as_mut() {
            session.start();
            self.quiz_cursor = 0;
        }
    }

    /// Space/Enter on the focused target: select a choice, or lift and drop
    /// options between the pool and the blanks.
    pub fn activate_focused(&mut self) {
        let Some(target) = self.focused_target() else {
            return;
        };
        let Some(session) = self.quiz.as_mut() else {
            return;
        };
        let holding = session
            .current_board()
            .and_then(|b| b.lifted())
            .is_some();

        match target {
            FocusTarget::Choice(id) => {
                session.select(id);
            }
            FocusTarget::Blank(ordinal) if holding => {
                session.commit(DropTarget::Slot(ordinal));
            }
            FocusTarget::Blank(ordinal) => {
                let occupant = session
                    .current_board()
                    .and_then(|b| b.assigned(ordinal))
                    .map(|p| p.id);
                if let Some(id) = occupant {
                    session.lift(id);
                }
            }
            FocusTarget::Pool(_) if holding => {
                session.commit(DropTarget::Pool);
            }
            FocusTarget::Pool(id) => {
                if session.lift(id).is_some() {
                    // Jump to the first open blank so the next Space drops there
                    self.quiz_cursor = session
                        .current_board()
                        .and_then(|b| b.slots().iter().position(|s| s.is_empty()))
                        .unwrap_or(0);
                }
            }
        }
        self.clamp_cursor();
    }

    /// Digit keys: choose option `n` directly, or move focus to target `n`.
    pub fn pick_number(&mut self, n: usize) {
        if n == 0 || n > self.target_count() {
            return;
        }
        self.quiz_cursor = n - 1;
        if matches!(self.focused_target(), Some(FocusTarget::Choice(_))) {
            self.activate_focused();
        }
    }

    /// Send the option sitting in the focused blank back to the pool.
    pub fn return_focused(&mut self) {
        let Some(FocusTarget::Blank(ordinal)) = self.focused_target() else {
            return;
        };
        if let Some(session) = self.quiz.as_mut() {
            let occupant = session
                .current_board()
                .and_then(|b| b.assigned(ordinal))
                .map(|p| p.id);
            if let Some(id) = occupant {
                session.return_to_pool(id);
            }
        }
        self.clamp_cursor();
    }

    /// Esc: drop a held option back where it came from. Returns false when
    /// nothing was held.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.quiz.as_mut() else {
            return false;
        };
        if session.current_board().and_then(|b| b.lifted()).is_none() {
            return false;
        }
        session.cancel_drag();
        self.clamp_cursor();
        true
    }

    pub fn quiz_next(&mut self) {
        let Some(session) = self.quiz.as_mut() else {
            return;
        };
        if matches!(session.next(), Advance::Moved | Advance::ExitedReview) {
            self.quiz_cursor = 0;
        }
    }

    pub fn quiz_back(&mut self) {
        if let Some(session) = self.quiz.as_mut() {
            session.back();
            self.quiz_cursor = 0;
        }
    }

    pub fn retake(&mut self) {
        if let Some(session) = self.quiz.as_mut() {
            session.retake();
            self.quiz_cursor = 0;
        }
    }

    pub fn show_answers(&mut self) {
        if let Some(session) = self.quiz.as_mut() {
            session.show_answers();
            self.quiz_cursor = 0;
        }
    }

    /// Leave a submitted quiz for the next lesson.
    pub fn continue_course(&mut self) {
        let moved = match self.quiz.as_ref() {
            Some(session) => session.continue_on(&mut self.outline),
            None => false,
        };
        if !moved {
            return;
        }
        if self.outline.reached_end {
            self.notice = Some("You have reached the end of the course.".to_string());
        } else {
            self.mount(self.outline.active);
        }
    }
}
