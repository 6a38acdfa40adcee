mod app;
mod config;
mod course;
mod event;
mod logging;
mod quiz;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, Pane};
use config::Config;
use course::Course;
use course::outline::ContentKind;
use event::{AppEvent, EventHandler};
use quiz::Phase;
use ui::components::lesson_view::LessonView;
use ui::components::outline_list::OutlineList;
use ui::components::progress_bar::ProgressBar;
use ui::components::question_panel::QuestionPanel;
use ui::components::reader_view::ReaderView;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "coursedeck", version, about = "Terminal course viewer with interactive quizzes")]
struct Cli {
    #[arg(short, long, help = "Course JSON file (defaults to the bundled sample)")]
    course: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Shuffle the word bank of fill-in-the-blank questions")]
    shuffle: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    config.validate(&Theme::available_themes());
    let _log_guard = logging::init(&config.log_level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "coursedeck starting");

    // First run: leave an editable config behind, before CLI overrides apply
    if !Config::config_path().exists() {
        if let Err(err) = config.save() {
            tracing::warn!(error = %err, "could not write default config");
        }
    }

    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }
    if cli.shuffle {
        config.shuffle_pool = true;
    }

    let course_path = cli
        .course
        .or_else(|| config.course_path.as_ref().map(PathBuf::from));
    let course = match course_path {
        Some(path) => Course::load(&path)?,
        None => Course::sample()?,
    };

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using the default");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let mut app = App::new(course, config, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "exiting after error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match app.focus {
        Pane::Outline => handle_outline_key(app, key),
        Pane::Content => match app.active().kind {
            ContentKind::Lesson => handle_lesson_key(app, key),
            ContentKind::Document(_) => handle_reader_key(app, key),
            ContentKind::Quiz => handle_quiz_key(app, key),
        },
    }
}

fn handle_outline_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.outline.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.outline.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l') => {
            app.open_selected()
        }
        KeyCode::Esc => app.focus = Pane::Content,
        _ => {}
    }
}

fn handle_lesson_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.focus = Pane::Outline;
    }
}

fn handle_reader_key(app: &mut App, key: KeyEvent) {
    let Some(reader) = app.reader.as_mut() else {
        if key.code == KeyCode::Esc {
            app.focus = Pane::Outline;
        }
        return;
    };
    match key.code {
        KeyCode::Esc => {
            if !reader.clear_page_entry() {
                app.focus = Pane::Outline;
            }
        }
        KeyCode::Char(c @ '0'..='9') => reader.push_page_digit(c),
        KeyCode::Backspace => reader.pop_page_digit(),
        KeyCode::Enter => {
            reader.submit_page_entry();
        }
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => reader.next_page(),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => reader.prev_page(),
        KeyCode::Home | KeyCode::Char('g') => reader.first_page(),
        KeyCode::End | KeyCode::Char('G') => reader.last_page(),
        KeyCode::Char('+') | KeyCode::Char('=') => reader.zoom_in(),
        KeyCode::Char('-') => reader.zoom_out(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match app.quiz_phase() {
        None => {
            if key.code == KeyCode::Esc {
                app.focus = Pane::Outline;
            }
        }
        Some(Phase::NotStarted) => match key.code {
            KeyCode::Enter => app.start_quiz(),
            KeyCode::Esc => app.focus = Pane::Outline,
            _ => {}
        },
        Some(Phase::InProgress) => match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => app.cursor_prev(),
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => app.cursor_next(),
            KeyCode::Char(' ') | KeyCode::Enter => app.activate_focused(),
            KeyCode::Char(c @ '1'..='9') => app.pick_number(c as usize - '0' as usize),
            KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => app.return_focused(),
            KeyCode::Esc => {
                if !app.cancel_drag() {
                    app.focus = Pane::Outline;
                }
            }
            KeyCode::Char('n') => app.quiz_next(),
            KeyCode::Char('b') => app.quiz_back(),
            _ => {}
        },
        Some(Phase::Submitted) => match key.code {
            KeyCode::Char('r') => app.retake(),
            KeyCode::Char('a') => app.show_answers(),
            KeyCode::Char('c') | KeyCode::Enter => app.continue_course(),
            KeyCode::Esc => app.focus = Pane::Outline,
            _ => {}
        },
        Some(Phase::Reviewing) => match key.code {
            KeyCode::Char('n') | KeyCode::Right => app.quiz_next(),
            KeyCode::Char('b') | KeyCode::Left => app.quiz_back(),
            KeyCode::Char('r') => app.retake(),
            KeyCode::Esc => app.focus = Pane::Outline,
            _ => {}
        },
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let with_progress = app.config.show_progress_bar && !app.course.is_empty();
    let layout = AppLayout::new(area, with_progress);

    render_header(frame, app, layout.header);

    // Narrow terminals show one pane at a time
    let content_area = match layout.sidebar {
        Some(sidebar) => {
            let outline = OutlineList::new(
                &app.course,
                &app.outline,
                app.focus == Pane::Outline,
                app.theme,
            );
            frame.render_widget(outline, sidebar);
            Some(layout.main)
        }
        None if app.focus == Pane::Outline => {
            let outline = OutlineList::new(&app.course, &app.outline, true, app.theme);
            frame.render_widget(outline, layout.main);
            None
        }
        None => Some(layout.main),
    };
    if let Some(main) = content_area {
        render_content(frame, app, main);
    }

    if let Some(progress_area) = layout.progress {
        render_progress(frame, app, progress_area);
    }

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let title = if app.course.title.is_empty() {
        "Untitled course"
    } else {
        app.course.title.as_str()
    };
    let mut spans = vec![
        Span::styled(
            " coursedeck ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {title}"),
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(
            format!("  {notice}"),
            Style::default().fg(colors.warning()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(spans))
        .block(Block::bordered().border_style(Style::default().fg(colors.border())))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_content(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let focused = app.focus == Pane::Content;
    let active = app.active();

    let Some(item) = app.course.item(active.index) else {
        let empty = Paragraph::new(Span::styled(
            "  Nothing to show. Open a course with --course <file>.",
            Style::default().fg(colors.text_dim()),
        ))
        .block(Block::bordered().border_style(Style::default().fg(colors.border())));
        frame.render_widget(empty, area);
        return;
    };

    match active.kind {
        ContentKind::Lesson => {
            frame.render_widget(LessonView::new(item, focused, app.theme), area);
        }
        ContentKind::Document(d) => {
            if let (Some(doc), Some(reader)) = (item.documents.get(d), app.reader.as_ref()) {
                frame.render_widget(ReaderView::new(doc, reader, focused, app.theme), area);
            }
        }
        ContentKind::Quiz => {
            if let Some(session) = app.quiz.as_ref() {
                let panel = QuestionPanel::new(session, app.quiz_cursor, focused, app.theme);
                frame.render_widget(panel, area);
            }
        }
    }
}

fn render_progress(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let in_quiz = app
        .quiz
        .as_ref()
        .filter(|s| matches!(s.phase(), Phase::InProgress | Phase::Reviewing));
    let bar = match in_quiz {
        Some(session) => ProgressBar::new(
            "Quiz",
            session.current_index() + 1,
            session.len(),
            app.theme,
        ),
        None => ProgressBar::new(
            "Course",
            app.active().index + 1,
            app.course.content.len(),
            app.theme,
        ),
    };
    frame.render_widget(bar, area);
}

fn footer_hints(app: &App) -> Vec<&'static str> {
    let mut hints = vec!["[Tab] Switch pane", "[q] Quit"];
    let contextual: &[&'static str] = match app.focus {
        Pane::Outline => &["[↑↓] Move", "[Enter] Open/fold"],
        Pane::Content => match app.active().kind {
            ContentKind::Lesson => &["[Esc] Outline"],
            ContentKind::Document(_) => &[
                "[←→] Page",
                "[0-9 Enter] Go to page",
                "[Home/End] First/last",
                "[+/-] Zoom",
            ],
            ContentKind::Quiz => match app.quiz_phase() {
                Some(Phase::NotStarted) => &["[Enter] Start"],
                Some(Phase::InProgress) => &[
                    "[↑↓←→] Move",
                    "[Space] Select/lift/drop",
                    "[1-9] Pick",
                    "[x] Return",
                    "[Esc] Cancel",
                    "[n] Next",
                    "[b] Back",
                ],
                Some(Phase::Submitted) => &["[r] Retake", "[a] Answers", "[c] Continue"],
                Some(Phase::Reviewing) => &["[n] Next", "[b] Back", "[r] Retake"],
                None => &[],
            },
        },
    };
    hints.splice(0..0, contextual.iter().copied());
    hints
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(&footer_hints(app), area.width as usize)
        .into_iter()
        .take(area.height as usize)
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_dim()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
