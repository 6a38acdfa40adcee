use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::quiz::session::{Phase, QuizSession};
use crate::quiz::view::{self, ChoiceItem, OptionMark, PoolItem, QuestionView, Segment};
use crate::ui::components::summary::Summary;
use crate::ui::theme::Theme;

/// The quiz pane. `cursor` indexes the focusable targets of the current
/// question as laid out by [`QuestionView::target`].
pub struct QuestionPanel<'a> {
    session: &'a QuizSession,
    cursor: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QuestionPanel<'a> {
    pub fn new(session: &'a QuizSession, cursor: usize, focused: bool, theme: &'a Theme) -> Self {
        Self {
            session,
            cursor,
            focused,
            theme,
        }
    }

    fn intro_lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        if self.session.is_empty() {
            return vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No questions available.",
                    Style::default().fg(colors.text_dim()),
                )),
            ];
        }
        vec![
            Line::from(""),
            Line::from(Span::styled(
                match self.session.len() {
                    1 => "1 question".to_string(),
                    n => format!("{n} questions"),
                },
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to start.",
                Style::default().fg(colors.fg()),
            )),
        ]
    }

    fn header_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let modality = self
            .session
            .current_question()
            .map_or("", |q| q.modality.label());
        let mut spans = vec![
            Span::styled(
                format!(
                    "Question {} of {}",
                    self.session.current_index() + 1,
                    self.session.len()
                ),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {modality}"), Style::default().fg(colors.text_dim())),
        ];
        if self.session.phase() == Phase::InProgress {
            spans.push(Span::styled(
                format!(
                    "  · {} of {} answered",
                    self.session.answers().answered_count(),
                    self.session.len()
                ),
                Style::default().fg(colors.text_dim()),
            ));
        }
        if self.session.phase() == Phase::Reviewing {
            let verdict = if self.session.is_correct(self.session.current_index()) {
                Span::styled("  correct", Style::default().fg(colors.answer_correct()))
            } else {
                Span::styled("  incorrect", Style::default().fg(colors.answer_incorrect()))
            };
            spans.push(Span::styled("  · review", Style::default().fg(colors.warning())));
            spans.push(verdict);
        }
        Line::from(spans)
    }

    fn focus_style(&self, index: usize) -> Style {
        if self.focused && index == self.cursor {
            Style::default()
                .bg(self.theme.colors.selection_bg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    fn choice_lines(&self, prompt: String, items: &[ChoiceItem<'a>]) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::from(Span::styled(prompt, Style::default().fg(colors.fg()))),
            Line::from(""),
        ];
        for (i, item) in items.iter().enumerate() {
            let radio = if item.selected { "(•)" } else { "( )" };
            let fg = match item.mark {
                OptionMark::Neutral if item.selected => colors.accent(),
                mark => colors.mark(mark),
            };
            let style = self.focus_style(i).fg(fg);
            lines.push(Line::from(Span::styled(
                format!(" {}. {radio} {}", i + 1, item.text),
                style,
            )));
        }
        lines
    }

    fn blank_lines(&self, segments: &[Segment<'a>], pool: &[PoolItem<'a>]) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let reviewing = self.session.phase() == Phase::Reviewing;

        let mut prompt: Vec<Span> = Vec::new();
        let mut blank_index = 0;
        for segment in segments {
            match segment {
                Segment::Text(text) => {
                    if !prompt.is_empty() {
                        prompt.push(Span::raw(" "));
                    }
                    prompt.push(Span::styled(*text, Style::default().fg(colors.fg())));
                }
                Segment::Blank {
                    ordinal,
                    occupant,
                    expected,
                    mark,
                } => {
                    if !prompt.is_empty() {
                        prompt.push(Span::raw(" "));
                    }
                    let label = match occupant {
                        Some(p) => format!("[{}: {}]", ordinal + 1, p.text),
                        None => format!("[{}: ______]", ordinal + 1),
                    };
                    let fg = if reviewing {
                        colors.mark(*mark)
                    } else if occupant.is_some() {
                        colors.slot_filled()
                    } else {
                        colors.slot_empty()
                    };
                    prompt.push(Span::styled(label, self.focus_style(blank_index).fg(fg)));
                    if reviewing && *mark != OptionMark::SelectedCorrect {
                        if let Some(expected) = expected {
                            prompt.push(Span::styled(
                                format!(" ({expected})"),
                                Style::default().fg(colors.answer_missed()),
                            ));
                        }
                    }
                    blank_index += 1;
                }
            }
        }

        let mut lines = vec![Line::from(prompt), Line::from("")];
        let unplaced = self.session.current_board().map_or(0, |b| b.pool_len());
        lines.push(Line::from(vec![
            Span::styled(
                "Word bank",
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {unplaced} unplaced"),
                Style::default().fg(colors.text_dim()),
            ),
        ]));

        let chips: Vec<Span> = if pool.is_empty() {
            vec![Span::styled("(empty)", Style::default().fg(colors.text_dim()))]
        } else {
            pool.iter()
                .enumerate()
                .flat_map(|(i, item)| {
                    [
                        Span::styled(
                            format!("[{}]", item.text),
                            self.focus_style(blank_index + i).fg(colors.fg()),
                        ),
                        Span::raw("  "),
                    ]
                })
                .collect()
        };
        lines.push(Line::from(chips));

        if let Some(held) = self.session.current_board().and_then(|b| b.lifted()) {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Holding ", Style::default().fg(colors.text_dim())),
                Span::styled(
                    held.text.clone(),
                    Style::default().fg(colors.held()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    ". Space drops it on the focused target, Esc puts it back.",
                    Style::default().fg(colors.text_dim()),
                ),
            ]));
        }
        lines
    }
}

impl Widget for QuestionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        if self.session.phase() == Phase::Submitted {
            if let Some(score) = self.session.score() {
                Summary::new(score, self.theme).render(area, buf);
            }
            return;
        }

        let block = Block::bordered()
            .title(" Quiz ")
            .border_style(Style::default().fg(if self.focused {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let issues = self.session.issues().len();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(if issues > 0 { 1 } else { 0 }),
            ])
            .split(inner);

        if issues > 0 {
            Paragraph::new(Span::styled(
                format!("{issues} malformed question(s) were left out of this quiz."),
                Style::default().fg(colors.warning()),
            ))
            .render(layout[2], buf);
        }

        let Some(view) = view::current_view(self.session) else {
            Paragraph::new(self.intro_lines())
                .wrap(Wrap { trim: false })
                .render(layout[1], buf);
            return;
        };

        Paragraph::new(self.header_line()).render(layout[0], buf);

        let lines = match &view {
            QuestionView::Choice { prompt, items } => self.choice_lines(prompt.clone(), items),
            QuestionView::Blanks { segments, pool } => self.blank_lines(segments, pool),
        };
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);
    }
}
