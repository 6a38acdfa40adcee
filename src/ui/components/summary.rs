use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::quiz::result::{PASS_PERCENT, ScoreResult};
use crate::ui::theme::Theme;

/// Score screen shown once a quiz is submitted.
pub struct Summary<'a> {
    result: &'a ScoreResult,
    theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(result: &'a ScoreResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let result = self.result;

        let block = Block::bordered()
            .title(" Quiz Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let (banner, banner_color) = if result.passed {
            ("PASSED", colors.success())
        } else {
            ("NOT PASSED", colors.error())
        };
        Paragraph::new(Line::from(Span::styled(
            banner,
            Style::default().fg(banner_color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let score_line = Line::from(vec![
            Span::styled("  Score:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.0}%", result.percentage()),
                Style::default().fg(banner_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (pass mark {PASS_PERCENT}%)"),
                Style::default().fg(colors.text_dim()),
            ),
        ]);
        Paragraph::new(score_line).render(layout[1], buf);

        let correct_line = Line::from(vec![
            Span::styled("  Correct:  ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{} of {}", result.correct, result.total),
                Style::default().fg(colors.answer_correct()),
            ),
        ]);
        Paragraph::new(correct_line).render(layout[2], buf);

        let wrong_line = Line::from(vec![
            Span::styled("  Wrong:    ", Style::default().fg(colors.fg())),
            Span::styled(
                result.incorrect().to_string(),
                Style::default().fg(if result.incorrect() == 0 {
                    colors.success()
                } else {
                    colors.answer_incorrect()
                }),
            ),
        ]);
        Paragraph::new(wrong_line).render(layout[3], buf);

        let finished = result
            .finished_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let time_line = Line::from(vec![
            Span::styled("  Finished: ", Style::default().fg(colors.fg())),
            Span::styled(finished, Style::default().fg(colors.text_dim())),
        ]);
        Paragraph::new(time_line).render(layout[4], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r] Retake  ", Style::default().fg(colors.accent())),
            Span::styled("[a] Show answers  ", Style::default().fg(colors.accent())),
            Span::styled("[c] Continue", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[6], buf);
    }
}
