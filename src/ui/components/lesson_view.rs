use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::course::{ContentItem, format_duration};
use crate::ui::theme::Theme;

pub struct LessonView<'a> {
    item: &'a ContentItem,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> LessonView<'a> {
    pub fn new(item: &'a ContentItem, focused: bool, theme: &'a Theme) -> Self {
        Self {
            item,
            focused,
            theme,
        }
    }
}

impl Widget for LessonView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let item = self.item;

        let block = Block::bordered()
            .title(" Lesson ")
            .border_style(Style::default().fg(if self.focused {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let dim = Style::default().fg(colors.text_dim());
        let mut lines = vec![
            Line::from(Span::styled(
                item.title.as_str(),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(item.video_section.as_str(), dim),
                Span::styled("  ·  ", dim),
                Span::styled(format_duration(item.video_length), dim),
            ]),
            Line::from(""),
        ];

        if !item.video_url.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Video: ", Style::default().fg(colors.fg())),
                Span::styled(item.video_url.as_str(), Style::default().fg(colors.accent())),
            ]));
            lines.push(Line::from(""));
        }

        for para in item.description.lines() {
            lines.push(Line::from(Span::styled(para, Style::default().fg(colors.fg()))));
        }

        if !item.links.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Links",
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )));
            for link in &item.links {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {} ", link.title), Style::default().fg(colors.fg())),
                    Span::styled(link.url.as_str(), dim),
                ]));
            }
        }

        let mut extras = Vec::new();
        if !item.documents.is_empty() {
            extras.push(format!("{} document(s)", item.documents.len()));
        }
        if !item.quizzes.is_empty() {
            extras.push(format!("a {}-question quiz", item.quizzes.len()));
        }
        if !extras.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("This lesson has {}. Pick them in the outline.", extras.join(" and ")),
                dim,
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
