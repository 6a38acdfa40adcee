use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::course::outline::{ContentKind, CourseOutline, OutlineRow};
use crate::course::{Course, format_duration};
use crate::ui::theme::Theme;

/// Course sidebar: collapsible sections with their lessons, documents and
/// quizzes.
pub struct OutlineList<'a> {
    course: &'a Course,
    outline: &'a CourseOutline,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> OutlineList<'a> {
    pub fn new(course: &'a Course, outline: &'a CourseOutline, focused: bool, theme: &'a Theme) -> Self {
        Self {
            course,
            outline,
            focused,
            theme,
        }
    }

    fn row_line(&self, row: OutlineRow) -> Line<'a> {
        let colors = &self.theme.colors;
        match row {
            OutlineRow::Section(s) => {
                let section = &self.outline.sections[s];
                let arrow = if self.outline.is_expanded(s) { "▾" } else { "▸" };
                Line::from(vec![
                    Span::styled(
                        format!("{arrow} {}", section.name),
                        Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", format_duration(section.total_minutes)),
                        Style::default().fg(colors.text_dim()),
                    ),
                ])
            }
            OutlineRow::Entry(content) => {
                let Some(item) = self.course.item(content.index) else {
                    return Line::default();
                };
                let is_active = self.outline.active == content;
                let marker = if is_active { "●" } else { " " };
                let label = match content.kind {
                    ContentKind::Lesson => format!("  {marker} {}", item.title),
                    ContentKind::Document(d) => {
                        let title = item.documents.get(d).map_or("Document", |doc| doc.title.as_str());
                        format!("    {marker} ▤ {title}")
                    }
                    ContentKind::Quiz => format!("    {marker} ? Quiz ({})", item.quizzes.len()),
                };
                let fg = if is_active { colors.accent() } else { colors.fg() };
                Line::from(Span::styled(label, Style::default().fg(fg)))
            }
        }
    }
}

impl Widget for OutlineList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(format!(" {} ", self.course.title))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let rows = self.outline.rows();
        if rows.is_empty() {
            Paragraph::new(Span::styled(
                "This course has no content yet.",
                Style::default().fg(colors.text_dim()),
            ))
            .render(inner, buf);
            return;
        }

        // Keep the selection on screen
        let visible = inner.height as usize;
        let offset = self.outline.selected.saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, row)| {
                let line = self.row_line(*row);
                if i == self.outline.selected && self.focused {
                    line.style(Style::default().bg(colors.selection_bg()))
                } else {
                    line
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
