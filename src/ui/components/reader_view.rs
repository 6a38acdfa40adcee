use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::course::DocumentRef;
use crate::course::reader::ReaderState;
use crate::ui::theme::Theme;

/// One page of a lesson document, laid out in a column whose width follows
/// the zoom level.
pub struct ReaderView<'a> {
    document: &'a DocumentRef,
    reader: &'a ReaderState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ReaderView<'a> {
    pub fn new(
        document: &'a DocumentRef,
        reader: &'a ReaderState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            document,
            reader,
            focused,
            theme,
        }
    }
}

impl Widget for ReaderView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.document.title))
            .border_style(Style::default().fg(if self.focused {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let dim = Style::default().fg(colors.text_dim());
        let zoom_style = |enabled: bool| {
            if enabled {
                Style::default().fg(colors.accent())
            } else {
                dim
            }
        };
        let mut status = vec![
            Span::styled(
                format!("Page {} of {}", self.reader.page, self.reader.num_pages),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   {:.0}%  ", self.reader.scale * 100.0), dim),
            Span::styled("[-]", zoom_style(self.reader.can_zoom_out())),
            Span::styled(" ", dim),
            Span::styled("[+]", zoom_style(self.reader.can_zoom_in())),
        ];
        if let Some(entry) = self.reader.page_entry() {
            status.push(Span::styled("   Go to page ", dim));
            status.push(Span::styled(
                format!("{entry}_"),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ));
        }
        let status = Line::from(status);
        Paragraph::new(status).render(layout[0], buf);

        let body = layout[1];
        let page = self
            .reader
            .page_index()
            .and_then(|i| self.document.pages.get(i));
        let Some(page) = page else {
            let message = if self.document.url.is_empty() {
                "This document has no pages.".to_string()
            } else {
                format!("No text extracted. Open {} instead.", self.document.url)
            };
            Paragraph::new(Span::styled(message, dim))
                .wrap(Wrap { trim: true })
                .render(body, buf);
            return;
        };

        let width = self.reader.column_width(body.width);
        let column = Rect::new(
            body.x + (body.width.saturating_sub(width)) / 2,
            body.y,
            width,
            body.height,
        );
        Paragraph::new(page.as_str())
            .style(Style::default().fg(colors.fg()))
            .wrap(Wrap { trim: false })
            .render(column, buf);
    }
}
