use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: outline sidebar beside the content pane
    Narrow, // <90 cols: one pane at a time, Tab switches
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }

    pub fn show_progress_bar(&self, height: u16) -> bool {
        height >= 16
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub sidebar: Option<Rect>,
    pub main: Rect,
    pub progress: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect, with_progress: bool) -> Self {
        let tier = LayoutTier::from_area(area);
        let progress_height = if with_progress && tier.show_progress_bar(area.height) {
            3
        } else {
            0
        };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(progress_height),
                Constraint::Length(2),
            ])
            .split(area);
        let progress = (progress_height > 0).then_some(vertical[2]);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(40)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                sidebar: Some(horizontal[0]),
                main: horizontal[1],
                progress,
                footer: vertical[3],
                tier,
            }
        } else {
            Self {
                header: vertical[0],
                sidebar: None,
                main: vertical[1],
                progress,
                footer: vertical[3],
                tier,
            }
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if current.len() > prefix.len() {
            format!("{current}  {hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || current.len() == prefix.len() {
            current = candidate;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
    }

    if current.len() > prefix.len() {
        out.push(current);
    }
    out
}
