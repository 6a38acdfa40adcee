use std::collections::HashSet;

use crate::course::Course;
use crate::quiz::session::ContentNavigator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Lesson,
    Document(usize),
    Quiz,
}

/// Which content item is on screen. Independent of any quiz's question index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveContent {
    pub index: usize,
    pub kind: ContentKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub name: String,
    pub items: Vec<usize>,
    pub total_minutes: f64,
}

/// One selectable line of the outline sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineRow {
    Section(usize),
    Entry(ActiveContent),
}

#[derive(Clone, Debug)]
pub struct CourseOutline {
    pub sections: Vec<Section>,
    pub active: ActiveContent,
    pub selected: usize,
    /// Set when `next_content` runs past the last item.
    pub reached_end: bool,
    expanded: HashSet<usize>,
    len: usize,
    document_counts: Vec<usize>,
    has_quiz: Vec<bool>,
}

impl CourseOutline {
    pub fn new(course: &Course) -> Self {
        let mut sections: Vec<Section> = Vec::new();
        for (i, item) in course.content.iter().enumerate() {
            match sections.iter_mut().find(|s| s.name == item.video_section) {
                Some(section) => {
                    section.items.push(i);
                    section.total_minutes += item.video_length;
                }
                None => sections.push(Section {
                    name: item.video_section.clone(),
                    items: vec![i],
                    total_minutes: item.video_length,
                }),
            }
        }
        let mut expanded = HashSet::new();
        if !sections.is_empty() {
            expanded.insert(0);
        }
        Self {
            sections,
            active: ActiveContent {
                index: 0,
                kind: ContentKind::Lesson,
            },
            selected: 0,
            reached_end: false,
            expanded,
            len: course.content.len(),
            document_counts: course.content.iter().map(|c| c.documents.len()).collect(),
            has_quiz: course.content.iter().map(|c| !c.quizzes.is_empty()).collect(),
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = (0..self.sections.len()).collect();
    }

    pub fn is_expanded(&self, section: usize) -> bool {
        self.expanded.contains(&section)
    }

    pub fn toggle_section(&mut self, section: usize) {
        if !self.expanded.remove(&section) {
            self.expanded.insert(section);
        }
        self.clamp_selection();
    }

    pub fn section_of(&self, index: usize) -> Option<usize> {
        self.sections.iter().position(|s| s.items.contains(&index))
    }

    /// Header rows for every section; lessons, documents and quizzes for
    /// expanded ones.
    pub fn rows(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::new();
        for (s, section) in self.sections.iter().enumerate() {
            rows.push(OutlineRow::Section(s));
            if !self.is_expanded(s) {
                continue;
            }
            for &index in &section.items {
                rows.push(OutlineRow::Entry(ActiveContent {
                    index,
                    kind: ContentKind::Lesson,
                }));
                for d in 0..self.document_counts[index] {
                    rows.push(OutlineRow::Entry(ActiveContent {
                        index,
                        kind: ContentKind::Document(d),
                    }));
                }
                if self.has_quiz[index] {
                    rows.push(OutlineRow::Entry(ActiveContent {
                        index,
                        kind: ContentKind::Quiz,
                    }));
                }
            }
        }
        rows
    }

    pub fn select_next(&mut self) {
        let count = self.rows().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Act on the selected row: toggle a section or return the entry to open.
    pub fn activate_selected(&mut self) -> Option<ActiveContent> {
        match self.rows().get(self.selected).copied()? {
            OutlineRow::Section(s) => {
                self.toggle_section(s);
                None
            }
            OutlineRow::Entry(content) => {
                self.open(content);
                Some(content)
            }
        }
    }

    pub fn open(&mut self, content: ActiveContent) {
        if content.index >= self.len {
            return;
        }
        self.active = content;
        self.reached_end = false;
        if let Some(s) = self.section_of(content.index) {
            self.expanded.insert(s);
        }
        if let Some(row) = self
            .rows()
            .iter()
            .position(|r| *r == OutlineRow::Entry(content))
        {
            self.selected = row;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.rows().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

impl ContentNavigator for CourseOutline {
    fn next_content(&mut self) {
        if self.active.index + 1 < self.len {
            self.open(ActiveContent {
                index: self.active.index + 1,
                kind: ContentKind::Lesson,
            });
        } else {
            tracing::info!("reached the end of the course");
            self.reached_end = true;
        }
    }
}
