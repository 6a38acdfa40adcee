pub const MIN_ZOOM: f64 = 0.6;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Page and zoom controls for a lesson document. Pages are 1-based.
#[derive(Clone, Debug, PartialEq)]
pub struct ReaderState {
    pub page: usize,
    pub num_pages: usize,
    pub scale: f64,
    /// Digits typed toward a page jump, committed with `submit_page_entry`.
    page_entry: String,
}

impl ReaderState {
    pub fn new(num_pages: usize) -> Self {
        Self {
            page: 1,
            num_pages,
            scale: 1.0,
            page_entry: String::new(),
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.num_pages
    }

    pub fn first_page(&mut self) {
        if !self.is_first_page() {
            self.page = 1;
        }
    }

    pub fn prev_page(&mut self) {
        if !self.is_first_page() {
            self.page -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if !self.is_last_page() {
            self.page += 1;
        }
    }

    pub fn last_page(&mut self) {
        if !self.is_last_page() {
            self.page = self.num_pages;
        }
    }

    /// Jump to `page`, clamped into the document. No-op on an empty document.
    pub fn go_to_page(&mut self, page: usize) {
        if self.num_pages == 0 {
            return;
        }
        self.page = page.clamp(1, self.num_pages);
    }

    pub fn page_entry(&self) -> Option<&str> {
        (!self.page_entry.is_empty()).then_some(self.page_entry.as_str())
    }

    pub fn push_page_digit(&mut self, digit: char) {
        // Five digits is past any real page count.
        if digit.is_ascii_digit() && self.page_entry.len() < 5 {
            self.page_entry.push(digit);
        }
    }

    pub fn pop_page_digit(&mut self) {
        self.page_entry.pop();
    }

    /// Drop a pending entry. Returns whether there was one.
    pub fn clear_page_entry(&mut self) -> bool {
        let had_entry = !self.page_entry.is_empty();
        self.page_entry.clear();
        had_entry
    }

    /// Jump to the typed page number. Returns whether an entry was pending.
    pub fn submit_page_entry(&mut self) -> bool {
        let entry = std::mem::take(&mut self.page_entry);
        match entry.parse::<usize>() {
            Ok(page) => {
                self.go_to_page(page);
                true
            }
            Err(_) => false,
        }
    }

    pub fn can_zoom_out(&self) -> bool {
        self.scale >= MIN_ZOOM
    }

    pub fn can_zoom_in(&self) -> bool {
        self.scale < MAX_ZOOM
    }

    pub fn zoom_out(&mut self) {
        if self.can_zoom_out() {
            self.scale = round_tenth(self.scale - ZOOM_STEP);
        }
    }

    pub fn zoom_in(&mut self) {
        if self.can_zoom_in() {
            self.scale = round_tenth(self.scale + ZOOM_STEP);
        }
    }

    /// Index into the document's page list.
    pub fn page_index(&self) -> Option<usize> {
        (self.num_pages > 0).then(|| self.page - 1)
    }

    /// Text column width for an area `width` cells wide.
    pub fn column_width(&self, width: u16) -> u16 {
        let half = width as f64 * 0.5 * self.scale;
        (half as u16).clamp(width.min(20), width)
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
