const VISIBLE_ROWS: usize = 20;

#[derive(Debug)]
pub struct NavigationState {
    pub selected_index: usize,
    pub scroll_offset: usize,
    /// Rows that fit in the table body; the renderer updates it every frame.
    pub visible_rows: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            scroll_offset: 0,
            visible_rows: VISIBLE_ROWS,
        }
    }

    pub fn set_visible_rows(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows.max(1);
        self.update_scroll();
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.update_scroll();
        }
    }

    pub fn move_selection_down(&mut self, row_count: usize) {
        if self.selected_index < row_count.saturating_sub(1) {
            self.selected_index += 1;
            self.update_scroll();
        }
    }

    pub fn move_to_top(&mut self) {
        self.select(0);
    }

    pub fn move_to_bottom(&mut self, row_count: usize) {
        self.select(row_count.saturating_sub(1));
    }

    pub fn select(&mut self, index: usize) {
        self.selected_index = index;
        self.update_scroll();
    }

    /// Keeps the cursor on a real row after the table shrinks.
    pub fn clamp(&mut self, row_count: usize) {
        if self.selected_index >= row_count {
            self.select(row_count.saturating_sub(1));
        }
    }

    pub fn update_scroll(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = self.selected_index.saturating_sub(self.visible_rows - 1);
        }
    }
}
