use crate::models::SearchField;

/// Entries of the sidebar menu, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum Section {
    #[default]
    AddBook,
    RemoveBook,
    SearchBooks,
    AllBooks,
    Statistics,
}

impl Section {
    pub(crate) const ALL: [Section; 5] = [
        Section::AddBook,
        Section::RemoveBook,
        Section::SearchBooks,
        Section::AllBooks,
        Section::Statistics,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Section::AddBook => "Add a Book",
            Section::RemoveBook => "Remove a Book",
            Section::SearchBooks => "Search for a Book",
            Section::AllBooks => "Display All Books",
            Section::Statistics => "Display Statistics",
        }
    }

    /// Heading rendered above the section's content.
    pub(crate) fn heading(self) -> &'static str {
        match self {
            Section::AddBook => "Add a Book",
            Section::RemoveBook => "Remove a Book",
            Section::SearchBooks => "Search for a Book",
            Section::AllBooks => "Your Library",
            Section::Statistics => "Library Statistics",
        }
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    /// Step through the menu, stopping at either end.
    pub(crate) fn offset(self, offset: isize) -> Self {
        let last = Self::ALL.len() as isize - 1;
        let target = (self.index() as isize + offset).clamp(0, last);
        Self::ALL[target as usize]
    }
}

/// Selection state for the "Remove a Book" title picker. The title list
/// itself is always read fresh from the library, so only the cursor lives
/// here.
#[derive(Default)]
pub(crate) struct RemoveScreen {
    pub(crate) selected: usize,
}

impl RemoveScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let len = len as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Clamp the cursor after the title list shrank.
    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Inputs of the search section. Results are recomputed from the library on
/// every frame.
#[derive(Default)]
pub(crate) struct SearchScreen {
    pub(crate) field: SearchField,
    pub(crate) term: String,
}

impl SearchScreen {
    pub(crate) fn toggle_field(&mut self) {
        self.field = self.field.toggle();
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.term.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.term.pop();
    }

    /// Prompt shown in front of the term, e.g. `Enter the author: `.
    pub(crate) fn prompt(&self) -> String {
        format!("Enter the {}: ", self.field.label().to_lowercase())
    }
}

/// Scroll offset for the full book listing.
#[derive(Default)]
pub(crate) struct ListScreen {
    pub(crate) scroll: u16,
}

impl ListScreen {
    pub(crate) fn scroll_by(&mut self, offset: i32, len: usize) {
        let max = len.saturating_sub(1).min(u16::MAX as usize) as i32;
        self.scroll = (self.scroll as i32).saturating_add(offset).clamp(0, max) as u16;
    }

    pub(crate) fn reset(&mut self) {
        self.scroll = 0;
    }
}
