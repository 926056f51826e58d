use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{NewBook, MAX_YEAR, MIN_YEAR};

/// Longest year the form lets the user type.
const YEAR_DIGITS: usize = 4;

/// Internal representation of the "Add a Book" form.
#[derive(Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    /// Kept as text so partially typed years can be edited freely.
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: FormField,
    pub(crate) error: Option<String>,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: MIN_YEAR.to_string(),
            genre: String::new(),
            read: false,
            active: FormField::Title,
            error: None,
        }
    }
}

/// Fields available within the book form, in focus order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Author,
        FormField::Year,
        FormField::Genre,
        FormField::Read,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Author => "Author",
            FormField::Year => "Publication Year",
            FormField::Genre => "Genre",
            FormField::Read => "Have you read this book?",
        }
    }

    /// Line within the form body where the field is drawn.
    pub(crate) fn row(self) -> u16 {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as u16
    }

    /// Whether the field takes typed text (and so shows a cursor).
    pub(crate) fn is_text(self) -> bool {
        self != FormField::Read
    }

    fn step(self, offset: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let index = (self.row() as isize + offset).rem_euclid(len);
        Self::ORDER[index as usize]
    }
}

impl BookForm {
    pub(crate) fn next_field(&mut self) {
        self.active = self.active.step(1);
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.step(-1);
    }

    /// Append a character to the active field, validating allowed input. The
    /// year only takes digits (`+`/`-` step it instead) and the read checkbox
    /// flips on space.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            FormField::Title => self.title.push(ch),
            FormField::Author => self.author.push(ch),
            FormField::Genre => self.genre.push(ch),
            FormField::Year => match ch {
                '+' => self.step_year(1),
                '-' => self.step_year(-1),
                _ if ch.is_ascii_digit() && self.year.len() < YEAR_DIGITS => self.year.push(ch),
                _ => return false,
            },
            FormField::Read => {
                if ch == ' ' {
                    self.toggle_read();
                } else {
                    return false;
                }
            }
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Author => {
                self.author.pop();
            }
            FormField::Year => {
                self.year.pop();
            }
            FormField::Genre => {
                self.genre.pop();
            }
            FormField::Read => {}
        }
    }

    /// Move the year by `delta`, clamped to the accepted range. An empty or
    /// unparsable year restarts from the lower bound.
    pub(crate) fn step_year(&mut self, delta: i32) {
        let current = self.year.trim().parse::<i32>().unwrap_or(MIN_YEAR);
        let next = current.saturating_add(delta).clamp(MIN_YEAR, MAX_YEAR);
        self.year = next.to_string();
    }

    pub(crate) fn toggle_read(&mut self) {
        self.read = !self.read;
    }

    /// Turn the raw inputs into a [`NewBook`]. Text is passed through
    /// unchanged; whether the required fields are present is decided by the
    /// library.
    pub(crate) fn parse_inputs(&self) -> Result<NewBook> {
        let year_raw = self.year.trim();
        if year_raw.is_empty() {
            return Err(anyhow!("Publication year is required."));
        }
        let year = year_raw
            .parse::<i32>()
            .map_err(|_| anyhow!("Publication year must be a whole number."))?;
        Ok(NewBook::new(
            self.title.clone(),
            self.author.clone(),
            year,
            self.genre.clone(),
            self.read,
        ))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: FormField) -> Line<'static> {
        let is_active = self.active == field;
        let label = field.label();

        if field == FormField::Read {
            let mark = if self.read { "[x]" } else { "[ ]" };
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::styled(mark.to_string(), style),
                Span::raw(format!(" {label}")),
            ]);
        }

        let value = self.value(field);
        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(display, style),
        ])
    }

    /// Column offset of the cursor for a text field, relative to the start of
    /// its line.
    pub(crate) fn cursor_offset(&self, field: FormField) -> u16 {
        let prefix = field.label().chars().count() + 2;
        u16::try_from(prefix + self.value(field).chars().count()).unwrap_or(u16::MAX)
    }

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Year => &self.year,
            FormField::Genre => &self.genre,
            FormField::Read => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::surface_error;

    fn filled_form() -> BookForm {
        BookForm {
            title: "  Dune ".to_string(),
            author: "Frank Herbert".to_string(),
            year: "1965".to_string(),
            genre: "Sci-Fi".to_string(),
            read: true,
            ..BookForm::default()
        }
    }

    #[test]
    fn new_form_starts_at_earliest_year() {
        let form = BookForm::default();
        assert_eq!(form.year, "1800");
        assert_eq!(form.active, FormField::Title);
        assert!(!form.read);
    }

    #[test]
    fn year_accepts_only_four_digits() {
        let mut form = BookForm {
            active: FormField::Year,
            year: String::new(),
            ..BookForm::default()
        };
        assert!(!form.push_char('x'));
        for ch in "19655".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.year, "1965");
    }

    #[test]
    fn year_steps_are_clamped() {
        let mut form = BookForm {
            year: "2099".to_string(),
            ..BookForm::default()
        };
        form.step_year(5);
        assert_eq!(form.year, "2100");

        form.year = "1801".to_string();
        form.active = FormField::Year;
        form.push_char('-');
        form.push_char('-');
        assert_eq!(form.year, "1800");
    }

    #[test]
    fn space_toggles_read_checkbox() {
        let mut form = BookForm {
            active: FormField::Read,
            ..BookForm::default()
        };
        assert!(form.push_char(' '));
        assert!(form.read);
        assert!(!form.push_char('y'));
        assert!(form.read);
    }

    #[test]
    fn focus_cycles_through_every_field() {
        let mut form = BookForm::default();
        form.previous_field();
        assert_eq!(form.active, FormField::Read);
        form.next_field();
        form.next_field();
        assert_eq!(form.active, FormField::Author);
    }

    #[test]
    fn parse_inputs_keeps_text_as_typed() {
        let book = filled_form().parse_inputs().unwrap();
        assert_eq!(book, NewBook::new("  Dune ", "Frank Herbert", 1965, "Sci-Fi", true));
    }

    #[test]
    fn oversized_year_reports_friendly_message() {
        let form = BookForm {
            year: "99999999999".to_string(),
            ..filled_form()
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(surface_error(&err), "Publication year must be a whole number.");
    }

    #[test]
    fn parse_inputs_requires_year() {
        let form = BookForm {
            year: String::new(),
            ..filled_form()
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Publication year is required.");
    }

    #[test]
    fn cursor_sits_after_label_and_value() {
        let form = filled_form();
        assert_eq!(form.cursor_offset(FormField::Genre), "Genre: Sci-Fi".len() as u16);
    }

    #[test]
    fn cursor_offset_saturates_on_huge_input() {
        let form = BookForm {
            title: "x".repeat(70_000),
            ..BookForm::default()
        };
        assert_eq!(form.cursor_offset(FormField::Title), u16::MAX);
    }
}
