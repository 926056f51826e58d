use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::library::Library;
use crate::models::SearchField;

use super::forms::{BookForm, FormField};
use super::helpers::{book_line, centered_rect, surface_error};
use super::screens::{ListScreen, RemoveScreen, SearchScreen, Section};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the sidebar menu.
const MENU_WIDTH: u16 = 24;
/// Rows moved by PageUp/PageDown in scrollable views.
const PAGE: isize = 5;
const EMPTY_LIBRARY: &str = "Your library is empty.";

/// Which pane receives key presses.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Menu,
    Content,
}

/// Modal overlays drawn on top of the current section.
enum Mode {
    Normal,
    ConfirmRemove(ConfirmRemove),
}

/// Pending removal of every book sharing `title`.
struct ConfirmRemove {
    title: String,
    count: usize,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Session state. The library lives exactly as long as the `App`.
pub struct App {
    library: Library,
    section: Section,
    focus: Focus,
    form: BookForm,
    remove: RemoveScreen,
    search: SearchScreen,
    list: ListScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            section: Section::default(),
            focus: Focus::Menu,
            form: BookForm::default(),
            remove: RemoveScreen::default(),
            search: SearchScreen::default(),
            list: ListScreen::default(),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Read-only view of the session's books.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Process one key press. Returns `true` once the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match self.focus {
                Focus::Menu => self.handle_menu_key(code, &mut exit),
                Focus::Content => self.handle_content_key(code),
            },
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm),
        };

        Ok(exit)
    }

    fn handle_menu_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.select_section(self.section.offset(-1)),
            KeyCode::Down => self.select_section(self.section.offset(1)),
            KeyCode::Home => self.select_section(Section::AddBook),
            KeyCode::End => self.select_section(Section::Statistics),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right => self.enter_content(),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_content_key(&mut self, code: KeyCode) -> Mode {
        if code == KeyCode::Esc {
            self.focus = Focus::Menu;
            return Mode::Normal;
        }

        match self.section {
            Section::AddBook => self.handle_add_key(code),
            Section::RemoveBook => return self.handle_remove_key(code),
            Section::SearchBooks => self.handle_search_key(code),
            Section::AllBooks => self.handle_list_key(code),
            Section::Statistics => self.focus = Focus::Menu,
        }
        Mode::Normal
    }

    fn handle_add_key(&mut self, code: KeyCode) {
        let on_year = self.form.active == FormField::Year;
        match code {
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.previous_field(),
            KeyCode::Up if on_year => self.form.step_year(1),
            KeyCode::Down if on_year => self.form.step_year(-1),
            KeyCode::Up => self.form.previous_field(),
            KeyCode::Down => self.form.next_field(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => self.submit_book(),
            KeyCode::Char(ch) => {
                if self.form.push_char(ch) {
                    self.form.error = None;
                }
            }
            _ => {}
        }
    }

    fn handle_remove_key(&mut self, code: KeyCode) -> Mode {
        let (len, selected_title) = {
            let titles = self.library.titles();
            let selected = titles.get(self.remove.selected).map(|title| title.to_string());
            (titles.len(), selected)
        };

        match code {
            KeyCode::Up => self.remove.move_selection(-1, len),
            KeyCode::Down => self.remove.move_selection(1, len),
            KeyCode::PageUp => self.remove.move_selection(-PAGE, len),
            KeyCode::PageDown => self.remove.move_selection(PAGE, len),
            KeyCode::Home => self.remove.select_first(),
            KeyCode::End => self.remove.select_last(len),
            KeyCode::Enter | KeyCode::Delete | KeyCode::Char('-') => {
                if let Some(title) = selected_title {
                    let count = self.library.count_titled(&title);
                    self.clear_status();
                    return Mode::ConfirmRemove(ConfirmRemove { title, count });
                }
                self.set_status("No book selected to remove.", StatusKind::Error);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.search.toggle_field();
            }
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Char(ch) => {
                self.search.push_char(ch);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        let rows = self.library.len();
        match code {
            KeyCode::Up => self.list.scroll_by(-1, rows),
            KeyCode::Down => self.list.scroll_by(1, rows),
            KeyCode::PageUp => self.list.scroll_by(-(PAGE as i32), rows),
            KeyCode::PageDown => self.list.scroll_by(PAGE as i32, rows),
            KeyCode::Home => self.list.reset(),
            KeyCode::End => self.list.scroll_by(i32::MAX, rows),
            _ => {}
        }
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.library.remove_by_title(&confirm.title);
                self.remove.ensure_in_bounds(self.library.titles().len());
                if self.library.is_empty() {
                    self.focus = Focus::Menu;
                }
                self.set_status("Book removed successfully!", StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmRemove(confirm),
        }
    }

    fn select_section(&mut self, section: Section) {
        if section != self.section {
            debug!(section = section.label(), "switched section");
            self.section = section;
            self.clear_status();
        }
    }

    /// Move focus into the current section if it has anything to interact
    /// with.
    fn enter_content(&mut self) {
        match self.section {
            Section::RemoveBook | Section::AllBooks if self.library.is_empty() => {
                self.set_status(EMPTY_LIBRARY, StatusKind::Warning);
            }
            Section::Statistics => {}
            Section::RemoveBook => {
                self.remove.ensure_in_bounds(self.library.titles().len());
                self.focus = Focus::Content;
            }
            _ => self.focus = Focus::Content,
        }
    }

    fn submit_book(&mut self) {
        let result = self.form.parse_inputs().and_then(|book| {
            self.library.add(book)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                self.form = BookForm::default();
                self.set_status("Book added successfully!", StatusKind::Info);
            }
            Err(err) => {
                let message = surface_error(&err);
                self.form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (main_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(main_area);

        self.draw_menu(frame, columns[0]);

        let block = Block::default()
            .title(self.section.heading())
            .borders(Borders::ALL)
            .border_style(self.pane_style(Focus::Content));
        let content_area = block.inner(columns[1]);
        frame.render_widget(block, columns[1]);

        match self.section {
            Section::AddBook => self.draw_add_form(frame, content_area),
            Section::RemoveBook => self.draw_remove(frame, content_area),
            Section::SearchBooks => self.draw_search(frame, content_area),
            Section::AllBooks => self.draw_all_books(frame, content_area),
            Section::Statistics => self.draw_statistics(frame, content_area),
        }

        if area.height > footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::ConfirmRemove(confirm) = &self.mode {
            self.draw_confirm_remove(frame, area, confirm);
        }
    }

    fn pane_style(&self, pane: Focus) -> Style {
        if self.focus == pane {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Section::ALL
            .iter()
            .map(|section| ListItem::new(section.label()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Personal Library")
                    .borders(Borders::ALL)
                    .border_style(self.pane_style(Focus::Menu)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.section.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_add_form(&self, frame: &mut Frame, area: Rect) {
        let form = &self.form;
        let fields = [
            FormField::Title,
            FormField::Author,
            FormField::Year,
            FormField::Genre,
            FormField::Read,
        ];
        let mut lines: Vec<Line> = fields.iter().map(|field| form.build_line(*field)).collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to add • Tab to switch • Space toggles read • Esc for menu",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);

        if self.focus == Focus::Content && form.active.is_text() && self.mode_is_normal() {
            let cursor_x = area.x.saturating_add(form.cursor_offset(form.active));
            let cursor_y = area.y + form.active.row();
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_remove(&self, frame: &mut Frame, area: Rect) {
        if self.library.is_empty() {
            frame.render_widget(warning(EMPTY_LIBRARY), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        frame.render_widget(Paragraph::new("Select a book to remove"), chunks[0]);

        let items: Vec<ListItem> = self
            .library
            .titles()
            .into_iter()
            .map(|title| ListItem::new(title.to_string()))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if self.focus == Focus::Content {
            state.select(Some(self.remove.selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let field = self.search.field;
        let radio = |label: &'static str, on: bool| {
            let mark = if on { "(•) " } else { "( ) " };
            Span::raw(format!("{mark}{label}   "))
        };
        let prompt = self.search.prompt();

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Search by: "),
                radio("Title", field == SearchField::Title),
                radio("Author", field == SearchField::Author),
            ]),
            Line::from(vec![
                Span::raw(prompt.clone()),
                Span::styled(self.search.term.clone(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
        ];

        match self.library.search(field, &self.search.term) {
            None => {}
            Some(results) if results.is_empty() => {
                lines.push(Line::from(Span::styled(
                    "No matching books found.",
                    StatusKind::Warning.style(),
                )));
            }
            Some(results) => {
                lines.push(Line::from("Matching Books:"));
                lines.extend(
                    results
                        .into_iter()
                        .map(|book| book_line("- ".to_string(), book)),
                );
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);

        if self.focus == Focus::Content {
            let typed = prompt.chars().count() + self.search.term.chars().count();
            let cursor_x = area.x.saturating_add(u16::try_from(typed).unwrap_or(u16::MAX));
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }

    fn draw_all_books(&self, frame: &mut Frame, area: Rect) {
        if self.library.is_empty() {
            frame.render_widget(warning(EMPTY_LIBRARY), area);
            return;
        }

        let lines: Vec<Line> = self
            .library
            .list()
            .map(|(position, book)| book_line(format!("{position}. "), book))
            .collect();
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.list.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect) {
        let stats = self.library.statistics();
        let lines = vec![
            Line::from(format!("Total books: {}", stats.total)),
            Line::from(format!("Percentage read: {:.1}%", stats.percent_read)),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.mode, self.focus, self.section) {
            (Mode::ConfirmRemove(_), _, _) => &[("[y]", " Remove   "), ("[n]", " Cancel")],
            (_, Focus::Menu, _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Open   "),
                ("[q]", " Quit"),
            ],
            (_, Focus::Content, Section::AddBook) => &[
                ("[Tab]", " Next field   "),
                ("[↑↓]", " Year   "),
                ("[Enter]", " Add   "),
                ("[Esc]", " Menu"),
            ],
            (_, Focus::Content, Section::RemoveBook) => &[
                ("[↑↓]", " Select   "),
                ("[Enter]", " Remove   "),
                ("[Esc]", " Menu"),
            ],
            (_, Focus::Content, Section::SearchBooks) => &[
                ("[Tab]", " Title/Author   "),
                ("[Esc]", " Menu"),
            ],
            (_, Focus::Content, _) => &[("[↑↓]", " Scroll   "), ("[Esc]", " Menu")],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, text)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(text.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(format!("Remove \"{}\"?", confirm.title))];
        if confirm.count > 1 {
            lines.push(Line::from(format!(
                "{} books share this title; all of them will be removed.",
                confirm.count
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn mode_is_normal(&self) -> bool {
        matches!(self.mode, Mode::Normal)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

fn warning(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(text, StatusKind::Warning.style()))
}
