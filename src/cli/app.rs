use super::ui;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use offline_launcher::settings::{MAX_MEMORY_GIB, MIN_MEMORY_GIB, Preferences};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    widgets::{Block, Borders},
};
use std::io;
use tui_textarea::{CursorMove, TextArea};

/// Memory step for PageUp / PageDown.
const MEMORY_PAGE_GIB: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Username,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Launch,
    Quit,
}

/// Values the form hands back when the user presses Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub username: String,
    pub memory_gib: u32,
}

pub struct App<'a> {
    pub username: TextArea<'a>,
    pub memory_gib: u32,
    pub focus: Focus,
}

impl<'a> App<'a> {
    pub fn new(prefs: &Preferences) -> Self {
        let mut username = TextArea::new(vec![prefs.username.clone()]);
        username.set_placeholder_text("Player name");
        username.move_cursor(CursorMove::End);

        let mut app = Self {
            username,
            memory_gib: prefs.memory_gib.clamp(MIN_MEMORY_GIB, MAX_MEMORY_GIB),
            focus: Focus::Username,
        };
        app.style_username();
        app
    }

    /// Show the form until the user launches or quits.
    ///
    /// Returns `None` when the user quit without launching.
    pub fn run(mut self) -> io::Result<Option<LaunchRequest>> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<Option<LaunchRequest>> {
        loop {
            terminal.draw(|f| ui::draw(f, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.handle_key(key) {
                    FormAction::Continue => {}
                    FormAction::Launch => return Ok(Some(self.request())),
                    FormAction::Quit => return Ok(None),
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return FormAction::Quit;
            }
            KeyCode::Enter => return FormAction::Launch,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                return FormAction::Continue;
            }
            _ => {}
        }

        match self.focus {
            Focus::Username => {
                self.username.input(key);
            }
            Focus::Memory => match key.code {
                KeyCode::Left | KeyCode::Char('-') => self.adjust_memory(-1),
                KeyCode::Right | KeyCode::Char('+') => self.adjust_memory(1),
                KeyCode::PageDown => self.adjust_memory(-(MEMORY_PAGE_GIB as i64)),
                KeyCode::PageUp => self.adjust_memory(MEMORY_PAGE_GIB as i64),
                KeyCode::Home => self.memory_gib = MIN_MEMORY_GIB,
                KeyCode::End => self.memory_gib = MAX_MEMORY_GIB,
                _ => {}
            },
        }
        FormAction::Continue
    }

    /// Name as typed, before sanitization.
    pub fn username_text(&self) -> String {
        self.username.lines().join(" ")
    }

    pub fn request(&self) -> LaunchRequest {
        LaunchRequest {
            username: self.username_text(),
            memory_gib: self.memory_gib,
        }
    }

    fn adjust_memory(&mut self, delta: i64) {
        let next = (self.memory_gib as i64 + delta).clamp(MIN_MEMORY_GIB as i64, MAX_MEMORY_GIB as i64);
        self.memory_gib = next as u32;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Username => Focus::Memory,
            Focus::Memory => Focus::Username,
        };
        self.style_username();
    }

    fn style_username(&mut self) {
        let focused = self.focus == Focus::Username;
        self.username.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ui::border_style(focused))
                .title(" Username "),
        );
        self.username.set_cursor_line_style(Style::default());
        self.username.set_cursor_style(if focused {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default()
        });
    }
}
