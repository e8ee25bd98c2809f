//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation (menu, form, result)
//! - Input event handling
//! - Calls into the assessment service

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::AssessmentService;
use crate::domain::DiagnosticDomain;

use super::ui::{
    form::{render_assessment_form, AssessmentFormState},
    menu::{render_menu, MenuState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Form,
    Result,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,
    service: AssessmentService,
    menu_state: MenuState,
    /// Present while a form or its result is shown
    form_state: Option<AssessmentFormState>,
    result_state: Option<ResultState>,
}

impl App {
    /// Create the application around an already-loaded service.
    #[must_use]
    pub fn new(service: AssessmentService) -> Self {
        let menu_state = MenuState::from_service(&service);
        Self {
            screen: Screen::Menu,
            should_quit: false,
            service,
            menu_state,
            form_state: None,
            result_state: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if let Some(form) = self.form_state.as_mut() {
            form.clear_sensitive();
        }

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match (self.screen, &self.form_state, &self.result_state) {
                    (Screen::Form, Some(form), _) => render_assessment_form(f, content_area, form),
                    (Screen::Result, _, Some(result)) => render_result(f, content_area, result),
                    _ => render_menu(f, content_area, &self.menu_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.menu_state.prev(),
            KeyCode::Down | KeyCode::Tab => self.menu_state.next(),
            KeyCode::Char(c @ '1'..='9') => {
                if self.menu_state.select_digit(c) {
                    self.open_form(self.menu_state.selected_domain());
                }
            }
            KeyCode::Enter => self.open_form(self.menu_state.selected_domain()),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let Some(form) = self.form_state.as_mut() else {
            self.screen = Screen::Menu;
            return;
        };

        match key {
            KeyCode::Esc => {
                form.clear_sensitive();
                self.form_state = None;
                self.screen = Screen::Menu;
            }
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.cycle_choice(false),
            KeyCode::Right => form.cycle_choice(true),
            KeyCode::Char('s') | KeyCode::Char('S') => form.load_sample_data(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        let domain = self.result_state.as_ref().map(ResultState::domain);
        let failed = matches!(self.result_state, Some(ResultState::Error { .. }));

        match (key, domain) {
            (KeyCode::Char('n') | KeyCode::Char('N'), Some(domain)) if !failed => {
                self.open_form(domain);
            }
            (KeyCode::Enter, Some(domain)) if failed => self.open_form(domain),
            (KeyCode::Enter | KeyCode::Esc, _) => {
                self.result_state = None;
                self.form_state = None;
                self.screen = Screen::Menu;
            }
            _ => {}
        }
    }

    fn open_form(&mut self, domain: DiagnosticDomain) {
        if !self.menu_state.is_available(domain) {
            self.menu_state.notice = Some(domain.unavailable_message().to_string());
            return;
        }
        self.menu_state.notice = None;
        self.form_state = Some(AssessmentFormState::new(domain));
        self.result_state = None;
        self.screen = Screen::Form;
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form_state.as_mut() else {
            return;
        };

        let raw = match form.to_raw_inputs() {
            Ok(raw) => raw,
            Err(message) => {
                form.error_message = Some(message);
                return;
            }
        };

        let domain = form.domain;
        let result = self.service.assess_raw(domain, &raw);

        // Clear plaintext buffers from the UI immediately.
        form.clear_sensitive();

        self.result_state = Some(match result {
            Ok(assessment) => ResultState::Complete { assessment },
            Err(e) => ResultState::Error {
                domain,
                message: e.to_string(),
            },
        });
        self.screen = Screen::Result;
    }
}
