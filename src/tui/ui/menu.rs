//! Main menu: domain selection with model availability.

use std::collections::BTreeSet;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{AssessmentService, LoadFailure};
use crate::domain::DiagnosticDomain;
use crate::tui::styles::{MedicalTheme, LOGO_SMALL};

/// Menu state, refreshed from the service when the menu is entered.
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    pub selected: usize,
    pub available: BTreeSet<DiagnosticDomain>,
    pub failures: Vec<LoadFailure>,
    /// Shown when a domain was opened while unavailable
    pub notice: Option<String>,
}

impl MenuState {
    #[must_use]
    pub fn from_service(service: &AssessmentService) -> Self {
        Self {
            selected: 0,
            available: service.available_domains(),
            failures: service.load_failures(),
            notice: None,
        }
    }

    #[must_use]
    pub fn selected_domain(&self) -> DiagnosticDomain {
        DiagnosticDomain::ALL[self.selected]
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % DiagnosticDomain::ALL.len();
        self.notice = None;
    }

    pub fn prev(&mut self) {
        if self.selected == 0 {
            self.selected = DiagnosticDomain::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
        self.notice = None;
    }

    /// Select by 1-based shortcut digit.
    pub fn select_digit(&mut self, c: char) -> bool {
        match c.to_digit(10).map(|d| d as usize) {
            Some(d) if (1..=DiagnosticDomain::ALL.len()).contains(&d) => {
                self.selected = d - 1;
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_available(&self, domain: DiagnosticDomain) -> bool {
        self.available.contains(&domain)
    }

    fn failures_for(&self, domain: DiagnosticDomain) -> impl Iterator<Item = &LoadFailure> {
        self.failures.iter().filter(move |f| f.domain == domain)
    }
}

pub fn render_menu(f: &mut Frame, area: Rect, state: &MenuState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_domain_list(f, columns[0], state);
    render_model_status(f, columns[1], state);
    render_footer(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(LOGO_SMALL, MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Clinical Decision Support", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_domain_list(f: &mut Frame, area: Rect, state: &MenuState) {
    let mut lines = vec![Line::from("")];
    for (i, domain) in DiagnosticDomain::ALL.into_iter().enumerate() {
        let available = state.is_available(domain);
        let (icon, icon_style) = if available {
            ("●", MedicalTheme::success())
        } else {
            ("○", MedicalTheme::warning())
        };
        let label_style = if i == state.selected {
            MedicalTheme::selected()
        } else if available {
            MedicalTheme::text()
        } else {
            MedicalTheme::text_muted()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", i + 1), MedicalTheme::key_hint()),
            Span::styled(format!("{icon} "), icon_style),
            Span::styled(format!(" {} ", domain.menu_label()), label_style),
        ]));
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Assessments ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );

    f.render_widget(list, area);
}

fn render_model_status(f: &mut Frame, area: Rect, state: &MenuState) {
    let domain = state.selected_domain();
    let mut lines = vec![
        Line::from(Span::styled(domain.title(), MedicalTheme::title())),
        Line::from(""),
    ];

    if state.is_available(domain) {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", MedicalTheme::success()),
            Span::styled("Scaler and model loaded", MedicalTheme::text()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {} input features", domain.feature_count()),
            MedicalTheme::text_secondary(),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("  ✗ ", MedicalTheme::danger()),
            Span::styled(domain.unavailable_message(), MedicalTheme::danger()),
        ]));
        for failure in state.failures_for(domain) {
            lines.push(Line::from(vec![
                Span::styled(format!("    {}: ", failure.component), MedicalTheme::text_secondary()),
                Span::styled(failure.to_string(), MedicalTheme::text_muted()),
            ]));
        }
    }

    let status = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Span::styled(" Model Status ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(status, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &MenuState) {
    let content = if let Some(notice) = &state.notice {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::warning()),
            Span::styled(notice.clone(), MedicalTheme::warning()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓/1-3] ", MedicalTheme::key_hint()),
            Span::styled("Select ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Open ", MedicalTheme::key_desc()),
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut state = MenuState::default();
        state.prev();
        assert_eq!(state.selected_domain(), DiagnosticDomain::Parkinsons);
        state.next();
        assert_eq!(state.selected_domain(), DiagnosticDomain::Diabetes);
    }

    #[test]
    fn test_digit_shortcuts() {
        let mut state = MenuState::default();
        assert!(state.select_digit('2'));
        assert_eq!(state.selected_domain(), DiagnosticDomain::Heart);
        assert!(!state.select_digit('4'));
        assert!(!state.select_digit('0'));
        assert_eq!(state.selected_domain(), DiagnosticDomain::Heart);
    }
}
