//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Assessment, DiagnosticDomain};
use crate::tui::styles::MedicalTheme;

/// Result screen state
#[derive(Debug, Clone)]
pub enum ResultState {
    Complete { assessment: Assessment },
    Error {
        domain: DiagnosticDomain,
        message: String,
    },
}

impl ResultState {
    #[must_use]
    pub fn domain(&self) -> DiagnosticDomain {
        match self {
            Self::Complete { assessment } => assessment.domain,
            Self::Error { domain, .. } => *domain,
        }
    }
}

pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0], state.domain());
    match state {
        ResultState::Complete { assessment } => render_assessment(f, chunks[1], assessment),
        ResultState::Error { message, .. } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect, domain: DiagnosticDomain) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(domain.title(), MedicalTheme::title()),
        Span::styled(" │ Result", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let style = MedicalTheme::outcome(assessment.outcome);
    let block = Block::default()
        .title(Span::styled(" Assessment Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Verdict
            Constraint::Min(0),    // Advisory
            Constraint::Length(1), // Timestamp
        ])
        .margin(1)
        .split(inner);

    let advisory = assessment.advisory;
    let icon = if assessment.outcome.is_positive() { "!" } else { "OK" };
    let verdict = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", advisory.headline),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Model output: {}", assessment.outcome),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(verdict, chunks[0]);

    let mut lines = vec![Line::from(Span::styled(
        format!("{}:", advisory.heading),
        MedicalTheme::subtitle(),
    ))];
    lines.extend(advisory.items.iter().map(|item| {
        Line::from(vec![
            Span::styled("  • ", MedicalTheme::focused()),
            Span::styled(*item, MedicalTheme::text()),
        ])
    }));
    let advice = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(advice, chunks[1]);

    let timestamp = Paragraph::new(Line::from(Span::styled(
        format!(
            "Assessed {}",
            assessment.assessed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        MedicalTheme::text_muted(),
    )))
    .alignment(Alignment::Right);
    f.render_widget(timestamp, chunks[2]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Assessment failed", MedicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Menu ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment", MedicalTheme::key_desc()),
        ]),
        ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Back to Form ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Menu", MedicalTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
