//! UI module: View components for the TUI.

pub mod form;
pub mod menu;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub const DISCLAIMER: &str = "For research use only | Not for clinical procedures";

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(DISCLAIMER, MedicalTheme::text_muted())]),
        Line::from(vec![Span::styled(
            "Results are indicative screening estimates and do not replace professional medical evaluation.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
