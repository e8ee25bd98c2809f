//! Assessment input form, generated from the domain's field table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{form_fields, DiagnosticDomain, FieldKind, FieldSpec, RawInputs};
use crate::tui::styles::MedicalTheme;

/// One input widget.
#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: FieldSpec,
    /// Typed text for numeric fields
    pub value: String,
    /// Selected index for choice fields
    pub choice: usize,
}

impl FormField {
    fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: spec.initial_text().unwrap_or_default(),
            choice: 0,
        }
    }

    fn reset(&mut self) {
        self.value.zeroize();
        if let Some(text) = self.spec.initial_text() {
            self.value.push_str(&text);
        }
        self.choice = 0;
    }

    fn choice_labels(&self) -> Option<&'static [&'static str]> {
        match self.spec.kind {
            FieldKind::Choice { labels } => Some(labels),
            FieldKind::Number { .. } => None,
        }
    }

    fn display_value(&self) -> Option<String> {
        match self.choice_labels() {
            Some(labels) => labels.get(self.choice).map(|l| format!("◀ {l} ▶")),
            None if self.value.is_empty() => None,
            None => Some(self.value.clone()),
        }
    }
}

const DIABETES_SAMPLE: &[&str] = &["2", "130", "70", "20", "80", "28.5", "0.5", "45"];

const HEART_SAMPLE: &[&str] = &[
    "63",
    "Male",
    "Typical Angina",
    "145",
    "233",
    "Yes",
    "Normal",
    "150",
    "No",
    "2.3",
    "Upsloping",
    "0",
    "Fixed Defect",
];

const PARKINSONS_SAMPLE: &[&str] = &[
    "119.992", "157.302", "74.997", "0.00784", "0.00007", "0.0037", "0.00554", "0.01109",
    "0.04374", "0.426", "0.02182", "0.0313", "0.02971", "0.06545", "0.02211", "21.033",
    "0.414783", "0.815285", "-4.813031", "0.266482", "2.301442", "0.284654",
];

/// Form state for one domain.
pub struct AssessmentFormState {
    pub domain: DiagnosticDomain,
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl AssessmentFormState {
    #[must_use]
    pub fn new(domain: DiagnosticDomain) -> Self {
        Self {
            domain,
            fields: form_fields(domain).iter().copied().map(FormField::new).collect(),
            selected_field: 0,
            error_message: None,
        }
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field.
    ///
    /// Accepts digits, one leading `-` and one `.` when the field allows
    /// decimals.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        let FieldKind::Number { decimals, .. } = field.spec.kind else {
            return;
        };

        let accepted = match c {
            '0'..='9' => true,
            '.' => decimals > 0 && !field.value.contains('.'),
            '-' => field.value.is_empty(),
            _ => false,
        };
        if accepted {
            field.value.push(c);
            self.error_message = None;
        }
    }

    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.selected_field];
        field.value.zeroize();
        field.choice = 0;
    }

    /// Cycle the current choice field.
    pub fn cycle_choice(&mut self, forward: bool) {
        let field = &mut self.fields[self.selected_field];
        let Some(labels) = field.choice_labels() else {
            return;
        };
        let n = labels.len();
        field.choice = if forward {
            (field.choice + 1) % n
        } else {
            (field.choice + n - 1) % n
        };
        self.error_message = None;
    }

    /// Wipe all field buffers from memory and restore the starting values.
    pub fn clear_sensitive(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Check widget bounds and build the raw inputs for the encoder.
    ///
    /// # Errors
    /// Returns a user-facing message for the first invalid field.
    pub fn to_raw_inputs(&self) -> Result<RawInputs, String> {
        let mut raw = RawInputs::new();

        for field in &self.fields {
            match field.spec.kind {
                FieldKind::Choice { labels } => {
                    let label = labels
                        .get(field.choice)
                        .ok_or_else(|| format!("{}: Invalid selection", field.spec.label))?;
                    raw = raw.with_label(field.spec.key, *label);
                }
                FieldKind::Number { .. } => {
                    let value: f64 = field
                        .value
                        .trim()
                        .parse()
                        .map_err(|_| format!("{}: Invalid number", field.spec.label))?;
                    field.spec.check_bounds(value)?;
                    raw = raw.with_number(field.spec.key, value);
                }
            }
        }

        Ok(raw)
    }

    /// Fill the form with a representative record.
    pub fn load_sample_data(&mut self) {
        let sample = match self.domain {
            DiagnosticDomain::Diabetes => DIABETES_SAMPLE,
            DiagnosticDomain::Heart => HEART_SAMPLE,
            DiagnosticDomain::Parkinsons => PARKINSONS_SAMPLE,
        };

        for (field, value) in self.fields.iter_mut().zip(sample) {
            match field.choice_labels() {
                Some(labels) => {
                    field.choice = labels.iter().position(|l| l == value).unwrap_or(0);
                }
                None => {
                    field.value.zeroize();
                    field.value.push_str(value);
                }
            }
        }
        self.error_message = None;
    }
}

/// Render the assessment input form
pub fn render_assessment_form(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], state.domain);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, domain: DiagnosticDomain) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(domain.title(), MedicalTheme::title()),
        Span::styled(
            format!(" │ {} features", domain.feature_count()),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    // Voice measurements need a third column to fit on one screen.
    let column_count = if state.fields.len() > 14 { 3 } else { 2 };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, column_count); column_count as usize])
        .margin(1)
        .split(area);

    let per_column = state.fields.len().div_ceil(column_count as usize);
    for (i, chunk) in state.fields.chunks(per_column).enumerate() {
        render_field_column(f, columns[i], chunk, i * per_column, state.selected_field);
    }
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };
        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.spec.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = match field.display_value() {
            Some(v) => Span::styled(v, MedicalTheme::text()),
            None => Span::styled(field.spec.hint(), MedicalTheme::text_muted()),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Choose ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled(format!("{} ", state.domain.action_label()), MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
