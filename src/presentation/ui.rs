use crate::application::{App, AppMode, FormStep};
use crate::domain::FieldRef;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_step_indicator(f, app, chunks[1]);

    match app.step {
        FormStep::Review => render_review(f, app, chunks[2]),
        FormStep::FinancialGoals if app.projection_visible => {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(chunks[2]);
            sync_field_viewport(app, body[0]);
            render_fields(f, app, body[0]);
            render_projection_panel(f, app, body[1]);
        }
        _ => {
            sync_field_viewport(app, chunks[2]);
            render_fields(f, app, chunks[2]);
        }
    }

    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "trustdeed - Trust Fund Setup | Step {}/4: {}",
        app.step.number(),
        app.step.title()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_step_indicator(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for step in FormStep::ALL {
        let style = if step == app.step {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else if step.number() < app.step.number() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {} {} ", step.number(), step.title()),
            style,
        ));
        if step != FormStep::Review {
            spans.push(Span::raw(" "));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn field_label(field: FieldRef) -> String {
    match field {
        FieldRef::Settlor(f) => format!("Settlor - {}", f.label()),
        FieldRef::Trustee(f) => format!("Trustee - {}", f.label()),
        FieldRef::Beneficiary(index, f) => format!("Beneficiary {} - {}", index + 1, f.label()),
        FieldRef::TrustDetails(f) => format!("Trust - {}", f.label()),
        FieldRef::Financial(f) => f.label().to_string(),
    }
}

/// Keeps the scroll state in step with the space the field table actually
/// has, which varies with terminal size and the projection panel.
fn sync_field_viewport(app: &mut App, area: Rect) {
    app.update_viewport_size(area.height.saturating_sub(2) as usize);
    app.ensure_field_visible();
}

fn render_fields(f: &mut Frame, app: &App, area: Rect) {
    let fields = app.step_fields();
    let visible_rows = area.height.saturating_sub(2).max(1) as usize;

    let mut rows = Vec::new();
    for index in app.field_scroll..std::cmp::min(app.field_scroll + visible_rows, fields.len()) {
        let field = fields[index];
        let selected = index == app.selected_field;

        let value = if selected && matches!(app.mode, AppMode::Editing) {
            app.input.clone()
        } else {
            app.record.field(field).to_string()
        };
        let value = if value.is_empty() { " ".to_string() } else { value };

        let style = if selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };

        rows.push(
            Row::new(vec![
                Cell::from(field_label(field)).style(style),
                Cell::from(value).style(style),
            ])
            .height(1),
        );
    }

    let table = Table::new(rows, [Constraint::Length(38), Constraint::Min(0)])
        .block(Block::default().borders(Borders::ALL).title(app.step.title()))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_projection_panel(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.projection_display() {
        Some(amount) => format!("Required monthly contribution: {}", amount),
        None => "Enter a goal amount and a future target date to see a projection".to_string(),
    };
    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Projection"))
        .style(Style::default().fg(Color::Green));
    f.render_widget(panel, area);
}

fn render_review(f: &mut Frame, app: &App, area: Rect) {
    let record = &app.record;
    let or_missing = |value: &str, fallback: &str| {
        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };

    let mut lines = vec![
        Line::from(Span::styled("Settlor", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  {} | {}",
            or_missing(&record.settlor.full_name, "Not provided"),
            or_missing(&record.settlor.email, "No email"),
        )),
        Line::from(Span::styled("Trustee", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  {} | {}",
            or_missing(&record.trustee.full_name, "Not provided"),
            or_missing(&record.trustee.email, "No email"),
        )),
        Line::from(Span::styled("Beneficiaries", Style::default().fg(Color::Yellow))),
    ];

    for (index, beneficiary) in record.beneficiaries.iter().enumerate() {
        let name = if beneficiary.party.full_name.is_empty() {
            format!("Beneficiary {}", index + 1)
        } else {
            beneficiary.party.full_name.clone()
        };
        lines.push(Line::from(format!(
            "  - {} ({})",
            name,
            or_missing(&beneficiary.relationship, "Relationship not specified"),
        )));
    }

    lines.push(Line::from(Span::styled(
        "Financial Goals",
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(format!(
        "  Target Amount: ${}",
        or_missing(&record.financial_planning.goal_amount, "0"),
    )));
    lines.push(Line::from(format!(
        "  Monthly Contribution: {}",
        app.projection_display().unwrap_or_else(|| "$0".to_string()),
    )));
    lines.push(Line::from(format!(
        "  {}",
        or_missing(&record.financial_planning.financial_goal, "No specific goals provided"),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to create the trust fund",
        Style::default().fg(Color::Green),
    )));

    let review = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Review Your Trust Fund Setup"))
        .wrap(Wrap { trim: false });
    f.render_widget(review, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Form => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.step {
                    FormStep::Beneficiaries => {
                        "Enter: edit | a: add beneficiary | d: remove | Tab/Shift+Tab: step | Ctrl+E: export deed | F1/?: help | q: quit".to_string()
                    }
                    FormStep::FinancialGoals => {
                        "Enter: edit | p: projection | Tab/Shift+Tab: step | Ctrl+E: export deed | F1/?: help | q: quit".to_string()
                    }
                    FormStep::Review => {
                        "Enter: create trust fund | Tab/Shift+Tab: step | Ctrl+E: export deed | F1/?: help | q: quit".to_string()
                    }
                    _ => {
                        "Enter: edit | Tab/Shift+Tab: step | Ctrl+E: export deed | F1/?: help | q: quit".to_string()
                    }
                }
            }
        }
        AppMode::Editing => {
            let label = app
                .selected_field_ref()
                .map(|field| field.label().to_string())
                .unwrap_or_default();
            format!("{}: {} (Enter to save, Esc to cancel)", label, app.input)
        }
        AppMode::Help => "Up/Down/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportDeed => format!(
            "Export deed as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Form => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportDeed => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("trustdeed Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"TRUSTDEED REFERENCE

=== THE FORM ===
The setup runs through four steps:
  1 Basic Info        Settlor, trustee, and trust details
  2 Beneficiaries     At least one beneficiary, add as many as needed
  3 Financial Goals   Goal amount, target date, and the projection
  4 Review            Summary and the final create action

Every field is free text and optional. Dates use YYYY-MM-DD, the way a
date picker would produce them.

=== NAVIGATION ===
Up/Down or k/j  Move between fields
Tab             Next step
Shift+Tab       Previous step
Enter / F2      Edit the selected field
q               Quit application

=== EDITING ===
Enter           Save the field
Esc             Cancel without saving
Left/Right      Move cursor
Home/End        Jump to start/end of input

=== BENEFICIARIES (STEP 2) ===
a               Add a beneficiary
d               Remove the beneficiary under the selection
                The first beneficiary can never be removed.

=== FINANCIAL GOALS (STEP 3) ===
p               Show the required monthly contribution

The projection is goal amount divided by the number of whole calendar
months until the target date. It recomputes whenever either input
changes and disappears when the inputs stop making sense (past date,
non-numeric amount).

=== DEED EXPORT ===
Ctrl+E          Export the trust deed (available on every step)
                The filename defaults to the trust's name, or
                "trust-deed.txt" when no name has been entered.

The deed contains the settlor, trustee, beneficiaries, and trust
details, a declarations paragraph, and a signature block. Declaration
and signature dates are stamped at export time. A malformed date of
birth fails the export with a message in the status bar; empty dates
render as "(not provided)".

=== REVIEW (STEP 4) ===
Enter           Create the trust fund (hands the application to the
                configured submission backend)

=== HELP NAVIGATION ===
Up/Down or j/k  Scroll help text one line
Page Up/Down    Scroll help text five lines
Home            Jump to top
Esc/F1/?/q      Close this help window"#
        .to_string()
}
