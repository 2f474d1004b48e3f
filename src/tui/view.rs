//! Viewer rendering
//!
//! Draws the entry table with the search line and a status bar.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{format_amount, SortField};

use super::app::{Mode, ViewerState};
use super::layout::ViewerLayout;

/// Render the whole viewer
pub fn render(frame: &mut Frame, state: &ViewerState) {
    let layout = ViewerLayout::new(frame.area());

    render_header(frame, state, layout.header);
    render_table(frame, state, layout.table);
    frame.render_widget(&state.search_input, layout.search);
    render_status_bar(frame, state, layout.status_bar);
}

fn render_header(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let block = Block::default()
        .title(" Transactions ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let hints = match state.mode {
        Mode::Browse => "/:Search  d:Date  c:Category  a:Amount  r:Reset  j/k:Move  q:Quit",
        Mode::Search => "Enter:Apply  Esc:Cancel",
    };

    let paragraph = Paragraph::new(hints)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Column title with an arrow when the table is sorted by it
fn column_title(state: &ViewerState, field: SortField) -> String {
    match state.sort() {
        Some((active, descending)) if active == field => {
            format!("{} {}", field, if descending { "▼" } else { "▲" })
        }
        _ => field.to_string(),
    }
}

fn render_table(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let border_color = match state.mode {
        Mode::Browse => Color::Cyan,
        Mode::Search => Color::DarkGray,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if state.visible().is_empty() {
        let message = if state.total() == 0 {
            "No transactions recorded."
        } else {
            "No transactions match the search."
        };
        let text = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(15),    // Category
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(column_title(state, SortField::Date)).style(bold),
        Cell::from(column_title(state, SortField::Category)).style(bold),
        Cell::from(column_title(state, SortField::Amount)).style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = state
        .visible()
        .iter()
        .map(|row| {
            let amount_style = if row.entry.is_income() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            Row::new(vec![
                Cell::from(row.entry.date.clone()),
                Cell::from(row.category.clone()),
                Cell::from(format_amount(row.entry.amount)).style(amount_style),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected()));

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_status_bar(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} of {} entries", state.visible().len(), state.total()),
        Style::default().fg(Color::White),
    )];

    if !state.query().is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("filter: {}", state.query()),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let Some((field, descending)) = state.sort() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!(
                "sorted by {} {}",
                field,
                if descending { "descending" } else { "ascending" }
            ),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
