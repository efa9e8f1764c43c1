use crate::rows::state::UndoAvailability;
use crate::tui::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Rows
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    draw_rows(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_text = format!(
        "Rows: {} | Removals on stack: {}",
        app.row_count(),
        app.history_depth()
    );
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("rowstack"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn draw_rows(frame: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec!["ID", "Name"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .state
        .records()
        .iter()
        .map(|record| Row::new(vec![Cell::from(record.id.as_str()), Cell::from(record.name.as_str())]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(10)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Rows"))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    // Borders and the header row take three lines.
    app.navigation
        .set_visible_rows(area.height.saturating_sub(3) as usize);

    let mut table_state = TableState::default().with_offset(app.navigation.scroll_offset);
    if app.row_count() > 0 {
        table_state.select(Some(app.navigation.selected_index));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let undo_style = match app.state.undo_availability() {
        UndoAvailability::CanUndo => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        UndoAvailability::CannotUndo => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    };

    let mut spans = vec![Span::styled("[u] Undo last removal", undo_style)];
    // Status precedes the hints, which are cut off first on narrow terminals.
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!(" | {}", status), Style::default().fg(Color::Red)));
    }
    spans.push(Span::raw(" | d: remove | ↑↓/j/k: navigate | ?: help | q: quit"));

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = vec![
        "rowstack - Keyboard Commands",
        "",
        "NAVIGATION:",
        "  ↑↓ / j/k          Navigate up/down",
        "  Home/g End/G      Jump to first/last row",
        "",
        "ROWS:",
        "  d / Delete        Remove the selected row",
        "  u                 Undo the most recent removal",
        "",
        "OTHER:",
        "  Esc               Clear the status message",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    let area = centered_rect(70, 60, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
