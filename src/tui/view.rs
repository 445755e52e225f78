use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::{Display, Field, FormState};

const HELP: &str = " Enter generate • Ctrl-K get keywords • Ctrl-L clear • Tab switch field • Esc quit ";

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default().borders(Borders::ALL).border_style(border).title(title)
}

pub fn draw(frame: &mut Frame, state: &FormState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(Span::styled(
        " Content Generator ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, layout[0]);

    let primary = Paragraph::new(state.primary.as_str())
        .block(field_block(" Primary keyword ", state.focus == Field::Primary));
    frame.render_widget(primary, layout[1]);

    let secondary = Paragraph::new(state.secondary.as_str())
        .block(field_block(" Secondary keyword ", state.focus == Field::Secondary));
    frame.render_widget(secondary, layout[2]);

    let (body, style) = match &state.display {
        Display::Empty => (String::new(), Style::default()),
        Display::Text(text) => (text.clone(), Style::default().fg(Color::White)),
        Display::Error(msg) => (msg.clone(), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };
    let output = Paragraph::new(body)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Generated Text "));
    frame.render_widget(output, layout[3]);

    let status = if state.busy {
        Span::styled(format!(" Working… {}", state.status), Style::default().fg(Color::Yellow))
    } else if state.status.is_empty() {
        Span::styled(" Idle", Style::default().fg(Color::Green))
    } else {
        Span::styled(format!(" {}", state.status), Style::default().fg(Color::Gray))
    };
    let status_bar = Paragraph::new(Line::from(status))
        .block(Block::default().borders(Borders::ALL).title(HELP));
    frame.render_widget(status_bar, layout[4]);

    let focused = match state.focus {
        Field::Primary => (layout[1], &state.primary),
        Field::Secondary => (layout[2], &state.secondary),
    };
    frame.set_cursor_position(caret(focused.0, focused.1));
}

fn caret(area: Rect, input: &str) -> Position {
    let width = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let last_col = area.right().saturating_sub(2).max(area.x);
    Position {
        x: area.x.saturating_add(1).saturating_add(width).min(last_col),
        y: area.y.saturating_add(1),
    }
}
