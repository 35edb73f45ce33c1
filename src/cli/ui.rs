use super::app::{App, Focus};
use offline_launcher::launch::sanitize_identity;
use offline_launcher::settings::MAX_MEMORY_GIB;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(2), // Title
                Constraint::Length(3), // Username
                Constraint::Length(3), // Memory
                Constraint::Length(2), // Preview
                Constraint::Min(1),    // Help
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Offline Launcher",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    f.render_widget(title, chunks[0]);

    f.render_widget(&app.username, chunks[1]);

    let memory = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.focus == Focus::Memory))
                .title(" Memory Allocation "),
        )
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(f64::from(app.memory_gib) / f64::from(MAX_MEMORY_GIB))
        .label(format!("{} GB", app.memory_gib));
    f.render_widget(memory, chunks[2]);

    let launches_as = sanitize_identity(&app.username_text());
    let preview = Paragraph::new(Line::from(vec![
        Span::raw("Launches as: "),
        if launches_as.is_empty() {
            Span::styled("(no name)", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(launches_as, Style::default().add_modifier(Modifier::BOLD))
        },
    ]));
    f.render_widget(preview, chunks[3]);

    let help = Paragraph::new(Line::from(Span::styled(
        "Tab: switch field | ←/→ PgUp/PgDn: memory | Enter: launch | Esc: quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(help, chunks[4]);
}
