//! Terminal front end: a chat pane on the left, the prompt map on the right.

use std::io;
use std::time::Duration;

use crossterm::{event, execute, terminal};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::conversation::Role;
use crate::view::{INPUT_PLACEHOLDER, SUBTITLE, SessionView, TITLE};

const TICK: Duration = Duration::from_millis(50);

/// Restores the terminal even when the loop bails out with an error
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
    }
}

/// Run the interactive loop until the user quits
pub fn run(app: &mut App) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.pump();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(TICK)? {
            if let event::Event::Key(k) = event::read()? {
                app.handle_key(k);
            }
        }
        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

pub fn ui(f: &mut Frame, app: &App) {
    let view = app.view();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(f.size());

    draw_conversation(f, columns[0], app, &view);
    draw_summary(f, columns[1], &view);
}

fn draw_conversation(f: &mut Frame, area: Rect, app: &App, view: &SessionView) {
    let helper_height = if view.helper.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(helper_height),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(SUBTITLE),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progresso"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(view.progress_percent))
        .label(view.progress_label());
    f.render_widget(gauge, chunks[1]);

    draw_messages(f, chunks[2], app.scroll(), view);

    if let Some(helper) = view.helper {
        let tip = Paragraph::new(vec![
            Line::from(Span::styled(
                "Dica rápida:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(helper),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(tip, chunks[3]);
    }

    draw_composer(f, chunks[4], app.input(), view);

    let help = Paragraph::new(Line::raw(
        "Enter enviar • Alt+Enter nova linha • Ctrl+R reiniciar fluxo • Ctrl+Y copiar • PgUp/PgDn rolar • Esc sair",
    ))
    .block(Block::default().borders(Borders::ALL).title("Teclas"));
    f.render_widget(help, chunks[5]);
}

fn draw_messages(f: &mut Frame, area: Rect, scroll_back: u16, view: &SessionView) {
    let mut lines: Vec<Line> = Vec::new();
    for message in view.messages {
        let (who, color) = match message.role {
            Role::Assistant => ("Assistente", Color::Cyan),
            Role::User => ("Você", Color::Green),
        };
        lines.push(Line::from(Span::styled(
            who,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(message.content.lines().map(|l| Line::raw(l.to_string())));
        lines.push(Line::raw(""));
    }

    // Keep the newest message in view, like scrolling to the end of a log
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let wrapped: usize = lines
        .iter()
        .map(|l| l.width().div_ceil(inner_width).max(1))
        .sum();
    let bottom = wrapped.saturating_sub(inner_height);
    let offset = bottom.saturating_sub(scroll_back as usize);

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset.min(u16::MAX as usize) as u16, 0))
        .block(Block::default().borders(Borders::ALL).title("Conversa"));
    f.render_widget(transcript, area);
}

fn draw_composer(f: &mut Frame, area: Rect, input: &str, view: &SessionView) {
    let block = Block::default().borders(Borders::ALL).title("Resposta");
    if !view.can_submit() {
        let done = Paragraph::new(Line::styled(
            "Prompt concluído. Ctrl+R para criar novo prompt.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(done, area);
        return;
    }

    let text: Vec<Line> = if input.is_empty() {
        vec![Line::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        input.split('\n').map(|l| Line::raw(l.to_string())).collect()
    };
    let row_count = text.len() as u16;
    f.render_widget(Paragraph::new(text).block(block), area);

    let last_width = input
        .rsplit('\n')
        .next()
        .map(|l| Line::raw(l).width())
        .unwrap_or(0) as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    let max_y = area.y + area.height.saturating_sub(2);
    let cursor_row = if input.is_empty() { 0 } else { row_count - 1 };
    f.set_cursor(
        (area.x + 1 + last_width).min(max_x),
        (area.y + 1 + cursor_row).min(max_y),
    );
}

fn draw_summary(f: &mut Frame, area: Rect, view: &SessionView) {
    let constraints = if view.final_text.is_some() {
        [Constraint::Percentage(45), Constraint::Percentage(55)]
    } else {
        [Constraint::Percentage(100), Constraint::Length(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut lines = vec![
        Line::styled(
            "Acompanhe em tempo real os elementos já capturados.",
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
    ];
    for status in &view.statuses {
        let label_style = if status.answered {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };
        lines.push(Line::from(vec![
            Span::styled(status.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(status.label(), label_style),
        ]));
        lines.push(Line::raw(status.display.clone()));
        lines.push(Line::raw(""));
    }
    let map = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Mapa do Prompt"));
    f.render_widget(map, chunks[0]);

    if let Some(final_text) = view.final_text {
        let mut lines: Vec<Line> = final_text.lines().map(|l| Line::raw(l.to_string())).collect();
        lines.push(Line::raw(""));
        let copy_style = if view.copied {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("[Ctrl+Y] {}", view.copy_label()), copy_style),
            Span::raw("   "),
            Span::raw("[Ctrl+R] Criar novo prompt"),
        ]));
        let prompt = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Prompt Final"));
        f.render_widget(prompt, chunks[1]);
    }
}
