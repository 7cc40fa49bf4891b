//! Stateless rendering of the puzzle screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::view::{BoardView, CELL_HEIGHT, CELL_WIDTH, Dialog};

/// Draws the whole screen and records click targets in the view.
pub fn draw(frame: &mut Frame, view: &mut BoardView, clock: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title and byline
            Constraint::Min(8),    // Grid and clues
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], view);

    let grid_width = view.width().saturating_mul(CELL_WIDTH as usize) as u16 + 2;
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(grid_width), Constraint::Min(20)])
        .split(chunks[1]);

    draw_grid(frame, main[0], view, clock);
    draw_clues(frame, main[1], view);
    draw_status(frame, chunks[2], view);

    let help = Paragraph::new(
        "Type to fill | Enter/Tab: Next clue | Shift+Tab: Previous | Esc: Pause | Ctrl+Q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);

    if let Some(dialog) = view.dialog() {
        draw_dialog(frame, dialog);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &BoardView) {
    let lines = vec![
        Line::from(Span::styled(
            view.title().as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.byline().as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_grid(frame: &mut Frame, area: Rect, view: &mut BoardView, clock: &str) {
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", clock));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    view.record_grid(inner);

    let width = *view.width();
    for (index, cell) in view.cells().iter().enumerate() {
        let col = (index % width) as u16;
        let row = (index / width) as u16;
        let x = inner.x + col * CELL_WIDTH;
        let y = inner.y + row * CELL_HEIGHT;
        if x + CELL_WIDTH > inner.x + inner.width || y + CELL_HEIGHT > inner.y + inner.height {
            continue;
        }
        let rect = Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT);

        if *cell.block() {
            let fill = Paragraph::new(vec![Line::from("████"), Line::from("████")])
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(fill, rect);
            continue;
        }

        let style = if index == *view.focus_cell() {
            Style::default().bg(Color::Yellow).fg(Color::Black)
        } else if view.in_active_clue(index) {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().bg(Color::White).fg(Color::Black)
        };

        // Paused grids show no letters.
        let guess = if *view.paused() {
            ' '
        } else {
            cell.guess().unwrap_or(' ')
        };
        let label = cell.label().as_deref().unwrap_or("");
        let lines = vec![
            Line::from(Span::styled(
                format!("{:<4}", label),
                style.add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(
                format!(" {}  ", guess),
                style.add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), rect);
    }
}

fn draw_clues(frame: &mut Frame, area: Rect, view: &mut BoardView) {
    view.clear_clue_hits();
    let groups = view.groups().clone();
    if groups.is_empty() {
        return;
    }

    let constraints: Vec<_> = groups
        .iter()
        .map(|_| Constraint::Ratio(1, groups.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (group, column) in groups.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(group.name().as_str());
        let inner = block.inner(*column);
        frame.render_widget(block, *column);

        let visible = usize::from(inner.height);
        if visible == 0 {
            continue;
        }
        // Keep the active clue on screen.
        let offset = group
            .clues()
            .iter()
            .position(|id| id == view.active_clue())
            .map(|pos| pos.saturating_sub(visible - 1))
            .unwrap_or(0);

        for (line, id) in group.clues().iter().skip(offset).take(visible).enumerate() {
            let Some(clue) = view.clues().get(*id) else {
                continue;
            };
            let style = if id == view.active_clue() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if *clue.complete() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            let rect = Rect::new(inner.x, inner.y + line as u16, inner.width, 1);
            let text = Paragraph::new(Line::from(vec![
                Span::styled(format!("{:>3} ", clue.label()), style.add_modifier(Modifier::BOLD)),
                Span::styled(clue.text().as_str(), style),
            ]));
            frame.render_widget(text, rect);
            view.record_clue(rect, *id);
        }
    }
}

fn draw_status(frame: &mut Frame, area: Rect, view: &BoardView) {
    let clue = view
        .active()
        .map(|clue| format!("{} {}: {}", clue.label(), clue.direction(), clue.text()))
        .unwrap_or_default();
    let text = if view.status().is_empty() {
        clue
    } else {
        format!("{}  |  {}", clue, view.status())
    };
    let status = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn draw_dialog(frame: &mut Frame, dialog: &Dialog) {
    let (title, body) = match dialog {
        Dialog::Start => (
            "Ready?",
            "Press any key to start the timer.".to_string(),
        ),
        Dialog::Paused => (
            "Paused",
            "Your game is paused.\nPress Esc to resume.".to_string(),
        ),
        Dialog::Incorrect => (
            "Almost there",
            "The grid is full, but something is wrong.\nPress Enter to keep trying.".to_string(),
        ),
        Dialog::Solved { time, share } => {
            let mut body = format!("You solved it in {}!", time);
            if let Some(share) = share {
                body.push_str(&format!("\n\n{}\n\nCtrl+S: Share", share));
            }
            body.push_str("\nEnter: Close | Ctrl+Q: Quit");
            ("Congratulations", body)
        }
        Dialog::Error(message) => ("Error", format!("{}\n\nPress Enter to continue.", message)),
    };

    let area = center_rect(frame.area(), 54, 10);
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
