//! TUI確認ダイアログ
//!
//! 上書き確認のための yes/no ダイアログ。

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::io::{self, stdout};

/// 確認ダイアログを表示
///
/// `true` は明示的な承認。キャンセル(q/esc/n)は `false`。
pub fn confirm(title: &str, message: &str, confirm_label: &str) -> io::Result<bool> {
    // ターミナル設定
    terminal::enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let options = [confirm_label, "Cancel"];
    let mut state = ListState::default();
    state.select(Some(1));

    let result = loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(4),
                    Constraint::Length(2),
                ])
                .split(f.area());

            // メッセージ表示
            let prompt = Paragraph::new(message.to_string())
                .block(Block::default().title(title).borders(Borders::ALL));
            f.render_widget(prompt, chunks[0]);

            // 選択肢表示
            let items: Vec<ListItem> = options
                .iter()
                .map(|label| ListItem::new(format!("  {}", label)))
                .collect();
            let list = List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[1], &mut state);

            // ヘルプ表示
            let help = Paragraph::new("↑/↓: move  enter: select  y: confirm  n/q/esc: cancel")
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(help, chunks[2]);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('n') | KeyCode::Esc => break false,
                    KeyCode::Char('y') => break true,
                    KeyCode::Enter => break state.selected() == Some(0),
                    KeyCode::Up | KeyCode::Char('k') => {
                        let i = state.selected().unwrap_or(0);
                        state.select(Some(i.saturating_sub(1)));
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        let i = state.selected().unwrap_or(0);
                        state.select(Some((i + 1).min(options.len() - 1)));
                    }
                    _ => {}
                }
            }
        }
    };

    // ターミナルを復元
    terminal::disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(result)
}
