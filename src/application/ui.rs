use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ConnectionStatus;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Message;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

fn connection_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => return "online",
        ConnectionStatus::Disconnected => return "offline",
    }
}

fn render_pane<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &mut AppState<'_>,
    rect: Rect,
    human: bool,
) {
    let title = if human {
        Author::Human.to_string()
    } else {
        format!(
            "{} ({})",
            Author::Generated.to_string(),
            connection_label(app_state.connection)
        )
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let (pane, scroll) = if human {
        (&app_state.human_pane, &mut app_state.human_scroll)
    } else {
        (&app_state.generated_pane, &mut app_state.generated_scroll)
    };

    pane.render(frame, inner, scroll.position);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scroll.scrollbar_state,
    );
}

fn render_status_line<B: Backend>(frame: &mut Frame<B>, app_state: &AppState<'_>, rect: Rect) {
    if let Some(error) = &app_state.last_error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            rect,
        );
        return;
    }

    frame.render_widget(
        Paragraph::new(format!("status: {}", connection_label(app_state.connection)))
            .style(Style::default().fg(Color::DarkGray)),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Max(4),
                    Constraint::Max(1),
                ])
                .split(frame.size());

            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(layout[0]);

            // Both panes share the same inner dimensions.
            if panes[0].width != app_state.last_known_width
                || panes[0].height != app_state.last_known_height
            {
                app_state.set_rect(panes[0]);
            }

            render_pane(frame, app_state, panes[0], true);
            render_pane(frame, app_state, panes[1], false);

            if app_state.waiting_for_channel {
                loading.render(frame, layout[1]);
            } else {
                frame.render_widget(textarea.widget(), layout[1]);
            }

            render_status_line(frame, app_state, layout[2]);
        })?;

        match events.next().await? {
            Event::ChannelFragment(payload) => {
                app_state.handle_stream_payload(payload);
            }
            Event::ChannelError(error) => {
                app_state.handle_channel_error(error);
            }
            Event::ConnectionChanged(status) => {
                app_state.connection = status;
            }
            Event::KeyboardCTRLC() => {
                if app_state.waiting_for_channel {
                    tx.send(Action::ChannelAbort())?;
                    app_state.waiting_for_channel = false;
                } else {
                    break;
                }
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_channel {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();
                app_state.add_message(Message::new(Author::Human, &input_str))?;
                app_state.waiting_for_channel = true;
                app_state.last_error = None;
                tx.send(Action::ChannelRequest(app_state.chat_request()))?;
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_channel {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_channel {
                    textarea.insert_str(&text);
                }
            }
            Event::UIScrollUp() => {
                app_state.human_scroll.up();
                app_state.generated_scroll.up();
            }
            Event::UIScrollDown() => {
                app_state.human_scroll.down();
                app_state.generated_scroll.down();
            }
            Event::UIScrollPageUp() => {
                app_state.human_scroll.up_page();
                app_state.generated_scroll.up_page();
            }
            Event::UIScrollPageDown() => {
                app_state.human_scroll.down_page();
                app_state.generated_scroll.down_page();
            }
            Event::UITick() => {}
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::new();
    let mut events = EventsService::new(event_rx);

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
