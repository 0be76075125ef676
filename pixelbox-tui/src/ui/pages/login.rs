//! Login page

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use shared::LoginRequest;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::core::AppContext;
use crate::ui::widgets::{centered, input_line};
use crate::ui::{failure, Notice, PageEvent, Route};

#[derive(Default)]
enum Field {
    #[default]
    Username,
    Password,
}

#[derive(Default)]
pub struct LoginPage {
    username: Input,
    password: Input,
    focus: Field,
}

impl LoginPage {
    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        match key.code {
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
                PageEvent::None
            }
            KeyCode::Enter => self.submit(ctx).await,
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                PageEvent::Navigate(Route::Register)
            }
            _ => {
                let input = match self.focus {
                    Field::Username => &mut self.username,
                    Field::Password => &mut self.password,
                };
                input.handle_event(&Event::Key(key));
                PageEvent::None
            }
        }
    }

    async fn submit(&mut self, ctx: &AppContext) -> PageEvent {
        if ctx.session.state().loading {
            return PageEvent::None;
        }
        let username = self.username.value().trim().to_string();
        let password = self.password.value().to_string();
        if username.is_empty() || password.is_empty() {
            return PageEvent::Notice(Notice::error("Enter a username and password"));
        }

        match ctx.session.login(LoginRequest { username, password }).await {
            Ok(()) => {
                self.password = Input::default();
                PageEvent::NavigateNotice(Route::Store, Notice::success("Welcome back!"))
            }
            Err(e) => failure(ctx, e, "Login failed"),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let popup = centered(area, 54, 9);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" PixelBox \u{2014} Sign in ")
            .border_style(Style::default().fg(Color::Cyan));

        let status = if ctx.session.state().loading {
            Line::styled("Logging in...", Style::default().fg(Color::Yellow))
        } else {
            Line::from("")
        };

        let body = Paragraph::new(vec![
            Line::from(""),
            input_line("Username", &self.username, matches!(self.focus, Field::Username), false),
            input_line("Password", &self.password, matches!(self.focus, Field::Password), true),
            Line::from(""),
            status,
            Line::styled(
                "Enter: sign in   Tab: switch field   Ctrl+N: create account",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .block(block);
        frame.render_widget(body, popup);
    }
}
