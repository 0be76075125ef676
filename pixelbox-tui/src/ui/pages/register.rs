//! Registration page

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use shared::RegisterRequest;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::core::AppContext;
use crate::ui::widgets::{centered, input_line};
use crate::ui::{failure, Notice, PageEvent, Route};

#[derive(Default, Clone, Copy, PartialEq)]
enum Field {
    #[default]
    Username,
    Email,
    Password,
    Confirm,
}

const ORDER: [Field; 4] = [Field::Username, Field::Email, Field::Password, Field::Confirm];

#[derive(Default)]
pub struct RegisterPage {
    username: Input,
    email: Input,
    password: Input,
    confirm: Input,
    focus: Field,
}

impl RegisterPage {
    fn shift_focus(&mut self, forward: bool) {
        let idx = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % ORDER.len()
        } else {
            (idx + ORDER.len() - 1) % ORDER.len()
        };
        self.focus = ORDER[next];
    }

    fn active_input(&mut self) -> &mut Input {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Confirm => &mut self.confirm,
        }
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        match key.code {
            KeyCode::Esc => PageEvent::Navigate(Route::Login),
            KeyCode::Tab | KeyCode::Down => {
                self.shift_focus(true);
                PageEvent::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.shift_focus(false);
                PageEvent::None
            }
            KeyCode::Enter => self.submit(ctx).await,
            _ => {
                self.active_input().handle_event(&Event::Key(key));
                PageEvent::None
            }
        }
    }

    async fn submit(&mut self, ctx: &AppContext) -> PageEvent {
        if ctx.session.state().loading {
            return PageEvent::None;
        }
        let req = RegisterRequest {
            username: self.username.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            password: self.password.value().to_string(),
            confirm_password: self.confirm.value().to_string(),
        };

        match ctx.session.register(&req).await {
            Ok(()) => PageEvent::NavigateNotice(
                Route::Login,
                Notice::success("Registration successful, please log in"),
            ),
            Err(e) => failure(ctx, e, "Registration failed"),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let popup = centered(area, 58, 11);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" PixelBox \u{2014} Create account ")
            .border_style(Style::default().fg(Color::Cyan));

        let status = if ctx.session.state().loading {
            Line::styled("Submitting...", Style::default().fg(Color::Yellow))
        } else {
            Line::from("")
        };

        let body = Paragraph::new(vec![
            Line::from(""),
            input_line("Username", &self.username, self.focus == Field::Username, false),
            input_line("Email", &self.email, self.focus == Field::Email, false),
            input_line("Password", &self.password, self.focus == Field::Password, true),
            input_line("Confirm password", &self.confirm, self.focus == Field::Confirm, true),
            Line::from(""),
            status,
            Line::styled(
                "Enter: register   Tab: next field   Esc: back to login",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .block(block);
        frame.render_widget(body, popup);
    }
}
