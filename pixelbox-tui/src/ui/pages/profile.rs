//! Profile page: account info, nickname edit and the points ledger

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;
use rust_decimal::Decimal;
use shared::{PointsRecord, UpdateProfileRequest};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::core::AppContext;
use crate::ui::widgets::{date, points};
use crate::ui::{failure, Notice, PageEvent, Route};

const HISTORY_PAGE_SIZE: u32 = 10;

#[derive(Default)]
pub struct ProfilePage {
    editing: bool,
    nickname: Input,
    history: Vec<PointsRecord>,
}

impl ProfilePage {
    pub async fn on_enter(&mut self, ctx: &AppContext) -> PageEvent {
        self.editing = false;

        // Reconcile the cached balance with server truth
        if let Err(e) = ctx.session.fetch_profile().await {
            return failure(ctx, e, "Failed to load profile");
        }
        match ctx.session.points_history(1, HISTORY_PAGE_SIZE).await {
            Ok(history) => self.history = history.records,
            Err(e) => {
                tracing::warn!("failed to load points history: {}", e);
                self.history.clear();
            }
        }
        PageEvent::None
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        if self.editing {
            return match key.code {
                KeyCode::Esc => {
                    self.editing = false;
                    PageEvent::None
                }
                KeyCode::Enter => {
                    self.editing = false;
                    let req = UpdateProfileRequest {
                        nickname: Some(self.nickname.value().trim().to_string()),
                    };
                    match ctx.session.update_profile(&req).await {
                        Ok(()) => PageEvent::Notice(Notice::success("Profile updated")),
                        Err(e) => failure(ctx, e, "Failed to update profile"),
                    }
                }
                _ => {
                    self.nickname.handle_event(&Event::Key(key));
                    PageEvent::None
                }
            };
        }

        match key.code {
            KeyCode::Char('e') => {
                let current = ctx
                    .session
                    .user()
                    .and_then(|u| u.nickname)
                    .unwrap_or_default();
                self.nickname = Input::new(current);
                self.editing = true;
                PageEvent::None
            }
            KeyCode::Char('r') => self.on_enter(ctx).await,
            KeyCode::Char('x') => {
                ctx.session.logout().await;
                PageEvent::NavigateNotice(Route::Login, Notice::info("Logged out"))
            }
            _ => PageEvent::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let [info_area, history_area] =
            Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).areas(area);

        let mut lines = Vec::new();
        if let Some(user) = ctx.session.user() {
            lines.push(Line::from(vec![
                Span::styled(user.display_name().to_string(), Style::default().bold().fg(Color::Cyan)),
                Span::styled(format!("  (level {})", user.level), Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(format!("Username: {}", user.username)));
            lines.push(Line::from(format!("Email:    {}", user.email)));
            if self.editing {
                lines.push(Line::from(vec![
                    Span::raw("Nickname: "),
                    Span::styled(format!("{}_", self.nickname.value()), Style::default().fg(Color::Cyan)),
                    Span::styled("  (Enter: save, Esc: cancel)", Style::default().fg(Color::DarkGray)),
                ]));
            } else {
                lines.push(Line::from(format!(
                    "Nickname: {}",
                    user.nickname.as_deref().unwrap_or("-")
                )));
            }
            lines.push(Line::from(vec![
                Span::raw("Balance:  "),
                Span::styled(points(user.points), Style::default().fg(Color::Yellow).bold()),
            ]));
            if let Some(created) = &user.created_at {
                lines.push(Line::from(format!("Member since: {}", date(created))));
            }
        } else {
            lines.push(Line::from("Not logged in"));
        }

        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Profile ")),
            info_area,
        );

        let rows: Vec<ListItem> = self
            .history
            .iter()
            .map(|record| {
                let positive = record.amount >= Decimal::ZERO;
                let sign_color = if positive { Color::Green } else { Color::Red };
                let amount = if positive {
                    format!("+{:.2}", record.amount)
                } else {
                    format!("{:.2}", record.amount)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{amount:>10}"), Style::default().fg(sign_color)),
                    Span::raw(format!(
                        "  {:<32}",
                        record.description.as_deref().unwrap_or("-")
                    )),
                    Span::styled(date(&record.created_at), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(rows).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Points history "),
            ),
            history_area,
        );
    }
}
