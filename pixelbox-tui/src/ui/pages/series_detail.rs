//! Series detail page: item breakdown and the purchase action

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;
use rust_decimal::Decimal;

use crate::core::{AppContext, StoreError};
use crate::ui::widgets::{points, rarity_span};
use crate::ui::{failure, Notice, PageEvent, Route};

pub struct SeriesDetailPage {
    quantity: u32,
}

impl Default for SeriesDetailPage {
    fn default() -> Self {
        Self { quantity: 1 }
    }
}

impl SeriesDetailPage {
    pub fn on_enter(&mut self) {
        self.quantity = 1;
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        match key.code {
            KeyCode::Esc => PageEvent::Navigate(Route::Store),
            KeyCode::Char('+') | KeyCode::Right => {
                self.quantity = (self.quantity + 1).min(9);
                PageEvent::None
            }
            KeyCode::Char('-') | KeyCode::Left => {
                self.quantity = self.quantity.saturating_sub(1).max(1);
                PageEvent::None
            }
            KeyCode::Char('b') | KeyCode::Enter => self.purchase(ctx).await,
            _ => PageEvent::None,
        }
    }

    async fn purchase(&mut self, ctx: &AppContext) -> PageEvent {
        let Some(series) = ctx.catalog.current() else {
            return PageEvent::Notice(Notice::error("Series is still loading"));
        };

        match ctx.orders.purchase(&ctx.session, &series, self.quantity).await {
            Ok(order_id) => match ctx.orders.fetch_detail(&order_id).await {
                Ok(()) => PageEvent::NavigateNotice(
                    Route::OrderDetail,
                    Notice::success("Order created \u{2014} pay it to draw"),
                ),
                Err(e) => failure(ctx, e, "Failed to load the new order"),
            },
            Err(StoreError::NotAuthenticated) => PageEvent::NavigateNotice(
                Route::Login,
                Notice::error("Please log in to purchase"),
            ),
            Err(e) => failure(ctx, e, "Purchase failed"),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let Some(series) = ctx.catalog.current() else {
            frame.render_widget(
                Paragraph::new("Series not found \u{2014} Esc to go back")
                    .block(Block::default().borders(Borders::ALL)),
                area,
            );
            return;
        };

        let [info_area, items_area] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(area);

        let total = series.price * Decimal::from(self.quantity);
        let balance = ctx.session.points();
        let mut info = vec![
            Line::from(Span::styled(series.name.clone(), Style::default().bold().fg(Color::Cyan))),
            Line::from(series.description.clone().unwrap_or_default()),
            Line::from(format!("Price: {}   Popularity: {}", points(series.price), series.popularity)),
            Line::from(vec![
                Span::raw(format!("Quantity: {}  (+/-)   Total: ", self.quantity)),
                Span::styled(points(total), Style::default().fg(Color::Yellow).bold()),
            ]),
        ];
        if let Some(balance) = balance {
            if balance < total {
                info.push(Line::styled(
                    format!("\u{26a0} Not enough points: balance {}", points(balance)),
                    Style::default().fg(Color::Red),
                ));
            } else {
                info.push(Line::from(format!("Balance: {}", points(balance))));
            }
        } else {
            info.push(Line::styled("Log in to purchase", Style::default().fg(Color::Red)));
        }

        frame.render_widget(
            Paragraph::new(info).block(Block::default().borders(Borders::ALL).title(" Series ")),
            info_area,
        );

        let items: Vec<ListItem> = series
            .items
            .iter()
            .map(|item| {
                let rate = item
                    .drop_rate
                    .map(|r| format!("{r:.2}%"))
                    .unwrap_or_else(|| "?".to_string());
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<28}", item.name)),
                    rarity_span(item.rarity),
                    Span::raw(format!("   drop {rate}")),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Items ({}) ", series.items.len())),
            ),
            items_area,
        );
    }
}
