//! Order detail page: pay, draw, cancel and the staged draw reveal
//!
//! The reveal delay is purely presentational pacing; the draw result is
//! already final when the server responds.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use shared::Item;

use crate::core::AppContext;
use crate::ui::widgets::{confirm_dialog, date, points, rarity_span, status_span};
use crate::ui::{failure, Notice, PageEvent, Route};

const REVEAL_DELAY: Duration = Duration::from_secs(1);

struct Reveal {
    started: Instant,
    items: Vec<Item>,
}

#[derive(Default)]
pub struct OrderDetailPage {
    reveal: Option<Reveal>,
    confirming_cancel: bool,
}

impl OrderDetailPage {
    pub fn on_enter(&mut self, ctx: &AppContext) -> PageEvent {
        self.reveal = None;
        self.confirming_cancel = false;
        if ctx.orders.current().is_none() {
            return PageEvent::NavigateNotice(Route::Orders, Notice::error("Order not found"));
        }
        PageEvent::None
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        if self.confirming_cancel {
            return match key.code {
                KeyCode::Char('y') => {
                    self.confirming_cancel = false;
                    self.cancel(ctx).await
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirming_cancel = false;
                    PageEvent::None
                }
                _ => PageEvent::None,
            };
        }

        match key.code {
            KeyCode::Esc => PageEvent::Navigate(Route::Orders),
            KeyCode::Char('p') => self.pay(ctx).await,
            KeyCode::Char('d') => self.draw(ctx).await,
            KeyCode::Char('c') => {
                match ctx.orders.current() {
                    Some(order) if order.status.can_cancel() => {
                        self.confirming_cancel = true;
                        PageEvent::None
                    }
                    _ => PageEvent::None,
                }
            }
            KeyCode::Char('r') => {
                let Some(order) = ctx.orders.current() else {
                    return PageEvent::None;
                };
                match ctx.orders.fetch_detail(&order.id).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to refresh order"),
                }
            }
            _ => PageEvent::None,
        }
    }

    async fn pay(&mut self, ctx: &AppContext) -> PageEvent {
        let Some(order) = ctx.orders.current() else {
            return PageEvent::None;
        };
        match ctx.orders.pay(&ctx.session, &order.id).await {
            Ok(()) => PageEvent::Notice(Notice::success("Payment successful!")),
            Err(e) => failure(ctx, e, "Payment failed"),
        }
    }

    async fn draw(&mut self, ctx: &AppContext) -> PageEvent {
        let Some(order) = ctx.orders.current() else {
            return PageEvent::None;
        };
        match ctx.orders.draw(&order.id).await {
            Ok(items) => {
                self.reveal = Some(Reveal {
                    started: Instant::now(),
                    items,
                });
                // Downstream refresh: the draw created inventory entries
                let filter = ctx.inventory.state().filter;
                if let Err(e) = ctx.inventory.fetch_inventory(filter).await {
                    tracing::warn!("failed to refresh inventory after draw: {}", e);
                }
                PageEvent::None
            }
            Err(e) => failure(ctx, e, "Draw failed"),
        }
    }

    async fn cancel(&mut self, ctx: &AppContext) -> PageEvent {
        let Some(order) = ctx.orders.current() else {
            return PageEvent::None;
        };
        match ctx.orders.cancel(&order.id).await {
            Ok(()) => PageEvent::Notice(Notice::success("Order cancelled")),
            Err(e) => failure(ctx, e, "Cancellation failed"),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let Some(order) = ctx.orders.current() else {
            frame.render_widget(
                Paragraph::new("Order not found \u{2014} Esc to go back")
                    .block(Block::default().borders(Borders::ALL)),
                area,
            );
            return;
        };

        let [info_area, result_area] =
            Layout::vertical([Constraint::Length(11), Constraint::Min(0)]).areas(area);

        let series = order
            .series
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| order.series_id.clone());
        let balance = ctx.session.points();

        let mut lines = vec![
            Line::from(vec![
                Span::styled(order.order_number.clone(), Style::default().bold()),
                Span::raw("   "),
                status_span(order.status),
            ]),
            Line::from(format!("Series: {series}")),
            Line::from(format!(
                "Quantity: {}   Unit: {}   Total: {}",
                order.quantity,
                points(order.unit_price),
                points(order.total_amount)
            )),
            Line::from(format!("Payment: {}", order.payment_method.label())),
            Line::from(format!("Created: {}", date(&order.created_at))),
        ];
        if let Some(paid_at) = &order.paid_at {
            lines.push(Line::from(format!("Paid:    {}", date(paid_at))));
        }
        if let Some(completed_at) = &order.completed_at {
            lines.push(Line::from(format!("Done:    {}", date(completed_at))));
        }

        let mut actions: Vec<&str> = Vec::new();
        if order.status.can_pay() {
            actions.push("[p] pay");
        }
        if order.status.can_draw() {
            actions.push("[d] draw");
        }
        if order.status.can_cancel() {
            actions.push("[c] cancel");
        }
        actions.push("[r] refresh");
        lines.push(Line::styled(actions.join("   "), Style::default().fg(Color::Cyan)));

        if order.status.can_pay() {
            if let Some(balance) = balance {
                if balance < order.total_amount {
                    lines.push(Line::styled(
                        format!(
                            "\u{26a0} Not enough points: balance {}, needed {}",
                            points(balance),
                            points(order.total_amount)
                        ),
                        Style::default().fg(Color::Red),
                    ));
                }
            }
        }

        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Order ")),
            info_area,
        );

        self.render_results(frame, result_area, &order.result_items);

        if self.confirming_cancel {
            confirm_dialog(frame, area, "Cancel order", "Really cancel this order?");
        }
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, completed_items: &[Item]) {
        let block = Block::default().borders(Borders::ALL).title(" Draw result ");

        if let Some(reveal) = &self.reveal {
            if reveal.started.elapsed() < REVEAL_DELAY {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(""),
                        Line::styled("\u{1f4e6} Opening the box...", Style::default().fg(Color::Yellow).bold()),
                    ])
                    .centered()
                    .block(block),
                    area,
                );
                return;
            }
            let mut lines = vec![Line::styled(
                "\u{1f389} Congratulations!",
                Style::default().fg(Color::Green).bold(),
            )];
            lines.extend(item_lines(&reveal.items));
            frame.render_widget(Paragraph::new(lines).block(block), area);
            return;
        }

        if completed_items.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "No draw result yet",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(block),
                area,
            );
        } else {
            frame.render_widget(
                Paragraph::new(item_lines(completed_items)).block(block),
                area,
            );
        }
    }
}

fn item_lines(items: &[Item]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::raw(format!("  \u{1f381} {:<28}", item.name)),
                rarity_span(item.rarity),
            ])
        })
        .collect()
}
