//! Order history page with status filter

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;
use shared::OrderStatus;

use crate::core::AppContext;
use crate::ui::widgets::{date, points, status_span};
use crate::ui::{failure, PageEvent, Route};

const FILTERS: [Option<OrderStatus>; 5] = [
    None,
    Some(OrderStatus::Pending),
    Some(OrderStatus::Paid),
    Some(OrderStatus::Completed),
    Some(OrderStatus::Cancelled),
];

#[derive(Default)]
pub struct OrdersPage {
    selected: usize,
    filter_idx: usize,
}

impl OrdersPage {
    fn filter(&self) -> Option<OrderStatus> {
        FILTERS[self.filter_idx % FILTERS.len()]
    }

    async fn refresh(&mut self, ctx: &AppContext, page: u32) -> PageEvent {
        self.selected = 0;
        match ctx.orders.fetch_orders(page, self.filter()).await {
            Ok(()) => PageEvent::None,
            Err(e) => failure(ctx, e, "Failed to load orders"),
        }
    }

    pub async fn on_enter(&mut self, ctx: &AppContext) -> PageEvent {
        self.refresh(ctx, 1).await
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        let state = ctx.orders.state();
        match key.code {
            KeyCode::Char('f') => {
                self.filter_idx = (self.filter_idx + 1) % FILTERS.len();
                self.refresh(ctx, 1).await
            }
            KeyCode::Char('r') => self.refresh(ctx, state.pagination.page.max(1)).await,
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PageEvent::None
            }
            KeyCode::Down => {
                if !state.orders.is_empty() {
                    self.selected = (self.selected + 1).min(state.orders.len() - 1);
                }
                PageEvent::None
            }
            KeyCode::Left if state.pagination.has_prev() => {
                self.refresh(ctx, state.pagination.page - 1).await
            }
            KeyCode::Right if state.pagination.has_next() => {
                self.refresh(ctx, state.pagination.page + 1).await
            }
            KeyCode::Enter => {
                let Some(order) = state.orders.get(self.selected) else {
                    return PageEvent::None;
                };
                match ctx.orders.fetch_detail(&order.id).await {
                    Ok(()) => PageEvent::Navigate(Route::OrderDetail),
                    Err(e) => failure(ctx, e, "Failed to load order"),
                }
            }
            _ => PageEvent::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let state = ctx.orders.state();

        let filter_label = self
            .filter()
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "All".to_string());
        let title = format!(
            " Orders \u{2014} {} \u{2014} page {}/{}{} ",
            filter_label,
            state.pagination.page.max(1),
            state.pagination.total_pages.max(1),
            if state.loading { " (loading...)" } else { "" }
        );

        let items: Vec<ListItem> = state
            .orders
            .iter()
            .map(|o| {
                let series = o
                    .series
                    .as_ref()
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| o.series_id.clone());
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<18}", o.order_number), Style::default().bold()),
                    Span::raw(format!("{:<24}", series)),
                    Span::raw(format!("x{:<3}", o.quantity)),
                    Span::raw(format!("{:>12}  ", points(o.total_amount))),
                    status_span(o.status),
                    Span::styled(format!("  {}", date(&o.created_at)), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray).bold())
            .highlight_symbol("\u{25b6} ");
        let mut list_state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
