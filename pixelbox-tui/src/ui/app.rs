//! Application shell: chrome, routing and the cooperative event loop
//!
//! All workflow actions run inline on this single task; the only suspension
//! points are the network calls inside the stores.

use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::core::AppContext;
use crate::ui::pages::{
    InventoryPage, LoginPage, LogsPage, OrderDetailPage, OrdersPage, ProfilePage, RegisterPage,
    SeriesDetailPage, ShowsPage, StorePage,
};
use crate::ui::widgets::points;
use crate::ui::{Notice, NoticeKind, PageEvent, Route};

const TICK: Duration = Duration::from_millis(100);

/// Main-tab routes reachable through the function keys
const TABS: [(Route, &str); 5] = [
    (Route::Store, "F1 Store"),
    (Route::Orders, "F2 Orders"),
    (Route::Inventory, "F3 Inventory"),
    (Route::Shows, "F4 Shows"),
    (Route::Profile, "F5 Profile"),
];

pub struct App {
    ctx: AppContext,
    route: Route,
    back_route: Route,
    notice: Option<Notice>,
    should_quit: bool,
    login: LoginPage,
    register: RegisterPage,
    store: StorePage,
    series_detail: SeriesDetailPage,
    orders: OrdersPage,
    order_detail: OrderDetailPage,
    inventory: InventoryPage,
    shows: ShowsPage,
    profile: ProfilePage,
    logs: LogsPage,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let route = if ctx.session.is_authenticated() {
            Route::Store
        } else {
            Route::Login
        };
        Self {
            ctx,
            route,
            back_route: Route::Store,
            notice: None,
            should_quit: false,
            login: LoginPage::default(),
            register: RegisterPage::default(),
            store: StorePage::default(),
            series_detail: SeriesDetailPage::default(),
            orders: OrdersPage::default(),
            order_detail: OrderDetailPage::default(),
            inventory: InventoryPage::default(),
            shows: ShowsPage::default(),
            profile: ProfilePage::default(),
            logs: LogsPage,
        }
    }

    /// Run the event loop until quit
    pub async fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        let initial = self.enter_current().await;
        self.handle_event(initial).await;

        while !self.should_quit {
            if self.notice.as_ref().is_some_and(|n| n.is_expired()) {
                self.notice = None;
            }
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key).await;
                    }
                }
            }
        }
        Ok(())
    }

    async fn on_key(&mut self, key: KeyEvent) {
        // Global bindings first
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(9) {
            if self.route != Route::Logs {
                self.back_route = self.route;
                self.route = Route::Logs;
            }
            return;
        }
        if self.route == Route::Logs {
            if key.code == KeyCode::Esc {
                self.route = self.back_route;
            }
            return;
        }
        if let KeyCode::F(n @ 1..=5) = key.code {
            let (target, _) = TABS[(n - 1) as usize];
            let needs_auth = matches!(target, Route::Orders | Route::Inventory | Route::Profile);
            let event = if needs_auth && !self.ctx.session.is_authenticated() {
                PageEvent::NavigateNotice(Route::Login, Notice::error("Please log in first"))
            } else {
                PageEvent::Navigate(target)
            };
            self.handle_event(event).await;
            return;
        }

        let event = match self.route {
            Route::Login => self.login.on_key(key, &self.ctx).await,
            Route::Register => self.register.on_key(key, &self.ctx).await,
            Route::Store => self.store.on_key(key, &self.ctx).await,
            Route::SeriesDetail => self.series_detail.on_key(key, &self.ctx).await,
            Route::Orders => self.orders.on_key(key, &self.ctx).await,
            Route::OrderDetail => self.order_detail.on_key(key, &self.ctx).await,
            Route::Inventory => self.inventory.on_key(key, &self.ctx).await,
            Route::Shows => self.shows.on_key(key, &self.ctx).await,
            Route::Profile => self.profile.on_key(key, &self.ctx).await,
            Route::Logs => PageEvent::None,
        };
        self.handle_event(event).await;
    }

    /// Apply a page event, following navigation chains without recursion
    async fn handle_event(&mut self, event: PageEvent) {
        let mut event = event;
        loop {
            match event {
                PageEvent::None => break,
                PageEvent::Quit => {
                    self.should_quit = true;
                    break;
                }
                PageEvent::Notice(notice) => {
                    self.notice = Some(notice);
                    break;
                }
                PageEvent::ForceLogin(notice) => {
                    self.notice = Some(notice);
                    self.route = Route::Login;
                    break;
                }
                PageEvent::Navigate(route) => {
                    self.route = route;
                    event = self.enter_current().await;
                }
                PageEvent::NavigateNotice(route, notice) => {
                    self.notice = Some(notice);
                    self.route = route;
                    event = self.enter_current().await;
                }
            }
        }
    }

    async fn enter_current(&mut self) -> PageEvent {
        match self.route {
            Route::Store => self.store.on_enter(&self.ctx).await,
            Route::SeriesDetail => {
                self.series_detail.on_enter();
                PageEvent::None
            }
            Route::Orders => self.orders.on_enter(&self.ctx).await,
            Route::OrderDetail => self.order_detail.on_enter(&self.ctx),
            Route::Inventory => self.inventory.on_enter(&self.ctx).await,
            Route::Shows => self.shows.on_enter(&self.ctx).await,
            Route::Profile => self.profile.on_enter(&self.ctx).await,
            Route::Login | Route::Register | Route::Logs => PageEvent::None,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);

        match self.route {
            Route::Login => self.login.render(frame, body_area, &self.ctx),
            Route::Register => self.register.render(frame, body_area, &self.ctx),
            Route::Store => self.store.render(frame, body_area, &self.ctx),
            Route::SeriesDetail => self.series_detail.render(frame, body_area, &self.ctx),
            Route::Orders => self.orders.render(frame, body_area, &self.ctx),
            Route::OrderDetail => self.order_detail.render(frame, body_area, &self.ctx),
            Route::Inventory => self.inventory.render(frame, body_area, &self.ctx),
            Route::Shows => self.shows.render(frame, body_area, &self.ctx),
            Route::Profile => self.profile.render(frame, body_area, &self.ctx),
            Route::Logs => self.logs.render(frame, body_area),
        }

        self.render_footer(frame, footer_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " \u{1f4e6} PixelBox ",
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        )];
        for (route, label) in TABS {
            let style = if route == self.route {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("  {label}"), style));
        }
        spans.push(Span::styled("  F9 Logs", Style::default().fg(Color::DarkGray)));

        if let Some(user) = self.ctx.session.user() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("{} \u{2014} {}", user.display_name(), points(user.points)),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        if let Some(notice) = &self.notice {
            let color = match notice.kind {
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
                NoticeKind::Info => Color::Cyan,
            };
            frame.render_widget(
                Paragraph::new(Line::styled(format!(" {}", notice.text), Style::default().fg(color).bold())),
                area,
            );
            return;
        }

        let hints = match self.route {
            Route::Login => "Enter: sign in   Ctrl+N: register   Ctrl+C: quit",
            Route::Register => "Enter: register   Esc: back   Ctrl+C: quit",
            Route::Store => "\u{2191}\u{2193}: select   Enter: open   /: search   p: popular   \u{2190}\u{2192}: page   Ctrl+C: quit",
            Route::SeriesDetail => "b/Enter: buy   +/-: quantity   Esc: back",
            Route::Orders => "\u{2191}\u{2193}: select   Enter: open   f: filter   \u{2190}\u{2192}: page   Esc: back",
            Route::OrderDetail => "p: pay   d: draw   c: cancel   r: refresh   Esc: back",
            Route::Inventory => "f: favorite   d: display   r: rarity filter   o: favorites only   \u{2190}\u{2192}: page",
            Route::Shows => "n: new   l: like   x: delete   \u{2191}\u{2193}: select   \u{2190}\u{2192}: page",
            Route::Profile => "e: edit nickname   r: refresh   x: log out",
            Route::Logs => "Esc: back",
        };
        frame.render_widget(
            Paragraph::new(Line::styled(format!(" {hints}"), Style::default().fg(Color::DarkGray))),
            area,
        );
    }
}
