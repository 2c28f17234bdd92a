mod actions;
mod event;
mod render;

const UI_TICK_MS: u64 = 300;

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::Event;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use moviedash_core::{Controller, Dashboard, FetchOutcome, MovieClient, Route, SharedSession};

use crate::config::auth_store::FileSessionStore;
use crate::config::settings::Settings;
use crate::ui::log_view::LogStore;
use crate::ui::login::LoginState;

/// 页面标识：每次切换界面递增，旧界面发起的请求结果据此丢弃
pub type PageId = u64;

/// 异步消息，从后台任务发送到主循环
pub enum AppMessage {
    /// 终端事件（由持久后台线程读取）
    TermEvent(Event),
    /// UI 定时 tick（驱动状态栏过期）
    Tick,
    /// 登录结果，`Err` 为要显示的错误文字
    LoginResult {
        page: PageId,
        result: std::result::Result<(), String>,
    },
    /// 鉴权守卫结果
    AuthChecked { page: PageId, ok: bool },
    /// 榜单拉取完成
    MoviesFetched { page: PageId, outcome: FetchOutcome },
    /// 定时刷新到点
    AutoRefresh { page: PageId },
    /// 登出请求已结束（无论成败）
    LoggedOut { page: PageId },
}

pub struct App {
    pub running: bool,
    pub settings: Settings,
    pub controller: Controller,
    pub route: Route,
    pub(crate) page: PageId,
    pub login: LoginState,
    pub dashboard: Dashboard,
    /// 仪表盘鉴权中，尚未开始拉取
    pub checking_auth: bool,
    /// 登出请求进行中，忽略重复的登出
    pub logging_out: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub show_logs: bool,
    pub logs: LogStore,
    pub msg_tx: mpsc::UnboundedSender<AppMessage>,
    msg_rx: mpsc::UnboundedReceiver<AppMessage>,
    /// 仪表盘的定时刷新任务，离开仪表盘时销毁
    pub(crate) refresh_timer: Option<JoinHandle<()>>,
}

impl App {
    pub fn new() -> Result<Self> {
        let settings = Settings::load()?;
        let session: SharedSession = Arc::new(FileSessionStore::open_default()?);
        Self::with_session(settings, session)
    }

    pub fn with_session(settings: Settings, session: SharedSession) -> Result<Self> {
        let client = MovieClient::new(Some(settings.base_url()), session)?;
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let dashboard = Dashboard::new(settings.status_ttl());

        tracing::info!(base_url = %client.base_url(), "client ready");

        Ok(Self {
            running: true,
            settings,
            controller: Controller::new(client),
            route: Route::Dashboard,
            page: 0,
            login: LoginState::new(),
            dashboard,
            checking_auth: false,
            logging_out: false,
            show_help: false,
            help_scroll: 0,
            show_logs: false,
            logs: LogStore::new(),
            msg_tx,
            msg_rx,
            refresh_timer: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();

        let result = self.main_loop(&mut terminal).await;

        if let Some(timer) = self.refresh_timer.take() {
            timer.abort();
        }
        ratatui::restore();

        result
    }

    async fn main_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        // 启动持久的事件读取线程，避免 select! + spawn_blocking 丢事件
        let event_tx = self.msg_tx.clone();
        std::thread::spawn(move || {
            loop {
                match crossterm::event::read() {
                    Ok(ev) => {
                        if event_tx.send(AppMessage::TermEvent(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        // UI 定时 tick
        let tick_tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_millis(UI_TICK_MS));
            loop {
                interval.tick().await;
                if tick_tx.send(AppMessage::Tick).is_err() {
                    break;
                }
            }
        });

        // 与打开网站根路径一致：先进入仪表盘，由鉴权守卫决定是否跳转登录
        self.navigate(Route::Dashboard);

        while self.running {
            terminal.draw(|f| self.render(f))?;

            // 等待至少一条消息
            if let Some(msg) = self.msg_rx.recv().await {
                self.handle_message(msg);
            }
            // 批量处理所有已积压的消息，避免每条消息都触发一次 draw
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.handle_message(msg);
            }
        }
        Ok(())
    }

    /// 切换界面：销毁旧界面的定时器，作废旧请求，初始化新界面
    pub(crate) fn navigate(&mut self, route: Route) {
        if let Some(timer) = self.refresh_timer.take() {
            timer.abort();
        }
        self.page += 1;
        self.route = route;
        self.logging_out = false;
        tracing::debug!(?route, page = self.page, "navigate");

        match route {
            Route::Login => {
                self.login = LoginState::new();
                self.checking_auth = false;
            }
            Route::Dashboard => {
                self.dashboard = Dashboard::new(self.settings.status_ttl());
                self.init_dashboard();
            }
        }
    }

    /// 消息是否属于当前界面
    pub(crate) fn is_current(&self, page: PageId) -> bool {
        page == self.page
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use moviedash_core::{Card, MemorySessionStore, card::cards_from, model::movie::Movie};

    use super::*;

    fn app() -> App {
        let mut settings = Settings::default();
        settings.apply_base_url_override("http://127.0.0.1:9");
        let session = MemorySessionStore::with_token("tok").shared();
        App::with_session(settings, session).unwrap()
    }

    fn cards(n: i64) -> Vec<Card> {
        let movies: Vec<Movie> = (1..=n)
            .map(|i| Movie {
                place: Some(i),
                ..Default::default()
            })
            .collect();
        cards_from(&movies)
    }

    #[tokio::test]
    async fn login_error_stays_on_login_page() {
        let mut app = app();
        app.navigate(Route::Login);
        app.login.begin_submit();

        app.handle_message(AppMessage::LoginResult {
            page: app.page,
            result: Err("bad creds".into()),
        });

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.login.error.as_deref(), Some("bad creds"));
        assert!(!app.login.submitting);
    }

    #[tokio::test]
    async fn login_success_enters_dashboard_and_checks_auth() {
        let mut app = app();
        app.navigate(Route::Login);
        let login_page = app.page;

        app.handle_message(AppMessage::LoginResult {
            page: login_page,
            result: Ok(()),
        });

        assert_eq!(app.route, Route::Dashboard);
        assert!(app.checking_auth);
        assert_ne!(app.page, login_page);
    }

    #[tokio::test]
    async fn failed_auth_check_redirects_to_login() {
        let mut app = app();
        app.navigate(Route::Dashboard);

        app.handle_message(AppMessage::AuthChecked {
            page: app.page,
            ok: false,
        });

        assert_eq!(app.route, Route::Login);
        assert!(app.refresh_timer.is_none());
    }

    #[tokio::test]
    async fn passed_auth_check_starts_refresh_timer() {
        let mut app = app();
        app.navigate(Route::Dashboard);

        app.handle_message(AppMessage::AuthChecked {
            page: app.page,
            ok: true,
        });

        assert_eq!(app.route, Route::Dashboard);
        assert!(!app.checking_auth);
        assert!(app.refresh_timer.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_timer_refetches_every_interval() {
        let mut app = app();
        let page = app.page;
        let period = app.settings.refresh_interval();
        app.start_refresh_timer();

        tokio::time::sleep(period - Duration::from_secs(1)).await;
        assert!(app.msg_rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(1)).await;
        let msg = app.msg_rx.recv().await.unwrap();
        assert!(matches!(msg, AppMessage::AutoRefresh { page: p } if p == page));

        // 到点后重新拉取，结果回到同一页面
        app.handle_message(msg);
        let msg = app.msg_rx.recv().await.unwrap();
        assert!(matches!(msg, AppMessage::MoviesFetched { page: p, .. } if p == page));

        tokio::time::sleep(period).await;
        let msg = app.msg_rx.recv().await.unwrap();
        assert!(matches!(msg, AppMessage::AutoRefresh { page: p } if p == page));
    }

    #[tokio::test]
    async fn unauthorized_movies_tear_down_dashboard() {
        let mut app = app();
        app.navigate(Route::Dashboard);
        app.handle_message(AppMessage::AuthChecked {
            page: app.page,
            ok: true,
        });

        app.handle_message(AppMessage::MoviesFetched {
            page: app.page,
            outcome: FetchOutcome::Unauthorized,
        });

        assert_eq!(app.route, Route::Login);
        assert!(app.refresh_timer.is_none());
    }

    #[tokio::test]
    async fn loaded_movies_render_on_current_page() {
        let mut app = app();
        app.navigate(Route::Dashboard);

        app.handle_message(AppMessage::MoviesFetched {
            page: app.page,
            outcome: FetchOutcome::Loaded(cards(12)),
        });

        assert_eq!(app.dashboard.cards().len(), 10);
        assert_eq!(app.dashboard.status_text(Instant::now()), Some("Loaded top 10"));
    }

    #[tokio::test]
    async fn results_from_previous_page_are_dropped() {
        let mut app = app();
        app.navigate(Route::Dashboard);
        let old_page = app.page;
        app.navigate(Route::Login);

        app.handle_message(AppMessage::MoviesFetched {
            page: old_page,
            outcome: FetchOutcome::Loaded(cards(3)),
        });
        app.handle_message(AppMessage::AutoRefresh { page: old_page });

        assert_eq!(app.route, Route::Login);
        assert!(app.dashboard.cards().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_is_logged_without_redirect() {
        let mut app = app();
        app.navigate(Route::Dashboard);

        app.handle_message(AppMessage::MoviesFetched {
            page: app.page,
            outcome: FetchOutcome::Failed("HTTP 500".into()),
        });

        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.logs.entries.len(), 1);
        assert_eq!(
            app.dashboard.status_text(Instant::now()),
            Some(moviedash_core::controller::FETCH_FAILED)
        );
    }

    #[tokio::test]
    async fn refresh_shows_persistent_status() {
        let mut app = app();
        app.navigate(Route::Dashboard);

        app.refresh();

        assert_eq!(
            app.dashboard.status_text(Instant::now() + Duration::from_secs(60)),
            Some(moviedash_core::dashboard::UPDATING)
        );
    }

    #[tokio::test]
    async fn repeated_logout_sends_one_request() {
        let mut app = app();
        app.logout();
        app.logout();
        assert!(app.logging_out);

        let msg = app.msg_rx.recv().await.unwrap();
        assert!(matches!(msg, AppMessage::LoggedOut { .. }));
        let second =
            tokio::time::timeout(Duration::from_millis(300), app.msg_rx.recv()).await;
        assert!(second.is_err());

        app.handle_message(msg);
        assert_eq!(app.route, Route::Login);
        assert!(!app.logging_out);
    }

    #[tokio::test]
    async fn logout_completion_goes_to_login() {
        let mut app = app();
        app.navigate(Route::Dashboard);

        app.handle_message(AppMessage::LoggedOut { page: app.page });

        assert_eq!(app.route, Route::Login);
    }
}
