use crate::card::{self, Card};
use crate::client::MovieClient;
use crate::endpoints::MoviesReply;
use crate::model::auth::LoginReq;
use crate::session::SharedSession;

pub const FETCH_FAILED: &str = "Failed to load movies";

/// 两个界面：登录页和仪表盘，同一时刻只有一个生效
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// 一次拉取榜单的结果
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 401：token 已清除，应跳转登录页
    Unauthorized,
    /// 最多 `MAX_CARDS` 张卡片，顺序与接口一致
    Loaded(Vec<Card>),
    /// 其他失败，不跳转，只提示
    Failed(String),
}

/// 登录 / 鉴权 / 拉取 / 刷新 / 登出流程。
///
/// token 只通过注入的 `SessionStore` 读写。
#[derive(Clone)]
pub struct Controller {
    client: MovieClient,
}

impl Controller {
    pub fn new(client: MovieClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &MovieClient {
        &self.client
    }

    pub fn session(&self) -> &SharedSession {
        self.client.session()
    }

    // — 认证 —

    /// 提交登录。成功时 token 已持久化，调用方跳转仪表盘；
    /// 失败时返回要显示在表单下方的文字，不跳转。
    pub async fn login(&self, username: &str, password: &str) -> Result<(), String> {
        let req = LoginReq {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        match self.client.login(&req).await {
            Ok(token) => {
                self.session().set(Some(&token));
                tracing::info!(username = %req.username, "logged in");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(username = %req.username, error = %e, "login failed");
                Err(e.to_string())
            }
        }
    }

    /// 鉴权守卫。网络错误和非 2xx 一律视为未登录：清除 token，返回 false。
    ///
    /// 只清除本次请求携带的 token；请求期间已换成新 token 时保留新的。
    pub async fn check_auth(&self) -> bool {
        let sent = self.session().get();
        match self.client.auth_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::info!(error = %e, "auth check failed, clearing session");
                self.drop_token(sent.as_deref());
                false
            }
        }
    }

    /// 登出：尽力通知后端（结果丢弃），然后无条件清除本地 token
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            tracing::debug!(error = %e, "logout request ignored");
        }
        self.session().clear();
    }

    // — 榜单 —

    pub async fn fetch_movies(&self) -> FetchOutcome {
        let sent = self.session().get();
        match self.client.movies().await {
            Ok(MoviesReply::Unauthorized) => {
                tracing::info!("movies returned 401, clearing session");
                self.drop_token(sent.as_deref());
                FetchOutcome::Unauthorized
            }
            Ok(MoviesReply::Movies(movies)) => {
                tracing::debug!(total = movies.len(), "movies fetched");
                FetchOutcome::Loaded(card::cards_from(&movies))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load movies");
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    /// 尽力触发后端更新任务，结果和错误都丢弃
    pub async fn trigger_update(&self) {
        if let Err(e) = self.client.trigger_update().await {
            tracing::debug!(error = %e, "update trigger ignored");
        }
    }

    /// 手动刷新：先触发更新任务，无论成败都重新拉取
    pub async fn refresh(&self) -> FetchOutcome {
        self.trigger_update().await;
        self.fetch_movies().await
    }

    fn drop_token(&self, sent: Option<&str>) {
        if !self.session().clear_if_current(sent) {
            tracing::debug!("session changed during request, keeping newer token");
        }
    }
}
