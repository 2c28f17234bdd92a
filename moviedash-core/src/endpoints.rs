use anyhow::{Result, bail};
use reqwest::{Method, StatusCode};

use super::client::MovieClient;
use crate::model::{
    ErrorBody,
    auth::{EmptyBody, LoginReq, LoginResp},
    movie::{Movie, MoviesResp},
};

pub const LOGIN: &str = "/api/login";
pub const AUTH_CHECK: &str = "/api/auth/check";
pub const MOVIES: &str = "/api/movies";
pub const LOGOUT: &str = "/api/logout";
pub const UPDATE: &str = "/update";

const LOGIN_FAILED: &str = "Login failed";
const NO_TOKEN: &str = "No token received";

/// `/api/movies` 的结果：401 单独区分，其余失败走 `Err`
#[derive(Debug)]
pub enum MoviesReply {
    Unauthorized,
    Movies(Vec<Movie>),
}

impl MovieClient {
    // — 认证 —

    /// 提交凭据，成功时返回 token。
    ///
    /// 非 2xx：错误信息取响应体 `message`，缺失时为 "Login failed"；
    /// 2xx 但没有 token：错误信息为 "No token received"。
    /// 响应体无法解析时按空对象处理。
    pub async fn login(&self, req: &LoginReq) -> Result<String> {
        let resp = self
            .request(Method::POST, LOGIN, false)
            .json(req)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            let body = ErrorBody::parse_lenient(&text);
            bail!("{}", body.message().unwrap_or(LOGIN_FAILED));
        }

        let body: LoginResp = serde_json::from_str(&text).unwrap_or_default();
        match body.token() {
            Some(token) => Ok(token.to_string()),
            None => bail!("{NO_TOKEN}"),
        }
    }

    /// 校验当前 token，任何非 2xx 都是错误
    pub async fn auth_check(&self) -> Result<()> {
        self.get(AUTH_CHECK).await?.error_for_status()?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.post(LOGOUT, &EmptyBody::default()).await?;
        Ok(())
    }

    // — 榜单 —

    pub async fn movies(&self) -> Result<MoviesReply> {
        let resp = self.get(MOVIES).await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(MoviesReply::Unauthorized);
        }
        if !status.is_success() {
            bail!("[{}] HTTP {}", MOVIES, status);
        }

        let text = resp.text().await?;
        let body: MoviesResp = serde_json::from_str(&text).map_err(|e| {
            anyhow::anyhow!(
                "[{}] unexpected response ({}): {}",
                MOVIES,
                e,
                text.chars().take(200).collect::<String>()
            )
        })?;
        Ok(MoviesReply::Movies(body.into_movies()))
    }

    /// 触发后端抓取任务，响应内容无意义
    pub async fn trigger_update(&self) -> Result<()> {
        self.get(UPDATE).await?;
        Ok(())
    }
}
