use anyhow::Result;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder};

use crate::session::SharedSession;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// 后端 HTTP 客户端。
///
/// 每次请求都从注入的 `SessionStore` 现取 token，存在时带
/// `Authorization: Bearer <token>`，不存在时不带该头。
#[derive(Clone)]
pub struct MovieClient {
    http: reqwest::Client,
    base_url: String,
    session: SharedSession,
}

impl MovieClient {
    pub fn new(base_url: Option<&str>, session: SharedSession) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("moviedash/0.1.0"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> Option<String> {
        self.session.get().map(|t| format!("Bearer {t}"))
    }

    /// 构造请求；`with_auth` 为 false 时即使有 token 也不带认证头
    pub(crate) fn request(&self, method: Method, path: &str, with_auth: bool) -> RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if with_auth {
            if let Some(auth) = self.auth_header() {
                req = req.header(AUTHORIZATION, auth);
            }
        }
        req
    }

    /// GET 请求（带认证），返回原始响应供调用方按状态码分支
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self.request(Method::GET, path, true).send().await?)
    }

    /// POST 请求（JSON body，带认证）
    pub async fn post<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        Ok(self
            .request(Method::POST, path, true)
            .json(body)
            .send()
            .await?)
    }
}
