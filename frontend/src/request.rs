use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

#[cfg(test)]
use std::sync::Mutex;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// 设置 JSON 请求体
    pub fn with_json_body(self, body: String) -> Self {
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = Some(body);
        req
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器环境下的 future 不是 Send 的，因此使用 `?Send`；
/// 实现本身需要 `Send + Sync` 才能放进响应式上下文。
#[async_trait::async_trait(?Send)]
pub trait HttpClient: Send + Sync {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试替身 (Mock)
// =========================================================

/// 记录的请求 (Method, URL, Headers, Body)
#[cfg(test)]
pub type RecordedRequest = (HttpMethod, String, HashMap<String, String>, Option<String>);

#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    // URL -> (Status, Response Body)，None 表示网络失败
    responses: Mutex<HashMap<String, Option<(u16, String)>>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Some((status, body.to_string())));
    }

    pub fn mock_raw_response(&self, url: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Some((status, body.to_string())));
    }

    pub fn mock_network_failure(&self, url: &str) {
        self.responses.lock().unwrap().insert(url.to_string(), None);
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 按顺序返回请求过的 URL
    pub fn requested_urls(&self) -> Vec<String> {
        self.recorded().into_iter().map(|(_, url, _, _)| url).collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.lock().unwrap().push((
            req.method,
            req.url.clone(),
            req.headers.clone(),
            req.body.clone(),
        ));

        match self.responses.lock().unwrap().get(&req.url) {
            Some(Some((status, body))) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(None) => Err(ApiError::Network("connection refused".to_string())),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
