//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现 [`HttpClient`]，是应用在浏览器中唯一的网络出口。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// fetch 调用错误类型
#[derive(Debug)]
pub enum FetchError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FetchError::RequestBuildFailed(msg) => write!(f, "failed to build request: {}", msg),
            FetchError::NetworkError(msg) => write!(f, "network error: {}", msg),
            FetchError::ResponseParseFailed(msg) => write!(f, "failed to read response: {}", msg),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::ResponseParseFailed(_) => ApiError::Decode(e.to_string()),
            _ => ApiError::Network(e.to_string()),
        }
    }
}

/// 读取原生 `Response` 的文本内容
async fn read_text(response: &Response) -> Result<String, FetchError> {
    let promise = response
        .text()
        .map_err(|e| FetchError::ResponseParseFailed(format!("{:?}", e)))?;

    let text = JsFuture::from(promise)
        .await
        .map_err(|e| FetchError::ResponseParseFailed(format!("{:?}", e)))?;

    text.as_string()
        .ok_or_else(|| FetchError::ResponseParseFailed("body is not a string".to_string()))
}

/// 发送请求并返回原生 `Response`
async fn fetch(req: &HttpRequest) -> Result<Response, FetchError> {
    let headers = Headers::new()
        .map_err(|e| FetchError::RequestBuildFailed(format!("Headers::new: {:?}", e)))?;

    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| FetchError::RequestBuildFailed(format!("header {}: {:?}", key, e)))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());

    if let Some(body) = &req.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&req.url, &opts)
        .map_err(|e| FetchError::RequestBuildFailed(format!("{:?}", e)))?;

    let window = web_sys::window()
        .ok_or_else(|| FetchError::NetworkError("window is not available".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::NetworkError(format!("{:?}", e)))?;

    resp_value
        .dyn_into()
        .map_err(|e| FetchError::ResponseParseFailed(format!("not a Response: {:?}", e)))
}

/// 基于浏览器 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let response = fetch(&req).await?;
        let status = response.status();
        let body = read_text(&response).await?;

        if req.method != HttpMethod::Get || !response.ok() {
            log_info!("[Http] {} {} -> {}", req.method.as_str(), req.url, status);
        }

        Ok(HttpResponse { status, body })
    }
}
