//! Tracklytics 后端客户端
//!
//! 所有请求都从这里发出：有凭据时附带 `Authorization: Bearer <token>`，
//! 没有则以匿名身份发送。

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracklytics_shared::{
    ArtistList, ErrorBody, HEADER_AUTHORIZATION, PATH_ARTISTS, PATH_AUTH_ME, PATH_PERSONALITY,
    PATH_PERSONALITY_HISTORY, PATH_SYNC, PATH_TOKEN_ISSUER, PATH_TRACKS, PersonalityData,
    PersonalityHistory, SyncResult, TrackList, User,
};

use crate::auth::CredentialStore;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest};

#[derive(Clone)]
pub struct TracklyticsApi {
    base_url: String,
    credentials: CredentialStore,
    client: Arc<dyn HttpClient>,
}

impl TracklyticsApi {
    pub fn new(base_url: &str, credentials: CredentialStore, client: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 签发 token 的外部链接（在新标签页中打开）
    pub fn token_issuer_url(&self) -> String {
        self.url(PATH_TOKEN_ISSUER)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let req = HttpRequest::new(&self.url(path), method);
        match self.credentials.read() {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, req: HttpRequest) -> ApiResult<T> {
        let res = self.client.send(req).await?;

        if !res.ok() {
            // 错误响应体不一定是 JSON，解析失败时只保留状态码
            let message = serde_json::from_str::<ErrorBody>(&res.body)
                .ok()
                .and_then(ErrorBody::into_message);
            return Err(ApiError::Status {
                status: res.status,
                message,
            });
        }

        res.json()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(self.request(HttpMethod::Get, path)).await
    }

    /// POST 请求，`body` 为已序列化的 JSON
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<String>) -> ApiResult<T> {
        let req = self.request(HttpMethod::Post, path);
        let req = match body {
            Some(body) => req.with_json_body(body),
            None => req,
        };
        self.execute(req).await
    }

    // =========================================================
    // 业务接口
    // =========================================================

    /// 当前登录用户
    pub async fn me(&self) -> ApiResult<User> {
        self.get(PATH_AUTH_ME).await
    }

    pub async fn personality(&self) -> ApiResult<PersonalityData> {
        self.get(PATH_PERSONALITY).await
    }

    /// 触发后端从音乐服务拉取最新数据
    pub async fn sync(&self) -> ApiResult<SyncResult> {
        self.post(PATH_SYNC, None).await
    }

    pub async fn tracks(&self) -> ApiResult<TrackList> {
        self.get(PATH_TRACKS).await
    }

    pub async fn artists(&self) -> ApiResult<ArtistList> {
        self.get(PATH_ARTISTS).await
    }

    pub async fn personality_history(&self) -> ApiResult<PersonalityHistory> {
        self.get(PATH_PERSONALITY_HISTORY).await
    }
}
