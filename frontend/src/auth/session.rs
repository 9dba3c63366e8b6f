//! 认证会话
//!
//! 与渲染层无关的认证状态机：`Unresolved -> {Authenticated, Unauthenticated}`。
//! 持有凭据存储与 API 客户端，由应用根部创建并注入。

use tracklytics_shared::User;

use super::credential::CredentialStore;
use crate::api::TracklyticsApi;
use crate::error::AuthError;

#[cfg(test)]
mod tests;

/// 认证状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthStatus {
    /// 尚未完成首次校验
    #[default]
    Unresolved,
    Authenticated(User),
    Unauthenticated,
}

impl AuthStatus {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, AuthStatus::Unresolved)
    }
}

#[derive(Clone)]
pub struct AuthSession {
    credentials: CredentialStore,
    api: TracklyticsApi,
}

impl AuthSession {
    pub fn new(credentials: CredentialStore, api: TracklyticsApi) -> Self {
        Self { credentials, api }
    }

    pub fn api(&self) -> &TracklyticsApi {
        &self.api
    }

    /// 校验当前凭据
    ///
    /// 没有凭据时不发请求；校验失败时清除凭据。
    pub async fn verify(&self) -> Result<User, AuthError> {
        if self.credentials.read().is_none() {
            return Err(AuthError::MissingCredential);
        }

        match self.api.me().await {
            Ok(user) => Ok(user),
            Err(e) => {
                log_warn!("[Auth] Credential rejected, discarding it: {}", e);
                self.credentials.clear();
                Err(AuthError::Verification(e))
            }
        }
    }

    /// 启动时的状态判定
    pub async fn resolve(&self) -> AuthStatus {
        match self.verify().await {
            Ok(user) => AuthStatus::Authenticated(user),
            Err(_) => AuthStatus::Unauthenticated,
        }
    }

    /// 保存 token 后重新执行启动校验
    pub async fn login(&self, token: &str) -> Result<User, AuthError> {
        self.credentials.save(token);
        self.verify().await
    }

    /// 清除凭据，始终回到未认证状态
    pub fn logout(&self) -> AuthStatus {
        self.credentials.clear();
        AuthStatus::Unauthenticated
    }
}
