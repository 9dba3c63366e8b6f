use std::fmt;

// =========================================================
// 请求错误 (ApiError)
// =========================================================

/// 调用后端接口时可能出现的错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络层失败，没有拿到响应
    Network(String),
    /// 非 2xx 响应，`message` 取自响应体
    Status { status: u16, message: Option<String> },
    /// 响应体无法解析为期望的结构
    Decode(String),
}

impl ApiError {
    /// 后端给出的错误信息（仅非 2xx 响应可能携带）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// 界面展示用的错误文本：优先后端信息，否则使用调用方给出的兜底文本
    pub fn display_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Status {
                status,
                message: Some(message),
            } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Status {
                status,
                message: None,
            } => write!(f, "HTTP {}", status),
            ApiError::Decode(msg) => write!(f, "invalid response body: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// 认证错误 (AuthError)
// =========================================================

/// 凭据校验失败的原因
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// 本地没有保存任何凭据
    MissingCredential,
    /// `/api/auth/me` 拒绝了凭据或请求失败
    Verification(ApiError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "no credential stored"),
            AuthError::Verification(e) => write!(f, "credential verification failed: {}", e),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::MissingCredential => None,
            AuthError::Verification(e) => Some(e),
        }
    }
}
