//! Tracklytics 前后端共享的协议定义
//!
//! - `protocol`: 后端 REST 接口的请求/响应模型
//! - `date`: 后端时间戳的解析与展示

mod date;
mod protocol;

pub use date::Timestamp;
pub use protocol::*;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 浏览器存储中保存 JWT 的键
pub const STORAGE_TOKEN_KEY: &str = "jwt_token";
/// 回调路由携带 token 的查询参数名
pub const CALLBACK_TOKEN_PARAM: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 列表在前端只展示前 N 项（不做分页请求）
pub const DISPLAY_LIMIT: usize = 10;

// =========================================================
// 后端接口路径 (Endpoints)
// =========================================================

pub const PATH_AUTH_ME: &str = "/api/auth/me";
/// 签发测试 token 的入口，不需要认证，在新标签页中打开
pub const PATH_TOKEN_ISSUER: &str = "/test-jwt";
pub const PATH_PERSONALITY: &str = "/api/personality";
pub const PATH_PERSONALITY_HISTORY: &str = "/api/personality/history";
pub const PATH_SYNC: &str = "/api/sync";
pub const PATH_TRACKS: &str = "/api/tracks";
pub const PATH_ARTISTS: &str = "/api/artists";
