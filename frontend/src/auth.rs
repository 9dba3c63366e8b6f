//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的 `AuthView` 信号来检查认证状态。

mod credential;
mod session;

pub use credential::CredentialStore;
pub use session::{AuthSession, AuthStatus};

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracklytics_shared::User;

use crate::api::TracklyticsApi;
use crate::error::AuthError;
use crate::web::route::AuthView;

/// 认证状态
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    /// 当前用户（校验通过时存在）
    pub user: Option<User>,
    /// 首次校验或登录进行中
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    fn apply(&mut self, status: AuthStatus) {
        self.loading = !status.is_resolved();
        self.user = status.user().cloned();
    }

    pub fn view(&self) -> AuthView {
        AuthView {
            loading: self.loading,
            authenticated: self.user.is_some(),
        }
    }
}

/// 认证上下文
///
/// 包含读写信号与会话对象，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
    session: StoredValue<AuthSession>,
}

impl AuthContext {
    /// 创建新的认证上下文，状态为 Unresolved
    pub fn new(session: AuthSession) -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            session: StoredValue::new(session),
        }
    }

    /// 获取认证视图（用于路由服务注入）
    ///
    /// 写入等价的状态（如登录时先回到 Unresolved）不会通知订阅者。
    pub fn auth_view_signal(&self) -> Memo<AuthView> {
        let state = self.state;
        Memo::new(move |_| state.with(AuthState::view))
    }

    pub fn session(&self) -> AuthSession {
        self.session.get_value()
    }

    /// 附带当前凭据的 API 客户端
    pub fn api(&self) -> TracklyticsApi {
        self.session.with_value(|session| session.api().clone())
    }

    fn apply(&self, status: AuthStatus) {
        self.set_state.update(|state| state.apply(status));
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 读取已保存的凭据并向后端校验，完成前 `loading` 保持为 true。
pub fn init_auth(ctx: &AuthContext) {
    let ctx = *ctx;
    ctx.apply(AuthStatus::Unresolved);
    spawn_local(async move {
        let status = ctx.session().resolve().await;
        match status.user() {
            Some(user) => log_info!("[Auth] Signed in as {}", user.greeting_name()),
            None => log_info!("[Auth] No valid credential, signed out"),
        }
        ctx.apply(status);
    });
}

/// 使用 token 登录
///
/// 与启动流程相同：保存凭据后重新校验，结果写回认证状态。
pub async fn login(ctx: &AuthContext, token: String) -> Result<User, AuthError> {
    ctx.apply(AuthStatus::Unresolved);
    let result = ctx.session().login(&token).await;
    match &result {
        Ok(user) => ctx.apply(AuthStatus::Authenticated(user.clone())),
        Err(_) => ctx.apply(AuthStatus::Unauthenticated),
    }
    result
}

/// 注销并清除状态
///
/// 调用方负责导航到登录页；路由服务也会因认证状态变化自动重定向。
pub fn logout(ctx: &AuthContext) {
    let status = ctx.session().logout();
    ctx.apply(status);
    log_info!("[Auth] Signed out");
}
