//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由以及守卫规则。

use std::fmt::Display;

/// 重定向链的最大长度（`/` -> `/dashboard` -> `/login`）
const MAX_REDIRECTS: usize = 4;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 根路径，始终重定向到面板
    #[default]
    Root,
    /// 登录页面
    Login,
    /// 外部登录完成后的回调，携带 `?token=`
    AuthCallback,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 页面未找到
    NotFound,
}

/// 路由守卫看到的认证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthView {
    /// 认证状态仍在判定中
    pub loading: bool,
    /// 存在已校验的用户
    pub authenticated: bool,
}

/// 守卫对某个路由的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 渲染该路由的视图
    Render(AppRoute),
    /// 替换为另一个路由
    Redirect(AppRoute),
    /// 认证状态未定，显示占位
    Pending,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Root,
            "/login" => Self::Login,
            "/auth/callback" => Self::AuthCallback,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::AuthCallback => "/auth/callback",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 守卫：根据认证状态决定渲染、重定向或等待
    pub fn guard(&self, auth: AuthView) -> GuardDecision {
        if *self == Self::Root {
            return GuardDecision::Redirect(Self::Dashboard);
        }

        if self.requires_auth() {
            if auth.loading {
                return GuardDecision::Pending;
            }
            if !auth.authenticated {
                return GuardDecision::Redirect(Self::auth_failure_redirect());
            }
        }

        if self.should_redirect_when_authenticated() && auth.authenticated && !auth.loading {
            return GuardDecision::Redirect(Self::auth_success_redirect());
        }

        GuardDecision::Render(*self)
    }

    /// 沿着重定向链找到最终落脚的路由
    pub fn settle(self, auth: AuthView) -> Self {
        let mut route = self;
        for _ in 0..MAX_REDIRECTS {
            match route.guard(auth) {
                GuardDecision::Redirect(next) => route = next,
                _ => break,
            }
        }
        route
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADING: AuthView = AuthView {
        loading: true,
        authenticated: false,
    };
    const SIGNED_OUT: AuthView = AuthView {
        loading: false,
        authenticated: false,
    };
    const SIGNED_IN: AuthView = AuthView {
        loading: false,
        authenticated: true,
    };

    #[test]
    fn parses_static_route_table() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Root);
        assert_eq!(AppRoute::from_path(""), AppRoute::Root);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/auth/callback"), AppRoute::AuthCallback);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/settings"), AppRoute::NotFound);

        for route in [AppRoute::Login, AppRoute::AuthCallback, AppRoute::Dashboard] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn dashboard_is_never_rendered_without_user() {
        for auth in [
            LOADING,
            SIGNED_OUT,
            AuthView {
                loading: true,
                authenticated: true,
            },
        ] {
            assert!(
                !matches!(AppRoute::Dashboard.guard(auth), GuardDecision::Render(_)),
                "{:?}",
                auth
            );
        }
        assert_eq!(
            AppRoute::Dashboard.guard(SIGNED_IN),
            GuardDecision::Render(AppRoute::Dashboard)
        );
    }

    #[test]
    fn dashboard_waits_while_resolving() {
        assert_eq!(AppRoute::Dashboard.guard(LOADING), GuardDecision::Pending);
    }

    #[test]
    fn absent_credential_redirects_dashboard_to_login() {
        assert_eq!(
            AppRoute::Dashboard.guard(SIGNED_OUT),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(AppRoute::Root.settle(SIGNED_OUT), AppRoute::Login);
    }

    #[test]
    fn root_redirects_to_dashboard() {
        assert_eq!(
            AppRoute::Root.guard(LOADING),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(AppRoute::Root.settle(LOADING), AppRoute::Dashboard);
        assert_eq!(AppRoute::Root.settle(SIGNED_IN), AppRoute::Dashboard);
    }

    #[test]
    fn login_redirects_only_once_resolved() {
        assert_eq!(
            AppRoute::Login.guard(LOADING),
            GuardDecision::Render(AppRoute::Login)
        );
        assert_eq!(
            AppRoute::Login.guard(SIGNED_OUT),
            GuardDecision::Render(AppRoute::Login)
        );
        assert_eq!(
            AppRoute::Login.guard(SIGNED_IN),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn callback_and_not_found_always_render() {
        for auth in [LOADING, SIGNED_OUT, SIGNED_IN] {
            assert_eq!(
                AppRoute::AuthCallback.guard(auth),
                GuardDecision::Render(AppRoute::AuthCallback)
            );
            assert_eq!(
                AppRoute::NotFound.guard(auth),
                GuardDecision::Render(AppRoute::NotFound)
            );
        }
    }
}
