//! 外部登录回调页面
//!
//! 从 `?token=` 中取出凭据并登录，随后交给路由守卫决定去向。

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracklytics_shared::CALLBACK_TOKEN_PARAM;

use crate::auth::{login, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::{current_query_param, use_router};

/// 回调参数中的 token，空白视为缺失
fn callback_token(param: Option<String>) -> Option<String> {
    param
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    // 只在挂载时运行一次（没有追踪任何信号）
    Effect::new(move |_| {
        match callback_token(current_query_param(CALLBACK_TOKEN_PARAM)) {
            Some(token) => spawn_local(async move {
                // 校验失败时用户为空，面板守卫会再重定向到登录页
                if let Err(e) = login(&auth, token).await {
                    log_warn!("[AuthCallback] Callback token rejected: {}", e);
                }
                router.navigate_to(AppRoute::Dashboard);
            }),
            None => {
                log_warn!("[AuthCallback] No token in callback URL");
                router.navigate_to(AppRoute::Login);
            }
        }
    });

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200 gap-3">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <span>"Processing authentication..."</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_taken_from_the_query() {
        assert_eq!(
            callback_token(Some("abc123".to_string())).as_deref(),
            Some("abc123")
        );
        assert_eq!(
            callback_token(Some(" abc123\n".to_string())).as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn missing_or_blank_token_is_absent() {
        assert_eq!(callback_token(None), None);
        assert_eq!(callback_token(Some(String::new())), None);
        assert_eq!(callback_token(Some("   ".to_string())), None);
    }
}
