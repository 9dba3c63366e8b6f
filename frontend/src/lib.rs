//! Tracklytics 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: 后端接口客户端
//! - `components`: UI 组件层

#[macro_use]
mod log;

mod api;
mod auth;
mod config;
mod error;
mod request;
mod components {
    mod auth_callback;
    pub mod dashboard;
    pub mod login;

    pub use auth_callback::AuthCallbackPage;
}

use std::sync::Arc;

use crate::api::TracklyticsApi;
use crate::auth::{AuthContext, AuthSession, CredentialStore, init_auth};
use crate::components::AuthCallbackPage;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::config::AppConfig;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::{KeyValueStore, LocalStorage, MemoryStorage};
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};
use web::{FetchClient, KeyValueStore, LocalStorage, MemoryStorage};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::AuthCallback => view! { <AuthCallbackPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        // `/` 总会被重定向，这里只是兜底
        AppRoute::Root => pending_view(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// 认证结果未定时的占位视图
fn pending_view() -> AnyView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <span class="ml-3">"Loading..."</span>
        </div>
    }
    .into_any()
}

/// 组装认证会话：凭据存储 + API 客户端
fn build_session(config: &AppConfig) -> AuthSession {
    let backend: Arc<dyn KeyValueStore> = if LocalStorage::is_available() {
        Arc::new(LocalStorage)
    } else {
        log_warn!("[App] localStorage unavailable, credentials will not survive a reload");
        Arc::new(MemoryStorage::new())
    };
    let credentials = CredentialStore::new(backend);
    let api = TracklyticsApi::new(&config.api_base_url, credentials.clone(), Arc::new(FetchClient));
    AuthSession::new(credentials, api)
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取配置
    let config = AppConfig::from_build_env();
    log_info!("[App] Using backend at {}", config.api_base_url);

    // 2. 创建认证上下文
    let auth_ctx = AuthContext::new(build_session(&config));
    provide_context(config);
    provide_context(auth_ctx);

    // 3. 初始化认证状态（读取已保存的凭据并校验）
    init_auth(&auth_ctx);

    // 4. 获取认证视图信号，用于注入路由服务（解耦！）
    let auth_view = auth_ctx.auth_view_signal();

    view! {
        // 5. 路由器组件：注入认证信号实现守卫
        <Router auth=auth_view>
            <RouterOutlet matcher=route_matcher pending=pending_view />
        </Router>
    }
}
