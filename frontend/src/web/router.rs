//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history / window.location 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, AuthView, GuardDecision};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 读取当前 URL 中的查询参数
pub fn current_query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 守卫结论（Memo）
///
/// 认证状态变化但结论不变时，不会通知订阅者，页面也就不会被重建。
pub fn guard_decision(route: Signal<AppRoute>, auth: Signal<AuthView>) -> Memo<GuardDecision> {
    Memo::new(move |_| route.get().guard(auth.get()))
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证视图信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态（注入的信号，实现解耦）
    auth: Signal<AuthView>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `auth` - 认证视图信号，由外部注入实现解耦
    fn new(auth: Signal<AuthView>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            auth,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 获取注入的认证视图信号
    pub fn auth(&self) -> Signal<AuthView> {
        self.auth
    }

    /// 当前路由的守卫结论
    pub fn decision(&self) -> Memo<GuardDecision> {
        guard_decision(self.current_route.into(), self.auth)
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate_to(&self, target_route: AppRoute) {
        let auth = self.auth.get_untracked();

        // --- Step 1: 验证目标路由 ---
        let settled = target_route.settle(auth);
        if settled != target_route {
            log_info!("[Router] {} redirected to {}", target_route, settled);
        }

        // --- Step 2: 加载页面 (更新状态) ---
        push_history_state(settled.to_path());
        self.set_route.set(settled);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let auth = self.auth;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 时也执行守卫逻辑
            let settled = target_route.settle(auth.get_untracked());
            if settled != target_route {
                replace_history_state(settled.to_path());
            }
            set_route.set(settled);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 首次运行时也会处理初始路由（如 `/` -> `/dashboard`）。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth = self.auth;

        Effect::new(move |_| {
            let auth = auth.get();
            let route = current_route.get_untracked();
            let settled = route.settle(auth);

            if settled != route {
                replace_history_state(settled.to_path());
                set_route.set(settled);
                log_info!(
                    "[Router] Auth state changed (loading={}, authenticated={}): {} -> {}",
                    auth.loading,
                    auth.authenticated,
                    route,
                    settled
                );
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(auth: Signal<AuthView>) -> RouterService {
    let router = RouterService::new(auth);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证视图信号
    #[prop(into)]
    auth: Signal<AuthView>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(auth);

    children()
}

/// 路由出口组件
///
/// 只渲染守卫允许的视图：认证未定或需要重定向时显示占位。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
    /// 等待认证结果时的占位视图
    pending: fn() -> AnyView,
) -> impl IntoView {
    let decision = use_router().decision();

    move || match decision.get() {
        GuardDecision::Render(route) => matcher(route),
        GuardDecision::Redirect(_) | GuardDecision::Pending => pending(),
    }
}
