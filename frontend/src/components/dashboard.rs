//! 控制面板页面
//!
//! 进入页面且用户可用时自动拉取一次人格数据；其余操作由卡片触发。

mod sections;
mod state;

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TracklyticsApi;
use crate::auth::{logout, use_auth};
use crate::config::use_config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use sections::{ActionCard, ArtistsSection, HistorySection, PersonalitySection, TracksSection};
use state::{DashboardAction, DashboardState, FollowUp, perform};

/// 启动一次操作
///
/// 同步成功后，按配置的延迟再触发一次人格数据刷新。
fn dispatch(
    state: RwSignal<DashboardState>,
    api: TracklyticsApi,
    action: DashboardAction,
    refresh_delay: Duration,
) {
    // 页面已卸载时信号失效，不再发请求
    if state.try_update(|s| s.begin(action)).is_none() {
        return;
    }

    spawn_local(async move {
        let outcome = perform(&api, action).await;
        let follow_up = state.try_update(|s| s.finish(outcome)).flatten();

        if let Some(FollowUp::RefreshPersonality) = follow_up {
            set_timeout(
                move || dispatch(state, api, DashboardAction::Personality, refresh_delay),
                refresh_delay,
            );
        }
    });
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let refresh_delay = use_config().refresh_delay;

    let state = RwSignal::new(DashboardState::default());
    let run = move |action: DashboardAction| dispatch(state, auth.api(), action, refresh_delay);

    // 用户可用时加载一次人格数据
    Effect::new(move |had_user: Option<bool>| {
        let has_user = auth.state.with(|s| s.user.is_some());
        if has_user && had_user != Some(true) {
            run(DashboardAction::Personality);
        }
        has_user
    });

    let on_logout = move |_| {
        logout(&auth);
        router.navigate_to(AppRoute::Login);
    };

    let greeting = move || {
        auth.state.with(|s| {
            let name = s.user.as_ref().map(|u| u.greeting_name()).unwrap_or("User");
            format!("Welcome back, {}", name)
        })
    };
    let data_status = move || {
        auth.state
            .with(|s| s.user.as_ref().map(|u| u.data_status()).unwrap_or("No data yet"))
    };
    let last_sync = move || {
        auth.state
            .with(|s| s.user.as_ref().and_then(|u| u.last_sync_label()))
    };

    let error = move || state.with(|s| s.error.clone());
    let sync_status = move || state.with(|s| s.sync_status.clone());

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <header class="navbar bg-base-100 shadow-xl px-4 md:px-12 py-6">
                <div class="flex-1 flex-col items-start">
                    <h1 class="text-4xl font-bold text-success">"Tracklytics"</h1>
                    <p class="text-base-content/60">"Discover your music DNA"</p>
                </div>
                <div class="flex-none flex items-center gap-6">
                    <div class="text-right">
                        <div class="font-medium">{greeting}</div>
                        <div class="text-sm text-base-content/60">{data_status}</div>
                        <div class="text-xs text-base-content/40">{last_sync}</div>
                    </div>
                    <button on:click=on_logout class="btn btn-outline btn-error">
                        "Sign Out"
                    </button>
                </div>
            </header>

            <main class="max-w-7xl mx-auto p-4 md:p-12 space-y-8">
                {move || {
                    error()
                        .map(|message| {
                            view! {
                                <div role="alert" class="alert alert-error">
                                    <span>{message}</span>
                                </div>
                            }
                        })
                }}
                {move || {
                    sync_status()
                        .map(|message| {
                            view! {
                                <div role="status" class="alert alert-success">
                                    <span>"✓ " {message}</span>
                                </div>
                            }
                        })
                }}

                <div class="grid gap-6 grid-cols-1 md:grid-cols-2 xl:grid-cols-3">
                    {DashboardAction::ALL
                        .into_iter()
                        .map(|action| {
                            let loading = Signal::derive(move || state.with(|s| s.is_loading(action)));
                            view! { <ActionCard action=action loading=loading on_run=run /> }
                        })
                        .collect_view()}
                </div>

                {move || {
                    state
                        .with(|s| s.personality.clone())
                        .map(|data| view! { <PersonalitySection data=data /> })
                }}
                {move || {
                    state
                        .with(|s| s.tracks.clone())
                        .map(|list| view! { <TracksSection list=list /> })
                }}
                {move || {
                    state
                        .with(|s| s.artists.clone())
                        .map(|list| view! { <ArtistsSection list=list /> })
                }}
                {move || {
                    state
                        .with(|s| s.history.clone())
                        .map(|history| view! { <HistorySection history=history /> })
                }}
            </main>
        </div>
    }
}
