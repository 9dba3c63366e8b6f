//! 控制面板的展示组件
//!
//! 操作卡片与四个数据区块。组件只接收已经拉取好的数据，不发请求。

use leptos::prelude::*;
use tracklytics_shared::{
    ArtistList, HistoryEntry, PersonalityData, PersonalityHistory, PopularityTier, TrackList,
};

use super::state::DashboardAction;

/// 卡片文案：(标题, 描述, 图标, 强调色样式)
fn card_copy(action: DashboardAction) -> (&'static str, &'static str, &'static str, &'static str) {
    match action {
        DashboardAction::Sync => (
            "Sync Data",
            "Update your music data from Spotify",
            "🔄",
            "border-warning",
        ),
        DashboardAction::Personality => (
            "Music Personality",
            "Analyze your unique listening patterns",
            "🎭",
            "border-success",
        ),
        DashboardAction::Tracks => (
            "Top Tracks",
            "View your most played songs",
            "🎵",
            "border-secondary",
        ),
        DashboardAction::Artists => (
            "Top Artists",
            "Discover your favorite musicians",
            "🎤",
            "border-info",
        ),
        DashboardAction::History => (
            "Personality History",
            "Track how your taste evolves",
            "📊",
            "border-accent",
        ),
    }
}

fn tier_badge(tier: PopularityTier) -> &'static str {
    match tier {
        PopularityTier::High => "badge badge-success badge-lg",
        PopularityTier::Medium => "badge badge-warning badge-lg",
        PopularityTier::Low => "badge badge-ghost badge-lg",
    }
}

/// 操作卡片
///
/// 点击即触发操作；loading 期间覆盖一层遮罩，但不阻止重复点击。
#[component]
pub fn ActionCard(
    action: DashboardAction,
    loading: Signal<bool>,
    #[prop(into)] on_run: Callback<DashboardAction>,
) -> impl IntoView {
    let (title, description, icon, accent) = card_copy(action);

    view! {
        <div
            role="button"
            tabindex="0"
            class=format!(
                "card bg-base-100 shadow-xl border-t-4 {} relative cursor-pointer transition hover:-translate-y-1",
                accent,
            )
            on:click=move |_| on_run.run(action)
        >
            <div class="card-body">
                <div class="text-3xl">{icon}</div>
                <h3 class="card-title">{title}</h3>
                <p class="text-base-content/70 text-sm">{description}</p>
            </div>
            <Show when=move || loading.get()>
                <div class="absolute inset-0 rounded-box bg-base-300/80 flex items-center justify-center gap-2">
                    <span class="loading loading-spinner"></span>
                    "Loading..."
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn PersonalitySection(data: PersonalityData) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl border border-success/30">
            <div class="card-body items-center text-center">
                <h2 class="text-4xl font-semibold text-success">{data.primary_personality}</h2>
                <p class="max-w-xl text-lg text-base-content/70">{data.description}</p>
                <div class="stats stats-vertical md:stats-horizontal shadow w-full mt-6">
                    <div class="stat place-items-center">
                        <div class="stat-title">"Genre Diversity"</div>
                        <div class="stat-value text-success">{data.diversity_score}</div>
                    </div>
                    <div class="stat place-items-center">
                        <div class="stat-title">"Mainstream Appeal"</div>
                        <div class="stat-value text-warning">{data.mainstream_score}</div>
                    </div>
                    <div class="stat place-items-center">
                        <div class="stat-title">"Listening Mood"</div>
                        <div class="stat-value text-info text-xl">{data.listening_mood}</div>
                    </div>
                </div>
                <div class="flex flex-wrap justify-center gap-3 mt-4">
                    {data
                        .artist_loyalty
                        .map(|loyalty| {
                            view! { <span class="badge badge-success badge-outline">"Artist loyalty: " {loyalty}</span> }
                        })}
                    {data
                        .track_length_preference
                        .map(|preference| {
                            view! { <span class="badge badge-info badge-outline">"Track length: " {preference}</span> }
                        })}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn TracksSection(list: TrackList) -> impl IntoView {
    let title = format!("Your Top Tracks ({})", list.total_tracks);
    let rows = list.visible().to_vec();

    view! {
        <div class="card bg-base-100 shadow-xl border border-secondary/30">
            <div class="card-body">
                <h3 class="card-title text-2xl text-secondary">{title}</h3>
                <ol class="space-y-2 max-h-[400px] overflow-y-auto pr-2">
                    {rows
                        .into_iter()
                        .enumerate()
                        .map(|(index, track)| {
                            let duration = track.duration_label();
                            let popularity = format!("♪ {}", track.popularity_label());
                            view! {
                                <li class="flex items-center gap-4 p-3 rounded-box bg-base-200">
                                    <span class="badge badge-secondary">{index + 1}</span>
                                    <div class="flex-1 min-w-0">
                                        <div class="font-semibold truncate">{track.name}</div>
                                        <div class="text-sm opacity-60 truncate">
                                            {track.album_name.unwrap_or_default()}
                                        </div>
                                    </div>
                                    <span class="font-mono text-sm opacity-70">{duration}</span>
                                    <span class="badge badge-outline">{popularity}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
            </div>
        </div>
    }
}

#[component]
pub fn ArtistsSection(list: ArtistList) -> impl IntoView {
    let title = format!("Your Top Artists ({})", list.total_artists);
    let rows = list.visible().to_vec();

    view! {
        <div class="card bg-base-100 shadow-xl border border-info/30">
            <div class="card-body">
                <h3 class="card-title text-2xl text-info">{title}</h3>
                <ol class="space-y-2 max-h-[400px] overflow-y-auto pr-2">
                    {rows
                        .into_iter()
                        .enumerate()
                        .map(|(index, artist)| {
                            let genres = artist.genre_summary();
                            let badge = tier_badge(artist.popularity_tier());
                            let popularity = artist.popularity_label();
                            view! {
                                <li class="flex items-center gap-4 p-3 rounded-box bg-base-200">
                                    <span class="badge badge-info">{index + 1}</span>
                                    <div class="flex-1 min-w-0">
                                        <div class="font-semibold truncate">{artist.name}</div>
                                        <div class="text-sm opacity-60 truncate">{genres}</div>
                                    </div>
                                    <span class=badge>{popularity}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
            </div>
        </div>
    }
}

#[component]
fn HistoryEntryCard(entry: HistoryEntry) -> impl IntoView {
    let analyzed_at = entry.analyzed_at.display();
    let card_class = if entry.is_latest {
        "p-4 rounded-box border-2 border-accent bg-accent/10 relative"
    } else {
        "p-4 rounded-box border border-base-300 bg-base-200 relative"
    };

    view! {
        <div class=card_class>
            {entry
                .is_latest
                .then(|| view! { <div class="badge badge-accent absolute top-3 right-3">"CURRENT"</div> })}
            <div class="flex items-baseline gap-3 mb-3">
                <h4 class="text-lg font-semibold">{entry.primary_personality}</h4>
                <span class="text-sm opacity-60">{analyzed_at}</span>
            </div>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-2 text-center">
                <div>
                    <div class="text-xs opacity-60">"Diversity"</div>
                    <div class="text-xl font-bold text-success">{entry.diversity_score}</div>
                </div>
                <div>
                    <div class="text-xs opacity-60">"Mainstream"</div>
                    <div class="text-xl font-bold text-warning">{entry.mainstream_score}</div>
                </div>
                <div>
                    <div class="text-xs opacity-60">"Mood"</div>
                    <div class="text-sm font-bold text-info">{entry.listening_mood}</div>
                </div>
                <div>
                    <div class="text-xs opacity-60">"Loyalty"</div>
                    <div class="text-sm font-bold text-success">{entry.artist_loyalty}</div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn HistorySection(history: PersonalityHistory) -> impl IntoView {
    let title = format!("Personality Timeline ({} entries)", history.total_entries);

    let body = if history.history.is_empty() {
        view! {
            <p class="text-center py-8 text-base-content/50">
                "No personality history yet. Your weekly snapshots will appear here!"
            </p>
        }
        .into_any()
    } else {
        view! {
            <div class="space-y-3">
                {history
                    .history
                    .into_iter()
                    .map(|entry| view! { <HistoryEntryCard entry=entry /> })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl border border-accent/30">
            <div class="card-body">
                <h3 class="card-title text-2xl text-accent">{title}</h3>
                {body}
            </div>
        </div>
    }
}
