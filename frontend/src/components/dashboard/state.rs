//! 控制面板状态模块
//!
//! 五个相互独立的异步操作，各自拥有 loading 标记，共享一个错误提示位（后到者覆盖）。
//! 状态转换是纯函数，渲染层只负责把 `DashboardState` 放进信号。

use tracklytics_shared::{ArtistList, PersonalityData, PersonalityHistory, SyncResult, TrackList};

use crate::api::TracklyticsApi;
use crate::error::ApiError;


/// 控制面板上的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardAction {
    Sync,
    Personality,
    Tracks,
    Artists,
    History,
}

impl DashboardAction {
    /// 卡片展示顺序
    pub const ALL: [DashboardAction; 5] = [
        DashboardAction::Sync,
        DashboardAction::Personality,
        DashboardAction::Tracks,
        DashboardAction::Artists,
        DashboardAction::History,
    ];

    /// 后端没有给出错误信息时的兜底文本
    pub fn fallback_error(&self) -> &'static str {
        match self {
            DashboardAction::Sync => "Sync failed",
            DashboardAction::Personality => "Failed to get personality analysis",
            DashboardAction::Tracks => "Failed to get tracks",
            DashboardAction::Artists => "Failed to get artists",
            DashboardAction::History => "Failed to get history",
        }
    }
}

/// 操作完成后的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Synced(SyncResult),
    Personality(PersonalityData),
    Tracks(TrackList),
    Artists(ArtistList),
    History(PersonalityHistory),
    Failed(DashboardAction, ApiError),
}

impl ActionOutcome {
    pub fn action(&self) -> DashboardAction {
        match self {
            ActionOutcome::Synced(_) => DashboardAction::Sync,
            ActionOutcome::Personality(_) => DashboardAction::Personality,
            ActionOutcome::Tracks(_) => DashboardAction::Tracks,
            ActionOutcome::Artists(_) => DashboardAction::Artists,
            ActionOutcome::History(_) => DashboardAction::History,
            ActionOutcome::Failed(action, _) => *action,
        }
    }
}

/// 需要渲染层安排的后续动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// 同步完成后重新拉取人格数据（后端可能仍在计算，由调用方决定延迟）
    RefreshPersonality,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LoadingFlags {
    sync: bool,
    personality: bool,
    tracks: bool,
    artists: bool,
    history: bool,
}

impl LoadingFlags {
    fn slot(&mut self, action: DashboardAction) -> &mut bool {
        match action {
            DashboardAction::Sync => &mut self.sync,
            DashboardAction::Personality => &mut self.personality,
            DashboardAction::Tracks => &mut self.tracks,
            DashboardAction::Artists => &mut self.artists,
            DashboardAction::History => &mut self.history,
        }
    }

    fn get(&self, action: DashboardAction) -> bool {
        match action {
            DashboardAction::Sync => self.sync,
            DashboardAction::Personality => self.personality,
            DashboardAction::Tracks => self.tracks,
            DashboardAction::Artists => self.artists,
            DashboardAction::History => self.history,
        }
    }
}

/// 控制面板的全部视图状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub personality: Option<PersonalityData>,
    pub tracks: Option<TrackList>,
    pub artists: Option<ArtistList>,
    pub history: Option<PersonalityHistory>,
    /// 最近一次同步的结果文本
    pub sync_status: Option<String>,
    /// 共享的错误提示
    pub error: Option<String>,
    loading: LoadingFlags,
}

impl DashboardState {
    pub fn is_loading(&self, action: DashboardAction) -> bool {
        self.loading.get(action)
    }

    /// 操作开始：置 loading、清空错误提示
    ///
    /// 同一操作重复触发不做去重。
    pub fn begin(&mut self, action: DashboardAction) {
        *self.loading.slot(action) = true;
        self.error = None;
        if action == DashboardAction::Sync {
            self.sync_status = None;
        }
    }

    /// 操作结束：整体替换对应数据，或写入错误提示
    pub fn finish(&mut self, outcome: ActionOutcome) -> Option<FollowUp> {
        *self.loading.slot(outcome.action()) = false;

        match outcome {
            ActionOutcome::Synced(result) => {
                self.sync_status = Some(result.summary());
                return Some(FollowUp::RefreshPersonality);
            }
            ActionOutcome::Personality(data) => self.personality = Some(data),
            ActionOutcome::Tracks(list) => self.tracks = Some(list),
            ActionOutcome::Artists(list) => self.artists = Some(list),
            ActionOutcome::History(history) => self.history = Some(history),
            ActionOutcome::Failed(action, err) => {
                self.error = Some(err.display_message(action.fallback_error()).to_string());
            }
        }
        None
    }
}

/// 执行一次操作的网络请求
pub async fn perform(api: &TracklyticsApi, action: DashboardAction) -> ActionOutcome {
    let result = match action {
        DashboardAction::Sync => api.sync().await.map(ActionOutcome::Synced),
        DashboardAction::Personality => api.personality().await.map(ActionOutcome::Personality),
        DashboardAction::Tracks => api.tracks().await.map(ActionOutcome::Tracks),
        DashboardAction::Artists => api.artists().await.map(ActionOutcome::Artists),
        DashboardAction::History => api.personality_history().await.map(ActionOutcome::History),
    };

    result.unwrap_or_else(|err| {
        log_warn!("[Dashboard] {:?} failed: {}", action, err);
        ActionOutcome::Failed(action, err)
    })
}
