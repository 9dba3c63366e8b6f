use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DISPLAY_LIMIT, Timestamp};

// =========================================================
// 通用类型
// =========================================================

/// 后端实体 ID
///
/// 数据库主键是整数，部分接口直接返回 Spotify ID 字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

/// 后端错误响应体
///
/// 业务接口使用 `message`，部分旧接口使用 `error`。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// 取出可展示的错误信息，空字符串视为缺失
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.filter(|m| !m.trim().is_empty()))
    }
}

// =========================================================
// 用户 (User)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub has_data: bool,
    #[serde(default)]
    pub last_sync_time: Option<Timestamp>,
}

impl User {
    /// 欢迎语中使用的名字，缺失时回退为 "User"
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("User")
    }

    /// 最近一次同步时间，从未同步时为 `None`
    pub fn last_sync_label(&self) -> Option<String> {
        self.last_sync_time.as_ref().map(|ts| format!("Last sync: {}", ts.display()))
    }

    pub fn data_status(&self) -> &'static str {
        if self.has_data {
            "Data synced"
        } else {
            "No data yet"
        }
    }
}

// =========================================================
// 同步 (Sync)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub tracks_count: u32,
    pub artists_count: u32,
}

impl SyncResult {
    pub fn summary(&self) -> String {
        format!(
            "Synced {} tracks and {} artists",
            self.tracks_count, self.artists_count
        )
    }
}

// =========================================================
// 听歌人格 (Personality)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityData {
    pub primary_personality: String,
    #[serde(default)]
    pub description: String,
    pub diversity_score: u32,
    pub mainstream_score: u32,
    #[serde(default)]
    pub listening_mood: String,
    #[serde(default)]
    pub artist_loyalty: Option<String>,
    #[serde(default)]
    pub track_length_preference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: EntityId,
    pub analyzed_at: Timestamp,
    #[serde(default)]
    pub is_latest: bool,
    pub primary_personality: String,
    pub diversity_score: u32,
    pub mainstream_score: u32,
    #[serde(default)]
    pub listening_mood: String,
    #[serde(default)]
    pub artist_loyalty: String,
}

/// 人格历史快照，顺序与 `isLatest` 标记均由后端决定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityHistory {
    pub total_entries: u32,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

// =========================================================
// 曲目 / 艺人 (Tracks / Artists)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u32>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl Track {
    /// `m:ss` 格式的时长，缺失或为 0 时显示 "N/A"
    pub fn duration_label(&self) -> String {
        match self.duration_ms {
            Some(ms) if ms > 0 => format!("{}:{:02}", ms / 60_000, (ms % 60_000) / 1000),
            _ => "N/A".to_string(),
        }
    }

    pub fn popularity_label(&self) -> String {
        popularity_label(self.popularity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackList {
    pub total_tracks: u32,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl TrackList {
    /// 界面展示的前 `DISPLAY_LIMIT` 首
    pub fn visible(&self) -> &[Track] {
        &self.tracks[..self.tracks.len().min(DISPLAY_LIMIT)]
    }
}

/// 艺人热度分档，决定徽章配色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularityTier {
    High,
    Medium,
    Low,
}

impl PopularityTier {
    pub fn from_score(score: Option<u32>) -> Self {
        match score.unwrap_or(0) {
            s if s >= 70 => PopularityTier::High,
            s if s >= 50 => PopularityTier::Medium,
            _ => PopularityTier::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: EntityId,
    pub name: String,
    /// 逗号分隔的流派列表
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl Artist {
    /// 最多展示的流派数量
    pub const GENRE_PREVIEW: usize = 3;

    /// 前三个流派，逗号连接
    pub fn genre_summary(&self) -> String {
        let genres: Vec<&str> = self
            .genres
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .take(Self::GENRE_PREVIEW)
            .collect();

        if genres.is_empty() {
            "No genres available".to_string()
        } else {
            genres.join(", ")
        }
    }

    pub fn popularity_tier(&self) -> PopularityTier {
        PopularityTier::from_score(self.popularity)
    }

    pub fn popularity_label(&self) -> String {
        popularity_label(self.popularity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistList {
    pub total_artists: u32,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl ArtistList {
    pub fn visible(&self) -> &[Artist] {
        &self.artists[..self.artists.len().min(DISPLAY_LIMIT)]
    }
}

fn popularity_label(popularity: Option<u32>) -> String {
    match popularity {
        Some(p) if p > 0 => p.to_string(),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(genres: Option<&str>, popularity: Option<u32>) -> Artist {
        Artist {
            id: EntityId::Number(1),
            name: "Radiohead".to_string(),
            genres: genres.map(str::to_string),
            popularity,
        }
    }

    #[test]
    fn user_parses_with_unknown_fields_and_missing_flags() {
        let user: User = serde_json::from_str(
            r#"{"displayName":"Ada","spotifyId":"ada42","followers":{"total":3.5}}"#,
        )
        .unwrap();
        assert_eq!(user.greeting_name(), "Ada");
        assert!(!user.has_data);
        assert_eq!(user.data_status(), "No data yet");
    }

    #[test]
    fn last_sync_is_shown_only_after_a_sync() {
        let user: User = serde_json::from_str(
            r#"{"displayName":"Ada","hasData":true,"lastSyncTime":"2024-05-01T11:30:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(user.last_sync_label().as_deref(), Some("Last sync: 2024-05-01 09:30"));

        let user: User = serde_json::from_str(r#"{"displayName":"Ada"}"#).unwrap();
        assert_eq!(user.last_sync_label(), None);
    }

    #[test]
    fn greeting_falls_back_to_generic_name() {
        let user: User = serde_json::from_str(r#"{"displayName":"  ","hasData":true}"#).unwrap();
        assert_eq!(user.greeting_name(), "User");
        assert_eq!(user.data_status(), "Data synced");
    }

    #[test]
    fn sync_summary_text() {
        let result: SyncResult =
            serde_json::from_str(r#"{"tracksCount":120,"artistsCount":45}"#).unwrap();
        assert_eq!(result.summary(), "Synced 120 tracks and 45 artists");
    }

    #[test]
    fn track_duration_is_minutes_and_padded_seconds() {
        let mut track = Track {
            id: EntityId::Text("4uLU6hMCjMI75M1A2tKUQC".to_string()),
            name: "Never Gonna Give You Up".to_string(),
            album_name: None,
            duration_ms: Some(213_573),
            popularity: None,
        };
        assert_eq!(track.duration_label(), "3:33");
        track.duration_ms = Some(61_000);
        assert_eq!(track.duration_label(), "1:01");
        track.duration_ms = None;
        assert_eq!(track.duration_label(), "N/A");
        assert_eq!(track.popularity_label(), "N/A");
    }

    #[test]
    fn genre_summary_keeps_first_three_trimmed() {
        let a = artist(Some("art rock, alternative rock,electronic , permanent wave"), None);
        assert_eq!(a.genre_summary(), "art rock, alternative rock, electronic");
        assert_eq!(artist(None, None).genre_summary(), "No genres available");
        assert_eq!(artist(Some(" , "), None).genre_summary(), "No genres available");
    }

    #[test]
    fn popularity_tiers() {
        assert_eq!(artist(None, Some(70)).popularity_tier(), PopularityTier::High);
        assert_eq!(artist(None, Some(69)).popularity_tier(), PopularityTier::Medium);
        assert_eq!(artist(None, Some(50)).popularity_tier(), PopularityTier::Medium);
        assert_eq!(artist(None, Some(12)).popularity_tier(), PopularityTier::Low);
        assert_eq!(artist(None, None).popularity_tier(), PopularityTier::Low);
    }

    #[test]
    fn lists_are_truncated_for_display() {
        let artists = (0..14)
            .map(|i| Artist {
                id: EntityId::Number(i),
                name: format!("artist {}", i),
                genres: None,
                popularity: Some(40),
            })
            .collect();
        let list = ArtistList {
            total_artists: 14,
            artists,
        };
        assert_eq!(list.visible().len(), DISPLAY_LIMIT);
        assert_eq!(list.visible()[9].name, "artist 9");

        let short = TrackList {
            total_tracks: 0,
            tracks: Vec::new(),
        };
        assert!(short.visible().is_empty());
    }

    #[test]
    fn history_keeps_backend_order() {
        let history: PersonalityHistory = serde_json::from_str(
            r#"{"totalEntries":2,"history":[
                {"id":7,"analyzedAt":"2024-05-08T10:00:00Z","isLatest":true,
                 "primaryPersonality":"Explorer","diversityScore":80,"mainstreamScore":30,
                 "listeningMood":"Adventurous","artistLoyalty":"Low"},
                {"id":3,"analyzedAt":"2024-05-01T10:00:00Z","isLatest":false,
                 "primaryPersonality":"Loyalist","diversityScore":20,"mainstreamScore":60,
                 "listeningMood":"Steady","artistLoyalty":"High"}]}"#,
        )
        .unwrap();
        assert_eq!(history.history[0].id, EntityId::Number(7));
        assert!(history.history[0].is_latest);
        assert_eq!(history.history[1].analyzed_at.display(), "2024-05-01 10:00");
    }

    #[test]
    fn error_body_prefers_message_over_error() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"token expired","error":"Unauthorized"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("token expired"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"User not found"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("User not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":""}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
