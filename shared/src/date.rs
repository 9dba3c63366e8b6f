//! 时间类型模块
//!
//! 后端的 `Instant` 字段可能被序列化为 RFC 3339 字符串，
//! 也可能是以秒为单位的数字（带小数的纳秒部分），这里统一两种形态。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 展示格式：`2024-05-01 09:30`（UTC）
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// 自 Unix 纪元以来的秒数
    Epoch(f64),
    /// ISO 8601 / RFC 3339 字符串
    Text(String),
}

impl Timestamp {
    /// 解析为 UTC 时间，无法识别时返回 None
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Epoch(secs) => {
                if !secs.is_finite() {
                    return None;
                }
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9).round() as u32;
                DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
            }
            Timestamp::Text(raw) => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// 用于界面展示的文本
    ///
    /// 解析失败时原样返回，不吞掉后端给出的值。
    pub fn display(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => match self {
                Timestamp::Epoch(secs) => secs.to_string(),
                Timestamp::Text(raw) => raw.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_text_is_rendered_in_utc() {
        let ts = Timestamp::Text("2024-05-01T11:30:00+02:00".to_string());
        assert_eq!(ts.display(), "2024-05-01 09:30");
    }

    #[test]
    fn epoch_seconds_with_fraction() {
        let ts: Timestamp = serde_json::from_str("1714555800.123456789").unwrap();
        assert!(matches!(ts, Timestamp::Epoch(_)));
        assert_eq!(ts.display(), "2024-05-01 09:30");
    }

    #[test]
    fn unparseable_text_is_kept_verbatim() {
        let ts: Timestamp = serde_json::from_str("\"last tuesday\"").unwrap();
        assert_eq!(ts.to_datetime(), None);
        assert_eq!(ts.display(), "last tuesday");
    }
}
