use serde::Serialize;

use crate::statistics::StatsKind;

/// Channel pushed when a user's delivery statistics change
pub const DELIVERY_STATS_CHANNEL: &str = "StatisticsUpdated";
/// Channel pushed when a user's shift statistics change
pub const SHIFT_STATS_CHANNEL: &str = "ShiftStatisticsUpdated";
/// Channel pushed when a user's expense statistics change
pub const EXPENSE_STATS_CHANNEL: &str = "ExpenseStatisticsUpdated";

/// Maps a snapshot kind to the channel name its subscribers listen on
pub fn channel_for(kind: StatsKind) -> &'static str {
    match kind {
        StatsKind::DeliveryStats => DELIVERY_STATS_CHANNEL,
        StatsKind::ShiftStats => SHIFT_STATS_CHANNEL,
        StatsKind::ExpenseStats => EXPENSE_STATS_CHANNEL,
    }
}

/// One message queued onto a session's outbound channel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    pub channel: &'static str,
    pub payload: serde_json::Value,
}

impl PushMessage {
    pub fn new(channel: &'static str, payload: serde_json::Value) -> Self {
        PushMessage { channel, payload }
    }
}
