use std::sync::Arc;

use log::{debug, warn};

use crate::realtime::realtime_model::{channel_for, PushMessage};
use crate::realtime::registry::ConnectionRegistry;
use crate::statistics::{StatisticsServiceTrait, StatsKind};

/// Trait for pushing recomputed snapshots after a committed mutation
pub trait NotifierTrait: Send + Sync {
    /// Recomputes the named snapshots for the user and pushes each one to
    /// every live session. Must only be called after the commit.
    fn notify(&self, user_id: &str, kinds: &[StatsKind]);
}

/// Recompute-and-push notifier backed by the connection registry.
///
/// Failures here are logged and swallowed; a push problem must never undo
/// or fail a mutation that already committed.
pub struct StatsNotifier {
    registry: Arc<ConnectionRegistry>,
    statistics_service: Arc<dyn StatisticsServiceTrait>,
}

impl StatsNotifier {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        statistics_service: Arc<dyn StatisticsServiceTrait>,
    ) -> Self {
        StatsNotifier {
            registry,
            statistics_service,
        }
    }

    fn snapshot_payload(&self, user_id: &str, kind: StatsKind) -> Option<serde_json::Value> {
        let result = match kind {
            StatsKind::DeliveryStats => self
                .statistics_service
                .calculate_delivery_stats(user_id)
                .and_then(|stats| serde_json::to_value(stats).map_err(Into::into)),
            StatsKind::ShiftStats => self
                .statistics_service
                .calculate_shift_stats(user_id)
                .and_then(|stats| serde_json::to_value(stats).map_err(Into::into)),
            StatsKind::ExpenseStats => self
                .statistics_service
                .calculate_expense_stats(user_id)
                .and_then(|stats| serde_json::to_value(stats).map_err(Into::into)),
        };
        match result {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(
                    "Failed to recompute {:?} for user {}: {}",
                    kind, user_id, e
                );
                None
            }
        }
    }
}

impl NotifierTrait for StatsNotifier {
    fn notify(&self, user_id: &str, kinds: &[StatsKind]) {
        for kind in kinds {
            // Skip the recompute entirely when nobody is listening
            if self.registry.session_count(user_id) == 0 {
                debug!("No live sessions for user {}, skipping push", user_id);
                return;
            }
            if let Some(payload) = self.snapshot_payload(user_id, *kind) {
                let message = PushMessage::new(channel_for(*kind), payload);
                let delivered = self.registry.broadcast(user_id, &message);
                debug!(
                    "Pushed {} to {} session(s) of user {}",
                    message.channel, delivered, user_id
                );
            }
        }
    }
}

/// Notifier that drops everything, for contexts with no live transport
#[derive(Default)]
pub struct NoopNotifier;

impl NotifierTrait for NoopNotifier {
    fn notify(&self, _user_id: &str, _kinds: &[StatsKind]) {}
}
