pub(crate) mod notifier;
pub(crate) mod realtime_model;
pub(crate) mod registry;

#[cfg(feature = "ws")]
pub mod transport;

pub use notifier::{NoopNotifier, NotifierTrait, StatsNotifier};
pub use realtime_model::{
    channel_for, PushMessage, DELIVERY_STATS_CHANNEL, EXPENSE_STATS_CHANNEL, SHIFT_STATS_CHANNEL,
};
pub use registry::ConnectionRegistry;
