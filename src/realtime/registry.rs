use std::collections::HashMap;

use dashmap::DashMap;
use log::debug;
use tokio::sync::mpsc::UnboundedSender;

use crate::realtime::realtime_model::PushMessage;

/// Tracks the live sessions of every connected user.
///
/// A user can hold several sessions at once (phone and laptop); each session
/// owns an unbounded sender that its transport task drains. Sessions whose
/// receiver was dropped are pruned on the next broadcast.
#[derive(Default)]
pub struct ConnectionRegistry {
    sessions: DashMap<String, HashMap<String, UnboundedSender<PushMessage>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session's outbound sender under its user
    pub fn register(&self, user_id: &str, session_id: &str, sender: UnboundedSender<PushMessage>) {
        debug!("Registering session {} for user {}", session_id, user_id);
        self.sessions
            .entry(user_id.to_string())
            .or_default()
            .insert(session_id.to_string(), sender);
    }

    /// Removes one session; the user's entry is dropped when it was the last
    pub fn unregister(&self, user_id: &str, session_id: &str) {
        debug!("Unregistering session {} for user {}", session_id, user_id);
        if let Some(mut entry) = self.sessions.get_mut(user_id) {
            entry.remove(session_id);
            if entry.is_empty() {
                drop(entry);
                self.sessions.remove_if(user_id, |_, sessions| sessions.is_empty());
            }
        }
    }

    /// Queues a message onto every live session of this user and returns how
    /// many sessions received it. Other users never see the message.
    pub fn broadcast(&self, user_id: &str, message: &PushMessage) -> usize {
        let Some(mut entry) = self.sessions.get_mut(user_id) else {
            return 0;
        };
        let mut delivered = 0;
        entry.retain(|session_id, sender| match sender.send(message.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                debug!(
                    "Pruning dead session {} for user {}",
                    session_id, user_id
                );
                false
            }
        });
        delivered
    }

    /// Number of live sessions for a user
    pub fn session_count(&self, user_id: &str) -> usize {
        self.sessions
            .get(user_id)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }
}
