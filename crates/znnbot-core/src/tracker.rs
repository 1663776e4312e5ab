//! Keeps the [`MembershipRegistry`] in step with `my_chat_member` updates.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::{
    domain::ConversationKind,
    membership::{extract_transition, MembershipEvent, Transition},
    registry::{MembershipRegistry, RegistrySet},
    Error, Result,
};

/// What [`record_transition`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Status did not change; event ignored.
    Ignored,
    /// Status changed but effective membership did not.
    Unchanged,
    /// Bot gained membership; id inserted.
    Joined,
    /// Bot lost membership; id removed.
    Left,
}

impl TrackOutcome {
    pub fn changed(self) -> bool {
        matches!(self, TrackOutcome::Joined | TrackOutcome::Left)
    }
}

/// Apply one membership event to `registry`.
///
/// Logs one line per effective change; ignored and unchanged events are
/// silent. Removing an id that is not present is a no-op.
pub fn record_transition(event: &MembershipEvent, registry: &mut MembershipRegistry) -> TrackOutcome {
    let Some(Transition {
        was_member,
        is_member,
    }) = extract_transition(event)
    else {
        return TrackOutcome::Ignored;
    };

    let set = RegistrySet::from(event.conversation_kind);
    let id = event.conversation_id;

    let outcome = match (was_member, is_member) {
        (false, true) => {
            registry.insert(set, id);
            TrackOutcome::Joined
        }
        (true, false) => {
            registry.remove(set, id);
            TrackOutcome::Left
        }
        _ => TrackOutcome::Unchanged,
    };

    if outcome.changed() {
        log_change(event, outcome);
    }
    outcome
}

fn log_change(event: &MembershipEvent, outcome: TrackOutcome) {
    let actor = event.actor_name.as_str();
    let id = event.conversation_id;
    let place = |kind: ConversationKind| match event.conversation_title.as_deref() {
        Some(title) => format!("{} {title}", kind.label()),
        None => kind.label().to_string(),
    };

    match (event.conversation_kind, outcome) {
        (ConversationKind::Private, TrackOutcome::Joined) => {
            tracing::info!(chat_id = %id, "{actor} unblocked the bot");
        }
        (ConversationKind::Private, _) => {
            tracing::info!(chat_id = %id, "{actor} blocked the bot");
        }
        (kind, TrackOutcome::Joined) => {
            tracing::info!(chat_id = %id, "{actor} added the bot to the {}", place(kind));
        }
        (kind, _) => {
            tracing::info!(chat_id = %id, "{actor} removed the bot from the {}", place(kind));
        }
    }
}

/// Owns the process-wide registry and its optional JSON snapshot.
///
/// Handlers run concurrently under the dispatcher, so every mutation goes
/// through the mutex. The snapshot is rewritten after each effective change
/// and once more on [`ChatTracker::flush`]. File writes run on the blocking
/// pool with the lock held, so snapshots land in order.
pub struct ChatTracker {
    registry: Mutex<MembershipRegistry>,
    snapshot_path: Option<PathBuf>,
}

impl ChatTracker {
    /// Start from an existing registry without persistence.
    pub fn in_memory(registry: MembershipRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
            snapshot_path: None,
        }
    }

    /// Load the snapshot at `path` if present, otherwise start empty.
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        let registry = match &path {
            Some(p) => MembershipRegistry::load(p)?.unwrap_or_default(),
            None => MembershipRegistry::new(),
        };
        if let Some(p) = &path {
            tracing::info!(
                path = %p.display(),
                private_chats = registry.private_chat_ids().len(),
                groups = registry.group_ids().len(),
                channels = registry.channel_ids().len(),
                "loaded chat registry"
            );
        }
        Ok(Self {
            registry: Mutex::new(registry),
            snapshot_path: path,
        })
    }

    pub async fn apply(&self, event: &MembershipEvent) -> TrackOutcome {
        let mut registry = self.registry.lock().await;
        let outcome = record_transition(event, &mut registry);

        if outcome.changed() {
            if let Some(path) = &self.snapshot_path {
                if let Err(e) = persist(registry.clone(), path.clone()).await {
                    tracing::warn!(path = %path.display(), "failed to persist chat registry: {e}");
                }
            }
        }
        outcome
    }

    pub async fn snapshot(&self) -> MembershipRegistry {
        self.registry.lock().await.clone()
    }

    pub async fn flush(&self) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let registry = self.registry.lock().await;
        persist(registry.clone(), path.clone()).await
    }
}

async fn persist(registry: MembershipRegistry, path: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || registry.save(&path))
        .await
        .map_err(|e| Error::External(format!("registry save task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::{domain::ChatId, membership::MembershipStatus::*};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a plain-text subscriber and return what it logged.
    fn captured_logs(f: impl FnOnce()) -> String {
        let buf = LogBuffer::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn tmp_file(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    fn registry_with(set: RegistrySet, id: i64) -> MembershipRegistry {
        let mut reg = MembershipRegistry::new();
        reg.insert(set, ChatId(id));
        reg
    }

    #[test]
    fn private_chat_joined() {
        let mut reg = MembershipRegistry::new();
        let ev = MembershipEvent::new(ChatId(42), ConversationKind::Private, Left, Member)
            .with_actor("Alice");

        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Joined);
        assert_eq!(reg, registry_with(RegistrySet::PrivateChats, 42));
    }

    #[test]
    fn group_kick_removes_id() {
        let mut reg = registry_with(RegistrySet::Groups, 7);
        let ev = MembershipEvent::new(ChatId(7), ConversationKind::Group, Member, Kicked)
            .with_title("ZNN Traders");

        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Left);
        assert!(reg.group_ids().is_empty());
    }

    #[test]
    fn same_status_in_channel_is_ignored() {
        let mut reg = registry_with(RegistrySet::Channels, 3);
        let before = reg.clone();
        let ev = MembershipEvent::new(
            ChatId(3),
            ConversationKind::Channel,
            Administrator,
            Administrator,
        );

        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Ignored);
        assert_eq!(reg, before);
    }

    #[test]
    fn restricted_flag_flip_leaves_empty_registry_empty() {
        let mut reg = MembershipRegistry::new();
        let ev = MembershipEvent::new(ChatId(9), ConversationKind::Group, Restricted, Restricted)
            .with_flags(Some(true), Some(false));

        record_transition(&ev, &mut reg);
        assert!(reg.is_empty());
    }

    #[test]
    fn leaving_unknown_chat_is_noop() {
        let mut reg = MembershipRegistry::new();
        let ev = MembershipEvent::new(ChatId(9), ConversationKind::Supergroup, Member, Left);

        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Left);
        assert!(reg.is_empty());
    }

    #[test]
    fn unchanged_membership_is_idempotent() {
        let mut reg = registry_with(RegistrySet::Groups, -55);
        let before = reg.clone();
        let ev = MembershipEvent::new(ChatId(-55), ConversationKind::Supergroup, Member, Administrator);

        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Unchanged);
        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Unchanged);
        assert_eq!(reg, before);

        let ev = MembershipEvent::new(ChatId(-55), ConversationKind::Supergroup, Left, Kicked);
        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Unchanged);
        assert_eq!(reg, before);
    }

    #[test]
    fn unknown_status_counts_as_not_member() {
        let mut reg = MembershipRegistry::new();
        let ev = MembershipEvent::new(ChatId(11), ConversationKind::Channel, Unknown, Administrator);

        assert_eq!(record_transition(&ev, &mut reg), TrackOutcome::Joined);
        assert!(reg.channel_ids().contains(&ChatId(11)));
    }

    #[test]
    fn group_join_is_logged_with_actor_and_title() {
        let mut reg = MembershipRegistry::new();
        let ev = MembershipEvent::new(ChatId(-4001), ConversationKind::Group, Left, Member)
            .with_title("ZNN Traders")
            .with_actor("Alice");

        let logs = captured_logs(|| {
            record_transition(&ev, &mut reg);
        });
        assert!(logs.contains("Alice added the bot to the group ZNN Traders"), "{logs}");
        assert_eq!(logs.lines().count(), 1, "{logs}");
    }

    #[test]
    fn private_kick_is_logged_as_block() {
        let mut reg = registry_with(RegistrySet::PrivateChats, 42);
        let ev = MembershipEvent::new(ChatId(42), ConversationKind::Private, Member, Kicked)
            .with_actor("Alice");

        let logs = captured_logs(|| {
            record_transition(&ev, &mut reg);
        });
        assert!(logs.contains("Alice blocked the bot"), "{logs}");
    }

    #[test]
    fn untitled_group_log_has_no_trailing_space() {
        let mut reg = MembershipRegistry::new();
        let ev = MembershipEvent::new(ChatId(5), ConversationKind::Group, Left, Member)
            .with_actor("Alice");

        let logs = captured_logs(|| {
            record_transition(&ev, &mut reg);
        });
        assert!(logs.contains("Alice added the bot to the group"), "{logs}");
        assert!(!logs.contains("group  "), "{logs:?}");
        assert!(!logs.contains("group \n"), "{logs:?}");
    }

    #[test]
    fn ignored_and_unchanged_events_log_nothing() {
        let mut reg = registry_with(RegistrySet::Channels, 3);
        let same = MembershipEvent::new(
            ChatId(3),
            ConversationKind::Channel,
            Administrator,
            Administrator,
        )
        .with_actor("Alice");
        let unchanged =
            MembershipEvent::new(ChatId(3), ConversationKind::Channel, Member, Administrator)
                .with_actor("Alice");

        let logs = captured_logs(|| {
            assert_eq!(record_transition(&same, &mut reg), TrackOutcome::Ignored);
            assert_eq!(record_transition(&unchanged, &mut reg), TrackOutcome::Unchanged);
            assert_eq!(record_transition(&unchanged, &mut reg), TrackOutcome::Unchanged);
        });
        assert!(logs.is_empty(), "{logs}");
    }

    #[tokio::test]
    async fn tracker_persists_only_effective_changes() {
        let path = tmp_file("znnbot-tracker");
        let tracker = ChatTracker::open(Some(path.clone())).unwrap();

        let ignored = MembershipEvent::new(ChatId(1), ConversationKind::Group, Member, Member);
        assert_eq!(tracker.apply(&ignored).await, TrackOutcome::Ignored);
        assert!(!path.exists());

        let joined = MembershipEvent::new(ChatId(1), ConversationKind::Group, Left, Member);
        assert_eq!(tracker.apply(&joined).await, TrackOutcome::Joined);
        assert!(path.exists());

        let reopened = ChatTracker::open(Some(path.clone())).unwrap();
        assert_eq!(
            reopened.snapshot().await,
            registry_with(RegistrySet::Groups, 1)
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn in_memory_tracker_flush_is_noop() {
        let tracker = ChatTracker::in_memory(registry_with(RegistrySet::PrivateChats, 8));
        tracker.flush().await.unwrap();

        let ev = MembershipEvent::new(ChatId(8), ConversationKind::Private, Member, Kicked);
        assert_eq!(tracker.apply(&ev).await, TrackOutcome::Left);
        assert!(tracker.snapshot().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_changes_all_reach_snapshot() {
        let path = tmp_file("znnbot-concurrent");
        let tracker = Arc::new(ChatTracker::open(Some(path.clone())).unwrap());

        let tasks: Vec<_> = (1..=16)
            .map(|id| {
                let tracker = tracker.clone();
                tokio::spawn(async move {
                    let ev = MembershipEvent::new(ChatId(id), ConversationKind::Group, Left, Member);
                    tracker.apply(&ev).await
                })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap(), TrackOutcome::Joined);
        }

        let reopened = ChatTracker::open(Some(path.clone())).unwrap();
        assert_eq!(reopened.snapshot().await.group_ids().len(), 16);

        tracker.flush().await.unwrap();
        let reopened = ChatTracker::open(Some(path.clone())).unwrap();
        assert_eq!(reopened.snapshot().await, tracker.snapshot().await);

        let _ = std::fs::remove_file(&path);
    }
}
