//! Registry of conversations the bot currently belongs to.

use std::{collections::BTreeSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{ChatId, ConversationKind},
    Result,
};

/// Which of the three id sets a conversation lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistrySet {
    PrivateChats,
    Groups,
    Channels,
}

impl From<ConversationKind> for RegistrySet {
    fn from(kind: ConversationKind) -> Self {
        match kind {
            ConversationKind::Private => RegistrySet::PrivateChats,
            ConversationKind::Group | ConversationKind::Supergroup => RegistrySet::Groups,
            ConversationKind::Channel => RegistrySet::Channels,
        }
    }
}

/// Conversation ids partitioned by kind.
///
/// An id is present in at most one set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRegistry {
    #[serde(default)]
    private_chat_ids: BTreeSet<ChatId>,
    #[serde(default)]
    group_ids: BTreeSet<ChatId>,
    #[serde(default)]
    channel_ids: BTreeSet<ChatId>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn private_chat_ids(&self) -> &BTreeSet<ChatId> {
        &self.private_chat_ids
    }

    pub fn group_ids(&self) -> &BTreeSet<ChatId> {
        &self.group_ids
    }

    pub fn channel_ids(&self) -> &BTreeSet<ChatId> {
        &self.channel_ids
    }

    pub fn ids(&self, set: RegistrySet) -> &BTreeSet<ChatId> {
        match set {
            RegistrySet::PrivateChats => &self.private_chat_ids,
            RegistrySet::Groups => &self.group_ids,
            RegistrySet::Channels => &self.channel_ids,
        }
    }

    fn ids_mut(&mut self, set: RegistrySet) -> &mut BTreeSet<ChatId> {
        match set {
            RegistrySet::PrivateChats => &mut self.private_chat_ids,
            RegistrySet::Groups => &mut self.group_ids,
            RegistrySet::Channels => &mut self.channel_ids,
        }
    }

    pub fn contains(&self, id: ChatId) -> bool {
        self.find(id).is_some()
    }

    /// The set holding `id`, if any.
    pub fn find(&self, id: ChatId) -> Option<RegistrySet> {
        [
            RegistrySet::PrivateChats,
            RegistrySet::Groups,
            RegistrySet::Channels,
        ]
        .into_iter()
        .find(|set| self.ids(*set).contains(&id))
    }

    pub fn len(&self) -> usize {
        self.private_chat_ids.len() + self.group_ids.len() + self.channel_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `id` into `set`. Returns `false` if it was already there.
    ///
    /// The id is dropped from the other two sets first.
    pub fn insert(&mut self, set: RegistrySet, id: ChatId) -> bool {
        for other in [
            RegistrySet::PrivateChats,
            RegistrySet::Groups,
            RegistrySet::Channels,
        ] {
            if other != set {
                self.ids_mut(other).remove(&id);
            }
        }
        self.ids_mut(set).insert(id)
    }

    /// Remove `id` from `set`. Returns `false` if it was not there.
    pub fn remove(&mut self, set: RegistrySet, id: ChatId) -> bool {
        self.ids_mut(set).remove(&id)
    }

    /// Load a JSON snapshot. A missing or blank file yields `None`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let txt = std::fs::read_to_string(path)?;
        if txt.trim().is_empty() {
            return Ok(None);
        }
        let file: RegistryFile = serde_json::from_str(&txt)?;
        Ok(Some(file.registry))
    }

    /// Write a JSON snapshot, replacing any previous one.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = RegistryFile {
            saved_at: crate::utils::iso_timestamp_utc(),
            registry: self.clone(),
        };
        let txt = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write a sibling file, then rename it over the target.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, txt)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    saved_at: String,
    #[serde(flatten)]
    registry: MembershipRegistry,
}
