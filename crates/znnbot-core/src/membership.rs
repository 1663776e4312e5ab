//! Membership status classification and transition extraction.
//!
//! Telegram reports the bot's own membership changes as a pair of snapshots
//! (`old_chat_member`, `new_chat_member`). This module reduces such a pair to
//! two booleans: was the bot a member before, and is it a member now.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{ChatId, ConversationKind};

/// Membership status of the bot in a conversation, as reported by Telegram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Telegram's wire name is `creator`.
    #[serde(alias = "creator")]
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
    /// A status this build does not know about.
    #[serde(other)]
    Unknown,
}

impl FromStr for MembershipStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "owner" | "creator" => MembershipStatus::Owner,
            "administrator" => MembershipStatus::Administrator,
            "member" => MembershipStatus::Member,
            "restricted" => MembershipStatus::Restricted,
            "left" => MembershipStatus::Left,
            "kicked" | "banned" => MembershipStatus::Kicked,
            _ => MembershipStatus::Unknown,
        })
    }
}

/// Whether `status` means the bot is actively in the conversation.
///
/// `aux_is_member` is Telegram's `is_member` flag and only matters for
/// `Restricted`; an absent flag counts as not a member.
pub fn is_active_member(status: MembershipStatus, aux_is_member: Option<bool>) -> bool {
    match status {
        MembershipStatus::Member | MembershipStatus::Owner | MembershipStatus::Administrator => {
            true
        }
        MembershipStatus::Restricted => aux_is_member == Some(true),
        MembershipStatus::Left | MembershipStatus::Kicked | MembershipStatus::Unknown => false,
    }
}

/// One observed change to the bot's relationship with a conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipEvent {
    pub old_status: MembershipStatus,
    pub new_status: MembershipStatus,
    pub old_is_member: Option<bool>,
    pub new_is_member: Option<bool>,
    pub conversation_id: ChatId,
    pub conversation_kind: ConversationKind,
    pub conversation_title: Option<String>,
    /// Display name of whoever caused the change.
    pub actor_name: String,
}

impl MembershipEvent {
    /// Event with no auxiliary flags, no title and an anonymous actor.
    pub fn new(
        conversation_id: ChatId,
        conversation_kind: ConversationKind,
        old_status: MembershipStatus,
        new_status: MembershipStatus,
    ) -> Self {
        Self {
            old_status,
            new_status,
            old_is_member: None,
            new_is_member: None,
            conversation_id,
            conversation_kind,
            conversation_title: None,
            actor_name: String::new(),
        }
    }

    pub fn with_flags(mut self, old_is_member: Option<bool>, new_is_member: Option<bool>) -> Self {
        self.old_is_member = old_is_member;
        self.new_is_member = new_is_member;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.conversation_title = Some(title.into());
        self
    }

    pub fn with_actor(mut self, actor_name: impl Into<String>) -> Self {
        self.actor_name = actor_name.into();
        self
    }
}

/// Effective membership before and after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub was_member: bool,
    pub is_member: bool,
}

/// Reduce an event to a [`Transition`].
///
/// Returns `None` when the status did not change; such events are ignored
/// whatever their `is_member` flags say.
pub fn extract_transition(event: &MembershipEvent) -> Option<Transition> {
    if event.old_status == event.new_status {
        return None;
    }

    Some(Transition {
        was_member: is_active_member(event.old_status, event.old_is_member),
        is_member: is_active_member(event.new_status, event.new_is_member),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::MembershipStatus::*;

    const FLAGS: [Option<bool>; 3] = [None, Some(false), Some(true)];

    fn event(old: MembershipStatus, new: MembershipStatus) -> MembershipEvent {
        MembershipEvent::new(ChatId(1), ConversationKind::Group, old, new)
    }

    #[test]
    fn active_statuses_ignore_flag() {
        for status in [Member, Owner, Administrator] {
            for flag in FLAGS {
                assert!(is_active_member(status, flag), "{status:?} {flag:?}");
            }
        }
    }

    #[test]
    fn departed_statuses_ignore_flag() {
        for status in [Left, Kicked, Unknown] {
            for flag in FLAGS {
                assert!(!is_active_member(status, flag), "{status:?} {flag:?}");
            }
        }
    }

    #[test]
    fn restricted_depends_on_flag() {
        assert!(is_active_member(Restricted, Some(true)));
        assert!(!is_active_member(Restricted, Some(false)));
        assert!(!is_active_member(Restricted, None));
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("creator".parse::<MembershipStatus>().unwrap(), Owner);
        assert_eq!("Administrator".parse::<MembershipStatus>().unwrap(), Administrator);
        assert_eq!("kicked".parse::<MembershipStatus>().unwrap(), Kicked);
        assert_eq!("something_new".parse::<MembershipStatus>().unwrap(), Unknown);

        let s: MembershipStatus = serde_json::from_str("\"creator\"").unwrap();
        assert_eq!(s, Owner);
        let s: MembershipStatus = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(s, Unknown);
    }

    #[test]
    fn unchanged_status_is_ignored() {
        for status in [Member, Owner, Administrator, Restricted, Left, Kicked] {
            let ev = event(status, status).with_flags(Some(true), Some(false));
            assert_eq!(extract_transition(&ev), None, "{status:?}");
        }
    }

    #[test]
    fn join_and_leave_transitions() {
        assert_eq!(
            extract_transition(&event(Left, Member)),
            Some(Transition {
                was_member: false,
                is_member: true
            })
        );
        assert_eq!(
            extract_transition(&event(Administrator, Kicked)),
            Some(Transition {
                was_member: true,
                is_member: false
            })
        );
    }

    #[test]
    fn restricted_without_flag_is_not_member() {
        let t = extract_transition(&event(Restricted, Member)).unwrap();
        assert!(!t.was_member);
        assert!(t.is_member);

        let t = extract_transition(&event(Member, Restricted).with_flags(None, Some(true))).unwrap();
        assert!(t.was_member);
        assert!(t.is_member);
    }
}
