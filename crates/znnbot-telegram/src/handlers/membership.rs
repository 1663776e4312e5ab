use teloxide::types::{Chat, ChatMemberKind, ChatMemberUpdated};

use znnbot_core::{
    domain::{ChatId, ConversationKind},
    membership::{MembershipEvent, MembershipStatus},
};

/// Status plus Telegram's `is_member` flag (only carried by restricted members).
pub fn status_of(kind: &ChatMemberKind) -> (MembershipStatus, Option<bool>) {
    match kind {
        ChatMemberKind::Owner(_) => (MembershipStatus::Owner, None),
        ChatMemberKind::Administrator(_) => (MembershipStatus::Administrator, None),
        ChatMemberKind::Member => (MembershipStatus::Member, None),
        ChatMemberKind::Restricted(r) => (MembershipStatus::Restricted, Some(r.is_member)),
        ChatMemberKind::Left => (MembershipStatus::Left, None),
        ChatMemberKind::Banned(_) => (MembershipStatus::Kicked, None),
    }
}

fn conversation_kind(chat: &Chat) -> ConversationKind {
    if chat.is_private() {
        ConversationKind::Private
    } else if chat.is_group() {
        ConversationKind::Group
    } else if chat.is_supergroup() {
        ConversationKind::Supergroup
    } else {
        ConversationKind::Channel
    }
}

pub fn membership_event(upd: &ChatMemberUpdated) -> MembershipEvent {
    let (old_status, old_is_member) = status_of(&upd.old_chat_member.kind);
    let (new_status, new_is_member) = status_of(&upd.new_chat_member.kind);

    MembershipEvent {
        old_status,
        new_status,
        old_is_member,
        new_is_member,
        conversation_id: ChatId(upd.chat.id.0),
        conversation_kind: conversation_kind(&upd.chat),
        conversation_title: upd.chat.title().map(str::to_owned),
        actor_name: upd.from.full_name(),
    }
}
