use dashmap::DashMap;
use poise::serenity_prelude::{ChannelId, UserId};
use tracing::info;

use crate::{
    database::Database,
    utils::{
        datetime::parse_birth_date,
        messages::{
            build_added_message, build_date_format_error, build_date_prompt,
            build_identifier_prompt,
        },
        string_utils::normalize_identifier,
    },
};

/// One add conversation: a user talking to the bot in one chat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub channel_id: ChannelId,
    pub user_id: UserId,
}

impl SessionKey {
    pub fn new(channel_id: ChannelId, user_id: UserId) -> Self {
        Self {
            channel_id,
            user_id,
        }
    }
}

/// Where an add conversation currently stands
///
/// A session that is absent from the map is in the terminal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowState {
    AwaitingIdentifier,
    AwaitingDate { identifier: String },
}

/// Per-session state machine for the two-turn add flow
#[derive(Default)]
pub struct ConversationFlow {
    sessions: DashMap<SessionKey, FlowState>,
}

impl ConversationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the add flow, returning the identifier prompt
    pub fn begin(&self, key: SessionKey) -> String {
        self.sessions.insert(key, FlowState::AwaitingIdentifier);
        build_identifier_prompt()
    }

    /// End the session, returning whether one was active
    pub fn cancel(&self, key: SessionKey) -> bool {
        self.sessions.remove(&key).is_some()
    }

    #[cfg(test)]
    pub fn state(&self, key: SessionKey) -> Option<FlowState> {
        self.sessions.get(&key).map(|state| state.clone())
    }

    /// Feed a plain-text reply into the session
    ///
    /// Returns `Ok(None)` when the session has no active flow or the text is blank,
    /// otherwise the reply to send. Blank text leaves the session untouched.
    /// The session leaves the map before any storage access, so a failing insert ends
    /// the flow as well.
    pub async fn handle_reply(
        &self,
        key: SessionKey,
        text: &str,
        db: &Database,
    ) -> Result<Option<String>, sqlx::Error> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let Some((_, state)) = self.sessions.remove(&key) else {
            return Ok(None);
        };

        match state {
            FlowState::AwaitingIdentifier => {
                let identifier = normalize_identifier(text);
                let prompt = build_date_prompt(&identifier);
                self.sessions
                    .insert(key, FlowState::AwaitingDate { identifier });
                Ok(Some(prompt))
            }
            FlowState::AwaitingDate { identifier } => match parse_birth_date(text) {
                Ok(birth_date) => {
                    let id = db.insert_birthday(&identifier, birth_date).await?;
                    info!(
                        "Added birthday {} for {} in channel {}",
                        id, identifier, key.channel_id
                    );
                    Ok(Some(build_added_message(&identifier, birth_date)))
                }
                Err(e) => {
                    info!(
                        "Rejected birth date '{}' for {} in channel {}: {}",
                        text.trim(),
                        identifier,
                        key.channel_id,
                        e
                    );
                    Ok(Some(build_date_format_error()))
                }
            },
        }
    }
}
