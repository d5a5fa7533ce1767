//! Mutations accepted by the store.

use toon_model::UserState;

/// A single state mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    MarkAsRead(String),
    ToggleSubscription(String),
    ToggleFavorite(String),
}

impl Command {
    /// Compute the state after this command, or `None` if it changes nothing.
    pub(crate) fn apply(&self, state: &UserState) -> Option<UserState> {
        match self {
            Command::MarkAsRead(episode_id) => state.with_episode_read(episode_id),
            Command::ToggleSubscription(series_id) => {
                Some(state.with_subscription_toggled(series_id))
            }
            Command::ToggleFavorite(series_id) => Some(state.with_favorite_toggled(series_id)),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Command::MarkAsRead(_) => "mark_as_read",
            Command::ToggleSubscription(_) => "toggle_subscription",
            Command::ToggleFavorite(_) => "toggle_favorite",
        }
    }

    pub(crate) fn target(&self) -> &str {
        match self {
            Command::MarkAsRead(id) | Command::ToggleSubscription(id) | Command::ToggleFavorite(id) => {
                id
            }
        }
    }
}

/// Replay `commands` in order on top of `base`.
pub(crate) fn replay(base: UserState, commands: &[Command]) -> UserState {
    commands
        .iter()
        .fold(base, |state, command| command.apply(&state).unwrap_or(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_read_on_read_episode_is_none() {
        let state = UserState::seed();
        assert!(Command::MarkAsRead("s1_e1".into()).apply(&state).is_none());
        assert!(Command::MarkAsRead("s1_e3".into()).apply(&state).is_some());
    }

    #[test]
    fn replay_applies_in_order() {
        let commands = vec![
            Command::ToggleFavorite("s5".into()),
            Command::MarkAsRead("s5_e1".into()),
            Command::MarkAsRead("s5_e1".into()),
            Command::ToggleFavorite("s5".into()),
            Command::ToggleSubscription("s5".into()),
        ];
        let state = replay(UserState::empty(), &commands);
        assert!(state.has_read("s5_e1"));
        assert!(!state.is_favorite("s5"));
        assert!(state.is_subscribed("s5"));
        assert_eq!(state.read_history().len(), 1);
    }
}
