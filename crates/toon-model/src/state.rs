//! Per-installation reader state.
//!
//! `UserState` is a value type. Every transition returns a new record and
//! leaves the receiver untouched, so a holder can swap the whole value in
//! one step and never expose a half-applied change.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Reader state: history, subscriptions, favorites and coin balance.
///
/// Field names serialize in camelCase to match the stored record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    read_history: BTreeSet<String>,
    subscribed_series: BTreeSet<String>,
    coins_balance: u32,
    favorites: BTreeSet<String>,
}

impl Default for UserState {
    fn default() -> Self {
        Self::seed()
    }
}

impl UserState {
    pub fn new<R, S, F>(read_history: R, subscribed_series: S, favorites: F, coins_balance: u32) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            read_history: read_history.into_iter().map(Into::into).collect(),
            subscribed_series: subscribed_series.into_iter().map(Into::into).collect(),
            coins_balance,
            favorites: favorites.into_iter().map(Into::into).collect(),
        }
    }

    /// State used on first run and whenever the stored record is unusable.
    pub fn seed() -> Self {
        Self::new(["s1_e1", "s1_e2", "s2_e1"], ["s1", "s2"], ["s1", "s3"], 50)
    }

    /// A state with nothing read, followed or favorited.
    pub fn empty() -> Self {
        Self::new(
            Vec::<String>::new(),
            Vec::<String>::new(),
            Vec::<String>::new(),
            0,
        )
    }

    pub fn read_history(&self) -> &BTreeSet<String> {
        &self.read_history
    }

    pub fn subscribed_series(&self) -> &BTreeSet<String> {
        &self.subscribed_series
    }

    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    pub fn coins_balance(&self) -> u32 {
        self.coins_balance
    }

    pub fn has_read(&self, episode_id: &str) -> bool {
        self.read_history.contains(episode_id)
    }

    pub fn is_subscribed(&self, series_id: &str) -> bool {
        self.subscribed_series.contains(series_id)
    }

    pub fn is_favorite(&self, series_id: &str) -> bool {
        self.favorites.contains(series_id)
    }

    /// Record `episode_id` as read.
    ///
    /// Returns `None` when the episode is already in the history, so the
    /// caller can skip both the state swap and the write.
    #[must_use]
    pub fn with_episode_read(&self, episode_id: &str) -> Option<Self> {
        if self.has_read(episode_id) {
            return None;
        }
        let mut next = self.clone();
        next.read_history.insert(episode_id.to_string());
        Some(next)
    }

    #[must_use]
    pub fn with_subscription_toggled(&self, series_id: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.subscribed_series, series_id);
        next
    }

    #[must_use]
    pub fn with_favorite_toggled(&self, series_id: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.favorites, series_id);
        next
    }
}

fn toggle(set: &mut BTreeSet<String>, id: &str) {
    if !set.remove(id) {
        set.insert(id.to_string());
    }
}
