//! Profile page model: the four managed collections, their counters, and
//! the displayed user details.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tieba_gate::AvatarFile;
use tieba_types::ItemId;

/// Sections of the profile side menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSection {
    #[default]
    Posts,
    Replies,
    Favorites,
    Tiebas,
    Settings,
}

impl ProfileSection {
    pub const ALL: [Self; 5] = [
        Self::Posts,
        Self::Replies,
        Self::Favorites,
        Self::Tiebas,
        Self::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Replies => "replies",
            Self::Favorites => "favorites",
            Self::Tiebas => "tiebas",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("unknown profile section: {s}"))
    }
}

/// A list of items the user can remove from the profile page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    Posts,
    Replies,
    Favorites,
    FollowedTiebas,
}

impl Collection {
    /// Toast shown once an item of this collection is gone.
    pub fn removed_message(self) -> &'static str {
        match self {
            Self::Posts => "Post deleted",
            Self::Replies => "Reply deleted",
            Self::Favorites => "Removed from favorites",
            Self::FollowedTiebas => "Unfollowed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemState {
    Live,
    /// Fading out while the simulated call runs.
    Removing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileItem {
    pub id: ItemId,
    pub label: String,
    pub state: ItemState,
}

/// Counters in the profile header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub posts: u64,
    pub replies: u64,
    pub favorites: u64,
    pub followed_tiebas: u64,
}

impl ProfileStats {
    pub fn get(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Posts => self.posts,
            Collection::Replies => self.replies,
            Collection::Favorites => self.favorites,
            Collection::FollowedTiebas => self.followed_tiebas,
        }
    }

    fn slot(&mut self, collection: Collection) -> &mut u64 {
        match collection {
            Collection::Posts => &mut self.posts,
            Collection::Replies => &mut self.replies,
            Collection::Favorites => &mut self.favorites,
            Collection::FollowedTiebas => &mut self.followed_tiebas,
        }
    }

    pub fn set(&mut self, collection: Collection, value: u64) {
        *self.slot(collection) = value;
    }

    /// Decrement, stopping at zero. Returns the new value.
    pub fn decrement(&mut self, collection: Collection) -> u64 {
        let slot = self.slot(collection);
        *slot = slot.saturating_sub(1);
        *slot
    }
}

/// Name, bio and avatar shown in the profile header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub bio: String,
    /// `data:` URL of an uploaded avatar.
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            bio: bio.into(),
            avatar: None,
        }
    }

    /// Apply submitted settings. Empty values leave the old ones in place.
    pub fn apply_settings(&mut self, username: &str, bio: &str) {
        if !username.is_empty() {
            self.username = username.to_string();
        }
        if !bio.is_empty() {
            self.bio = bio.to_string();
        }
    }
}

/// Encode an uploaded file the way a file reader renders it for an `<img>`.
pub fn avatar_data_url(file: &AvatarFile) -> String {
    format!(
        "data:{};base64,{}",
        file.mime_type,
        base64::engine::general_purpose::STANDARD.encode(&file.bytes)
    )
}

/// Human-readable upload limit: whole megabytes or kilobytes when exact,
/// bytes otherwise.
pub fn size_label(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    match bytes {
        b if b >= MB && b % MB == 0 => format!("{}MB", b / MB),
        b if b >= KB && b % KB == 0 => format!("{}KB", b / KB),
        b => format!("{b} bytes"),
    }
}

/// Everything the profile page manages.
#[derive(Clone, Debug, Default)]
pub struct Profile {
    pub user: UserProfile,
    stats: ProfileStats,
    items: BTreeMap<Collection, Vec<ProfileItem>>,
}

impl Profile {
    pub fn new(user: UserProfile) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    /// Override a counter with the value rendered by the server.
    pub fn set_stat(&mut self, collection: Collection, value: u64) {
        self.stats.set(collection, value);
    }

    /// Add an item that was already on the page; its counter grows by one.
    pub fn seed(&mut self, collection: Collection, id: ItemId, label: impl Into<String>) {
        self.items.entry(collection).or_default().push(ProfileItem {
            id,
            label: label.into(),
            state: ItemState::Live,
        });
        let value = self.stats.get(collection) + 1;
        self.stats.set(collection, value);
    }

    pub fn items(&self, collection: Collection) -> &[ProfileItem] {
        self.items.get(&collection).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn item(&self, collection: Collection, id: &ItemId) -> Option<&ProfileItem> {
        self.items(collection).iter().find(|item| &item.id == id)
    }

    /// Start removing a live item. Unknown ids and items already being
    /// removed are left alone and yield `false`.
    pub fn begin_removal(&mut self, collection: Collection, id: &ItemId) -> bool {
        let Some(item) = self
            .items
            .get_mut(&collection)
            .and_then(|items| items.iter_mut().find(|item| &item.id == id))
        else {
            return false;
        };
        if item.state == ItemState::Removing {
            return false;
        }
        item.state = ItemState::Removing;
        debug!(?collection, item = %id, "item removal started");
        true
    }

    /// Drop a removed item and decrement its counter. Returns the new
    /// counter value, or `None` if the item is gone already.
    pub fn finish_removal(&mut self, collection: Collection, id: &ItemId) -> Option<u64> {
        let items = self.items.get_mut(&collection)?;
        let position = items.iter().position(|item| &item.id == id)?;
        items.remove(position);
        Some(self.stats.decrement(collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    #[test]
    fn size_labels_never_round_to_zero() {
        assert_eq!(size_label(5 * 1024 * 1024), "5MB");
        assert_eq!(size_label(512 * 1024), "512KB");
        assert_eq!(size_label(1_500_000), "1500000 bytes");
        assert_eq!(size_label(0), "0 bytes");
    }

    #[test]
    fn section_names_round_trip() {
        for section in ProfileSection::ALL {
            assert_eq!(section.as_str().parse::<ProfileSection>(), Ok(section));
        }
        assert!("inbox".parse::<ProfileSection>().is_err());
    }

    #[test]
    fn removal_is_two_phase() {
        let mut profile = Profile::default();
        profile.seed(Collection::Posts, id("p1"), "First post");
        profile.seed(Collection::Posts, id("p2"), "Second post");
        assert_eq!(profile.stats().posts, 2);

        assert!(profile.begin_removal(Collection::Posts, &id("p1")));
        assert_eq!(
            profile.item(Collection::Posts, &id("p1")).unwrap().state,
            ItemState::Removing
        );
        // A second click while fading out does nothing.
        assert!(!profile.begin_removal(Collection::Posts, &id("p1")));

        assert_eq!(profile.finish_removal(Collection::Posts, &id("p1")), Some(1));
        assert!(profile.item(Collection::Posts, &id("p1")).is_none());
        assert_eq!(profile.finish_removal(Collection::Posts, &id("p1")), None);
    }

    #[test]
    fn unknown_items_are_ignored() {
        let mut profile = Profile::default();
        assert!(!profile.begin_removal(Collection::Favorites, &id("nope")));
        assert_eq!(profile.finish_removal(Collection::Favorites, &id("nope")), None);
    }

    #[test]
    fn counters_saturate_at_zero() {
        let mut stats = ProfileStats::default();
        assert_eq!(stats.decrement(Collection::Replies), 0);
        stats.set(Collection::Replies, 1);
        assert_eq!(stats.decrement(Collection::Replies), 0);
        assert_eq!(stats.decrement(Collection::Replies), 0);
    }

    #[test]
    fn settings_keep_old_values_for_empty_input() {
        let mut user = UserProfile::new("alice", "hello");
        user.apply_settings("", "new bio");
        assert_eq!(user, UserProfile::new("alice", "new bio"));
        user.apply_settings("bob", "");
        assert_eq!(user.username, "bob");
        assert_eq!(user.bio, "new bio");
    }

    #[test]
    fn avatar_is_encoded_as_data_url() {
        let file = AvatarFile::new("a.png", "image/png", b"hi".to_vec());
        assert_eq!(avatar_data_url(&file), "data:image/png;base64,aGk=");
    }
}
