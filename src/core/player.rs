//! Player identification and per-player tallies.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Turn order is cyclic over
//! `0..player_count`.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec`, indexed by `PlayerId`. Used for
//! orb and cell counts.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A seat at the table. `PlayerId(0)` moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat index, 0-based.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player who moves after this one.
    ///
    /// ```
    /// use chain_reaction::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Single letter used by the text board (`A` for player 0, `B` for player 1, ...).
    #[must_use]
    pub fn letter(self) -> char {
        char::from(b'A' + self.0 % 26)
    }

    /// Every seat of a `player_count`-player game, in turn order.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// ```
/// use chain_reaction::core::{PlayerId, PlayerMap};
///
/// let mut orbs: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// orbs[PlayerId::new(1)] += 3;
/// assert_eq!(orbs[PlayerId::new(0)], 0);
/// assert_eq!(orbs.total(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Fill every seat from `init`.
    ///
    /// # Panics
    ///
    /// If `player_count` is zero or does not fit a `PlayerId`.
    pub fn new(player_count: usize, init: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "PlayerMap needs at least one seat");
        assert!(player_count <= usize::from(u8::MAX), "too many seats for PlayerId");

        Self {
            seats: PlayerId::all(player_count).map(init).collect(),
        }
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter())
    }

    /// Sum over all seats.
    #[must_use]
    pub fn total(&self) -> T
    where
        T: Copy + std::iter::Sum<T>,
    {
        self.seats.iter().copied().sum()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}
