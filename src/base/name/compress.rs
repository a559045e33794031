//! The name compression table.

use super::Name;
use std::collections::HashMap;

//------------ CompressionTable ----------------------------------------------

/// The positions of names already written into a message.
///
/// Names are entered by [`Name::compose`] as a side effect of writing them.
/// Only positions that fit into the 14 bits of a compression pointer are
/// recorded.
///
/// When a write into the message has to be undone, [`truncate`] drops all
/// entries pointing into the discarded part.
///
/// [`truncate`]: CompressionTable::truncate
#[derive(Clone, Debug, Default)]
pub struct CompressionTable {
    entries: HashMap<Name, u16>,
}

impl CompressionTable {
    /// The largest position a compression pointer can reference.
    pub const MAX_POS: usize = 0x3FFF;

    /// Creates a new, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of a name if it has been recorded.
    pub fn get(&self, name: &Name) -> Option<u16> {
        self.entries.get(name).copied()
    }

    /// Records the position of a name.
    ///
    /// Returns whether the name was recorded. It is not if the position is
    /// beyond what a pointer can reach. An existing entry for the name is
    /// kept.
    pub fn insert(&mut self, name: Name, pos: usize) -> bool {
        match u16::try_from(pos) {
            Ok(pos) if usize::from(pos) <= Self::MAX_POS => {
                self.entries.entry(name).or_insert(pos);
                true
            }
            _ => false,
        }
    }

    /// Removes all entries at or beyond `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.retain(|_, pos| usize::from(*pos) < len)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Returns an iterator over the names and their positions.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, u16)> + '_ {
        self.entries.iter().map(|(name, pos)| (name, *pos))
    }
}

//============ Testing =======================================================
