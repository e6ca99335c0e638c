//! Channel handles and the writer's channel registry.
//!
//! The original `tide::log::Channel` only ever carried an id and a data-size hint, and nothing
//! downstream needs more than that since there's no reader in scope (`SPEC_FULL.md` §9.2). This
//! keeps the same shape, in the spirit of the teacher crate's small `Channel`/`Schema` handles
//! returned from `add_channel`/`add_schema`.

use std::collections::BTreeSet;

/// A handle to a previously declared channel, returned by [`crate::write::LogWriter::write_channel`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Channel {
    pub(crate) id: u32,
    pub(crate) data_size: u32,
}

impl Channel {
    /// This channel's 1-based id, dense and assigned in declaration order (I1).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The payload size hint this channel was declared with.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }
}

/// Tracks which channel ids a [`crate::write::LogWriter`] has declared, so that entries
/// referencing an unknown channel can be rejected before any bytes are written for them.
#[derive(Debug, Default)]
pub(crate) struct ChannelRegistry {
    known_ids: BTreeSet<u32>,
}

impl ChannelRegistry {
    pub fn insert(&mut self, id: u32) {
        self.known_ids.insert(id);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.known_ids.contains(&id)
    }

    pub fn len(&self) -> u32 {
        self.known_ids.len() as u32
    }
}
