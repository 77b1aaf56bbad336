// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based map storage.
//!
//! Spaces and portals reference each other (a space lists its portals, a
//! portal names its two spaces, navigation nodes name their portal). Storing
//! keys instead of references keeps that web acyclic. Keys are created by
//! `slotmap::SlotMap` and stay valid for the lifetime of the map.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a space (room, corridor or outdoor region).
    pub struct SpaceKey;

    /// Key for a portal (door, stairs, elevator or outdoor connector).
    pub struct PortalKey;
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn keys_are_distinct_per_insert() {
        let mut spaces: SlotMap<SpaceKey, &str> = SlotMap::with_key();
        let a = spaces.insert("A");
        let b = spaces.insert("B");
        assert_ne!(a, b);
        assert_eq!(spaces[a], "A");
    }
}
