// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buildings: named groups of spaces.

use crate::keys::SpaceKey;

/// A building and the spaces that belong to it.
///
/// Transition spaces are the spaces with a portal leading outside; building
/// level route queries start and end at them.
#[derive(Debug, Clone, Default)]
pub struct Building {
    pub(crate) name: String,
    pub(crate) spaces: Vec<SpaceKey>,
    pub(crate) transition_spaces: Vec<SpaceKey>,
}

impl Building {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spaces(&self) -> &[SpaceKey] {
        &self.spaces
    }

    pub fn transition_spaces(&self) -> &[SpaceKey] {
        &self.transition_spaces
    }

    pub(crate) fn add_transition_space(&mut self, space: SpaceKey) {
        if !self.transition_spaces.contains(&space) {
            self.transition_spaces.push(space);
        }
    }
}
