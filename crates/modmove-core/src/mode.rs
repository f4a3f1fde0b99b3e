use serde::{Deserialize, Serialize};

/// What the current modifier state asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureMode {
    /// No gesture; mouse motion is ignored.
    #[default]
    None,
    /// Mouse motion moves the window under the cursor.
    Move,
    /// Mouse motion resizes the window under the cursor from its nearest corner.
    Resize,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl Modifier {
    fn bit(self) -> u8 {
        match self {
            Self::Alt => 1,
            Self::Shift => 1 << 1,
            Self::Ctrl => 1 << 2,
            Self::Win => 1 << 3,
        }
    }
}

/// A set of held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);

    pub fn from_keys(keys: &[Modifier]) -> Self {
        let mut set = Self::NONE;
        for key in keys {
            set.insert(*key);
        }
        set
    }

    pub fn insert(&mut self, key: Modifier) {
        self.0 |= key.bit();
    }

    /// Returns whether every key of `other` is held. An empty set is
    /// contained in anything.
    pub fn contains_all(&self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_builds_the_held_set() {
        // Arrange
        let mut held = Modifiers::NONE;

        // Act
        held.insert(Modifier::Ctrl);
        held.insert(Modifier::Ctrl);

        // Assert
        assert_eq!(held, Modifiers::from_keys(&[Modifier::Ctrl]));
        assert!(!held.contains_all(Modifiers::from_keys(&[Modifier::Alt])));
        assert!(!held.is_empty());
    }

    #[test]
    fn contains_all_requires_every_key() {
        let held = Modifiers::from_keys(&[Modifier::Ctrl, Modifier::Alt, Modifier::Shift]);

        assert!(held.contains_all(Modifiers::from_keys(&[Modifier::Ctrl, Modifier::Alt])));
        assert!(!held.contains_all(Modifiers::from_keys(&[Modifier::Ctrl, Modifier::Win])));
        assert!(held.contains_all(Modifiers::NONE));
    }
}
