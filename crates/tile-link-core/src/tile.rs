use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Template name that denotes an empty board slot in the default template set.
pub const DEFAULT_EMPTY_NAME: &str = "None";

/// Identity of a discovered cell.
///
/// `Empty` is a confirmed board slot with no tile on it. It is never the same
/// claim as "not discovered": undiscovered coordinates are simply absent from
/// a [`Board`](crate::Board).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum TileId {
    Empty,
    Named(String),
}

impl TileId {
    pub fn named(name: impl Into<String>) -> Self {
        TileId::Named(name.into())
    }

    /// Map a template name to an identity, treating `empty_name` as the
    /// empty sentinel.
    pub fn from_name(name: &str, empty_name: &str) -> Self {
        if name == empty_name {
            TileId::Empty
        } else {
            TileId::Named(name.to_owned())
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, TileId::Empty)
    }

    /// Display name; `Empty` shows as [`DEFAULT_EMPTY_NAME`].
    ///
    /// Use [`TileId::name_with`] when a template set names its empty slot
    /// differently.
    pub fn as_str(&self) -> &str {
        match self {
            TileId::Empty => DEFAULT_EMPTY_NAME,
            TileId::Named(name) => name,
        }
    }

    /// Name of this identity in a template set whose empty slot is called
    /// `empty_name`. Inverse of [`TileId::from_name`].
    pub fn name_with<'a>(&'a self, empty_name: &'a str) -> &'a str {
        match self {
            TileId::Empty => empty_name,
            TileId::Named(name) => name,
        }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Empty` is `null`, any named tile is its name. No template name can
/// collide with the empty slot.
impl Serialize for TileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TileId::Empty => serializer.serialize_none(),
            TileId::Named(name) => serializer.serialize_some(name),
        }
    }
}

impl<'de> Deserialize<'de> for TileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map_or(TileId::Empty, TileId::Named))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_maps_to_sentinel() {
        assert_eq!(TileId::from_name("None", DEFAULT_EMPTY_NAME), TileId::Empty);
        assert_eq!(TileId::from_name("blank", "blank"), TileId::Empty);
        assert_eq!(
            TileId::from_name("None", "blank"),
            TileId::Named("None".to_owned())
        );
    }

    #[test]
    fn empty_serializes_as_null() {
        let ids = vec![TileId::named("bamboo"), TileId::Empty, TileId::named("None")];
        let json = serde_json::to_string(&ids).expect("serialize");
        assert_eq!(json, r#"["bamboo",null,"None"]"#);
        let back: Vec<TileId> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ids);
    }

    #[test]
    fn name_with_inverts_from_name() {
        for name in ["None", "blank", "bamboo"] {
            let id = TileId::from_name(name, "blank");
            assert_eq!(id.name_with("blank"), name);
        }
        assert_eq!(TileId::Empty.as_str(), DEFAULT_EMPTY_NAME);
    }
}
