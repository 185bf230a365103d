use crate::{FramePatch, TileId};

/// Maps an image patch to a tile identity.
///
/// `None` is the "unknown" signal: the patch does not look like any board
/// slot. Implementations must be deterministic for a fixed patch within one
/// processing cycle; discovery may call them from several threads.
pub trait Classifier: Sync {
    fn classify(&self, patch: &FramePatch<'_>) -> Option<TileId>;
}

impl<F> Classifier for F
where
    F: Fn(&FramePatch<'_>) -> Option<TileId> + Sync,
{
    fn classify(&self, patch: &FramePatch<'_>) -> Option<TileId> {
        self(patch)
    }
}
