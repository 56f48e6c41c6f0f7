//! Contract shared by every catalog entity.

use crate::labels::{LabelAware, Labels};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A label-aware record stored in its own catalog collection.
pub trait CatalogEntity:
    LabelAware + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Storage collection holding entities of this kind.
    const COLLECTION: &'static str;

    /// Returns the key the entity is stored under.
    fn key(&self) -> &str;

    /// Returns the label map for in-place edits.
    fn labels_mut(&mut self) -> &mut Labels;
}
