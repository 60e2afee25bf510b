/// Items that carry their own identifier, so a list of them can be keyed into
/// a map without repeating the id in the document.
pub trait ItemId {
    type IdType;

    fn id(&self) -> Self::IdType;
}

#[allow(clippy::module_inception)]
pub mod id_map {
    use super::ItemId;
    use serde::de::{Deserialize, Deserializer};

    /// Deserializes a sequence of items into a map keyed by each item's id.
    /// Used with `#[serde(with = "id_map")]` on config collections.
    pub fn deserialize<'de, D, T: ItemId + Deserialize<'de>, O: FromIterator<(T::IdType, T)>>(
        deserializer: D,
    ) -> Result<O, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().map(|item| (item.id(), item)).collect())
    }
}
