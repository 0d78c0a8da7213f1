//! Present/absent wrapper for partial-update fields

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field of a partial update.
///
/// A key missing from the payload decodes to [`Patch::Unchanged`] (the
/// owning struct must mark the field `#[serde(default)]`). A present value
/// decodes to [`Patch::Set`]. An explicit `null` is rejected: no invoice
/// column is nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Unchanged => None,
            Patch::Set(v) => Some(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<T>::deserialize(deserializer)? {
            Some(value) => Ok(Patch::Set(value)),
            None => Err(D::Error::custom(
                "null is not allowed here; omit the field to keep its current value",
            )),
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Set(v) => v.serialize(serializer),
            Patch::Unchanged => serializer.serialize_none(),
        }
    }
}
