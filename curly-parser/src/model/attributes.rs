use serde::{
    Serialize,
    ser::{SerializeMap, Serializer},
};

/// An `AttributeName` represents the name of an HTML attribute.
pub type AttributeName = String;

/// An ordered list of `(name, value)` pairs as parsed out of one annotation
/// span.
///
/// Names need not be unique here: `{.c1 .c2}` produces two `class` items.
/// Duplicates are collapsed by [`merge`](crate::merge) when the list is
/// applied to a token.
pub type AttributeList = Vec<(AttributeName, String)>;

/// The rendered attribute mapping of a [`Token`](super::Token).
///
/// Names are unique and insertion order is preserved; overwriting a value
/// keeps the name at its original position so rendered attribute order is
/// stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(AttributeName, String)>);

impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialized as a map to mirror the rendered attribute order.
        let mut state = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            state.serialize_entry(name, value)?;
        }
        state.end()
    }
}

impl Attributes {
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeName, &str)> {
        self.0.iter().map(|(name, value)| (name, value.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert an attribute, replacing the value in place if the name already
    /// exists.
    pub fn insert(&mut self, name: impl Into<AttributeName>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Attributes {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut attributes = Attributes::default();
        for (name, value) in pairs {
            attributes.insert(name, value);
        }
        attributes
    }
}
