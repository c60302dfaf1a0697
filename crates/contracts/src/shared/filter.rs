//! Filter model shared by the filter bar, the address bar and the list endpoint.

use std::collections::BTreeMap;

/// Shape of a declared filter field, and therefore its "empty" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    /// string / enum / id; empty is null
    Scalar,
    /// ordered sequence of strings; empty is `[]`
    Collection,
    /// one-level `name[sub]=value` map; empty is `{}`
    Nested,
}

impl FieldShape {
    pub fn empty_value(&self) -> FilterValue {
        match self {
            FieldShape::Scalar => FilterValue::Null,
            FieldShape::Collection => FilterValue::List(Vec::new()),
            FieldShape::Nested => FilterValue::Map(BTreeMap::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterValue {
    Null,
    Scalar(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FilterValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        FilterValue::Scalar(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        FilterValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FilterValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> &[String] {
        match self {
            FilterValue::List(values) => values,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        is_empty_value(self)
    }
}

/// `true` for null and for empty collections. What counts as "no filter".
///
/// An empty string is a value: it is neither stripped nor omitted.
pub fn is_empty_value(value: &FilterValue) -> bool {
    match value {
        FilterValue::Null => true,
        FilterValue::Scalar(_) => false,
        FilterValue::List(values) => values.is_empty(),
        FilterValue::Map(entries) => entries.is_empty(),
    }
}

/// Named filter fields. Keys are kept sorted so equality ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    fields: BTreeMap<String, FilterValue>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: FilterValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FilterValue> {
        self.fields.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields carrying an actual value (badge counter of the filter bar).
    pub fn active_count(&self) -> usize {
        self.fields.values().filter(|v| !is_empty_value(v)).count()
    }

    /// Drops every field whose value is empty.
    pub fn stripped(mut self) -> Self {
        self.fields.retain(|_, value| !is_empty_value(value));
        self
    }

    /// Overlays `other` on top of `self`, field by field.
    pub fn merged(mut self, other: &FilterState) -> Self {
        for (name, value) in other.iter() {
            self.fields.insert(name.clone(), value.clone());
        }
        self
    }
}

impl<K: Into<String>> FromIterator<(K, FilterValue)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, FilterValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Template of every filter field a view recognizes, with its empty shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubFilterStructure {
    fields: Vec<(String, FieldShape)>,
}

impl StubFilterStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(self, name: impl Into<String>) -> Self {
        self.field(name, FieldShape::Scalar)
    }

    pub fn collection(self, name: impl Into<String>) -> Self {
        self.field(name, FieldShape::Collection)
    }

    pub fn nested(self, name: impl Into<String>) -> Self {
        self.field(name, FieldShape::Nested)
    }

    /// Redeclaring a field replaces its shape in place.
    pub fn field(mut self, name: impl Into<String>, shape: FieldShape) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = shape,
            None => self.fields.push((name, shape)),
        }
        self
    }

    pub fn shape_of(&self, name: &str) -> Option<FieldShape> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, shape)| *shape)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Every declared field at its empty shape.
    pub fn empty_state(&self) -> FilterState {
        self.fields
            .iter()
            .map(|(name, shape)| (name.clone(), shape.empty_value()))
            .collect()
    }
}
