//! Query-string construction.
//!
//! Only parameters with a real value reach the wire: empty strings and
//! absent values are dropped before encoding, and an empty parameter set
//! produces no `?` at all.

/// A query parameter value prior to filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// `null` / `undefined`: never sent.
    Absent,
    Text(String),
}

impl QueryValue {
    fn into_qualifying(self) -> Option<String> {
        match self {
            QueryValue::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Text(value.to_string())
    }
}

macro_rules! query_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Text(value.to_string())
                }
            }
        )*
    };
}

query_value_from_int!(u32, u64, i32, i64, usize);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Absent, Into::into)
    }
}

/// Ordered set of qualifying query parameters.
///
/// Setting a key twice keeps the last value in the position of the first;
/// setting it to a non-qualifying value removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`QueryParams::set`].
    pub fn with(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<QueryValue>) {
        let position = self.pairs.iter().position(|(k, _)| k == key);
        match (value.into().into_qualifying(), position) {
            (Some(value), Some(index)) => {
                if let Some(pair) = self.pairs.get_mut(index) {
                    pair.1 = value;
                }
            }
            (Some(value), None) => self.pairs.push((key.to_string(), value)),
            (None, Some(index)) => {
                self.pairs.remove(index);
            }
            (None, None) => {}
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encoded `k=v&k=v` form, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
