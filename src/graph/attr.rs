//! Attribute values and shared attribute dictionaries
//!
//! Nodes, edges and the graph itself carry string-keyed attributes. Edge
//! dictionaries are shared handles: an undirected edge, or a directed edge
//! seen from its successor and predecessor side, is one [`AttrDict`], so a
//! write through either side is visible through the other.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Attribute value type supporting multiple data types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<AttrValue>),
    Map(IndexMap<String, AttrValue>),
    Null,
}

impl AttrValue {
    /// True for [`AttrValue::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// The text of a string attribute
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// An integer attribute, without float truncation
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// A float attribute; integers are not widened here, see [`AttrValue::as_number`]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// A boolean attribute
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            AttrValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view used for weights: integers widen, floats pass through
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Integer(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Elements of an array attribute
    pub fn as_array(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// A nested attribute map
    pub fn as_map(&self) -> Option<&AttrMap> {
        match self {
            AttrValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Variant name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::String(_) => "String",
            AttrValue::Integer(_) => "Integer",
            AttrValue::Float(_) => "Float",
            AttrValue::Boolean(_) => "Boolean",
            AttrValue::Array(_) => "Array",
            AttrValue::Map(_) => "Map",
            AttrValue::Null => "Null",
        }
    }
}

/// Write `items` separated by `", "` between `open` and `close`
fn write_joined<T>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    close: &str,
    items: impl Iterator<Item = T>,
    mut each: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        each(f, item)?;
    }
    f.write_str(close)
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{:?}", s),
            AttrValue::Integer(i) => write!(f, "{}", i),
            AttrValue::Float(x) => write!(f, "{}", x),
            AttrValue::Boolean(b) => write!(f, "{}", b),
            AttrValue::Array(items) => write_joined(f, "[", "]", items.iter(), |f, v| write!(f, "{}", v)),
            AttrValue::Map(map) => write_joined(f, "{", "}", map.iter(), |f, (k, v)| write!(f, "{}: {}", k, v)),
            AttrValue::Null => f.write_str("null"),
        }
    }
}

macro_rules! attr_from {
    ($($ty:ty => |$x:ident| $make:expr),* $(,)?) => {
        $(
            impl From<$ty> for AttrValue {
                fn from($x: $ty) -> Self {
                    $make
                }
            }
        )*
    };
}

attr_from! {
    String => |s| AttrValue::String(s),
    &str => |s| AttrValue::String(s.to_owned()),
    i64 => |i| AttrValue::Integer(i),
    i32 => |i| AttrValue::Integer(i64::from(i)),
    u32 => |i| AttrValue::Integer(i64::from(i)),
    f64 => |x| AttrValue::Float(x),
    bool => |b| AttrValue::Boolean(b),
    Vec<AttrValue> => |items| AttrValue::Array(items),
    AttrMap => |map| AttrValue::Map(map),
}

/// Plain, owned attribute map
pub type AttrMap = IndexMap<String, AttrValue>;

/// Build an [`AttrMap`] from key/value pairs.
///
/// ```
/// use plexgraph::graph::{attrs, AttrValue};
///
/// let a = attrs([("weight", AttrValue::from(3)), ("color", "red".into())]);
/// assert_eq!(a["weight"], AttrValue::Integer(3));
/// ```
pub fn attrs<K, V, I>(pairs: I) -> AttrMap
where
    K: Into<String>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Shared, interior-mutable attribute dictionary.
///
/// Cloning an `AttrDict` clones the handle, not the contents; use
/// [`AttrDict::deep_copy`] for an independent dictionary. Equality compares
/// contents.
#[derive(Clone, Default)]
pub struct AttrDict(Rc<RefCell<AttrMap>>);

impl AttrDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: AttrMap) -> Self {
        AttrDict(Rc::new(RefCell::new(map)))
    }

    pub fn get(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow().get(key).cloned()
    }

    /// Numeric value of `key`, if present and numeric
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.0.borrow().get(key).and_then(AttrValue::as_number)
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Merge `attrs` in; later values overwrite earlier ones
    pub fn update(&self, attrs: AttrMap) {
        self.0.borrow_mut().extend(attrs);
    }

    pub fn borrow(&self) -> Ref<'_, AttrMap> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, AttrMap> {
        self.0.borrow_mut()
    }

    /// Owned copy of the current contents
    pub fn snapshot(&self) -> AttrMap {
        self.0.borrow().clone()
    }

    pub fn deep_copy(&self) -> AttrDict {
        AttrDict::from_map(self.snapshot())
    }

    /// Whether both handles point at the same dictionary
    pub fn ptr_eq(&self, other: &AttrDict) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<AttrMap> for AttrDict {
    fn from(map: AttrMap) -> Self {
        AttrDict::from_map(map)
    }
}

impl PartialEq for AttrDict {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for AttrDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_value_types() {
        assert_eq!(AttrValue::from("Alice"), AttrValue::String("Alice".to_string()));
        assert_eq!(AttrValue::from(42), AttrValue::Integer(42));
        assert_eq!(AttrValue::from(3.5), AttrValue::Float(3.5));
        assert_eq!(AttrValue::from(true), AttrValue::Boolean(true));
        assert_eq!(AttrValue::Null.type_name(), "Null");
        assert!(AttrValue::Null.is_null());
    }

    #[test]
    fn test_accessors_match_variant() {
        let nested = AttrValue::from(attrs([("k", "v")]));
        assert_eq!(nested.as_map().and_then(|m| m.get("k")), Some(&AttrValue::from("v")));
        assert_eq!(nested.as_string(), None);

        let items = AttrValue::from(vec![AttrValue::from(1), AttrValue::Null]);
        assert_eq!(items.as_array().map(|a| a.len()), Some(2));
        assert_eq!(AttrValue::Integer(2).as_float(), None);
        assert_eq!(AttrValue::Integer(2).as_integer(), Some(2));
        assert_eq!(AttrValue::from(false).as_boolean(), Some(false));
        assert_eq!(AttrValue::from("s").as_string(), Some("s"));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(AttrValue::Integer(4).as_number(), Some(4.0));
        assert_eq!(AttrValue::Float(0.25).as_number(), Some(0.25));
        assert_eq!(AttrValue::from("4").as_number(), None);
        assert_eq!(AttrValue::Boolean(true).as_number(), None);
    }

    #[test]
    fn test_display() {
        let value = AttrValue::Array(vec![AttrValue::from(1), AttrValue::from("x")]);
        assert_eq!(value.to_string(), "[1, \"x\"]");
        let map = AttrValue::from(attrs([("a", 1)]));
        assert_eq!(map.to_string(), "{a: 1}");
    }

    #[test]
    fn test_attr_dict_is_shared() {
        let dict = AttrDict::from_map(attrs([("weight", 2)]));
        let alias = dict.clone();
        alias.set("weight", 5);

        assert!(dict.ptr_eq(&alias));
        assert_eq!(dict.get_number("weight"), Some(5.0));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let dict = AttrDict::from_map(attrs([("color", "red")]));
        let copy = dict.deep_copy();
        copy.set("color", "blue");

        assert!(!dict.ptr_eq(&copy));
        assert_eq!(dict.get("color"), Some(AttrValue::from("red")));
        assert_ne!(dict, copy);
    }

    #[test]
    fn test_update_overwrites() {
        let dict = AttrDict::from_map(attrs([("a", 1), ("b", 2)]));
        dict.update(attrs([("b", 3), ("c", 4)]));
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.get("b"), Some(AttrValue::Integer(3)));
        assert_eq!(dict.remove("a"), Some(AttrValue::Integer(1)));
        assert!(!dict.contains_key("a"));
    }

    #[test]
    fn test_serde_round_trip() {
        let map = attrs([("weight", AttrValue::from(1.5)), ("tags", vec![AttrValue::from("a")].into())]);
        let json = serde_json::to_string(&map).unwrap();
        let back: AttrMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
