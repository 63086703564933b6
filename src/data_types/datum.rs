use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A node of the input tree handed to the layout.
///
/// The layout only ever borrows the caller's tree and works on its own copy,
/// so implementors just need to expose their children and, optionally, named
/// fields for path based accessors.
pub trait Datum: Clone {
    fn children(&self) -> &[Self];

    /// Looks up a dotted field path (`"meta.size"`) on this datum.
    fn field(&self, _path: &str) -> Option<Value> {
        None
    }
}

impl Datum for Value {
    fn children(&self) -> &[Self] {
        self.get("children")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn field(&self, path: &str) -> Option<Value> {
        let mut current = self;
        for key in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(key)?,
                Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }
}

/// Typed tree for callers that don't carry arbitrary JSON around.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeDatum {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeDatum>,
}

impl TreeDatum {
    pub fn leaf(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn node(id: impl Into<String>, children: Vec<TreeDatum>) -> Self {
        Self {
            id: id.into(),
            value: None,
            children,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse circle packing tree")
    }
}

impl Datum for TreeDatum {
    fn children(&self) -> &[Self] {
        &self.children
    }

    fn field(&self, path: &str) -> Option<Value> {
        match path {
            "id" => Some(Value::String(self.id.clone())),
            "value" => self.value.map(Value::from),
            _ => None,
        }
    }
}

/// Handle to the datum a computed node was built from.
///
/// Every node of one layout shares the same copied tree; the handle stores
/// the child index path leading from the root to its datum.
pub struct DatumRef<D> {
    root: Arc<D>,
    indices: Arc<[usize]>,
}

impl<D: Datum> DatumRef<D> {
    pub fn new(root: Arc<D>, indices: Arc<[usize]>) -> Self {
        Self { root, indices }
    }

    pub fn get(&self) -> &D {
        let mut datum = self.root.as_ref();
        for &index in self.indices.iter() {
            datum = &datum.children()[index];
        }
        datum
    }

    /// Root of the copied tree this handle points into.
    pub fn root(&self) -> &Arc<D> {
        &self.root
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<D> Clone for DatumRef<D> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            indices: self.indices.clone(),
        }
    }
}

impl<D> PartialEq for DatumRef<D> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root) && self.indices == other.indices
    }
}

impl<D> std::fmt::Debug for DatumRef<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatumRef")
            .field("indices", &self.indices)
            .finish()
    }
}
