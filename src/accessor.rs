//! Property accessors for data and computed nodes.
//!
//! Accessors are either a field path resolved against the datum, or a closure.

use crate::data_types::{ComputedNode, Datum};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

/// Conversion from a looked-up field into the accessor's output type.
pub trait FieldValue: Sized {
    fn from_field(value: Option<Value>) -> Self;
}

impl FieldValue for String {
    fn from_field(value: Option<Value>) -> Self {
        match value {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl FieldValue for f64 {
    /// Missing, null or non numeric fields count as 0.
    fn from_field(value: Option<Value>) -> Self {
        let v = match value {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            Some(Value::Bool(true)) => 1.0,
            _ => 0.0,
        };
        if v.is_nan() {
            0.0
        } else {
            v
        }
    }
}

pub enum PropertyAccessor<D, T> {
    Field(String),
    Func(Rc<dyn Fn(&D) -> T>),
}

impl<D, T> PropertyAccessor<D, T> {
    pub fn field(path: impl Into<String>) -> Self {
        Self::Field(path.into())
    }

    pub fn func(f: impl Fn(&D) -> T + 'static) -> Self {
        Self::Func(Rc::new(f))
    }
}

impl<D: Datum, T: FieldValue> PropertyAccessor<D, T> {
    pub fn get(&self, datum: &D) -> T {
        match self {
            Self::Field(path) => T::from_field(datum.field(path)),
            Self::Func(f) => f(datum),
        }
    }
}

impl<D, T> Clone for PropertyAccessor<D, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(path) => Self::Field(path.clone()),
            Self::Func(f) => Self::Func(f.clone()),
        }
    }
}

impl<D, T> From<&str> for PropertyAccessor<D, T> {
    fn from(path: &str) -> Self {
        Self::Field(path.to_string())
    }
}

impl<D, T> std::fmt::Debug for PropertyAccessor<D, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Built-in fields of a computed node usable as label or color key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeField {
    #[default]
    Id,
    Value,
    FormattedValue,
    Percentage,
    Depth,
}

pub enum NodeProperty<D> {
    Field(NodeField),
    Custom(Rc<dyn Fn(&ComputedNode<D>) -> String>),
}

impl<D> NodeProperty<D> {
    pub fn custom(f: impl Fn(&ComputedNode<D>) -> String + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn get(&self, node: &ComputedNode<D>) -> String {
        match self {
            Self::Field(NodeField::Id) => node.id.clone(),
            Self::Field(NodeField::Value) => node.value.to_string(),
            Self::Field(NodeField::FormattedValue) => node.formatted_value.clone(),
            Self::Field(NodeField::Percentage) => format!("{:.2}%", node.percentage),
            Self::Field(NodeField::Depth) => node.depth.to_string(),
            Self::Custom(f) => f(node),
        }
    }
}

impl<D> Clone for NodeProperty<D> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(field) => Self::Field(*field),
            Self::Custom(f) => Self::Custom(f.clone()),
        }
    }
}

impl<D> From<NodeField> for NodeProperty<D> {
    fn from(field: NodeField) -> Self {
        Self::Field(field)
    }
}

impl<D> std::fmt::Debug for NodeProperty<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
