//! Conversions between Rust member types and [`Value`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::composite::*;
use super::{HostHandle, SeqKind, Shape, Value};
use crate::error::EditError;

/// A Rust type that can be shown and edited as a [`Value`].
pub trait Field: Sized {
    /// Declared shape of members of this type.
    fn shape() -> Shape;

    /// Owned snapshot of `self`.
    fn to_value(&self) -> Value;

    /// Rebuild from a value of the declared shape.
    fn from_value(value: Value) -> Result<Self, EditError>;
}

/// Declared shape of `T`, for use in schema declarations.
pub fn shape_of<T: Field>() -> Shape {
    T::shape()
}

pub(crate) fn mismatch(expected: &str, found: &Value) -> EditError {
    EditError::TypeMismatch {
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

/// Last-in-first-out stack. Stored bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stack<T>(pub Vec<T>);

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Field for bool {
    fn shape() -> Shape {
        Shape::Bool
    }
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

macro_rules! int_field {
    ($($ty:ty),*) => {$(
        impl Field for $ty {
            fn shape() -> Shape {
                Shape::Int { range: None }
            }
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
            fn from_value(value: Value) -> Result<Self, EditError> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| EditError::TypeMismatch {
                        expected: stringify!($ty).to_string(),
                        found: format!("int {i}"),
                    }),
                    other => Err(mismatch(stringify!($ty), &other)),
                }
            }
        }
    )*};
}

int_field!(i32, i64, u32);

impl Field for f32 {
    fn shape() -> Shape {
        Shape::Float { range: None }
    }
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Float(x) => Ok(x as f32),
            other => Err(mismatch("f32", &other)),
        }
    }
}

impl Field for f64 {
    fn shape() -> Shape {
        Shape::Float { range: None }
    }
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl Field for String {
    fn shape() -> Shape {
        Shape::Text
    }
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl<T: Field> Field for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, T::to_value)
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn items<T: Field>(value: Value, expected: &str) -> Result<Vec<T>, EditError> {
    match value {
        Value::Seq(items) | Value::Set(items) => items.into_iter().map(T::from_value).collect(),
        other => Err(mismatch(expected, &other)),
    }
}

fn entries<K: Field, V: Field>(value: Value) -> Result<Vec<(K, V)>, EditError> {
    match value {
        Value::Map(entries) => entries
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect(),
        other => Err(mismatch("map", &other)),
    }
}

impl<T: Field> Field for Vec<T> {
    fn shape() -> Shape {
        Shape::Seq(SeqKind::List, Box::new(T::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        items(value, "list")
    }
}

impl<T: Field, const N: usize> Field for [T; N] {
    fn shape() -> Shape {
        Shape::Seq(SeqKind::Array(N), Box::new(T::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        let items: Vec<T> = items(value, "array")?;
        let len = items.len();
        items.try_into().map_err(|_| EditError::TypeMismatch {
            expected: format!("array of {N}"),
            found: format!("array of {len}"),
        })
    }
}

impl<T: Field> Field for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Seq(SeqKind::Queue, Box::new(T::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        items::<T>(value, "queue").map(VecDeque::from)
    }
}

impl<T: Field> Field for Stack<T> {
    fn shape() -> Shape {
        Shape::Seq(SeqKind::Stack, Box::new(T::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Seq(self.0.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        items::<T>(value, "stack").map(Stack)
    }
}

impl<K: Field + Ord, V: Field> Field for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        entries::<K, V>(value).map(|e| e.into_iter().collect())
    }
}

impl<K: Field + Eq + Hash, V: Field> Field for HashMap<K, V> {
    fn shape() -> Shape {
        Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        entries::<K, V>(value).map(|e| e.into_iter().collect())
    }
}

impl<T: Field + Ord> Field for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Set(Box::new(T::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        items::<T>(value, "set").map(|i| i.into_iter().collect())
    }
}

impl<T: Field + Eq + Hash> Field for HashSet<T> {
    fn shape() -> Shape {
        Shape::Set(Box::new(T::shape()))
    }
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        items::<T>(value, "set").map(|i| i.into_iter().collect())
    }
}

impl<A: Field, B: Field> Field for (A, B) {
    fn shape() -> Shape {
        Shape::Tuple(vec![A::shape(), B::shape()])
    }
    fn to_value(&self) -> Value {
        Value::Tuple(vec![self.0.to_value(), self.1.to_value()])
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Tuple(items) if items.len() == 2 => {
                let mut items = items.into_iter();
                match (items.next(), items.next()) {
                    (Some(a), Some(b)) => Ok((A::from_value(a)?, B::from_value(b)?)),
                    _ => Err(EditError::TypeMismatch {
                        expected: "2-tuple".to_string(),
                        found: "short tuple".to_string(),
                    }),
                }
            }
            other => Err(mismatch("2-tuple", &other)),
        }
    }
}

impl<A: Field, B: Field, C: Field> Field for (A, B, C) {
    fn shape() -> Shape {
        Shape::Tuple(vec![A::shape(), B::shape(), C::shape()])
    }
    fn to_value(&self) -> Value {
        Value::Tuple(vec![
            self.0.to_value(),
            self.1.to_value(),
            self.2.to_value(),
        ])
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Tuple(items) if items.len() == 3 => {
                let mut items = items.into_iter();
                match (items.next(), items.next(), items.next()) {
                    (Some(a), Some(b), Some(c)) => {
                        Ok((A::from_value(a)?, B::from_value(b)?, C::from_value(c)?))
                    }
                    _ => Err(EditError::TypeMismatch {
                        expected: "3-tuple".to_string(),
                        found: "short tuple".to_string(),
                    }),
                }
            }
            other => Err(mismatch("3-tuple", &other)),
        }
    }
}

impl Field for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Timestamp
    }
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Timestamp(ts) => Ok(ts),
            other => Err(mismatch("timestamp", &other)),
        }
    }
}

impl Field for Duration {
    fn shape() -> Shape {
        Shape::Duration
    }
    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Duration(d) => Ok(d),
            other => Err(mismatch("duration", &other)),
        }
    }
}

impl Field for HostHandle {
    fn shape() -> Shape {
        Shape::Handle
    }
    fn to_value(&self) -> Value {
        Value::Handle(self.clone())
    }
    fn from_value(value: Value) -> Result<Self, EditError> {
        match value {
            Value::Handle(h) => Ok(h),
            other => Err(mismatch("handle", &other)),
        }
    }
}

macro_rules! composite_field {
    ($($ty:ident),*) => {$(
        impl Field for $ty {
            fn shape() -> Shape {
                Shape::Composite(CompositeKind::$ty)
            }
            fn to_value(&self) -> Value {
                Value::Composite(Composite::$ty(self.clone()))
            }
            fn from_value(value: Value) -> Result<Self, EditError> {
                match value {
                    Value::Composite(Composite::$ty(v)) => Ok(v),
                    other => Err(mismatch(stringify!($ty), &other)),
                }
            }
        }
    )*};
}

composite_field!(
    Vec2, Vec2Int, Vec3, Vec3Int, Vec4, Quat, Rect, Bounds, Color, Matrix4, Curve, Gradient,
    LayerMask
);
