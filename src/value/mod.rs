//! Value model shared by the editor and the deep-copy engine.
//!
//! Core components:
//! - `Shape`: declared structural category of a member (closed tagged union)
//! - `Value`: runtime counterpart, an owned tree with no shared mutable parts
//! - `Schema` / `Inspect`: static member layout of a record kind and access to it
//! - `Field`: conversion between Rust field types and `Value`
//! - `composite`: vectors, colors, curves and other fixed-layout numerics

pub mod composite;
mod field;
mod macros;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

pub use composite::{
    Bounds, Color, Composite, CompositeKind, Curve, Gradient, GradientKey, Keyframe, LayerMask,
    Matrix4, Quat, Rect, Vec2, Vec2Int, Vec3, Vec3Int, Vec4,
};
pub use field::{Field, Stack, shape_of};

use crate::error::EditError;

/// Sequential container flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqKind {
    /// Fixed-length array.
    Array(usize),
    /// Growable list.
    List,
    /// First-in-first-out queue, front first.
    Queue,
    /// Last-in-first-out stack, bottom first.
    Stack,
}

impl SeqKind {
    /// Whether elements can be added and removed.
    pub fn is_growable(self) -> bool {
        !matches!(self, Self::Array(_))
    }
}

/// Declared shape of a member.
#[derive(Debug, Clone)]
pub enum Shape {
    Bool,
    /// Integer, optionally constrained to an inclusive range.
    Int { range: Option<(i64, i64)> },
    /// Float, optionally constrained to an inclusive range.
    Float { range: Option<(f64, f64)> },
    Text,
    /// Closed choice among named variants.
    Enum(&'static [&'static str]),
    Composite(CompositeKind),
    Map(Box<Shape>, Box<Shape>),
    Set(Box<Shape>),
    Seq(SeqKind, Box<Shape>),
    Tuple(Vec<Shape>),
    Timestamp,
    Duration,
    Record(&'static Schema),
    /// Reference shape that may be null.
    Optional(Box<Shape>),
    /// Reference to a host-environment object.
    Handle,
    /// Anything the editor cannot handle; shown read-only.
    Opaque(&'static str),
}

impl Shape {
    pub fn int_in(min: i64, max: i64) -> Self {
        Self::Int {
            range: Some((min.min(max), min.max(max))),
        }
    }

    pub fn float_in(min: f64, max: f64) -> Self {
        Self::Float {
            range: Some((min.min(max), min.max(max))),
        }
    }

    /// Default instance of this shape. `Opaque` shapes have none.
    pub fn default_value(&self) -> Option<Value> {
        let value = match self {
            Self::Bool => Value::Bool(false),
            Self::Int { range } => {
                Value::Int(range.map_or(0, |(min, max)| 0i64.max(min).min(max)))
            }
            Self::Float { range } => {
                Value::Float(range.map_or(0.0, |(min, max)| 0f64.max(min).min(max)))
            }
            Self::Text => Value::Text(String::new()),
            Self::Enum(_) => Value::Enum(0),
            Self::Composite(kind) => Value::Composite(kind.default_value()),
            Self::Map(..) => Value::Map(Vec::new()),
            Self::Set(_) => Value::Set(Vec::new()),
            Self::Seq(SeqKind::Array(len), elem) => Value::Seq(
                (0..*len)
                    .map(|_| elem.default_value())
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Seq(..) => Value::Seq(Vec::new()),
            Self::Tuple(items) => Value::Tuple(
                items
                    .iter()
                    .map(Shape::default_value)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
            Self::Duration => Value::Duration(Duration::ZERO),
            Self::Record(schema) => return schema.default_value(),
            Self::Optional(_) => Value::Null,
            Self::Handle => Value::Handle(HostHandle::unassigned("Object")),
            Self::Opaque(_) => return None,
        };
        Some(value)
    }

    /// Short human-readable name, used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Bool => "bool".to_string(),
            Self::Int { .. } => "int".to_string(),
            Self::Float { .. } => "float".to_string(),
            Self::Text => "text".to_string(),
            Self::Enum(_) => "enum".to_string(),
            Self::Composite(kind) => kind.to_string(),
            Self::Map(k, v) => format!("map<{}, {}>", k.describe(), v.describe()),
            Self::Set(e) => format!("set<{}>", e.describe()),
            Self::Seq(SeqKind::Array(len), e) => format!("[{}; {len}]", e.describe()),
            Self::Seq(SeqKind::List, e) => format!("list<{}>", e.describe()),
            Self::Seq(SeqKind::Queue, e) => format!("queue<{}>", e.describe()),
            Self::Seq(SeqKind::Stack, e) => format!("stack<{}>", e.describe()),
            Self::Tuple(items) => format!(
                "({})",
                items.iter().map(Shape::describe).collect::<Vec<_>>().join(", ")
            ),
            Self::Timestamp => "timestamp".to_string(),
            Self::Duration => "duration".to_string(),
            Self::Record(schema) => schema.name().to_string(),
            Self::Optional(inner) => format!("option<{}>", inner.describe()),
            Self::Handle => "handle".to_string(),
            Self::Opaque(name) => name.to_string(),
        }
    }
}

/// Runtime value of some shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Index into the shape's variant list.
    Enum(usize),
    Composite(Composite),
    /// Entries with pairwise distinct keys.
    Map(Vec<(Value, Value)>),
    /// Pairwise distinct elements.
    Set(Vec<Value>),
    Seq(Vec<Value>),
    Tuple(Vec<Value>),
    Timestamp(DateTime<Utc>),
    Duration(Duration),
    Record(Record),
    Handle(HostHandle),
    /// Display text of a value with no editable representation.
    Opaque(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Enum(_) => "enum",
            Self::Composite(_) => "composite",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Seq(_) => "sequence",
            Self::Tuple(_) => "tuple",
            Self::Timestamp(_) => "timestamp",
            Self::Duration(_) => "duration",
            Self::Record(_) => "record",
            Self::Handle(_) => "handle",
            Self::Opaque(_) => "opaque",
        }
    }
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Enum(i) => write!(f, "#{i}"),
            Self::Composite(c) => write!(f, "{}({})", c.kind(), join(c.components())),
            Self::Map(entries) => write!(
                f,
                "{{{}}}",
                join(entries.iter().map(|(k, v)| format!("{k}: {v}")))
            ),
            Self::Set(items) => write!(f, "{{{}}}", join(items)),
            Self::Seq(items) => write!(f, "[{}]", join(items)),
            Self::Tuple(items) => write!(f, "({})", join(items)),
            Self::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
            Self::Duration(d) => write!(f, "{d:?}"),
            Self::Record(r) => write!(
                f,
                "{} {{ {} }}",
                r.kind,
                join(r.members.iter().map(|(n, v)| format!("{n}: {v}")))
            ),
            Self::Handle(h) => write!(f, "{h}"),
            Self::Opaque(s) => write!(f, "{s}"),
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

/// Text layout used to show and parse timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether a member is a plain field or an accessor-backed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

/// One publicly editable member of a record kind.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: &'static str,
    pub kind: MemberKind,
    pub shape: Shape,
}

/// Static member layout of a record kind, built once per kind.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    members: Vec<Member>,
    default: Option<fn() -> Value>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            members: Vec::new(),
            default: None,
        }
    }

    /// Append a field member.
    pub fn field(mut self, name: &'static str, shape: Shape) -> Self {
        self.members.push(Member {
            name,
            kind: MemberKind::Field,
            shape,
        });
        self
    }

    /// Append a property member.
    pub fn property(mut self, name: &'static str, shape: Shape) -> Self {
        self.members.push(Member {
            name,
            kind: MemberKind::Property,
            shape,
        });
        self
    }

    /// Set the constructor used to materialize a default instance.
    pub fn with_default(mut self, default: fn() -> Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Members in edit order: the field block first, then the property block,
    /// each in declaration order.
    pub fn edit_order(&self) -> impl Iterator<Item = &Member> {
        let fields = self.members.iter().filter(|m| m.kind == MemberKind::Field);
        let properties = self
            .members
            .iter()
            .filter(|m| m.kind == MemberKind::Property);
        fields.chain(properties)
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|make| make())
    }
}

/// Member access for record kinds.
///
/// Implementations are normally generated with [`impl_inspect!`](crate::impl_inspect).
pub trait Inspect {
    /// Member layout of this kind.
    fn schema(&self) -> &'static Schema;

    /// Read a member as an owned value. `None` if the member does not exist.
    fn get(&self, member: &str) -> Option<Value>;

    /// Write a member. The record is left unchanged on error.
    fn set(&mut self, member: &str, value: Value) -> Result<(), EditError>;
}

/// Detached snapshot of a record's members, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub kind: &'static str,
    pub members: Vec<(&'static str, Value)>,
}

impl Record {
    /// Snapshot every member of `source`.
    pub fn capture<T: Inspect + ?Sized>(source: &T) -> Self {
        let schema = source.schema();
        let members = schema
            .members()
            .iter()
            .filter_map(|m| source.get(m.name).map(|v| (m.name, v)))
            .collect();
        Self {
            kind: schema.name(),
            members,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.members
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Write every captured member into `target`, stopping at the first
    /// rejected write.
    pub fn apply_to<T: Inspect + ?Sized>(self, target: &mut T) -> Result<(), EditError> {
        for (name, value) in self.members {
            target.set(name, value)?;
        }
        Ok(())
    }
}

/// Reference to an object owned by the host environment.
///
/// Copies share the referent and equality is identity: the core never owns
/// the lifetime of what a handle points at.
#[derive(Clone)]
pub struct HostHandle {
    type_label: &'static str,
    target: Option<(Arc<str>, Arc<dyn Any + Send + Sync>)>,
}

impl HostHandle {
    /// A handle slot with nothing assigned.
    pub fn unassigned(type_label: &'static str) -> Self {
        Self {
            type_label,
            target: None,
        }
    }

    pub fn new<T: Any + Send + Sync>(type_label: &'static str, name: &str, object: Arc<T>) -> Self {
        let object: Arc<dyn Any + Send + Sync> = object;
        Self {
            type_label,
            target: Some((Arc::from(name), object)),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.target.is_some()
    }

    pub fn type_label(&self) -> &'static str {
        self.type_label
    }

    /// Typed access to the referent.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let (_, object) = self.target.as_ref()?;
        Arc::clone(object).downcast::<T>().ok()
    }
}

impl PartialEq for HostHandle {
    fn eq(&self, other: &Self) -> bool {
        match (&self.target, &other.target) {
            (None, None) => self.type_label == other.type_label,
            (Some((_, a)), Some((_, b))) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for HostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some((name, _)) => write!(f, "{name} ({})", self.type_label),
            None => write!(f, "None ({})", self.type_label),
        }
    }
}

impl fmt::Debug for HostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostHandle({self})")
    }
}
