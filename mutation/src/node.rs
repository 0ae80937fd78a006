//! Shape classification for untyped nested-write payloads.
//!
//! Payloads carry no type tag. A value is read as a nested write when it is
//! an object holding at least one reserved operation key; every operation
//! is then parsed into a `NestedWrite` variant so each injection rule is an
//! explicit match arm.

use serde_json::{Map, Value};
use std::fmt;

/// Reserved operation keys of the nested-write grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    CreateMany,
    Connect,
    ConnectOrCreate,
    Upsert,
    Update,
    UpdateMany,
    Disconnect,
    Set,
    Delete,
    DeleteMany,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::Create,
        Operation::CreateMany,
        Operation::Connect,
        Operation::ConnectOrCreate,
        Operation::Upsert,
        Operation::Update,
        Operation::UpdateMany,
        Operation::Disconnect,
        Operation::Set,
        Operation::Delete,
        Operation::DeleteMany,
    ];

    /// Parse a payload key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::CreateMany => "createMany",
            Operation::Connect => "connect",
            Operation::ConnectOrCreate => "connectOrCreate",
            Operation::Upsert => "upsert",
            Operation::Update => "update",
            Operation::UpdateMany => "updateMany",
            Operation::Disconnect => "disconnect",
            Operation::Set => "set",
            Operation::Delete => "delete",
            Operation::DeleteMany => "deleteMany",
        }
    }

    /// Whether the operation can write entity data that needs scoping.
    pub fn writes_data(self) -> bool {
        matches!(
            self,
            Operation::Create
                | Operation::CreateMany
                | Operation::ConnectOrCreate
                | Operation::Upsert
                | Operation::Update
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A payload value as the merger sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationNode<'a> {
    /// Null, bool, number or string (dates arrive as strings).
    Scalar(&'a Value),
    /// An array outside any operation key.
    List(&'a [Value]),
    /// A plain object: entity data or an opaque JSON value.
    Record(&'a Map<String, Value>),
    /// An object carrying at least one reserved operation key.
    Operations(&'a Map<String, Value>),
}

impl<'a> MutationNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => MutationNode::List(items),
            Value::Object(map) if has_operations(map) => MutationNode::Operations(map),
            Value::Object(map) => MutationNode::Record(map),
            scalar => MutationNode::Scalar(scalar),
        }
    }
}

/// The argument of an operation: one object, a list, or anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    One(&'a Map<String, Value>),
    Many(&'a [Value]),
    /// Neither an object nor an array; passed through untouched.
    Malformed(&'a Value),
}

impl<'a> Payload<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Payload::One(map),
            Value::Array(items) => Payload::Many(items),
            other => Payload::Malformed(other),
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Payload::Many(_))
    }

    /// An owned copy of the payload as it arrived.
    pub fn to_value(&self) -> Value {
        match *self {
            Payload::One(map) => Value::Object(map.clone()),
            Payload::Many(items) => Value::Array(items.to_vec()),
            Payload::Malformed(value) => value.clone(),
        }
    }
}

/// One reserved key of a nested write, parsed by its grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NestedWrite<'a> {
    /// `create: {..} | [{..}]`
    Create(Payload<'a>),
    /// `createMany: { data: [{..}] | {..}, skipDuplicates? }`
    CreateMany(Payload<'a>),
    /// `connectOrCreate: { where, create } | [..]`
    ConnectOrCreate(Payload<'a>),
    /// `upsert: { where?, create, update } | [..]`
    Upsert(Payload<'a>),
    /// `update: { where, data } | [{ where, data }] | {..data}`
    Update(Payload<'a>),
    /// Operations that only reference or remove existing records.
    Reference(Operation, &'a Value),
}

impl<'a> NestedWrite<'a> {
    pub fn parse(op: Operation, value: &'a Value) -> Self {
        match op {
            Operation::Create => NestedWrite::Create(Payload::of(value)),
            Operation::CreateMany => NestedWrite::CreateMany(Payload::of(value)),
            Operation::ConnectOrCreate => NestedWrite::ConnectOrCreate(Payload::of(value)),
            Operation::Upsert => NestedWrite::Upsert(Payload::of(value)),
            Operation::Update => NestedWrite::Update(Payload::of(value)),
            Operation::Connect
            | Operation::UpdateMany
            | Operation::Disconnect
            | Operation::Set
            | Operation::Delete
            | Operation::DeleteMany => NestedWrite::Reference(op, value),
        }
    }

    /// The payload of a data-writing operation.
    pub fn payload(&self) -> Option<Payload<'a>> {
        match *self {
            NestedWrite::Create(p)
            | NestedWrite::CreateMany(p)
            | NestedWrite::ConnectOrCreate(p)
            | NestedWrite::Upsert(p)
            | NestedWrite::Update(p) => Some(p),
            NestedWrite::Reference(..) => None,
        }
    }
}

/// Whether an object carries at least one reserved operation key.
pub fn has_operations(map: &Map<String, Value>) -> bool {
    map.keys().any(|k| Operation::from_key(k).is_some())
}

/// `{ where, data }` wrapper used by list updates.
pub fn is_where_data(map: &Map<String, Value>) -> bool {
    map.contains_key("data") && map.keys().all(|k| k == "where" || k == "data")
}

/// Location inside a payload, rendered as `$.tags.create[1]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Path<'a> {
    parent: Option<&'a Path<'a>>,
    segment: Segment<'a>,
}

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

impl<'a> Path<'a> {
    pub(crate) fn root() -> Self {
        Self {
            parent: None,
            segment: Segment::Root,
        }
    }

    pub(crate) fn key(&'a self, key: &'a str) -> Self {
        Self {
            parent: Some(self),
            segment: Segment::Key(key),
        }
    }

    pub(crate) fn index(&'a self, index: usize) -> Self {
        Self {
            parent: Some(self),
            segment: Segment::Index(index),
        }
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            parent.fmt(f)?;
        }
        match self.segment {
            Segment::Root => f.write_str("$"),
            Segment::Key(key) => write!(f, ".{key}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}
