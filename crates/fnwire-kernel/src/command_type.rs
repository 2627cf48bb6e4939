//! Command type descriptors.
//!
//! A command type is described once, at registration time, by a metadata
//! table: its fields (with their types and binding attributes), the
//! capability tags it carries and its declared result type. The resolver
//! treats these descriptors as immutable input.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Structural type of a command field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldType {
    /// The text type. A reference type: it may be absent.
    Text,

    /// A bare value type such as `int` or `guid`.
    Value {
        name: String,
        /// The type can be parsed from text (route and query binding).
        #[serde(default = "default_parse")]
        parse: bool,
    },

    /// A value type wrapped to admit absence, e.g. `int?`.
    Nullable {
        name: String,
        #[serde(default = "default_parse")]
        parse: bool,
    },

    /// A collection of items. Bindable from a repeated query key when the
    /// items are simple.
    Sequence { item: Box<FieldType> },

    /// Any other reference type.
    Object { name: String },

    /// The form-body collection type.
    FormCollection,
}

fn default_parse() -> bool {
    true
}

impl FieldType {
    pub fn text() -> Self {
        FieldType::Text
    }

    pub fn value(name: impl Into<String>) -> Self {
        FieldType::Value {
            name: name.into(),
            parse: true,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        FieldType::Nullable {
            name: name.into(),
            parse: true,
        }
    }

    pub fn sequence(item: FieldType) -> Self {
        FieldType::Sequence {
            item: Box::new(item),
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        FieldType::Object { name: name.into() }
    }

    /// Textual name of the type as it appears in generated bindings.
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Text => "string".to_string(),
            FieldType::Value { name, .. } | FieldType::Object { name } => name.clone(),
            FieldType::Nullable { name, .. } => format!("{name}?"),
            FieldType::Sequence { item } => format!("{}[]", item.type_name()),
            FieldType::FormCollection => "form".to_string(),
        }
    }

    /// True for a value type without a nullable wrapper.
    pub fn is_bare_value(&self) -> bool {
        matches!(self, FieldType::Value { .. })
    }

    /// Reference types and nullable-wrapped value types admit absence.
    pub fn is_nullable(&self) -> bool {
        !self.is_bare_value()
    }

    /// Text, any nullable value, or a value type that parses from text.
    pub fn is_route_eligible(&self) -> bool {
        match self {
            FieldType::Text | FieldType::Nullable { .. } => true,
            FieldType::Value { parse, .. } => *parse,
            _ => false,
        }
    }

    /// Simple types that a query string can carry.
    pub fn is_query_supported(&self) -> bool {
        match self {
            FieldType::Text => true,
            FieldType::Value { parse, .. } | FieldType::Nullable { parse, .. } => *parse,
            FieldType::Sequence { item } => {
                !matches!(item.as_ref(), FieldType::Sequence { .. }) && item.is_query_supported()
            }
            FieldType::Object { .. } | FieldType::FormCollection => false,
        }
    }

    pub fn is_form_collection(&self) -> bool {
        matches!(self, FieldType::FormCollection)
    }
}

/// One field of a command type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default = "default_writable")]
    pub writable: bool,
    /// Excluded from every external binding surface.
    #[serde(default)]
    pub security_sensitive: bool,
    /// Serialization name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_alias: Option<String>,
}

fn default_writable() -> bool {
    true
}

impl CommandField {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            writable: true,
            security_sensitive: false,
            wire_alias: None,
        }
    }

    pub fn security_sensitive(mut self) -> Self {
        self.security_sensitive = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn with_wire_alias(mut self, alias: impl Into<String>) -> Self {
        self.wire_alias = Some(alias.into());
        self
    }

    /// Writable and not security-sensitive: the precondition for every
    /// binding surface.
    pub fn is_bindable(&self) -> bool {
        self.writable && !self.security_sensitive
    }

    /// Name used on the wire.
    pub fn wire_name(&self) -> &str {
        self.wire_alias.as_deref().unwrap_or(&self.name)
    }
}

/// Structural capability tags carried by a command or result type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The command is dispatched without a registered handler.
    NoHandler,
    /// The command carries a streamed request body.
    StreamCommand,
    /// Change-feed command receiving one document.
    DocumentCommand,
    /// Change-feed command receiving a batch of documents.
    DocumentBatchCommand,
    /// The result type is assignable to the validation result.
    ValidationResult,
}

/// The result type a command declares.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultType {
    pub name: String,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
}

impl ResultType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn is_validation_result(&self) -> bool {
        self.capabilities.contains(&Capability::ValidationResult)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<CommandField>,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultType>,
}

impl CommandType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            capabilities: BTreeSet::new(),
            result: None,
        }
    }

    pub fn with_field(mut self, field: CommandField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn with_result(mut self, result: ResultType) -> Self {
        self.result = Some(result);
        self
    }

    pub fn implements(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn field(&self, name: &str) -> Option<&CommandField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields eligible for any binding surface, in declaration order.
    pub fn bindable_fields(&self) -> impl Iterator<Item = &CommandField> {
        self.fields.iter().filter(|field| field.is_bindable())
    }
}

/// Registration-time table of command types, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, CommandType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command type. Returns the rejected descriptor when the
    /// name is already taken.
    pub fn register(&mut self, command_type: CommandType) -> Result<(), CommandType> {
        if self.types.contains_key(&command_type.name) {
            return Err(command_type);
        }
        self.types.insert(command_type.name.clone(), command_type);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
