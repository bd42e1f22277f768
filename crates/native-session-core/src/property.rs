// crates/native-session-core/src/property.rs
// ============================================================================
// Module: Session Property Model
// Description: Typed session property values and their kind tags.
// Purpose: Unify integer, boolean, long, and string knobs behind one shape.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A session property is an immutable description of one execution-engine
//! knob: its public name, the engine-internal config key it maps to, a kind
//! tag, a visibility flag, and an optional typed default.
//!
//! Values are a closed tagged union ([`PropertyValue`]); the kind is stored on
//! the property at construction and never recovered from the value at runtime.
//! [`PropertyKind::Unknown`] is the total fallback for kinds outside the
//! supported set and never carries a default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::RegistryError;

// ============================================================================
// SECTION: Property Kind
// ============================================================================

/// Closed set of supported session property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// 32-bit signed integer.
    Integer,
    /// Boolean flag.
    Boolean,
    /// 64-bit signed integer.
    Long,
    /// Free-form text.
    String,
    /// Any kind outside the supported set.
    Unknown,
}

impl PropertyKind {
    /// Returns a stable lowercase label for diagnostics and docs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Long => "long",
            Self::String => "string",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the SQL type signature reported to coordinators.
    #[must_use]
    pub const fn type_signature(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Long => "bigint",
            Self::String => "varchar",
            Self::Unknown => "UnknownType",
        }
    }

    /// Maps a reported type signature back to a kind.
    ///
    /// Unrecognized signatures resolve to [`PropertyKind::Unknown`].
    #[must_use]
    pub fn from_type_signature(signature: &str) -> Self {
        match signature {
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "bigint" => Self::Long,
            "varchar" => Self::String,
            _ => Self::Unknown,
        }
    }

    /// Returns all kinds in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Integer, Self::Boolean, Self::Long, Self::String, Self::Unknown]
    }

    /// Parses text into a value of this kind.
    ///
    /// Surrounding whitespace is ignored for every kind; inner whitespace in
    /// strings is kept. Returns `None` when the text does not parse or is blank,
    /// and [`PropertyKind::Unknown`] never parses.
    #[must_use]
    pub fn parse_value(self, text: &str) -> Option<PropertyValue> {
        match self {
            Self::Integer => text.trim().parse::<i32>().ok().map(PropertyValue::Integer),
            Self::Long => text.trim().parse::<i64>().ok().map(PropertyValue::Long),
            Self::Boolean => match text.trim() {
                "true" => Some(PropertyValue::Boolean(true)),
                "false" => Some(PropertyValue::Boolean(false)),
                _ => None,
            },
            Self::String => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| PropertyValue::String(trimmed.to_string()))
            }
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Property Value
// ============================================================================

/// Typed session property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// 32-bit signed integer value.
    Integer(i32),
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer value.
    Long(i64),
    /// Text value.
    String(String),
}

impl PropertyValue {
    /// Returns the kind tag for this value.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Integer(_) => PropertyKind::Integer,
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Long(_) => PropertyKind::Long,
            Self::String(_) => PropertyKind::String,
        }
    }

    /// Renders the value in the string form expected by the engine config.
    ///
    /// Booleans render as `true`/`false`; numbers use canonical decimal form.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Boolean(value) => String::from(if *value { "true" } else { "false" }),
            Self::Long(value) => value.to_string(),
            Self::String(value) => value.clone(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.render())
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

// ============================================================================
// SECTION: Session Property
// ============================================================================

/// Immutable session property definition.
///
/// # Invariants
/// - `name` is non-empty.
/// - When a default is present, its kind equals `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProperty {
    /// Stable public identifier.
    name: String,
    /// Human-readable description.
    description: String,
    /// Declared kind.
    kind: PropertyKind,
    /// Optional typed default; absent defers to the engine default.
    default: Option<PropertyValue>,
    /// Hides the property from external listings (metadata only).
    hidden: bool,
    /// Engine-internal config key.
    internal_config_key: String,
}

impl SessionProperty {
    /// Creates a property with a declared kind and optional default.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] when `name` is empty and
    /// [`RegistryError::KindMismatch`] when the default does not match `kind`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: PropertyKind,
        hidden: bool,
        internal_config_key: impl Into<String>,
        default: Option<PropertyValue>,
    ) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if let Some(value) = &default
            && value.kind() != kind
        {
            return Err(RegistryError::KindMismatch {
                property: name,
                expected: kind,
                actual: value.kind(),
            });
        }
        Ok(Self {
            name,
            description: description.into(),
            kind,
            default,
            hidden,
            internal_config_key: internal_config_key.into(),
        })
    }

    /// Creates a property whose kind is taken from its default value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] when `name` is empty.
    pub fn with_default(
        name: impl Into<String>,
        description: impl Into<String>,
        hidden: bool,
        internal_config_key: impl Into<String>,
        default: PropertyValue,
    ) -> Result<Self, RegistryError> {
        let kind = default.kind();
        Self::new(name, description, kind, hidden, internal_config_key, Some(default))
    }

    /// Returns the public property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the property description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared kind.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Returns the typed default, if any.
    #[must_use]
    pub const fn default(&self) -> Option<&PropertyValue> {
        self.default.as_ref()
    }

    /// Returns the rendered default, or an empty string when absent.
    ///
    /// A string default of `""` is indistinguishable from no default here; use
    /// [`SessionProperty::default`] when the difference matters.
    #[must_use]
    pub fn default_value(&self) -> String {
        self.default.as_ref().map(PropertyValue::render).unwrap_or_default()
    }

    /// Returns true when the property is hidden from listings.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns the engine-internal config key.
    #[must_use]
    pub fn internal_config_key(&self) -> &str {
        &self.internal_config_key
    }
}
