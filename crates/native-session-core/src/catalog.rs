// crates/native-session-core/src/catalog.rs
// ============================================================================
// Module: Built-in Session Property Catalog
// Description: Static table of the session properties exposed by the worker.
// Purpose: Keep the canonical property list auditable as data.
// Dependencies: crate::engine, crate::property
// ============================================================================

//! ## Overview
//! The catalog is the source of truth for native session properties. Each
//! [`PropertySpec`] row names the public property, its engine-internal key,
//! its kind, its visibility, and where its default comes from: either a
//! literal that overrides the engine, or the engine's own built-in default.
//!
//! The table is consumed by a single construction loop in
//! [`crate::registry::SessionPropertyRegistry`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::engine::keys;
use crate::property::PropertyKind;
use crate::property::PropertyValue;

// ============================================================================
// SECTION: Property Names
// ============================================================================

/// Public session property names.
pub mod names {
    /// Max memory a final aggregation can use before spilling.
    pub const AGGREGATION_SPILL_MEMORY_THRESHOLD: &str =
        "native_aggregation_spill_memory_threshold";
    /// Simplified expression evaluation toggle.
    pub const EXPR_EVAL_SIMPLIFIED: &str = "native_simplified_expression_evaluation_enabled";
    /// Max memory a hash join can use before spilling.
    pub const JOIN_SPILL_MEMORY_THRESHOLD: &str = "native_join_spill_memory_threshold";
    /// Max memory an order by can use before spilling.
    pub const ORDER_BY_SPILL_MEMORY_THRESHOLD: &str = "native_order_by_spill_memory_threshold";
    /// Max spilling level for hash join build.
    pub const MAX_SPILL_LEVEL: &str = "native_max_spill_level";
    /// Max spill file size.
    pub const MAX_SPILL_FILE_SIZE: &str = "native_max_spill_file_size";
    /// Spill compression codec.
    pub const SPILL_COMPRESSION_CODEC: &str = "native_spill_compression_codec";
    /// Spill write buffer size in bytes.
    pub const SPILL_WRITE_BUFFER_SIZE: &str = "native_spill_write_buffer_size";
    /// Free-form spill file creation config.
    pub const SPILL_FILE_CREATE_CONFIG: &str = "native_spill_file_create_config";
    /// Join spilling toggle.
    pub const JOIN_SPILL_ENABLED: &str = "native_join_spill_enabled";
    /// Window spilling toggle.
    pub const WINDOW_SPILL_ENABLED: &str = "native_window_spill_enabled";
    /// Writer spilling toggle.
    pub const WRITER_SPILL_ENABLED: &str = "native_writer_spill_enabled";
    /// Row number spilling toggle.
    pub const ROW_NUMBER_SPILL_ENABLED: &str = "native_row_number_spill_enabled";
    /// Spill partition bits for hash join and row number.
    pub const JOIN_SPILL_PARTITION_BITS: &str = "native_join_spiller_partition_bits";
    /// Top-N row number spilling toggle.
    pub const TOPN_ROW_NUMBER_SPILL_ENABLED: &str = "native_topn_row_number_spill_enabled";
    /// Operator output validation toggle.
    pub const VALIDATE_OUTPUT_FROM_OPERATORS: &str = "native_debug_validate_output_from_operators";
    /// Legacy TIME and TIMESTAMP semantics.
    pub const LEGACY_TIMESTAMP: &str = "legacy_timestamp";
    /// Driver cpu time slice limit in milliseconds.
    pub const DRIVER_CPU_TIME_SLICE_LIMIT_MS: &str = "driver_cpu_time_slice_limit_ms";
}

// ============================================================================
// SECTION: Catalog Types
// ============================================================================

/// Literal default declared directly in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralDefault {
    /// Integer literal.
    Integer(i32),
    /// Boolean literal.
    Boolean(bool),
    /// Long literal.
    Long(i64),
    /// Text literal.
    String(&'static str),
}

impl LiteralDefault {
    /// Converts the literal into an owned property value.
    #[must_use]
    pub fn to_value(self) -> PropertyValue {
        match self {
            Self::Integer(value) => PropertyValue::Integer(value),
            Self::Boolean(value) => PropertyValue::Boolean(value),
            Self::Long(value) => PropertyValue::Long(value),
            Self::String(value) => PropertyValue::String(value.to_string()),
        }
    }
}

/// Where a catalog entry takes its default from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Use the engine's built-in default for the internal key.
    Engine,
    /// Override the engine default with a literal.
    Literal(LiteralDefault),
}

/// One row of the session property catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    /// Public property name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Declared kind.
    pub kind: PropertyKind,
    /// Hidden from external listings.
    pub hidden: bool,
    /// Engine-internal config key.
    pub internal_config_key: &'static str,
    /// Default source.
    pub default: DefaultPolicy,
}

// ============================================================================
// SECTION: Built-in Catalog
// ============================================================================

/// Session properties supported by the native worker.
pub const BUILTIN_CATALOG: &[PropertySpec] = &[
    PropertySpec {
        name: names::AGGREGATION_SPILL_MEMORY_THRESHOLD,
        description: "Native Execution only. The max memory that a final aggregation can use \
                      before spilling. If it is 0, then there is no limit",
        kind: PropertyKind::Integer,
        hidden: false,
        internal_config_key: keys::AGGREGATION_SPILL_MEMORY_THRESHOLD,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::EXPR_EVAL_SIMPLIFIED,
        description: "Native Execution only. Enable simplified path in expression evaluation",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::EXPR_EVAL_SIMPLIFIED,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::JOIN_SPILL_MEMORY_THRESHOLD,
        description: "Native Execution only. The max memory that hash join can use before \
                      spilling. If it is 0, then there is no limit",
        kind: PropertyKind::Integer,
        hidden: false,
        internal_config_key: keys::JOIN_SPILL_MEMORY_THRESHOLD,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::ORDER_BY_SPILL_MEMORY_THRESHOLD,
        description: "Native Execution only. The max memory that order by can use before \
                      spilling. If it is 0, then there is no limit",
        kind: PropertyKind::Integer,
        hidden: false,
        internal_config_key: keys::ORDER_BY_SPILL_MEMORY_THRESHOLD,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::MAX_SPILL_LEVEL,
        description: "Native Execution only. The maximum allowed spilling level for hash join \
                      build.\n 0 is the initial spilling level, -1 means unlimited.",
        kind: PropertyKind::Integer,
        hidden: false,
        internal_config_key: keys::MAX_SPILL_LEVEL,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::MAX_SPILL_FILE_SIZE,
        description: "The max allowed spill file size. If it is zero, then there is no limit.",
        kind: PropertyKind::Integer,
        hidden: false,
        internal_config_key: keys::MAX_SPILL_FILE_SIZE,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::SPILL_COMPRESSION_CODEC,
        description: "Native Execution only. The compression algorithm type to compress the \
                      spilled data.\n Supported compression codecs are: ZLIB, SNAPPY, LZO, \
                      ZSTD, LZ4 and GZIP. NONE means no compression.",
        kind: PropertyKind::String,
        hidden: false,
        internal_config_key: keys::SPILL_COMPRESSION_KIND,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::SPILL_WRITE_BUFFER_SIZE,
        description: "Native Execution only. The maximum size in bytes to buffer the serialized \
                      spill data before writing to disk for IO efficiency.\n If set to zero, \
                      buffering is disabled.",
        kind: PropertyKind::Long,
        hidden: false,
        internal_config_key: keys::SPILL_WRITE_BUFFER_SIZE,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::SPILL_FILE_CREATE_CONFIG,
        description: "Native Execution only. Config used to create spill files. This config is \
                      \nprovided to underlying file system and the config is free form. The \
                      form should be\ndefined by the underlying file system.",
        kind: PropertyKind::String,
        hidden: false,
        internal_config_key: keys::SPILL_FILE_CREATE_CONFIG,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::JOIN_SPILL_ENABLED,
        description: "Native Execution only. Enable join spilling on native engine",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::JOIN_SPILL_ENABLED,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::WINDOW_SPILL_ENABLED,
        description: "Native Execution only. Enable window spilling on native engine",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::WINDOW_SPILL_ENABLED,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::WRITER_SPILL_ENABLED,
        description: "Native Execution only. Enable writer spilling on native engine",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::WRITER_SPILL_ENABLED,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::ROW_NUMBER_SPILL_ENABLED,
        description: "Native Execution only. Enable row number spilling on native engine",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::ROW_NUMBER_SPILL_ENABLED,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::JOIN_SPILL_PARTITION_BITS,
        description: "Native Execution only. The number of bits (N) used to calculate the \
                      spilling partition number for hash join and RowNumber: 2 ^ N",
        kind: PropertyKind::Integer,
        hidden: false,
        internal_config_key: keys::JOIN_SPILL_PARTITION_BITS,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::TOPN_ROW_NUMBER_SPILL_ENABLED,
        description: "Native Execution only. Enable topN row number spilling on native engine",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::TOPN_ROW_NUMBER_SPILL_ENABLED,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::VALIDATE_OUTPUT_FROM_OPERATORS,
        description: "If set to true, then during execution of tasks, the output vectors of \
                      every operator are validated for consistency. This is an expensive check \
                      so should only be used for debugging. It can help debug issues where \
                      malformed vector cause failures or crashes by helping identify which \
                      operator is generating them.",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::VALIDATE_OUTPUT_FROM_OPERATORS,
        default: DefaultPolicy::Engine,
    },
    PropertySpec {
        name: names::LEGACY_TIMESTAMP,
        description: "Native Execution only. Use legacy TIME & TIMESTAMP semantics. Warning: \
                      this will be removed",
        kind: PropertyKind::Boolean,
        hidden: false,
        internal_config_key: keys::ADJUST_TIMESTAMP_TO_TIMEZONE,
        default: DefaultPolicy::Literal(LiteralDefault::Boolean(true)),
    },
    PropertySpec {
        name: names::DRIVER_CPU_TIME_SLICE_LIMIT_MS,
        description: "Native Execution only. The cpu time slice limit in ms that a driver \
                      thread.If not zero, can continuously run without yielding. If it is \
                      zero,then there is no limit.",
        kind: PropertyKind::Integer,
        hidden: false,
        internal_config_key: keys::DRIVER_CPU_TIME_SLICE_LIMIT_MS,
        default: DefaultPolicy::Literal(LiteralDefault::Integer(1000)),
    },
];
