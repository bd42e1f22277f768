// crates/native-session-core/src/audit.rs
// ============================================================================
// Module: Session Property Audit Logging
// Description: Structured audit events for registry construction and merges.
// Purpose: Emit JSON-lines diagnostics without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The registry is deliberately permissive: unparseable engine defaults become
//! "no default" and unknown override names pass through untouched. These
//! events make those silent outcomes observable. Sinks receive typed events and
//! decide where to route them; the default sink discards everything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Registry construction audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryBuiltEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Number of registered properties.
    pub property_count: usize,
    /// Number of defaults taken from the engine.
    pub engine_defaults: usize,
    /// Number of literal defaults declared by the catalog.
    pub literal_defaults: usize,
    /// Properties left without a default, ordered by name.
    pub missing_defaults: Vec<String>,
    /// Catalog rows skipped during construction, with the reason.
    pub skipped_rows: Vec<String>,
}

/// Merge pass label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePass {
    /// Property defaults written into the engine config.
    Defaults,
    /// Session overrides written into the engine config.
    Overrides,
}

/// Engine config merge audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMergeEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Merge pass that produced the event.
    pub pass: MergePass,
    /// Number of entries written into the output map.
    pub entries_written: usize,
    /// Override names not recognized by the registry, written as-is.
    pub passthrough_keys: Vec<String>,
}

impl RegistryBuiltEvent {
    /// Creates a registry construction event with a consistent timestamp.
    #[must_use]
    pub fn new(
        property_count: usize,
        engine_defaults: usize,
        literal_defaults: usize,
        missing_defaults: Vec<String>,
    ) -> Self {
        Self {
            event: "registry_built",
            timestamp_ms: now_ms(),
            property_count,
            engine_defaults,
            literal_defaults,
            missing_defaults,
            skipped_rows: Vec::new(),
        }
    }
}

impl SessionMergeEvent {
    /// Creates a merge event with a consistent timestamp.
    #[must_use]
    pub fn new(pass: MergePass, entries_written: usize, passthrough_keys: Vec<String>) -> Self {
        Self {
            event: "session_merge",
            timestamp_ms: now_ms(),
            pass,
            entries_written,
            passthrough_keys,
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for session property events.
pub trait SessionAuditSink: Send + Sync {
    /// Record a registry construction event.
    fn record_registry(&self, event: &RegistryBuiltEvent);

    /// Record an engine config merge event.
    fn record_merge(&self, _event: &SessionMergeEvent) {}
}

/// Audit sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl SessionAuditSink for NoopAuditSink {
    fn record_registry(&self, _event: &RegistryBuiltEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl SessionAuditSink for StderrAuditSink {
    fn record_registry(&self, event: &RegistryBuiltEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_merge(&self, event: &SessionMergeEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
#[derive(Debug)]
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event line.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl SessionAuditSink for FileAuditSink {
    fn record_registry(&self, event: &RegistryBuiltEvent) {
        self.append(event);
    }

    fn record_merge(&self, event: &SessionMergeEvent) {
        self.append(event);
    }
}
