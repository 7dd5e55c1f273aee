// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report generation and JSON export.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DiagnosticEventKind;

// =============================================================================
// Report Metadata
// =============================================================================

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportMetadata {
    /// Short content-derived identifier (blake3 of the generation instant).
    pub report_id: String,
    /// When the report was generated (ISO 8601)
    pub generated_at: String,
    /// Version of `PassPix` that generated the report
    pub passpix_version: String,
    /// When diagnostic collection started (ISO 8601)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        let generated_at = Utc::now();
        Self {
            report_id: report_id(generated_at, collection_started_at),
            generated_at: generated_at.to_rfc3339(),
            passpix_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

fn report_id(generated_at: DateTime<Utc>, started_at: DateTime<Utc>) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(generated_at.to_rfc3339().as_bytes());
    hasher.update(started_at.to_rfc3339().as_bytes());
    hasher.update(&std::process::id().to_le_bytes());
    let hash = hasher.finalize().to_hex();
    hash.as_str()[..16].to_string()
}

// =============================================================================
// System Information
// =============================================================================

/// Coarse, non-identifying host description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu_cores: usize,
}

impl SystemInfo {
    #[must_use]
    pub fn collect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_cores: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
        }
    }
}

// =============================================================================
// Serializable Event
// =============================================================================

/// A diagnostic event that can be serialized to JSON.
///
/// `Instant` timestamps become milliseconds since collection started.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;

        Self { timestamp_ms, kind }
    }
}

// =============================================================================
// Report Summary
// =============================================================================

/// Summary statistics for a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    /// Count of events by type (e.g., `"user_action": 15`)
    pub event_counts: BTreeMap<String, usize>,
    /// Sum of AI round-trip durations
    pub ai_edit_total_ms: u64,
    pub ai_edit_failures: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut event_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut ai_edit_total_ms = 0;
        let mut ai_edit_failures = 0;

        for event in events {
            let type_name = match &event.kind {
                DiagnosticEventKind::UserAction { .. } => "user_action",
                DiagnosticEventKind::AppState { .. } => "app_state",
                DiagnosticEventKind::Operation { operation } => {
                    if let super::AppOperation::AiEdit {
                        duration_ms,
                        success,
                        ..
                    } = operation
                    {
                        ai_edit_total_ms += duration_ms;
                        if !success {
                            ai_edit_failures += 1;
                        }
                    }
                    "operation"
                }
                DiagnosticEventKind::Warning { .. } => "warning",
                DiagnosticEventKind::Error { .. } => "error",
            };
            *event_counts.entry(type_name.to_string()).or_insert(0) += 1;
        }

        Self {
            event_counts,
            ai_edit_total_ms,
            ai_edit_failures,
        }
    }
}

// =============================================================================
// Diagnostic Report
// =============================================================================

/// A complete diagnostic report ready for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub system_info: SystemInfo,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}

impl DiagnosticReport {
    /// Creates a new diagnostic report with summary computed automatically.
    #[must_use]
    pub fn new(
        metadata: ReportMetadata,
        system_info: SystemInfo,
        events: Vec<SerializableEvent>,
    ) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            system_info,
            events,
            summary,
        }
    }

    /// Exports the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
