//! Harmonic Field - dense lattice engine with instability-triggered correction
//!
//! Stability is a ratio, not a state - drift over strength, re-evaluated
//! every tick.
//!
//! # Core Types
//!
//! - **FieldTensor**: Dense 11-axis lattice of f64 cells, bounds-checked access
//! - **FieldEngine**: Tick pipeline with pub/sub reports and bounded history
//!
//! # Architecture: Engine / Telemetry / Observers
//!
//! The system separates into three roles:
//!
//! 1. **Engine** - The substrate owner: probes metrics, evaluates, corrects
//! 2. **Telemetry** - Optional external readings that override modeled
//!    strength and drift (entropy and alignment always come from the lattice)
//! 3. **Observers** - FieldObservers that receive a report every tick and a
//!    correction event whenever a blend commits
//!
//! One engine can serve multiple observers (pub/sub). Telemetry is pluggable
//! behind a trait, so hosts decide where measurements come from.
//!
//! # Core Concepts
//!
//! - **Harmonic seeding**: Every axis-aligned center line starts as a bounded
//!   sine pattern; the frequency table cycles every three axes
//! - **Fixed probes**: Strength at the center, drift/entropy/alignment one
//!   step along their own axes
//! - **Stateless classification**: Each tick compares drift/strength against
//!   the threshold on its own; there is no hysteresis between ticks
//! - **Compute-then-commit correction**: Corrective blends are staged against
//!   the pre-correction lattice and written in one pass
//!
//! # Example: Monitoring with a measured reading
//!
//! ```rust
//! use harmonic_field::{EngineConfig, ExternalReading, FieldEngine, FieldEvent, FnObserver};
//! use std::sync::Arc;
//!
//! // 1. Create the engine (validates config, seeds the lattice)
//! let mut engine = FieldEngine::new(EngineConfig::new(5))?;
//!
//! // 2. Subscribe a reader for correction events
//! engine.subscribe(Arc::new(FnObserver(|event| {
//!     if let FieldEvent::CorrectionApplied { frequencies, .. } = event {
//!         println!("retuned oscillators to {:?}", frequencies);
//!     }
//! })));
//!
//! // 3. Tick on modeled metrics alone - the seeded lattice is calm
//! let report = engine.tick(None)?;
//! assert!(!report.correction_active);
//!
//! // 4. Feed a measured reading that pushes drift past the threshold
//! let reading = ExternalReading { field_strength: 0.82, drift_velocity: 0.42 };
//! let report = engine.tick(Some(&reading))?;
//! assert!(report.correction_active);
//! # Ok::<(), harmonic_field::FieldError>(())
//! ```
//!
//! # Key Insight
//!
//! The engine never trusts a single quiet tick. Every tick re-derives the
//! verdict from current values, so a field that calms down stops being
//! corrected immediately, and one that degrades is caught the same tick.

mod config;
mod correction;
mod engine;
mod error;
mod export;
mod harmonic;
mod metrics;
mod observer;
mod telemetry;
mod tensor;

pub use config::{
    EngineConfig, BASELINE_FREQUENCIES, DEFAULT_EVOLUTION_RATE, DEFAULT_INSTABILITY_THRESHOLD,
    DEFAULT_RESOLUTION, DEFAULT_TIME_COMPRESSION,
};
pub use correction::{apply_correction, correction_frequencies, CorrectionOutcome};
pub use engine::{FieldEngine, TickReport, HISTORY_CAPACITY};
pub use error::{FieldError, FieldResult};
pub use export::{SessionExport, SessionParameters};
pub use harmonic::{seed_baseline, wave, CORRECTION_PHASE};
pub use metrics::{
    extract_metrics, instability_ratio, FieldMetrics, Stability, ALIGNMENT_AXIS, DRIFT_AXIS,
    ENTROPY_AXIS,
};
pub use observer::{ChannelObserver, FieldEvent, FieldObserver, FnObserver};
pub use telemetry::{ExternalReading, SyntheticTelemetry, TelemetrySource};
pub use tensor::{FieldTensor, AXES};
