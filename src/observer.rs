//! Observer pattern for field engines - pub/sub tick reporting
//!
//! Observers are notified inline on the ticking thread after a tick commits,
//! so the engine itself stays synchronous. Hosts that want decoupling can
//! bridge through [`ChannelObserver`] and drain the channel elsewhere.

use crate::engine::TickReport;

/// Event emitted by the engine after a tick commits.
#[derive(Clone, Debug)]
pub enum FieldEvent {
    /// A tick completed; carries the full report.
    Tick { report: TickReport },

    /// A corrective blend was committed this tick.
    CorrectionApplied {
        tick: u64,
        instability: f64,
        frequencies: [f64; 3],
        strength: f64,
    },
}

/// Observer that receives field events
pub trait FieldObserver: Send + Sync {
    /// Called when a field event occurs
    fn on_event(&self, event: FieldEvent);
}

/// Function-based observer for simple cases
pub struct FnObserver<F: Fn(FieldEvent) + Send + Sync>(pub F);

impl<F: Fn(FieldEvent) + Send + Sync> FieldObserver for FnObserver<F> {
    fn on_event(&self, event: FieldEvent) {
        (self.0)(event);
    }
}

/// Channel-based observer - sends events to a channel
pub struct ChannelObserver {
    sender: std::sync::mpsc::Sender<FieldEvent>,
}

impl ChannelObserver {
    pub fn new(sender: std::sync::mpsc::Sender<FieldEvent>) -> Self {
        Self { sender }
    }
}

impl FieldObserver for ChannelObserver {
    fn on_event(&self, event: FieldEvent) {
        // A disconnected receiver is not an engine error.
        let _ = self.sender.send(event);
    }
}
