use crate::domain::ports::SignalSink;
use crate::domain::vehicle::{Cue, VehicleType};
use crate::utils::error::Result;

/// Headless signal collaborator: announces cues in the log instead of playing sounds.
#[derive(Debug, Clone, Default)]
pub struct TracingSignalSink;

impl SignalSink for TracingSignalSink {
    fn play(&self, kind: VehicleType, cue: Cue) -> Result<()> {
        tracing::info!("🔊 {} ({})", cue.event_name(), kind);
        Ok(())
    }
}
