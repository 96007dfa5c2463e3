use anyhow::Result;
use carenova_types::AnalysisRequest;

/// Write side of the persistent connection that carries the analysis exchange.
pub trait AnalysisChannel: Send + Sync {
    fn send(&self, request: &AnalysisRequest) -> Result<()>;
    fn close(&self);
}

pub type AnalysisChannelBox = Box<dyn AnalysisChannel>;
