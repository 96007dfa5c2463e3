use anyhow::Result;
use carenova_client::SocketHandle;
use carenova_types::AnalysisRequest;

use crate::domain::models::AnalysisChannel;

impl AnalysisChannel for SocketHandle {
    fn send(&self, request: &AnalysisRequest) -> Result<()> {
        SocketHandle::send(self, request)?;
        Ok(())
    }

    fn close(&self) {
        SocketHandle::close(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carenova_client::ChatSocket;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_send_before_open_fails() {
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let handle = ChatSocket::connect("ws://127.0.0.1:9/ws/chat".to_string(), events_tx);
        let channel: Box<dyn AnalysisChannel> = Box::new(handle);

        let err = channel.send(&AnalysisRequest::default()).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("not connected"));
        channel.close();
    }
}
