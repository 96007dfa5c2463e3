use carenova_client::{ChatSocket, SocketEvent};
use carenova_types::{AnalysisRequest, ServerMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

/// Accepts one connection, waits for an analysis request and answers it the way
/// the backend does: one thinking frame, one unknown frame, then the analysis.
async fn spawn_backend() -> (String, tokio::task::JoinHandle<AnalysisRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let request = loop {
            match ws.next().await.unwrap().unwrap() {
                WsMessage::Text(text) => {
                    break serde_json::from_str::<AnalysisRequest>(text.as_str()).unwrap()
                }
                _ => continue,
            }
        };

        let frames = [
            r#"{"type":"thinking","content":"Analyzing your symptoms..."}"#,
            r#"{"type":"progress","percent":50}"#,
            r#"{"type":"analysis","data":{"severity":"Severe","confidence":"80%","possible_conditions":["Angina"],"home_care_tips":["Stay calm"],"when_to_see_doctor":["Now"],"disclaimer":"Not a diagnosis."}}"#,
        ];
        for frame in frames {
            ws.send(WsMessage::Text(frame.to_string().into()))
                .await
                .unwrap();
        }
        ws.close(None).await.unwrap();

        request
    });

    (format!("ws://{}/ws/chat", addr), server)
}

#[tokio::test]
async fn test_analysis_exchange() {
    let (url, server) = spawn_backend().await;
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let handle = ChatSocket::connect(url, events_tx);
    assert_eq!(events_rx.recv().await, Some(SocketEvent::Opened));
    assert!(handle.is_connected());

    let request = AnalysisRequest {
        session_id: "session_1_abcdefghi".to_string(),
        initial_symptoms: "severe chest pain".to_string(),
        followup_answers: vec!["a1".to_string(), "a2".to_string()],
    };
    handle.send(&request).unwrap();

    assert_eq!(
        events_rx.recv().await,
        Some(SocketEvent::Message(ServerMessage::Thinking {
            content: "Analyzing your symptoms...".to_string()
        }))
    );
    assert_eq!(
        events_rx.recv().await,
        Some(SocketEvent::Unrecognized {
            kind: "progress".to_string()
        })
    );
    match events_rx.recv().await {
        Some(SocketEvent::Message(ServerMessage::Analysis { data })) => {
            assert_eq!(data.severity, "Severe");
            assert_eq!(data.possible_conditions, vec!["Angina"]);
        }
        other => panic!("Expected analysis, got {:?}", other),
    }

    let mut saw_closed = false;
    while let Some(event) = events_rx.recv().await {
        if event == SocketEvent::Closed {
            saw_closed = true;
            break;
        }
    }
    assert!(saw_closed);
    assert!(!handle.is_connected());

    assert_eq!(server.await.unwrap(), request);
}

#[tokio::test]
async fn test_client_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        while let Some(Ok(frame)) = ws.next().await {
            if frame.is_close() {
                break;
            }
        }
    });

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let handle = ChatSocket::connect(format!("ws://{}/ws/chat", addr), events_tx);
    assert_eq!(events_rx.recv().await, Some(SocketEvent::Opened));

    handle.close();
    assert_eq!(events_rx.recv().await, Some(SocketEvent::Closed));
    assert!(!handle.is_connected());

    server.await.unwrap();
}
