use std::io;
use std::sync::Arc;

use anyhow::Result;
use carenova_client::socket_url;
use carenova_client::ChatSocket;
use carenova_client::FollowupClient;
use carenova_client::HttpFollowupClient;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Event;
use crate::domain::services::ActionsService;
use crate::domain::services::Conversation;
use crate::domain::services::ConversationProps;
use crate::domain::services::EventsService;
use crate::domain::services::LoopControl;
use crate::presentation::TerminalView;
use crate::presentation::View;

/// Everything a session needs that outlives a reload.
pub struct SessionContext {
    pub client: Arc<dyn FollowupClient>,
    pub chat_url: String,
    pub props: ConversationProps,
}

impl SessionContext {
    pub fn from_config() -> Result<SessionContext> {
        let server_url = Config::get(ConfigKey::ServerUrl);
        let client = HttpFollowupClient::new(server_url.as_str())
            .with_timeout(Config::get_duration(ConfigKey::RequestTimeout));

        Ok(SessionContext {
            client: Arc::new(client),
            chat_url: socket_url(&server_url)?,
            props: ConversationProps {
                reload_delay: Config::get_duration(ConfigKey::ReloadDelay),
                ..Default::default()
            },
        })
    }
}

/// One conversation over one chat socket. Returns once the user quits or the
/// conversation asks for a reload; the socket is closed either way.
pub async fn run_session<R: AsyncRead + Unpin, V: View>(
    context: &SessionContext,
    view: V,
    events: &mut EventsService<R>,
    event_tx: mpsc::UnboundedSender<Event>,
) -> Result<LoopControl> {
    let (socket_tx, mut socket_rx) = mpsc::unbounded_channel();
    let socket = ChatSocket::connect(context.chat_url.clone(), socket_tx);

    let forward_tx = event_tx.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(socket_event) = socket_rx.recv().await {
            if forward_tx.send(Event::Socket(socket_event)).is_err() {
                break;
            }
        }
    });

    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let actions = ActionsService::new(context.client.clone(), Box::new(socket.clone()), event_tx);
    let worker = tokio::spawn(async move {
        if let Err(err) = actions.start(&mut action_rx).await {
            tracing::error!(error = %err, "actions service stopped");
        }
    });

    let mut conversation = Conversation::new(view, action_tx, context.props);
    conversation.start()?;

    let res = loop {
        let event = match events.next().await {
            Ok(event) => event,
            Err(err) => break Err(err),
        };

        match conversation.handle_event(event) {
            Ok(LoopControl::Continue) => continue,
            Ok(control) => break Ok(control),
            Err(err) => break Err(err),
        }
    };

    // Dropping the conversation drops the last action sender, which stops the
    // actions service and cancels its timers.
    drop(conversation);
    socket.close();
    if let Err(err) = worker.await {
        tracing::error!(error = %err, "actions service panicked");
    }
    forwarder.abort();

    res
}

pub async fn start_loop() -> Result<()> {
    let context = SessionContext::from_config()?;
    tracing::info!(chat_url = %context.chat_url, "starting carenova");

    let (mut event_tx, event_rx) = mpsc::unbounded_channel();
    let mut events = EventsService::new(tokio::io::stdin(), event_rx);

    loop {
        let view = TerminalView::new(io::stdout());
        match run_session(&context, view, &mut events, event_tx).await? {
            LoopControl::Quit => break,
            LoopControl::Reload | LoopControl::Continue => {
                tracing::info!("reloading session");
                let (tx, rx) = mpsc::unbounded_channel();
                events.replace_events(rx);
                event_tx = tx;
            }
        }
    }

    tracing::info!("carenova stopped");
    Ok(())
}
