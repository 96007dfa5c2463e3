use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use carenova_client::FollowupClient;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::followup::FollowupQuestionService;
use crate::domain::models::Action;
use crate::domain::models::AnalysisChannelBox;
use crate::domain::models::Event;

fn notify(event_tx: &mpsc::UnboundedSender<Event>, event: Event) {
    if let Err(err) = event_tx.send(event) {
        tracing::debug!(event = ?err.0, "event loop is gone, dropping event");
    }
}

async fn check_health(client: Arc<dyn FollowupClient>, event_tx: mpsc::UnboundedSender<Event>) {
    match client.health_check().await {
        Ok(health) if health.is_healthy() => {
            tracing::info!(
                models_loaded = health.models_loaded,
                vector_db_ready = health.vector_db_ready,
                "backend is healthy"
            );
        }
        Ok(health) => {
            tracing::warn!(status = %health.status, "backend reports degraded health");
            let reason = if health.message.is_empty() {
                format!("Status: {}", health.status)
            } else {
                health.message
            };
            notify(&event_tx, Event::BackendUnhealthy(reason));
        }
        Err(err) => {
            tracing::warn!(error = %err, "backend health check failed");
            notify(
                &event_tx,
                Event::BackendUnhealthy(format!("Health check failed: {err}")),
            );
        }
    }
}

/// Executes the side effects the conversation asks for and reports their
/// outcome back as events.
pub struct ActionsService {
    client: Arc<dyn FollowupClient>,
    questions: FollowupQuestionService,
    channel: AnalysisChannelBox,
    event_tx: mpsc::UnboundedSender<Event>,
    timers: CancellationToken,
}

impl ActionsService {
    pub fn new(
        client: Arc<dyn FollowupClient>,
        channel: AnalysisChannelBox,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> ActionsService {
        ActionsService {
            questions: FollowupQuestionService::new(client.clone()),
            client,
            channel,
            event_tx,
            timers: CancellationToken::new(),
        }
    }

    /// Runs until every action sender is dropped. Pending timers are cancelled
    /// and the channel is closed on the way out.
    pub async fn start(mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        while let Some(action) = rx.recv().await {
            tracing::trace!(action = ?action, "handling action");
            match action {
                Action::CheckHealth => {
                    tokio::spawn(check_health(self.client.clone(), self.event_tx.clone()));
                }
                Action::FetchFollowupQuestions { cycle, symptoms } => {
                    let questions = self.questions.clone();
                    let event_tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        let questions = questions.fetch(&symptoms).await;
                        notify(
                            &event_tx,
                            Event::FollowupQuestionsLoaded { cycle, questions },
                        );
                    });
                }
                Action::SendAnalysis(request) => {
                    if let Err(err) = self.channel.send(&request) {
                        self.event_tx
                            .send(Event::AnalysisSendFailed(err.to_string()))?;
                    }
                }
                Action::ScheduleFocus(delay) => self.schedule(delay, Event::FocusInput),
                Action::ScheduleReload(delay) => self.schedule(delay, Event::Reload),
                Action::CancelTimers => {
                    self.timers.cancel();
                    self.timers = CancellationToken::new();
                }
            }
        }

        self.timers.cancel();
        self.channel.close();
        Ok(())
    }

    fn schedule(&self, delay: Duration, event: Event) {
        let token = self.timers.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(event = ?event, "timer cancelled");
                }
                _ = tokio::time::sleep(delay) => notify(&event_tx, event),
            }
        });
    }
}
