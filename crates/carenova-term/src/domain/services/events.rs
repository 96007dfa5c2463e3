use std::io;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::sync::mpsc;

use crate::domain::models::Event;

async fn read_line<R: AsyncRead + Unpin>(
    lines: &mut Option<Lines<BufReader<R>>>,
) -> io::Result<Option<String>> {
    match lines {
        Some(lines) => lines.next_line().await,
        None => std::future::pending().await,
    }
}

/// Merges typed lines, internal events and CTRL+C into one stream.
pub struct EventsService<R> {
    lines: Option<Lines<BufReader<R>>>,
    events: mpsc::UnboundedReceiver<Event>,
}

impl<R: AsyncRead + Unpin> EventsService<R> {
    pub fn new(input: R, events: mpsc::UnboundedReceiver<Event>) -> EventsService<R> {
        EventsService {
            lines: Some(BufReader::new(input).lines()),
            events,
        }
    }

    /// Swap in the event receiver of a new session, keeping the input reader.
    pub fn replace_events(&mut self, events: mpsc::UnboundedReceiver<Event>) {
        self.events = events;
    }

    pub async fn next(&mut self) -> Result<Event> {
        let event = tokio::select! {
            event = self.events.recv() => match event {
                Some(event) => event,
                None => bail!("internal event channel closed"),
            },
            line = read_line(&mut self.lines) => match line {
                Ok(Some(line)) => Event::Input(line),
                Ok(None) => Event::InputClosed,
                Err(err) => {
                    tracing::error!(error = %err, "failed to read input");
                    Event::InputClosed
                }
            },
            _ = tokio::signal::ctrl_c() => Event::KeyboardCTRLC,
        };

        if matches!(event, Event::InputClosed) {
            self.lines = None;
        }

        Ok(event)
    }
}
