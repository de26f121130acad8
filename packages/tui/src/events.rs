use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Event types for the TUI application
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Forwards terminal key presses and periodic ticks to the app loop
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::unbounded_channel();

        // crossterm polling blocks, so it runs off the async workers.
        // The thread exits on the first failed send after the handler is dropped.
        tokio::task::spawn_blocking(move || forward_events(&sender, tick_rate));

        Self { receiver }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }
}

/// Poll the terminal until the receiving side goes away
fn forward_events(sender: &mpsc::UnboundedSender<AppEvent>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if let Ok(true) = event::poll(timeout) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Press && sender.send(AppEvent::Key(key)).is_err() {
                    return;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if sender.send(AppEvent::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forwarding_stops_once_receiver_is_gone() {
        let (sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);

        let forwarder =
            tokio::task::spawn_blocking(move || forward_events(&sender, Duration::from_millis(5)));

        tokio::time::timeout(Duration::from_secs(2), forwarder)
            .await
            .expect("forwarder should exit")
            .unwrap();
    }
}
