use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// How long a search term must sit unchanged before a request goes out.
pub const QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Keystroke suppression for live search. Every input restarts the quiet
/// window; only a term that survives the whole window unchanged is emitted
/// on the receiver. Terms superseded mid-window are never delivered.
pub struct Debouncer {
    delay: Duration,
    output: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (output, terms) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                output,
                pending: None,
            },
            terms,
        )
    }

    pub fn input(&mut self, term: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let term = term.into();
        let output = self.output.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = output.send(term);
        }));
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_term_of_a_burst_fires() {
        let (mut debouncer, mut terms) = Debouncer::new(QUIET_WINDOW);

        debouncer.input("b");
        debouncer.input("ba");
        debouncer.input("batman");

        assert_eq!(terms.recv().await.as_deref(), Some("batman"));
        assert!(terms.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn retyping_mid_window_restarts_the_clock() {
        let (mut debouncer, mut terms) = Debouncer::new(QUIET_WINDOW);

        debouncer.input("inter");
        advance(Duration::from_millis(300)).await;
        assert!(terms.try_recv().is_err());

        debouncer.input("interstellar");
        advance(Duration::from_millis(300)).await;
        assert!(terms.try_recv().is_err());

        assert_eq!(terms.recv().await.as_deref(), Some("interstellar"));
        assert!(terms.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn each_settled_term_fires_exactly_once() {
        let (mut debouncer, mut terms) = Debouncer::new(QUIET_WINDOW);

        debouncer.input("joker");
        assert_eq!(terms.recv().await.as_deref(), Some("joker"));
        assert!(terms.try_recv().is_err());

        debouncer.input("joker 2019");
        assert_eq!(terms.recv().await.as_deref(), Some("joker 2019"));
        assert!(terms.try_recv().is_err());
    }
}
