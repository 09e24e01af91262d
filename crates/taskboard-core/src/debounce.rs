use std::time::Duration;

use tracing::trace;

/// Collapses a burst of search
/// keystrokes into one search intent.
///
/// Every keystroke bumps the
/// generation; a timer only gets to
/// deliver the keyword if its
/// generation is still the newest, and
/// only once. The host is expected to
/// drop the previous timer when it arms
/// a new one; the generation check
/// covers timers that fire anyway.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
  delay:      Duration,
  generation: u64,
  pending:    Option<String>
}

impl SearchDebouncer {
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      generation: 0,
      pending: None
    }
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }

  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }

  /// Records the current input text and
  /// returns the generation its timer
  /// must present.
  pub fn input(
    &mut self,
    text: &str
  ) -> u64 {
    self.generation += 1;
    self.pending = Some(text.to_string());
    trace!(
      generation = self.generation,
      len = text.len(),
      "search input debounced"
    );
    self.generation
  }

  /// Called when a timer expires.
  pub fn fire(
    &mut self,
    generation: u64
  ) -> Option<String> {
    if generation != self.generation {
      trace!(
        generation,
        latest = self.generation,
        "superseded search timer"
      );
      return None;
    }
    self.pending.take()
  }

  pub fn cancel(&mut self) {
    self.generation += 1;
    self.pending = None;
  }
}
