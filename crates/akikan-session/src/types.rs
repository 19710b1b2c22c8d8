/// One logical key press, delivered once per physical press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable key.
    Char(char),
    Backspace,
}

impl KeyEvent {
    /// Key events for each character of `s`, in order.
    pub fn keys(s: &str) -> impl Iterator<Item = KeyEvent> + '_ {
        s.chars().map(KeyEvent::Char)
    }
}

/// Outbound notifications for the presentation, audio and score layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingEvent {
    /// A key was rejected.
    Miss,
    /// A key was accepted.
    Correct { key: char },
    /// A new phrase is on screen.
    NextQuestion,
    /// The current phrase was fully typed and its delay has elapsed.
    QuestionComplete,
    /// The word on `lane` was completed.
    WordCompleted { lane: usize },
    /// An object should be spawned on `lane`.
    SpawnRequested { lane: usize },
}

/// Common capability of both matchers: keys in, events out, driven by a
/// per-frame tick.
pub trait TypingEngine {
    fn handle_key(&mut self, event: KeyEvent);

    /// Advance one frame.
    fn tick(&mut self);

    /// Drain the events produced since the last call.
    fn take_events(&mut self) -> Vec<TypingEvent>;
}
