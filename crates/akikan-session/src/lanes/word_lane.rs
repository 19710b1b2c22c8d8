use std::collections::VecDeque;

/// One lane: the word currently on screen, how far it has been typed, and
/// the words waiting behind it.
#[derive(Debug, Clone, Default)]
pub struct WordLane {
    current: String,
    typed: usize,
    queue: VecDeque<String>,
}

impl WordLane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `word` (lowercased). An empty lane promotes it immediately.
    pub fn add_word_to_queue(&mut self, word: &str) {
        self.queue.push_back(word.to_lowercase());
        if self.current.is_empty() {
            self.set_next_word();
        }
    }

    /// Promote the next queued word, or clear the lane if the queue is empty.
    pub fn set_next_word(&mut self) {
        self.current = self.queue.pop_front().unwrap_or_default();
        self.typed = 0;
    }

    /// Replace the current word directly, bypassing the queue.
    pub fn set_word(&mut self, word: &str) {
        self.current = word.to_lowercase();
        self.typed = 0;
    }

    pub fn reset_progress(&mut self) {
        self.typed = 0;
    }

    /// The next letter to type, or `None` when the word is empty or done.
    pub fn next_letter(&self) -> Option<char> {
        self.current[self.typed..].chars().next()
    }

    /// Advance one letter if `key` is the next letter.
    pub fn check_and_advance(&mut self, key: char) -> bool {
        match self.next_letter() {
            Some(c) if c == key => {
                self.typed += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.current.is_empty() && self.typed >= self.current.len()
    }

    /// Byte offset of the next letter within the current word.
    pub fn typed_index(&self) -> usize {
        self.typed
    }

    pub fn current_word(&self) -> &str {
        &self.current
    }

    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// (typed, untyped) halves of the current word, for highlighting.
    pub fn split_typed(&self) -> (&str, &str) {
        self.current.split_at(self.typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lane() {
        let lane = WordLane::new();
        assert_eq!(lane.next_letter(), None);
        assert!(!lane.is_complete());
        assert_eq!(lane.current_word(), "");
    }

    #[test]
    fn test_queue_promotes_into_empty_lane() {
        let mut lane = WordLane::new();
        lane.add_word_to_queue("Cat");
        assert_eq!(lane.current_word(), "cat");
        assert_eq!(lane.queued().count(), 0);

        lane.add_word_to_queue("dog");
        assert_eq!(lane.current_word(), "cat");
        assert_eq!(lane.queued().collect::<Vec<_>>(), ["dog"]);
    }

    #[test]
    fn test_set_next_word_drains_queue() {
        let mut lane = WordLane::new();
        lane.add_word_to_queue("cat");
        lane.add_word_to_queue("dog");
        lane.set_next_word();
        assert_eq!(lane.current_word(), "dog");
        lane.set_next_word();
        assert_eq!(lane.current_word(), "");
        assert_eq!(lane.next_letter(), None);
    }

    #[test]
    fn test_check_and_advance() {
        let mut lane = WordLane::new();
        lane.set_word("ab");
        assert!(!lane.check_and_advance('b'));
        assert!(lane.check_and_advance('a'));
        assert_eq!(lane.split_typed(), ("a", "b"));
        assert!(lane.check_and_advance('b'));
        assert!(lane.is_complete());
        assert!(!lane.check_and_advance('b'));
    }

    #[test]
    fn test_reset_progress_is_idempotent() {
        let mut lane = WordLane::new();
        lane.set_word("cat");
        lane.check_and_advance('c');
        lane.reset_progress();
        lane.reset_progress();
        assert_eq!(lane.typed_index(), 0);
        assert_eq!(lane.next_letter(), Some('c'));
    }

    #[test]
    fn test_set_word_resets_progress() {
        let mut lane = WordLane::new();
        lane.set_word("cat");
        lane.check_and_advance('c');
        lane.set_word("DOG");
        assert_eq!(lane.current_word(), "dog");
        assert_eq!(lane.typed_index(), 0);
    }
}
