//! Frame-counted deferred tasks.
//!
//! Tasks live inside the scheduler, and the scheduler lives inside the
//! session that owns it, so dropping the session cancels everything.

#[derive(Debug)]
struct Scheduled<T> {
    due: u64,
    payload: T,
}

#[derive(Debug)]
pub struct TickScheduler<T> {
    now: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> TickScheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            tasks: Vec::new(),
        }
    }

    /// Run `payload` once `delay` more ticks have passed.
    pub fn schedule(&mut self, delay: u32, payload: T) {
        self.tasks.push(Scheduled {
            due: self.now + u64::from(delay),
            payload,
        });
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.tasks.len();
        self.tasks.clear();
        n
    }

    /// Advance one tick and return the tasks that came due, oldest first.
    pub fn advance(&mut self) -> Vec<T> {
        self.now += 1;
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) = self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = pending;
        due.into_iter().map(|t| t.payload).collect()
    }

    pub fn is_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn now(&self) -> u64 {
        self.now
    }
}

impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
