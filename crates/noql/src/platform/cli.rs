use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{ClipboardWriter, Navigation, Scheduler};

/// In-memory history stack standing in for a browser address bar.
///
/// `back`, `forward` and `navigate` model external navigation and fire the
/// registered callbacks; `push_fragment` models the page pushing its own
/// entry and stays silent, like `history.pushState`.
pub struct HeadlessNavigation {
    entries: RefCell<Vec<Option<String>>>,
    position: RefCell<usize>,
    callbacks: RefCell<Vec<Box<dyn FnMut(Option<String>)>>>,
}

impl HeadlessNavigation {
    pub fn new() -> Self {
        Self::with_fragment(None)
    }

    /// Starts the history with a single entry carrying `fragment`.
    pub fn with_fragment(fragment: Option<&str>) -> Self {
        Self {
            entries: RefCell::new(vec![fragment.map(str::to_owned)]),
            position: RefCell::new(0),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Moves one entry back, like the browser back button.
    pub fn back(&self) {
        {
            let mut position = self.position.borrow_mut();
            if *position == 0 {
                return;
            }
            *position -= 1;
        }
        self.notify();
    }

    /// Moves one entry forward, like the browser forward button.
    pub fn forward(&self) {
        {
            let mut position = self.position.borrow_mut();
            if *position + 1 >= self.entries.borrow().len() {
                return;
            }
            *position += 1;
        }
        self.notify();
    }

    /// Manually "types" a new address, pushing an entry and notifying.
    pub fn navigate(&self, fragment: Option<&str>) {
        self.push_entry(fragment);
        self.notify();
    }

    fn push_entry(&self, fragment: Option<&str>) {
        let mut entries = self.entries.borrow_mut();
        let position = *self.position.borrow();
        entries.truncate(position + 1);
        entries.push(fragment.map(str::to_owned));
        *self.position.borrow_mut() = entries.len() - 1;
    }

    fn notify(&self) {
        let fragment = self.current_fragment();
        for callback in self.callbacks.borrow_mut().iter_mut() {
            callback(fragment.clone());
        }
    }
}

impl Navigation for HeadlessNavigation {
    fn current_fragment(&self) -> Option<String> {
        self.entries.borrow()[*self.position.borrow()].clone()
    }

    fn push_fragment(&self, fragment: Option<&str>) {
        self.push_entry(fragment);
    }

    fn on_fragment_change(&self, callback: Box<dyn FnMut(Option<String>)>) {
        self.callbacks.borrow_mut().push(callback);
    }
}

struct ScheduledAction {
    fire_at_ms: u64,
    sequence: u64,
    action: Box<dyn FnOnce()>,
}

impl PartialEq for ScheduledAction {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at_ms == other.fire_at_ms && self.sequence == other.sequence
    }
}

impl Eq for ScheduledAction {}

impl PartialOrd for ScheduledAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledAction {
    // Reversed so the BinaryHeap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at_ms
            .cmp(&self.fire_at_ms)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manually advanced clock; actions fire during `advance_by`.
pub struct VirtualClock {
    now_ms: Cell<u64>,
    next_sequence: Cell<u64>,
    queue: RefCell<BinaryHeap<ScheduledAction>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            next_sequence: Cell::new(0),
            queue: RefCell::new(BinaryHeap::new()),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending_actions(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Milliseconds until the next action would fire, if any is queued.
    pub fn time_to_next_action(&self) -> Option<u64> {
        self.queue
            .borrow()
            .peek()
            .map(|scheduled| scheduled.fire_at_ms.saturating_sub(self.now_ms.get()))
    }

    /// Advances the clock by `ms`, running every action that comes due.
    ///
    /// Actions run outside the queue borrow, so an action may schedule
    /// further actions; those fire too if they land within the window.
    pub fn advance_by(&self, ms: u64) {
        let target_ms = self.now_ms.get() + ms;
        loop {
            let due = {
                let mut queue = self.queue.borrow_mut();
                match queue.peek() {
                    Some(scheduled) if scheduled.fire_at_ms <= target_ms => queue.pop(),
                    _ => None,
                }
            };
            let Some(due) = due else { break };
            self.now_ms.set(due.fire_at_ms.max(self.now_ms.get()));
            (due.action)();
        }
        self.now_ms.set(target_ms);
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) {
        let sequence = self.next_sequence.get();
        self.next_sequence.set(sequence + 1);
        self.queue.borrow_mut().push(ScheduledAction {
            fire_at_ms: self.now_ms.get() + u64::from(delay_ms),
            sequence,
            action,
        });
    }
}

/// Clipboard that remembers everything written to it.
pub struct RecordingClipboard {
    writes: RefCell<Vec<String>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self {
            writes: RefCell::new(Vec::new()),
        }
    }

    pub fn take_writes(&self) -> Vec<String> {
        self.writes.take()
    }

    pub fn last_write(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&self, text: &str) {
        self.writes.borrow_mut().push(text.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn clock_starts_at_zero() {
        let clock = VirtualClock::new();
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.pending_actions(), 0);
        assert_eq!(clock.time_to_next_action(), None);
    }

    #[test]
    fn action_fires_at_its_deadline() {
        let clock = VirtualClock::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        clock.schedule(1_000, Box::new(move || flag.set(true)));

        clock.advance_by(999);
        assert!(!fired.get());

        clock.advance_by(1);
        assert!(fired.get());
        assert_eq!(clock.pending_actions(), 0);
    }

    #[test]
    fn actions_fire_in_deadline_order() {
        let clock = VirtualClock::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(300, "late"), (100, "early"), (200, "middle")] {
            let order = Rc::clone(&order);
            clock.schedule(delay, Box::new(move || order.borrow_mut().push(label)));
        }

        clock.advance_by(300);
        assert_eq!(*order.borrow(), ["early", "middle", "late"]);
    }

    #[test]
    fn equal_deadlines_fire_in_registration_order() {
        let clock = VirtualClock::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            clock.schedule(50, Box::new(move || order.borrow_mut().push(label)));
        }

        clock.advance_by(50);
        assert_eq!(*order.borrow(), ["first", "second", "third"]);
    }

    #[test]
    fn time_to_next_action_counts_down() {
        let clock = VirtualClock::new();
        clock.schedule(2_000, Box::new(|| {}));
        assert_eq!(clock.time_to_next_action(), Some(2_000));

        clock.advance_by(1_500);
        assert_eq!(clock.time_to_next_action(), Some(500));
    }

    #[test]
    fn back_and_forward_fire_callbacks_pushes_do_not() {
        let navigation = HeadlessNavigation::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        navigation.on_fragment_change(Box::new(move |fragment| {
            log.borrow_mut().push(fragment);
        }));

        navigation.push_fragment(Some("first"));
        navigation.push_fragment(Some("second"));
        assert!(seen.borrow().is_empty());

        navigation.back();
        navigation.forward();
        assert_eq!(
            *seen.borrow(),
            [Some("first".to_owned()), Some("second".to_owned())],
        );
    }

    #[test]
    fn pushing_after_back_drops_the_forward_entries() {
        let navigation = HeadlessNavigation::new();
        navigation.push_fragment(Some("first"));
        navigation.push_fragment(Some("second"));
        navigation.back();
        navigation.push_fragment(Some("replacement"));

        assert_eq!(navigation.entry_count(), 3);
        assert_eq!(navigation.current_fragment(), Some("replacement".to_owned()));
        navigation.forward();
        assert_eq!(navigation.current_fragment(), Some("replacement".to_owned()));
    }
}
