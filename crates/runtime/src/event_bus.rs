use crate::state::View;

/// What started a transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cause {
    /// Initial render after the catalog loaded.
    Boot,
    /// The browser reported a `hashchange`.
    HashChange,
    /// Explicit router dispatch (marker activation, back control).
    Dispatch,
}

/// One router transition, for traceability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub seq: u64,
    pub cause: Cause,
    pub from: Option<View>,
    pub to: View,
}

/// Transitions kept in the log; older ones are dropped.
pub const EVENT_LOG_CAPACITY: usize = 64;

/// Ordered log of the most recent router transitions.
#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<Transition>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, cause: Cause, from: Option<View>, to: View) -> &Transition {
        let seq = self.next_seq;
        self.next_seq += 1;
        log::info!("route #{seq} ({cause:?}): {from:?} -> {to:?}");
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.remove(0);
        }
        self.events.push(Transition {
            seq,
            cause,
            from,
            to,
        });
        &self.events[self.events.len() - 1]
    }

    pub fn events(&self) -> &[Transition] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::{Cause, EVENT_LOG_CAPACITY, EventBus};
    use crate::state::View;

    #[test]
    fn records_transitions_in_order() {
        let mut bus = EventBus::new();
        bus.emit(Cause::Boot, None, View::Map);
        bus.emit(Cause::HashChange, Some(View::Map), View::NotFound);
        assert_eq!(bus.events().len(), 2);
        assert_eq!(bus.events()[0].seq, 0);
        assert_eq!(bus.events()[1].seq, 1);
        assert_eq!(bus.events()[1].from, Some(View::Map));
    }

    #[test]
    fn log_keeps_only_the_latest_transitions() {
        let mut bus = EventBus::new();
        for _ in 0..EVENT_LOG_CAPACITY + 3 {
            bus.emit(Cause::HashChange, Some(View::Map), View::Map);
        }
        assert_eq!(bus.events().len(), EVENT_LOG_CAPACITY);
        assert_eq!(bus.events()[0].seq, 3);
        let last = bus.events().last().unwrap();
        assert_eq!(last.seq, (EVENT_LOG_CAPACITY + 2) as u64);
    }
}
