use crate::models::OrderEvent;
use std::collections::VecDeque;
use std::sync::RwLock;

/// Newest-first log of received order events.
///
/// Unbounded and append-only from the consumer's perspective; repeated updates
/// for the same order each produce a new entry. History is in-memory only and
/// does not survive a restart.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RwLock<VecDeque<OrderEvent>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: OrderEvent) {
        self.entries.write().unwrap().push_front(event);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    pub fn latest(&self) -> Option<OrderEvent> {
        self.entries.read().unwrap().front().cloned()
    }

    /// Snapshot of the log, newest first.
    pub fn snapshot(&self) -> Vec<OrderEvent> {
        self.entries.read().unwrap().iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::OrderStatus;
    use crate::models::ids::OrderId;
    use chrono::{TimeZone, Utc};

    fn event(order_id: &str, amount: f64) -> OrderEvent {
        OrderEvent {
            order_id: OrderId::from(order_id),
            status: OrderStatus::Paid,
            amount,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            message: None,
        }
    }

    #[test]
    fn newest_entry_comes_first() {
        let log = NotificationLog::new();
        log.push(event("O1", 1.0));
        log.push(event("O2", 2.0));
        let snapshot = log.snapshot();
        assert_eq!(snapshot[0].order_id, OrderId::from("O2"));
        assert_eq!(snapshot[1].order_id, OrderId::from("O1"));
        assert_eq!(log.latest().unwrap().order_id, OrderId::from("O2"));
    }

    #[test]
    fn duplicate_order_ids_each_get_an_entry() {
        let log = NotificationLog::new();
        log.push(event("O1", 1.0));
        log.push(event("O1", 2.0));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn starts_empty() {
        let log = NotificationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.latest(), None);
    }
}
