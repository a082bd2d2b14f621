use crate::models::enums::OrderStatus;
use crate::models::ids::OrderId;
use crate::models::OrderEvent;
use crate::parsing::RawEvent;
use log::{debug, warn};

pub const EVENT_CONNECT: &str = "CONNECT";
pub const EVENT_HEARTBEAT: &str = "HEARTBEAT";
pub const EVENT_ORDER_UPDATE: &str = "ORDER_UPDATE";

/// What the transport layer hands to the connection manager: the stream opened,
/// a named event arrived, or the stream died.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFrame {
    Open,
    Event(RawEvent),
    Error(String),
}

/// Classified stream event. Immutable once built from a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Connect,
    Heartbeat,
    OrderUpdate(OrderEvent),
    TransportError(String),
}

impl StreamEvent {
    /// Single dispatch point from transport frames into classified events.
    /// `None` means the frame carries nothing the state machine cares about.
    pub fn from_frame(frame: TransportFrame) -> Option<Self> {
        match frame {
            TransportFrame::Open => Some(StreamEvent::Connect),
            TransportFrame::Error(reason) => Some(StreamEvent::TransportError(reason)),
            TransportFrame::Event(raw) => classify(&raw.name, &raw.data),
        }
    }
}

/// Classify a named event plus payload. Malformed or invalid ORDER_UPDATE
/// payloads are dropped here (logged only) so they can never corrupt
/// connection state; unknown event names are ignored.
pub fn classify(name: &str, data: &str) -> Option<StreamEvent> {
    match name {
        EVENT_CONNECT => Some(StreamEvent::Connect),
        EVENT_HEARTBEAT => Some(StreamEvent::Heartbeat),
        EVENT_ORDER_UPDATE => match serde_json::from_str::<OrderEvent>(data) {
            Ok(event) if event.is_valid() => Some(StreamEvent::OrderUpdate(event)),
            Ok(event) => {
                warn!(
                    target: "order_stream",
                    "Dropping ORDER_UPDATE with invalid fields: orderId={:?} amount={}",
                    event.order_id.as_ref(),
                    event.amount
                );
                None
            }
            Err(e) => {
                warn!(target: "order_stream", "Dropping malformed ORDER_UPDATE payload: {e}");
                None
            }
        },
        other => {
            debug!(target: "order_stream", "Ignoring unknown event {other:?}");
            None
        }
    }
}

/// User-visible notification, the library-shaped equivalent of a UI toast.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Connected,
    Disconnected,
    Reconnecting,
    OrderReceived {
        order_id: OrderId,
        status: OrderStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_liveness_events_without_touching_payload() {
        assert_eq!(classify("CONNECT", "连接成功"), Some(StreamEvent::Connect));
        assert_eq!(classify("HEARTBEAT", "ping"), Some(StreamEvent::Heartbeat));
    }

    #[test]
    fn classifies_valid_order_update() {
        let data = r#"{"orderId":"O1","status":"PAID","amount":19.99,"timestamp":"2024-01-01T00:00:00Z"}"#;
        match classify("ORDER_UPDATE", data) {
            Some(StreamEvent::OrderUpdate(event)) => {
                assert_eq!(event.order_id, OrderId::from("O1"));
                assert_eq!(event.status, OrderStatus::Paid);
                assert_eq!(event.amount, 19.99);
            }
            other => panic!("expected OrderUpdate, got {other:?}"),
        }
    }

    #[test]
    fn drops_malformed_order_update() {
        assert_eq!(classify("ORDER_UPDATE", "not json"), None);
        assert_eq!(classify("ORDER_UPDATE", "{}"), None);
    }

    #[test]
    fn drops_order_update_failing_validation() {
        let empty_id = r#"{"orderId":"","status":"PAID","amount":1.0,"timestamp":"2024-01-01T00:00:00Z"}"#;
        assert_eq!(classify("ORDER_UPDATE", empty_id), None);
        let negative = r#"{"orderId":"O1","status":"PAID","amount":-5.0,"timestamp":"2024-01-01T00:00:00Z"}"#;
        assert_eq!(classify("ORDER_UPDATE", negative), None);
    }

    #[test]
    fn ignores_unknown_event_names() {
        assert_eq!(classify("PROMO", "whatever"), None);
        assert_eq!(classify("message", ""), None);
    }

    #[test]
    fn maps_frames_through_single_dispatch() {
        assert_eq!(
            StreamEvent::from_frame(TransportFrame::Open),
            Some(StreamEvent::Connect)
        );
        assert_eq!(
            StreamEvent::from_frame(TransportFrame::Error(String::from("refused"))),
            Some(StreamEvent::TransportError(String::from("refused")))
        );
        let raw = RawEvent {
            name: String::from("HEARTBEAT"),
            data: String::from("ping"),
        };
        assert_eq!(
            StreamEvent::from_frame(TransportFrame::Event(raw)),
            Some(StreamEvent::Heartbeat)
        );
    }
}
