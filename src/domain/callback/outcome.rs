//! What a callback event means for the order.

use crate::domain::order::OrderStatus;

use super::event::{BillogramEventType, CallbackEvent};

/// Note and target status for a recognised event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    pub note: &'static str,
    pub status: OrderStatus,
}

impl EventOutcome {
    const fn new(note: &'static str, status: OrderStatus) -> Self {
        Self { note, status }
    }
}

/// Maps an event to its outcome.
///
/// `None` for events we do not act on, and for payments or credits whose
/// `remaining_sum` cannot be read.
pub fn outcome_for(event: &CallbackEvent) -> Option<EventOutcome> {
    use BillogramEventType::*;
    use OrderStatus::*;

    let outcome = match event.parsed_type() {
        BillogramCreated => EventOutcome::new("Invoice created in Billogram.", Processing),
        BillogramSent => EventOutcome::new("Invoice sent from Billogram.", Processing),
        DeliveryAccepted => EventOutcome::new("Invoice received and opened in email.", Processing),
        EmailNotAccepted | DeliveryFailed => {
            EventOutcome::new("Invoice could not be delivered via email.", Processing)
        }
        LetterSent => EventOutcome::new("Letter sent to customer.", Processing),
        Resent => EventOutcome::new("A reminder has been sent.", Processing),
        Overdue => EventOutcome::new("Invoice has past its due date.", Processing),
        Payment => {
            if event.remaining_sum()?.is_zero() {
                EventOutcome::new("Invoice paid.", Completed)
            } else {
                EventOutcome::new("Invoice paid but missing.", Processing)
            }
        }
        Credit => {
            if event.remaining_sum()?.is_zero() {
                EventOutcome::new("Invoice paid.", Completed)
            } else {
                EventOutcome::new("Invoice credited.", Cancelled)
            }
        }
        Unknown => return None,
    };

    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: &str, data: serde_json::Value) -> CallbackEvent {
        serde_json::from_value(serde_json::json!({ "type": event_type, "data": data })).unwrap()
    }

    fn outcome(event_type: &str) -> EventOutcome {
        outcome_for(&event(event_type, serde_json::json!({}))).unwrap()
    }

    #[test]
    fn delivery_events_move_to_processing() {
        for (event_type, note) in [
            ("BillogramCreated", "Invoice created in Billogram."),
            ("BillogramSent", "Invoice sent from Billogram."),
            ("DeliveryAccepted", "Invoice received and opened in email."),
            ("EmailNotAccepted", "Invoice could not be delivered via email."),
            ("DeliveryFailed", "Invoice could not be delivered via email."),
            ("LetterSent", "Letter sent to customer."),
            ("Resent", "A reminder has been sent."),
            ("Overdue", "Invoice has past its due date."),
        ] {
            let outcome = outcome(event_type);
            assert_eq!(outcome.note, note, "{event_type}");
            assert_eq!(outcome.status, OrderStatus::Processing, "{event_type}");
        }
    }

    #[test]
    fn full_payment_completes() {
        let outcome =
            outcome_for(&event("Payment", serde_json::json!({ "remaining_sum": 0 }))).unwrap();
        assert_eq!(outcome, EventOutcome::new("Invoice paid.", OrderStatus::Completed));
    }

    #[test]
    fn partial_payment_stays_processing() {
        let outcome =
            outcome_for(&event("Payment", serde_json::json!({ "remaining_sum": 5 }))).unwrap();
        assert_eq!(
            outcome,
            EventOutcome::new("Invoice paid but missing.", OrderStatus::Processing)
        );
    }

    #[test]
    fn payment_without_remaining_sum_completes() {
        assert_eq!(outcome("Payment").status, OrderStatus::Completed);
    }

    #[test]
    fn credit_depends_on_remaining_sum() {
        let settled =
            outcome_for(&event("Credit", serde_json::json!({ "remaining_sum": 0 }))).unwrap();
        assert_eq!(settled.status, OrderStatus::Completed);

        let credited =
            outcome_for(&event("Credit", serde_json::json!({ "remaining_sum": 250 }))).unwrap();
        assert_eq!(
            credited,
            EventOutcome::new("Invoice credited.", OrderStatus::Cancelled)
        );
    }

    #[test]
    fn unreadable_balance_has_no_outcome() {
        for event_type in ["Payment", "Credit"] {
            let malformed = event(event_type, serde_json::json!({ "remaining_sum": "abc" }));
            assert!(outcome_for(&malformed).is_none(), "{event_type}");
        }
    }

    #[test]
    fn unknown_event_has_no_outcome() {
        assert!(outcome_for(&event("ReminderSent", serde_json::json!({}))).is_none());
    }
}
