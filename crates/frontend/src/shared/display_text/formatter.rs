use contracts::domain::a001_in_app_product::FieldValue;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Result of formatting a value for display.
pub enum Formatted {
    Ready(String),
    /// Rendered once the future resolves.
    Deferred(Pin<Box<dyn Future<Output = String>>>),
}

pub type Formatter = Rc<dyn Fn(&FieldValue) -> Formatted>;

pub fn identity_formatter() -> Formatter {
    Rc::new(|value: &FieldValue| Formatted::Ready(value.display()))
}

/// Issued for every render request; only the newest one may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Text currently shown plus the latest-wins bookkeeping for deferred
/// formatting. A slow format that resolves after a newer value has been
/// rendered is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub text: String,
    issued: u64,
}

impl DisplayState {
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Apply a resolved value. Returns `false` for a stale ticket.
    pub fn resolve(&mut self, ticket: Ticket, text: String) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.text = text;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_formatter() {
        let format = identity_formatter();
        match format(&FieldValue::text("abc")) {
            Formatted::Ready(s) => assert_eq!(s, "abc"),
            Formatted::Deferred(_) => panic!("identity must be synchronous"),
        }
    }

    #[test]
    fn test_latest_ticket_wins() {
        let mut state = DisplayState::default();
        let slow = state.begin();
        let fast = state.begin();

        assert!(state.resolve(fast, "new".to_string()));
        assert!(!state.resolve(slow, "old".to_string()));
        assert_eq!(state.text, "new");
    }

    #[test]
    fn test_sequential_tickets_apply() {
        let mut state = DisplayState::default();
        let first = state.begin();
        assert!(state.resolve(first, "one".to_string()));
        let second = state.begin();
        assert!(state.resolve(second, "two".to_string()));
        assert_eq!(state.text, "two");
    }
}
