//! Two-state gate in front of destructive actions.

use crate::store::Command;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmationGate {
    #[default]
    Closed,
    Open {
        target_id: String,
    },
}

impl ConfirmationGate {
    pub fn is_open(&self) -> bool {
        matches!(self, ConfirmationGate::Open { .. })
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            ConfirmationGate::Open { target_id } => Some(target_id),
            ConfirmationGate::Closed => None,
        }
    }

    /// Ask for confirmation. Ignored while another confirmation is pending;
    /// returns whether the gate opened.
    pub fn open(&mut self, target_id: impl Into<String>) -> bool {
        if self.is_open() {
            return false;
        }
        *self = ConfirmationGate::Open {
            target_id: target_id.into(),
        };
        true
    }

    /// Close the gate and emit the delete for the pending target
    pub fn confirm(&mut self) -> Option<Command> {
        match std::mem::take(self) {
            ConfirmationGate::Open { target_id } => Some(Command::Delete(target_id)),
            ConfirmationGate::Closed => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = ConfirmationGate::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_emits_delete_and_closes() {
        let mut gate = ConfirmationGate::default();
        assert!(gate.open("s1"));
        assert_eq!(gate.target(), Some("s1"));
        assert_eq!(gate.confirm(), Some(Command::Delete("s1".into())));
        assert_eq!(gate, ConfirmationGate::Closed);
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let mut gate = ConfirmationGate::default();
        gate.open("s1");
        gate.cancel();
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn test_open_while_open_keeps_first_target() {
        let mut gate = ConfirmationGate::default();
        gate.open("s1");
        assert!(!gate.open("s2"));
        assert_eq!(gate.target(), Some("s1"));
    }

    #[test]
    fn test_confirm_when_closed_is_noop() {
        let mut gate = ConfirmationGate::Closed;
        assert_eq!(gate.confirm(), None);
        assert!(!gate.is_open());
    }
}
