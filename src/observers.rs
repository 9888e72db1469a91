use crate::events::LoanEvent;

/// Trait for loan observation
pub trait LoanObserver {
    /// Called after a borrow or return has been applied
    fn on_loan_event(&self, event: &LoanEvent);
}

/// Logs every loan transition through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionLogger;

impl LoanObserver for TransitionLogger {
    fn on_loan_event(&self, event: &LoanEvent) {
        match event {
            LoanEvent::Borrowed { book, patron } => {
                tracing::info!(%book, %patron, "book borrowed");
            }
            LoanEvent::Returned { book, patron } => {
                tracing::info!(%book, %patron, "book returned");
            }
        }
    }
}
