use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::GenerateError;
use crate::types::llm_data::ModelResponse;

pub type GenerationOutcome = Result<ModelResponse, GenerateError>;

// Tracks the single in-flight generation. The slot is released on every
// finished poll, including a dropped sender (worker panic), so the generate
// action always comes back.
#[derive(Debug, Default)]
pub struct GenerationSlot {
    pending: Option<Receiver<GenerationOutcome>>,
}

impl GenerationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    // Arms the slot and hands the sender to the worker thread.
    pub fn begin(&mut self) -> Sender<GenerationOutcome> {
        let (tx, rx) = mpsc::channel();
        self.pending = Some(rx);
        tx
    }

    pub fn poll(&mut self) -> Option<GenerationOutcome> {
        let rx = self.pending.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(GenerateError::ModelInvocation(
                "Generation worker exited unexpectedly.".to_string(),
            )),
        };
        self.pending = None;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_slot_is_not_in_flight_and_polls_nothing() {
        let mut slot = GenerationSlot::new();
        assert!(!slot.is_in_flight());
        assert!(slot.poll().is_none());
    }

    #[test]
    fn begin_puts_the_slot_in_flight_until_a_result_arrives() {
        let mut slot = GenerationSlot::new();
        let tx = slot.begin();
        assert!(slot.is_in_flight());
        assert!(slot.poll().is_none());
        assert!(slot.is_in_flight());

        tx.send(Ok(ModelResponse::default())).unwrap();
        assert!(matches!(slot.poll(), Some(Ok(_))));
        assert!(!slot.is_in_flight());
    }

    #[test]
    fn error_outcome_also_releases_the_slot() {
        let mut slot = GenerationSlot::new();
        let tx = slot.begin();
        tx.send(Err(GenerateError::MalformedResponse("bad".to_string())))
            .unwrap();
        assert!(matches!(
            slot.poll(),
            Some(Err(GenerateError::MalformedResponse(_)))
        ));
        assert!(!slot.is_in_flight());
    }

    #[test]
    fn dropped_sender_surfaces_an_error_and_releases_the_slot() {
        let mut slot = GenerationSlot::new();
        let tx = slot.begin();
        drop(tx);
        assert!(matches!(
            slot.poll(),
            Some(Err(GenerateError::ModelInvocation(_)))
        ));
        assert!(!slot.is_in_flight());
        assert!(slot.poll().is_none());
    }

    #[test]
    fn slot_can_be_rearmed_after_release() {
        let mut slot = GenerationSlot::new();
        drop(slot.begin());
        assert!(slot.poll().is_some());

        let tx = slot.begin();
        assert!(slot.is_in_flight());
        tx.send(Ok(ModelResponse::default())).unwrap();
        assert!(matches!(slot.poll(), Some(Ok(_))));
    }
}
