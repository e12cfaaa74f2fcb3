//! Ordered pre-execution pipeline.

use crate::domain::errors::AdmissionError;
use crate::ports::inbound::AnteHandler;
use shared_types::{ExecContext, Tx};

/// Runs stages in insertion order, stopping at the first rejection.
#[derive(Default)]
pub struct AnteChain<'a> {
    stages: Vec<Box<dyn AnteHandler + 'a>>,
}

impl<'a> AnteChain<'a> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage after the existing ones.
    pub fn then(mut self, stage: impl AnteHandler + 'a) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl AnteHandler for AnteChain<'_> {
    fn ante_handle(&self, ctx: &ExecContext, tx: &Tx) -> Result<(), AdmissionError> {
        self.stages
            .iter()
            .try_for_each(|stage| stage.ante_handle(ctx, tx))
    }
}

/// Stateless message checks, run before any stage that reads state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateBasicDecorator;

impl AnteHandler for ValidateBasicDecorator {
    fn ante_handle(&self, _ctx: &ExecContext, tx: &Tx) -> Result<(), AdmissionError> {
        for msg in tx.beacon_msgs() {
            msg.validate_basic()?;
        }
        Ok(())
    }
}
