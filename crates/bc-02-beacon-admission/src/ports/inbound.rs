//! Inbound (Driving) ports: the pre-execution pipeline stage contract.

use crate::domain::errors::AdmissionError;
use shared_types::{ExecContext, Tx};

/// One stage of the ordered pre-execution pipeline.
///
/// A stage either accepts the transaction, handing it to the next stage,
/// or rejects it. Stages never mutate state.
pub trait AnteHandler {
    fn ante_handle(&self, ctx: &ExecContext, tx: &Tx) -> Result<(), AdmissionError>;
}

impl<T: AnteHandler + ?Sized> AnteHandler for &T {
    fn ante_handle(&self, ctx: &ExecContext, tx: &Tx) -> Result<(), AdmissionError> {
        (**self).ante_handle(ctx, tx)
    }
}
