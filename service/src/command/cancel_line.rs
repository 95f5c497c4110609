//! [`Command`] for cancelling a [`Line`].

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, contract::Settlement, line},
    Service,
};
#[cfg(doc)]
use crate::domain::{Contract, Line};

use super::Command;

/// [`Command`] for cancelling a [`Line`].
///
/// Cancelled [`Line`] is removed from the [`Service`], so its
/// [`line::Number`] may be activated again.
#[derive(Clone, Debug)]
pub struct CancelLine {
    /// [`line::Number`] of the [`Line`] to cancel.
    pub number: line::Number,
}

impl Command<CancelLine> for Service {
    type Ok = Settlement;
    type Err = Traced<ExecutionError>;

    fn execute(&mut self, cmd: CancelLine) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CancelLine { number } = cmd;

        let line = self
            .lines
            .get_mut(&number)
            .ok_or_else(|| E::LineNotExists(number.clone()))
            .map_err(tracerr::wrap!())?;
        let kind = line.contract.kind();
        let settlement = line
            .contract
            .cancel()
            .map_err(E::from)
            .map_err(tracerr::wrap!())?;
        _ = self.lines.remove(&number);

        log::info!("`Line({number})` on `{kind}` plan cancelled: {settlement}");

        Ok(settlement)
    }
}

/// Error of [`CancelLine`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Contract`] cannot be cancelled.
    #[display("`Contract` failed: {_0}")]
    #[from]
    Contract(contract::Error),

    /// [`Line`] with the provided [`line::Number`] does not exist.
    #[display("`Line({_0})` does not exist")]
    LineNotExists(#[error(not(source))] line::Number),
}
