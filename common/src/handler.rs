//! [`Handler`] abstractions.

/// Executable handler.
///
/// Handlers run synchronously and take exclusive access to their state.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Handler::Err`] if the execution fails.
    fn execute(&mut self, args: Args) -> Result<Self::Ok, Self::Err>;
}
