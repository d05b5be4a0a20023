use std::fmt::Display;

/// Turns a `Result` into an `Option`, logging the error instead of propagating it.
///
/// Used where a failure only affects one item of a best-effort batch.
pub trait ResultOkLogExt<T, E> {
    /// Logs the error at `error` level, prefixed with `context`.
    fn ok_log(self, context: impl Display) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self, context: impl Display) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{context}: {err}");
                None
            }
        }
    }
}
