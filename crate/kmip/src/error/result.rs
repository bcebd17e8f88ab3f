use std::fmt::Display;

use super::TtlvError;

pub type TtlvResult<R> = Result<R, TtlvError>;

/// Attach a context message to a failure, turning it into a [`TtlvError`]
pub trait TtlvResultHelper<T> {
    fn context(self, context: &str) -> TtlvResult<T>;
    fn with_context<D, O>(self, op: O) -> TtlvResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D;
}

impl<T, E> TtlvResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: &str) -> TtlvResult<T> {
        self.map_err(|e| TtlvError::Default(format!("{context}: {e}")))
    }

    fn with_context<D, O>(self, op: O) -> TtlvResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.map_err(|e| TtlvError::Default(format!("{}: {e}", op())))
    }
}

impl<T> TtlvResultHelper<T> for Option<T> {
    fn context(self, context: &str) -> TtlvResult<T> {
        self.ok_or_else(|| TtlvError::Default(context.to_owned()))
    }

    fn with_context<D, O>(self, op: O) -> TtlvResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.ok_or_else(|| TtlvError::Default(format!("{}", op())))
    }
}
