use std::fmt::Display;

use super::KmipClientError;

pub type KmipClientResult<R> = Result<R, KmipClientError>;

pub trait KmipClientResultHelper<T> {
    fn context(self, context: &str) -> KmipClientResult<T>;
    fn with_context<D, O>(self, op: O) -> KmipClientResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D;
}

impl<T, E> KmipClientResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: &str) -> KmipClientResult<T> {
        self.map_err(|e| KmipClientError::Default(format!("{context}: {e}")))
    }

    fn with_context<D, O>(self, op: O) -> KmipClientResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.map_err(|e| KmipClientError::Default(format!("{}: {e}", op())))
    }
}

impl<T> KmipClientResultHelper<T> for Option<T> {
    fn context(self, context: &str) -> KmipClientResult<T> {
        self.ok_or_else(|| KmipClientError::Default(context.to_owned()))
    }

    fn with_context<D, O>(self, op: O) -> KmipClientResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.ok_or_else(|| KmipClientError::Default(format!("{}", op())))
    }
}
