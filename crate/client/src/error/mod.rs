use std::io;

use kmip_ttlv::TtlvError;
use thiserror::Error;

pub(crate) mod result;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KmipClientError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Response correlation failure: {0}")]
    Correlation(String),

    #[error("{0}")]
    Default(String),

    #[error("Handshake failed: {0}")]
    Handshake(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("{0}")]
    KeyManagement(String),

    #[error("Pipeline aborted: {0}")]
    PipelineAborted(String),

    #[error("{operation} failed: {reason}: {message}")]
    Protocol {
        operation: String,
        reason: String,
        message: String,
    },

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("TTLV Error: {0}")]
    Ttlv(#[from] TtlvError),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<io::Error> for KmipClientError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<rustls::Error> for KmipClientError {
    fn from(e: rustls::Error) -> Self {
        Self::Tls(e.to_string())
    }
}

impl From<rustls::pki_types::pem::Error> for KmipClientError {
    fn from(e: rustls::pki_types::pem::Error) -> Self {
        Self::Tls(e.to_string())
    }
}

impl From<toml::de::Error> for KmipClientError {
    fn from(e: toml::de::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}

/// Construct a client error from a string.
#[macro_export]
macro_rules! client_error {
    ($msg:literal) => {
        $crate::KmipClientError::Default(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::KmipClientError::Default($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::KmipClientError::Default(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! client_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::client_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::client_error!($fmt, $($arg)*))
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! client_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::client_error!($msg))
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err)
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::client_error!($fmt, $($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::KmipClientError;

    #[test]
    fn test_client_error_interpolation() {
        let var = 42;
        let err = client_error!("interpolate {var}");
        assert_eq!("interpolate 42", err.to_string());

        let err = bail();
        err.unwrap_err();

        let err = ensure();
        assert_eq!(
            err.unwrap_err(),
            KmipClientError::Handshake("no versions".to_owned())
        );
    }

    fn bail() -> Result<(), KmipClientError> {
        let var = 43;
        if true {
            client_bail!("interpolate {var}");
        }
        Ok(())
    }

    fn ensure() -> Result<(), KmipClientError> {
        client_ensure!(false, KmipClientError::Handshake("no versions".to_owned()));
        Ok(())
    }
}
