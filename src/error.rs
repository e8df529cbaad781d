//! Error handling for mpdclient.
//!
//! Provides a unified error type whose categories follow the error classes of
//! the MPD client protocol, with mapping from underlying errors to the
//! appropriate category.
//!
//! # Error Categories
//!
//! * Caller mistakes: [`Argument`](ErrorKind::Argument), [`State`](ErrorKind::State)
//! * Transport failures: [`Timeout`](ErrorKind::Timeout),
//!   [`System`](ErrorKind::System), [`UnknownHost`](ErrorKind::UnknownHost),
//!   [`ConnectionRefused`](ErrorKind::ConnectionRefused),
//!   [`ConnectionClosed`](ErrorKind::ConnectionClosed)
//! * Protocol failures: [`NotMpd`](ErrorKind::NotMpd), [`Malformed`](ErrorKind::Malformed)
//! * Server refusals: [`ServerAck`](ErrorKind::ServerAck), carrying an [`Ack`]
//!
//! Transport and protocol failures are fatal to a connection. Server ACKs and
//! caller mistakes are not.
//!
//! # Example
//!
//! ```rust
//! use mpdclient::error::{Error, ErrorKind, Result};
//!
//! fn check_volume(volume: i32) -> Result<()> {
//!     if !(0..=100).contains(&volume) {
//!         return Err(Error::argument("volume must be between 0 and 100"));
//!     }
//!     Ok(())
//! }
//! ```

#![allow(clippy::enum_glob_use)]

use std::{fmt, sync::Arc};
use thiserror::Error;

use crate::protocol::Ack;

/// Main error type combining error kind and details.
///
/// Cloning is cheap: the details are reference counted, which lets a
/// [`Connection`](crate::Connection) keep the last error around while handing
/// out copies of it.
#[derive(Clone, Debug)]
pub struct Error {
    /// Classification of the error
    pub kind: ErrorKind,

    /// Details of the underlying error
    pub error: Arc<dyn std::error::Error + Send + Sync>,
}

impl Error {
    /// Attempts to downcast the underlying error to a concrete type.
    ///
    /// # Example
    /// ```
    /// use std::io;
    ///
    /// let io_error = io::Error::new(io::ErrorKind::Other, "oh no!");
    /// let error = Error::from(io_error);
    ///
    /// if let Some(io_err) = error.downcast::<io::Error>() {
    ///     println!("IO error kind: {:?}", io_err.kind());
    /// }
    /// ```
    #[must_use]
    pub fn downcast<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    /// Returns the server acknowledgement when this is a
    /// [`ServerAck`](ErrorKind::ServerAck) error.
    #[must_use]
    pub fn ack(&self) -> Option<&Ack> {
        self.downcast::<Ack>()
    }

    /// Whether the connection that produced this error must be discarded.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Standard result type for mpdclient operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories of the MPD client protocol.
#[expect(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
pub enum ErrorKind {
    /// Memory could not be allocated.
    #[error("out of memory")]
    OutOfMemory = 1,

    /// The caller passed an invalid argument.
    #[error("invalid argument")]
    Argument = 2,

    /// The operation is not allowed in the current connection state.
    #[error("invalid state")]
    State = 3,

    /// The daemon did not respond in time.
    #[error("timeout")]
    Timeout = 4,

    /// Some operating system call failed.
    #[error("system error")]
    System = 5,

    /// The host name could not be resolved.
    #[error("unknown host")]
    UnknownHost = 6,

    /// No daemon accepted the connection.
    #[error("connection refused")]
    ConnectionRefused = 7,

    /// The peer did not greet like an MPD daemon.
    #[error("not a music player daemon")]
    NotMpd = 8,

    /// The daemon sent something that could not be parsed.
    #[error("malformed response")]
    Malformed = 9,

    /// The daemon closed the connection.
    #[error("connection closed")]
    ConnectionClosed = 10,

    /// The daemon rejected a command with an `ACK`.
    #[error("server error")]
    ServerAck = 11,
}

impl ErrorKind {
    /// Whether errors of this kind invalidate the connection.
    ///
    /// After a fatal error the stream position can no longer be trusted, so the
    /// connection has to be re-established.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        use ErrorKind::*;
        matches!(
            self,
            OutOfMemory
                | Timeout
                | System
                | UnknownHost
                | ConnectionRefused
                | NotMpd
                | Malformed
                | ConnectionClosed
        )
    }
}

impl Error {
    /// Creates a new error with specified kind and details.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let err = Error::new(ErrorKind::Malformed, "missing colon");
    /// assert_eq!(err.kind, ErrorKind::Malformed);
    /// ```
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let error: Box<dyn std::error::Error + Send + Sync> = error.into();
        Self {
            kind,
            error: Arc::from(error),
        }
    }

    /// Creates an error for invalid caller input, like an empty command list.
    pub fn argument<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Argument, error)
    }

    /// Creates an error for API misuse: sending while a response is pending,
    /// leaving idle mode the wrong way, or using a closed connection.
    pub fn state<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::State, error)
    }

    /// Creates an error for operations that exceeded the connection timeout.
    pub fn timeout<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Timeout, error)
    }

    /// Creates an error for failed operating system calls.
    pub fn system<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::System, error)
    }

    /// Creates an error for host names that do not resolve.
    pub fn unknown_host<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::UnknownHost, error)
    }

    /// Creates an error for refused connections.
    pub fn connection_refused<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::ConnectionRefused, error)
    }

    /// Creates an error for peers that do not send an MPD greeting.
    pub fn not_mpd<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::NotMpd, error)
    }

    /// Creates an error for replies that cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let err = Error::malformed("no colon in line");
    /// assert_eq!(err.kind, ErrorKind::Malformed);
    /// ```
    pub fn malformed<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Malformed, error)
    }

    /// Creates an error for connections closed by the daemon.
    pub fn connection_closed<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::ConnectionClosed, error)
    }

    /// Creates an error out of an `ACK` line sent by the daemon.
    #[must_use]
    pub fn server_ack(ack: Ack) -> Self {
        Self::new(ErrorKind::ServerAck, ack)
    }
}

/// Returns the underlying error source.
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}

/// Formats the error for display, showing both kind and details.
///
/// Format: "{kind}: {details}"
///
/// # Examples
///
/// ```rust
/// let err = Error::state("connection is closed");
/// assert_eq!(err.to_string(), "invalid state: connection is closed");
/// ```
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}: ", self.kind)?;
        self.error.fmt(fmt)
    }
}

/// Converts IO errors into appropriate error kinds.
///
/// Maps standard IO errors to their protocol equivalents:
/// * `TimedOut`, `WouldBlock` -> `Timeout` (blocking sockets report an expired
///   read timeout as either)
/// * `ConnectionRefused`, `AddrNotAvailable` -> `ConnectionRefused`
/// * `UnexpectedEof`, `BrokenPipe`, `ConnectionReset`, `ConnectionAborted`,
///   `NotConnected` -> `ConnectionClosed`
/// * `InvalidData` -> `Malformed`
/// * `OutOfMemory` -> `OutOfMemory`
/// * others -> `System`
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind::*;
        match err.kind() {
            TimedOut | WouldBlock => Self::timeout(err),
            ConnectionRefused | AddrNotAvailable => Self::connection_refused(err),
            UnexpectedEof | BrokenPipe | ConnectionReset | ConnectionAborted | NotConnected => {
                Self::connection_closed(err)
            }
            InvalidData => Self::malformed(err),
            OutOfMemory => Self::new(ErrorKind::OutOfMemory, err),
            _ => Self::system(err),
        }
    }
}

/// Converts version parsing errors to `Malformed`.
impl From<semver::Error> for Error {
    fn from(err: semver::Error) -> Self {
        Self::malformed(err)
    }
}

/// Converts integer parsing errors to `Malformed`.
impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::malformed(e.to_string())
    }
}

/// Converts float parsing errors to `Malformed`.
impl From<std::num::ParseFloatError> for Error {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::malformed(e.to_string())
    }
}

/// Converts invalid UTF-8 on the wire to `Malformed`.
impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::malformed(e.to_string())
    }
}

/// Converts timestamp parsing errors to `Malformed`.
impl From<time::error::Parse> for Error {
    fn from(e: time::error::Parse) -> Self {
        Self::malformed(e.to_string())
    }
}

/// Converts configuration file errors to `Argument`.
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::argument(e.to_string())
    }
}
