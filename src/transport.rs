//! Blocking socket transport to the daemon.
//!
//! Hosts starting with `/` name a Unix domain socket; anything else is
//! resolved and connected over TCP. Reads go through a buffer and are split
//! into newline-terminated lines of at most [`Transport::MAX_LINE`] bytes.
//!
//! A timeout of zero disables the timeout, so calls block until the daemon
//! responds.

use std::{
    fmt,
    io::{self, BufRead, BufReader, Read, Write},
    net::{Shutdown, TcpStream, ToSocketAddrs},
    time::Duration,
};

#[cfg(unix)]
use std::os::unix::net::UnixStream;

use crate::error::{Error, Result};

enum Stream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Stream {
    fn set_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => {
                stream.set_read_timeout(timeout)?;
                stream.set_write_timeout(timeout)
            }
            #[cfg(unix)]
            Self::Unix(stream) => {
                stream.set_read_timeout(timeout)?;
                stream.set_write_timeout(timeout)
            }
        }
    }

    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.set_read_timeout(timeout),
            #[cfg(unix)]
            Self::Unix(stream) => stream.set_read_timeout(timeout),
        }
    }

    fn shutdown(&self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.shutdown(Shutdown::Both),
            #[cfg(unix)]
            Self::Unix(stream) => stream.shutdown(Shutdown::Both),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

/// An open socket to the daemon.
pub struct Transport {
    reader: BufReader<Stream>,
    peer: String,
    timeout: Duration,
}

impl Transport {
    /// Longest line the daemon may send, newline included.
    pub const MAX_LINE: usize = 64 * 1024;

    /// Opens a connection to `host`.
    ///
    /// `port` is ignored for Unix domain sockets.
    ///
    /// # Errors
    ///
    /// * [`UnknownHost`](crate::error::ErrorKind::UnknownHost) if `host` does not resolve
    /// * [`ConnectionRefused`](crate::error::ErrorKind::ConnectionRefused) if no address
    ///   accepts the connection
    /// * [`Timeout`](crate::error::ErrorKind::Timeout) if connecting takes longer than
    ///   `timeout`
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let (stream, peer) = if host.starts_with('/') {
            Self::connect_local(host)?
        } else {
            Self::connect_tcp(host, port, timeout)?
        };

        let transport = Self {
            reader: BufReader::new(stream),
            peer,
            timeout,
        };
        transport.apply_timeout()?;

        Ok(transport)
    }

    #[cfg(unix)]
    fn connect_local(path: &str) -> Result<(Stream, String)> {
        let stream = UnixStream::connect(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused => {
                Error::connection_refused(format!("{path}: {e}"))
            }
            _ => Error::from(e),
        })?;
        Ok((Stream::Unix(stream), path.to_owned()))
    }

    #[cfg(not(unix))]
    fn connect_local(path: &str) -> Result<(Stream, String)> {
        Err(Error::unknown_host(format!(
            "{path}: local sockets are not supported on this platform"
        )))
    }

    fn connect_tcp(host: &str, port: u16, timeout: Duration) -> Result<(Stream, String)> {
        let addrs: Vec<_> = (host, port)
            .to_socket_addrs()
            .map_err(|e| Error::unknown_host(format!("{host}: {e}")))?
            .collect();
        if addrs.is_empty() {
            return Err(Error::unknown_host(format!("{host}: no addresses")));
        }

        let mut last_error = None;
        for addr in addrs {
            let result = if timeout.is_zero() {
                TcpStream::connect(addr)
            } else {
                TcpStream::connect_timeout(&addr, timeout)
            };

            match result {
                Ok(stream) => {
                    // Requests are small and latency bound.
                    stream.set_nodelay(true)?;
                    return Ok((Stream::Tcp(stream), addr.to_string()));
                }
                Err(e) => {
                    trace!("connecting to {addr} failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) if e.kind() == io::ErrorKind::TimedOut => {
                Error::timeout(format!("{host}:{port}: {e}"))
            }
            Some(e) => Error::connection_refused(format!("{host}:{port}: {e}")),
            None => Error::connection_refused(format!("{host}:{port}")),
        })
    }

    fn apply_timeout(&self) -> Result<()> {
        self.reader
            .get_ref()
            .set_timeout(Self::as_socket_timeout(self.timeout))?;
        Ok(())
    }

    fn as_socket_timeout(timeout: Duration) -> Option<Duration> {
        (!timeout.is_zero()).then_some(timeout)
    }

    /// Address of the daemon, for logging.
    #[must_use]
    pub fn peer(&self) -> &str {
        &self.peer
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Changes the timeout of all following reads and writes.
    ///
    /// # Errors
    ///
    /// Returns [`System`](crate::error::ErrorKind::System) if the socket rejects the timeout.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.timeout = timeout;
        self.apply_timeout()
    }

    /// Lets the next reads block indefinitely, or restores the configured
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`System`](crate::error::ErrorKind::System) if the socket rejects the timeout.
    pub fn block_reads(&mut self, block: bool) -> Result<()> {
        let timeout = if block {
            None
        } else {
            Self::as_socket_timeout(self.timeout)
        };
        self.reader.get_ref().set_read_timeout(timeout)?;
        Ok(())
    }

    /// Writes `text` as is and flushes it; callers supply the newlines.
    ///
    /// # Errors
    ///
    /// Fails with a transport error kind if the write does not complete.
    pub fn send(&mut self, text: &str) -> Result<()> {
        let stream = self.reader.get_mut();
        stream.write_all(text.as_bytes())?;
        stream.flush()?;
        Ok(())
    }

    /// Writes one line, appending the newline.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::send`].
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        let mut text = String::with_capacity(line.len() + 1);
        text.push_str(line);
        text.push('\n');
        self.send(&text)
    }

    /// Reads one line, without its newline.
    ///
    /// # Errors
    ///
    /// * [`ConnectionClosed`](crate::error::ErrorKind::ConnectionClosed) at end of stream
    /// * [`Malformed`](crate::error::ErrorKind::Malformed) for lines that are too long,
    ///   lack a newline or are not UTF-8
    /// * [`Timeout`](crate::error::ErrorKind::Timeout) if nothing arrives in time
    pub fn recv_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        let limit = u64::try_from(Self::MAX_LINE).unwrap_or(u64::MAX);
        let read = (&mut self.reader).take(limit).read_until(b'\n', &mut buf)?;

        if read == 0 {
            return Err(Error::connection_closed(format!(
                "{} closed the connection",
                self.peer
            )));
        }
        if buf.pop() != Some(b'\n') {
            return Err(if read >= Self::MAX_LINE {
                Error::malformed(format!("line exceeds {} bytes", Self::MAX_LINE))
            } else {
                Error::connection_closed(format!(
                    "{} closed the connection mid-line",
                    self.peer
                ))
            });
        }

        Ok(String::from_utf8(buf)?)
    }

    /// Shuts the socket down in both directions.
    pub fn shutdown(&self) {
        if let Err(e) = self.reader.get_ref().shutdown() {
            // The peer may have gone already.
            trace!("shutting down connection to {}: {e}", self.peer);
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("peer", &self.peer)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
