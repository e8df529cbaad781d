//! Connection to a Music Player Daemon.
//!
//! A [`Connection`] owns one socket and moves through three phases:
//!
//! * **ready** - a command or command list may be sent
//! * **receiving** - the response to the last request has to be drained
//!   before anything else may be sent
//! * **idle** - the daemon reports subsystem changes; only `noidle` or
//!   [`Connection::recv_idle`] may follow
//!
//! Commands that break this order fail with [`ErrorKind::State`] without
//! touching the socket, so the pending response can still be read.
//!
//! # Errors
//!
//! Failures reported by the daemon (`ACK`) and failures of the transport
//! are latched: every following call returns a copy of the latched error
//! until [`Connection::clear_error`] succeeds. Transport failures, timeouts
//! and unparsable replies are fatal and close the socket, so they can never
//! be cleared. Caller mistakes ([`Argument`](ErrorKind::Argument) and
//! [`State`](ErrorKind::State)) are returned but not latched.
//!
//! # Command lists
//!
//! Between [`Connection::command_list_begin`] and
//! [`Connection::command_list_end`], `send_*` calls are buffered and written
//! as one batch at the end. With discrete acknowledgement every member's
//! response is terminated separately; [`Connection::response_next`] moves on
//! to the next member.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use mpdclient::Connection;
//!
//! let mut mpd = Connection::connect("localhost", 6600, Duration::from_secs(5))?;
//! let status = mpd.run_status()?;
//! println!("{} at {:?}%", status.state, status.volume);
//!
//! mpd.command_list_begin(true)?;
//! mpd.send_add("Queen/Innuendo/01 Innuendo.flac")?;
//! mpd.send_add("Queen/Innuendo/02 I'm Going Slightly Mad.flac")?;
//! mpd.command_list_end()?;
//! mpd.response_finish()?;
//! ```

/// Generates `send_*` and `run_*` methods for commands whose response
/// carries no data.
macro_rules! simple_commands {
    ($(
        $(#[doc = $doc:literal])*
        $name:literal => fn $send:ident, $run:ident($($arg:ident: $ty:ty),*);
    )*) => {
        $(
            $(#[doc = $doc])*
            pub fn $send(&mut self, $($arg: $ty),*) -> Result<()> {
                self.send_command(Command::new($name)$(.arg($arg))*)
            }

            $(#[doc = $doc])*
            ///
            /// Waits for the daemon to acknowledge the command.
            pub fn $run(&mut self, $($arg: $ty),*) -> Result<()> {
                self.run(Command::new($name)$(.arg($arg))*)
            }
        )*
    };
}

mod database;
mod idle;
mod outputs;
mod playback;
mod playlists;
mod queue;
mod reflection;
mod response;

pub use response::Response;

use std::{cmp::Ordering, fmt, time::Duration};

use semver::Version;

use crate::{
    config::Config,
    error::{Error, ErrorKind, Result},
    protocol::{AckCode, Command, CommandList, Line, Pair},
    transport::Transport,
};

/// Where the connection stands in the request/response cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Ready,
    Receiving {
        /// Members of a discrete command list whose `list_OK` is outstanding.
        list_remaining: usize,
        /// The current member's `list_OK` has been read.
        member_finished: bool,
    },
    Idle {
        noidle_sent: bool,
    },
}

/// A blocking client connection.
pub struct Connection {
    transport: Option<Transport>,
    version: Version,
    phase: Phase,
    error: Option<Error>,
    list: Option<CommandList>,
    pending: Option<Pair>,
}

impl Connection {
    const GREETING: &'static str = "OK MPD ";

    /// Connects and reads the daemon's greeting.
    ///
    /// `host` is a host name, an IP address or the absolute path of a Unix
    /// domain socket. A zero `timeout` blocks indefinitely.
    ///
    /// # Errors
    ///
    /// Fails with the transport error kinds of
    /// [`Transport::connect`](crate::transport::Transport::connect), or with
    /// [`NotMpd`](ErrorKind::NotMpd) if the peer does not greet like a daemon.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let mut transport = Transport::connect(host, port, timeout)?;
        let greeting = transport.recv_line()?;
        let version = Self::parse_greeting(&greeting)?;

        info!("connected to MPD {version} at {}", transport.peer());

        Ok(Self {
            transport: Some(transport),
            version,
            phase: Phase::Ready,
            error: None,
            list: None,
            pending: None,
        })
    }

    /// Connects with `config`, sending its password if it has one.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::connect`], or with
    /// [`ServerAck`](ErrorKind::ServerAck) if the password is rejected.
    pub fn with_config(config: &Config) -> Result<Self> {
        let mut connection = Self::connect(&config.host, config.port, config.timeout)?;
        if let Some(password) = &config.password {
            connection.run_password(password)?;
        }
        Ok(connection)
    }

    fn parse_greeting(greeting: &str) -> Result<Version> {
        let version = greeting
            .strip_prefix(Self::GREETING)
            .ok_or_else(|| Error::not_mpd(format!("unexpected greeting: {greeting}")))?
            .trim();

        // Daemons may leave out the patch level.
        let result = if version.matches('.').count() == 1 {
            Version::parse(&format!("{version}.0"))
        } else {
            Version::parse(version)
        };

        result.map_err(|e| Error::not_mpd(format!("invalid version {version}: {e}")))
    }

    /// Closes the connection.
    ///
    /// Closing twice does nothing. Every other call on a closed connection
    /// fails with [`State`](ErrorKind::State).
    pub fn close(&mut self) {
        if let Some(transport) = self.transport.take() {
            debug!("closing connection to {}", transport.peer());
            transport.shutdown();
        }
        self.phase = Phase::Ready;
        self.error = None;
        self.list = None;
        self.pending = None;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    /// Version the daemon announced in its greeting.
    #[must_use]
    pub fn server_version(&self) -> &Version {
        &self.version
    }

    /// Compares the daemon's version with `major.minor.patch`.
    ///
    /// Returns [`Ordering::Greater`] if the daemon is newer.
    #[must_use]
    pub fn cmp_server_version(&self, major: u64, minor: u64, patch: u64) -> Ordering {
        self.version.cmp(&Version::new(major, minor, patch))
    }

    /// Timeout of reads and writes; zero if closed or blocking indefinitely.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.transport
            .as_ref()
            .map_or(Duration::ZERO, Transport::timeout)
    }

    /// Changes the timeout of all following reads and writes.
    ///
    /// Works while a daemon error is latched.
    ///
    /// # Errors
    ///
    /// Fails with [`State`](ErrorKind::State) on a closed connection, or
    /// with the latched fatal error.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        let Some(transport) = self.transport.as_mut() else {
            return Err(self
                .error
                .clone()
                .unwrap_or_else(|| Error::state("connection is closed")));
        };
        let result = transport.set_timeout(timeout);
        result.map_err(|e| self.fail(e))
    }

    /// The latched error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| match e.ack() {
            Some(ack) => ack.message.clone(),
            None => e.error.to_string(),
        })
    }

    /// Code of the latched server error.
    #[must_use]
    pub fn server_error(&self) -> Option<AckCode> {
        self.error.as_ref().and_then(Error::ack).map(|ack| ack.kind())
    }

    /// Command list index of the command that caused the latched server
    /// error.
    #[must_use]
    pub fn server_error_location(&self) -> Option<u32> {
        self.error.as_ref().and_then(Error::ack).map(|ack| ack.index)
    }

    /// Clears the latched error.
    ///
    /// Returns `false`, keeping the error, if it was fatal.
    pub fn clear_error(&mut self) -> bool {
        match &self.error {
            Some(error) if error.is_fatal() => false,
            _ => {
                self.error = None;
                true
            }
        }
    }

    /// Latches `error` if the daemon or the transport caused it.
    ///
    /// Fatal errors also drop the socket.
    fn fail(&mut self, error: Error) -> Error {
        if matches!(error.kind, ErrorKind::Argument | ErrorKind::State) {
            return error;
        }

        warn!("{error}");
        if error.is_fatal() {
            if let Some(transport) = self.transport.take() {
                transport.shutdown();
            }
            self.list = None;
        }
        self.phase = Phase::Ready;
        self.pending = None;
        self.error = Some(error.clone());

        error
    }

    /// Returns the transport, unless the connection is failed or closed.
    fn transport(&mut self) -> Result<&mut Transport> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.transport
            .as_mut()
            .ok_or_else(|| Error::state("connection is closed"))
    }

    fn check_ready(&mut self) -> Result<()> {
        self.transport()?;
        match self.phase {
            Phase::Ready => Ok(()),
            Phase::Receiving { .. } => Err(Error::state("previous response not finished")),
            Phase::Idle { .. } => Err(Error::state("connection is idle")),
        }
    }

    fn check_no_list(&self) -> Result<()> {
        if self.list.is_some() {
            return Err(Error::state("command list is still open"));
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let result = self.transport()?.send(text);
        result.map_err(|e| self.fail(e))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let result = self.transport()?.send_line(line);
        result.map_err(|e| self.fail(e))
    }

    /// Sends a command, or buffers it while a command list is open.
    ///
    /// # Errors
    ///
    /// * [`Argument`](ErrorKind::Argument) if the command is invalid
    /// * [`State`](ErrorKind::State) if a response is pending or the
    ///   connection is idle or closed
    /// * the latched error, if any
    /// * transport error kinds if writing fails
    pub fn send_command(&mut self, command: Command) -> Result<()> {
        command.validate()?;
        self.check_ready()?;

        if let Some(list) = &mut self.list {
            list.push(command);
            return Ok(());
        }

        debug!("sending {command}");
        self.write_line(command.as_str())?;

        self.phase = Phase::Receiving {
            list_remaining: 0,
            member_finished: false,
        };
        Ok(())
    }

    /// Sends a command and drains its response.
    fn run(&mut self, command: Command) -> Result<()> {
        self.check_no_list()?;
        self.send_command(command)?;
        self.response_finish()
    }

    /// Opens a command list.
    ///
    /// With `discrete_ok`, the daemon terminates the response of each member
    /// separately.
    ///
    /// # Errors
    ///
    /// Fails with [`State`](ErrorKind::State) if a list is already open or
    /// the connection is not ready.
    pub fn command_list_begin(&mut self, discrete_ok: bool) -> Result<()> {
        self.check_no_list()?;
        self.check_ready()?;
        self.list = Some(CommandList::new(discrete_ok));
        Ok(())
    }

    /// Closes the open command list and sends it.
    ///
    /// # Errors
    ///
    /// * [`State`](ErrorKind::State) if no list is open
    /// * [`Argument`](ErrorKind::Argument) if the list is empty; the list is
    ///   discarded
    /// * transport error kinds if writing fails
    pub fn command_list_end(&mut self) -> Result<()> {
        let list = self
            .list
            .take()
            .ok_or_else(|| Error::state("no command list is open"))?;
        self.check_ready()?;

        let encoded = list.encode()?;
        debug!(
            "sending command list of {} commands{}",
            list.len(),
            if list.is_discrete() { " (discrete)" } else { "" }
        );
        self.write(&encoded)?;

        self.phase = Phase::Receiving {
            list_remaining: if list.is_discrete() { list.len() } else { 0 },
            member_finished: false,
        };
        Ok(())
    }

    /// Reads and classifies the next line of the pending response.
    fn recv_line(&mut self) -> Result<Line> {
        let result = self.transport()?.recv_line();
        let line = result.map_err(|e| self.fail(e))?;
        trace!("received {line}");
        line.parse().map_err(|e| self.fail(e))
    }

    /// Reads the next pair of the pending response.
    ///
    /// Returns `None` at the end of the response, at the end of the current
    /// member's response in a discrete command list, and whenever no response
    /// is pending.
    ///
    /// # Errors
    ///
    /// * [`State`](ErrorKind::State) if a command list is open or the
    ///   connection is closed
    /// * [`ServerAck`](ErrorKind::ServerAck) if the command failed
    /// * [`State`](ErrorKind::State) if the connection is idle; only
    ///   [`Self::recv_idle`] reads the end of idle mode
    /// * [`Malformed`](ErrorKind::Malformed) or transport error kinds
    pub fn recv_pair(&mut self) -> Result<Option<Pair>> {
        self.check_no_list()?;
        self.transport()?;
        if self.phase == (Phase::Idle { noidle_sent: false }) {
            return Err(Error::state("connection is idle"));
        }

        self.read_pair()
    }

    /// Reads the next pair in any phase, including idle mode.
    fn read_pair(&mut self) -> Result<Option<Pair>> {
        if let Some(pair) = self.pending.take() {
            return Ok(Some(pair));
        }

        match self.phase {
            Phase::Ready
            | Phase::Receiving {
                member_finished: true,
                ..
            } => return Ok(None),
            Phase::Receiving { .. } | Phase::Idle { .. } => {}
        }

        match self.recv_line()? {
            Line::Pair(pair) => Ok(Some(pair)),
            Line::Ok => match self.phase {
                Phase::Receiving {
                    list_remaining: 1..,
                    ..
                } => Err(self.fail(Error::malformed("OK before the command list ended"))),
                _ => {
                    self.phase = Phase::Ready;
                    Ok(None)
                }
            },
            Line::ListOk => match self.phase {
                Phase::Receiving {
                    list_remaining: remaining @ 1..,
                    ..
                } => {
                    self.phase = Phase::Receiving {
                        list_remaining: remaining - 1,
                        member_finished: true,
                    };
                    Ok(None)
                }
                _ => Err(self.fail(Error::malformed("unexpected list_OK"))),
            },
            Line::Ack(ack) => Err(self.fail(Error::server_ack(ack))),
        }
    }

    /// Reads pairs until one named `name`, skipping all others.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_pair`].
    pub fn recv_pair_named(&mut self, name: &str) -> Result<Option<Pair>> {
        while let Some(pair) = self.recv_pair()? {
            if pair.key == name {
                return Ok(Some(pair));
            }
        }
        Ok(None)
    }

    /// Like [`Self::recv_pair_named`], but returns only the value.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_pair`].
    pub fn recv_value_named(&mut self, name: &str) -> Result<Option<String>> {
        Ok(self.recv_pair_named(name)?.map(|pair| pair.value))
    }

    /// Pushes a pair back, so that the next [`Self::recv_pair`] returns it.
    ///
    /// # Errors
    ///
    /// Fails with [`State`](ErrorKind::State) if a pair is already pushed
    /// back.
    pub fn enqueue_pair(&mut self, pair: Pair) -> Result<()> {
        if self.pending.is_some() {
            return Err(Error::state("a pair is already enqueued"));
        }
        self.pending = Some(pair);
        Ok(())
    }

    /// Ends the current member's response in a discrete command list and
    /// moves on to the next one.
    ///
    /// Unread pairs are skipped. After the last member, the terminating `OK`
    /// is read as well and the connection is ready again.
    ///
    /// # Errors
    ///
    /// * [`State`](ErrorKind::State) if no response is pending
    /// * errors of the skipped response, like [`Self::recv_pair`]
    pub fn response_next(&mut self) -> Result<()> {
        self.check_no_list()?;
        self.transport()?;
        if self.phase == Phase::Ready {
            return Err(Error::state("no response pending"));
        }

        while self.recv_pair()?.is_some() {}

        if let Phase::Receiving {
            list_remaining,
            member_finished: true,
        } = self.phase
        {
            if list_remaining > 0 {
                self.phase = Phase::Receiving {
                    list_remaining,
                    member_finished: false,
                };
            } else {
                match self.recv_line()? {
                    Line::Ok => self.phase = Phase::Ready,
                    Line::Ack(ack) => return Err(self.fail(Error::server_ack(ack))),
                    line => {
                        return Err(
                            self.fail(Error::malformed(format!("expected OK, got {line:?}")))
                        )
                    }
                }
            }
        }

        Ok(())
    }

    /// Skips the rest of the pending response, including the responses of
    /// all remaining command list members.
    ///
    /// Does nothing if no response is pending.
    ///
    /// # Errors
    ///
    /// Returns the error the response ends with, like
    /// [`ServerAck`](ErrorKind::ServerAck).
    pub fn response_finish(&mut self) -> Result<()> {
        self.check_no_list()?;
        self.transport()?;
        while self.phase != Phase::Ready {
            if self.phase == (Phase::Idle { noidle_sent: false }) {
                return Err(Error::state("connection is idle"));
            }
            self.response_next()?;
        }
        self.pending = None;
        Ok(())
    }

    /// Iterates over the pairs of the pending response.
    pub fn response(&mut self) -> Response<'_> {
        Response::new(self)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("transport", &self.transport)
            .field("version", &self.version)
            .field("phase", &self.phase)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
