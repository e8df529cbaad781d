//! A blocking client for the Music Player Daemon protocol.
//!
//! # Layout
//!
//! * [`transport`] - TCP and Unix domain socket I/O, line framing
//! * [`protocol`] - request encoding, response parsing and typed records
//! * [`connection`] - the request/response state machine and one method per
//!   daemon command
//! * [`config`] - connection settings from the environment or a TOML file
//! * [`error`] - the error type shared by all of the above
//!
//! # Example
//!
//! ```no_run
//! use mpdclient::{config::Config, protocol::IdleEvents, Connection};
//!
//! let mut mpd = Connection::with_config(&Config::from_env())?;
//!
//! mpd.run_add("Queen/Innuendo")?;
//! mpd.run_play()?;
//!
//! loop {
//!     let events = mpd.run_idle_mask(IdleEvents::PLAYER)?;
//!     if let Some(song) = mpd.run_current_song()? {
//!         println!("{events}: now playing {}", song.uri);
//!     }
//! }
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger of its own.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[macro_use]
extern crate log;

pub mod config;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod transport;

pub use connection::Connection;
pub use error::{Error, ErrorKind, Result};
