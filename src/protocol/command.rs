//! Request encoding.
//!
//! A request is a single line: the command name followed by its arguments,
//! separated by spaces. String arguments that are empty or contain anything
//! besides a conservative set of word characters are wrapped in double
//! quotes, with `"` and `\` escaped by a backslash. Numbers are written in
//! plain, locale-independent decimal notation; floats use the shortest
//! representation that parses back to the same value.
//!
//! # Example
//!
//! ```rust
//! use mpdclient::protocol::Command;
//!
//! let add = Command::new("add").arg("Queen/Innuendo.flac");
//! assert_eq!(add.as_str(), "add Queen/Innuendo.flac");
//!
//! let add = Command::new("add").arg("Pink Floyd/Time.flac");
//! assert_eq!(add.as_str(), "add \"Pink Floyd/Time.flac\"");
//! ```

use std::{
    fmt::{self, Write},
    ops::{Range, RangeFrom},
    time::Duration,
};

use crate::error::{Error, Result};

/// A value that can be written as a command argument.
pub trait Argument {
    /// Appends the wire form of this argument to `out`.
    fn write_arg(&self, out: &mut String);
}

impl Argument for str {
    fn write_arg(&self, out: &mut String) {
        // Characters the daemon's tokenizer accepts in unquoted words.
        let is_word = |c: char| c.is_ascii_alphanumeric() || "+-.,:_/".contains(c);

        if !self.is_empty() && self.chars().all(is_word) {
            out.push_str(self);
            return;
        }

        out.reserve(self.len() + 2);
        out.push('"');
        for c in self.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
}

impl Argument for String {
    fn write_arg(&self, out: &mut String) {
        self.as_str().write_arg(out);
    }
}

impl<T: Argument + ?Sized> Argument for &T {
    fn write_arg(&self, out: &mut String) {
        (**self).write_arg(out);
    }
}

macro_rules! display_argument {
    ($($ty:ty),*) => {
        $(
            impl Argument for $ty {
                fn write_arg(&self, out: &mut String) {
                    // Writing into a `String` cannot fail.
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

// `Display` for floats never uses exponents or locale-specific separators,
// and prints the shortest digits that round-trip.
display_argument!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl Argument for bool {
    fn write_arg(&self, out: &mut String) {
        out.push(if *self { '1' } else { '0' });
    }
}

/// Half-open position ranges, written as `start:end`.
impl Argument for Range<u32> {
    fn write_arg(&self, out: &mut String) {
        let _ = write!(out, "{}:{}", self.start, self.end);
    }
}

/// Open-ended position ranges, written as `start:`.
impl Argument for RangeFrom<u32> {
    fn write_arg(&self, out: &mut String) {
        let _ = write!(out, "{}:", self.start);
    }
}

/// Durations are written as fractional seconds.
impl Argument for Duration {
    fn write_arg(&self, out: &mut String) {
        self.as_secs_f64().write_arg(out);
    }
}

/// A single encoded request line, without the trailing newline.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Command {
    line: String,
}

impl Command {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            line: name.to_owned(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Argument) -> Self {
        self.line.push(' ');
        arg.write_arg(&mut self.line);
        self
    }

    /// Appends an argument when present.
    #[must_use]
    pub fn arg_opt(self, arg: Option<impl Argument>) -> Self {
        match arg {
            Some(arg) => self.arg(arg),
            None => self,
        }
    }

    /// The command name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.line
            .split_once(' ')
            .map_or(self.line.as_str(), |(name, _)| name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Checks that the line cannot break request framing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::argument`] for empty command names and for line breaks
    /// anywhere in the request.
    pub fn validate(&self) -> Result<()> {
        if self.name().is_empty() {
            return Err(Error::argument("empty command name"));
        }
        if self.line.contains(['\n', '\r']) {
            return Err(Error::argument(format!(
                "line break in arguments of {}",
                self.name()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// A batch of commands sent in one go.
///
/// With `discrete` acknowledgement the daemon marks the end of every member's
/// response with `list_OK`; otherwise all responses run together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CommandList {
    discrete: bool,
    commands: Vec<Command>,
}

impl CommandList {
    const BEGIN: &'static str = "command_list_begin";
    const BEGIN_OK: &'static str = "command_list_ok_begin";
    const END: &'static str = "command_list_end";

    #[must_use]
    pub fn new(discrete: bool) -> Self {
        Self {
            discrete,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_discrete(&self) -> bool {
        self.discrete
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Encodes the whole batch, framing lines and trailing newlines included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::argument`] if the list is empty or a member fails
    /// [`Command::validate`].
    pub fn encode(&self) -> Result<String> {
        if self.commands.is_empty() {
            return Err(Error::argument("empty command list"));
        }

        let begin = if self.discrete {
            Self::BEGIN_OK
        } else {
            Self::BEGIN
        };

        let mut out = String::from(begin);
        out.push('\n');
        for command in &self.commands {
            command.validate()?;
            out.push_str(&command.line);
            out.push('\n');
        }
        out.push_str(Self::END);
        out.push('\n');

        Ok(out)
    }
}
