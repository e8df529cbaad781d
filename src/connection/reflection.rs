//! Authentication and what the daemon supports.

use crate::{
    error::Result,
    protocol::{Command, TagType},
};

use super::Connection;

impl Connection {
    simple_commands! {
        /// Authenticates to gain the permissions tied to `password`.
        "password" => fn send_password, run_password(password: &str);
    }

    /// Requests the commands the connection may use; read them with
    /// [`Self::recv_command_pair`].
    pub fn send_allowed_commands(&mut self) -> Result<()> {
        self.send_command(Command::new("commands"))
    }

    /// Requests the commands the connection may not use.
    pub fn send_disallowed_commands(&mut self) -> Result<()> {
        self.send_command(Command::new("notcommands"))
    }

    /// Receives the next command name.
    pub fn recv_command_pair(&mut self) -> Result<Option<String>> {
        self.recv_value_named("command")
    }

    /// Requests the URL schemes the daemon can play; read them with
    /// [`Self::recv_url_scheme_pair`].
    pub fn send_list_url_schemes(&mut self) -> Result<()> {
        self.send_command(Command::new("urlhandlers"))
    }

    pub fn recv_url_scheme_pair(&mut self) -> Result<Option<String>> {
        self.recv_value_named("handler")
    }

    /// Requests the tags the daemon reports; read them with
    /// [`Self::recv_tag_type_pair`].
    pub fn send_list_tag_types(&mut self) -> Result<()> {
        self.send_command(Command::new("tagtypes"))
    }

    /// Receives the next tag name.
    ///
    /// Names this crate does not know are returned as well, so the raw
    /// string is kept; parse it with [`TagType`]'s `FromStr`.
    pub fn recv_tag_type_pair(&mut self) -> Result<Option<String>> {
        self.recv_value_named("tagtype")
    }

    /// Queries the tags the daemon reports, skipping unknown ones.
    pub fn run_tag_types(&mut self) -> Result<Vec<TagType>> {
        self.check_no_list()?;
        self.send_list_tag_types()?;
        let mut tags = Vec::new();
        while let Some(name) = self.recv_tag_type_pair()? {
            match name.parse() {
                Ok(tag) => tags.push(tag),
                Err(_) => trace!("skipping unknown tag type {name}"),
            }
        }
        self.response_finish()?;
        Ok(tags)
    }
}
