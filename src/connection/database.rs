//! The music database.

use crate::{
    error::{Error, Result},
    protocol::Command,
};

use super::Connection;

impl Connection {
    /// Requests the URIs of all songs, optionally below `path`; read them
    /// with [`Self::recv_entity`].
    pub fn send_list_all(&mut self, path: Option<&str>) -> Result<()> {
        self.send_command(Command::new("listall").arg_opt(path))
    }

    /// Like [`Self::send_list_all`], with song metadata.
    pub fn send_list_all_meta(&mut self, path: Option<&str>) -> Result<()> {
        self.send_command(Command::new("listallinfo").arg_opt(path))
    }

    /// Requests the contents of one directory, the root without `path`.
    pub fn send_list_meta(&mut self, path: Option<&str>) -> Result<()> {
        self.send_command(Command::new("lsinfo").arg_opt(path))
    }

    /// Starts a database update, optionally limited to `path`.
    pub fn send_update(&mut self, path: Option<&str>) -> Result<()> {
        self.send_command(Command::new("update").arg_opt(path))
    }

    /// Receives the job id of a database update.
    pub fn recv_update_id(&mut self) -> Result<Option<u32>> {
        self.recv_number_named("updating_db")
    }

    /// Starts a database update and returns its job id.
    ///
    /// # Errors
    ///
    /// Fails with [`Malformed`](crate::error::ErrorKind::Malformed) if the
    /// daemon does not report a job id.
    pub fn run_update(&mut self, path: Option<&str>) -> Result<u32> {
        self.check_no_list()?;
        self.send_update(path)?;
        let id = self.recv_update_id()?;
        self.response_finish()?;
        id.ok_or_else(|| self.fail(Error::malformed("update did not return a job id")))
    }
}
