//! Audio outputs.

use crate::{
    error::Result,
    protocol::{Command, Output},
};

use super::Connection;

impl Connection {
    simple_commands! {
        "enableoutput" => fn send_enable_output, run_enable_output(id: u32);
        "disableoutput" => fn send_disable_output, run_disable_output(id: u32);
    }

    /// Requests all outputs; read them with [`Self::recv_output`].
    pub fn send_outputs(&mut self) -> Result<()> {
        self.send_command(Command::new("outputs"))
    }

    /// Queries all outputs.
    pub fn run_outputs(&mut self) -> Result<Vec<Output>> {
        self.check_no_list()?;
        self.send_outputs()?;
        let mut outputs = Vec::new();
        while let Some(output) = self.recv_output()? {
            outputs.push(output);
        }
        self.response_finish()?;
        Ok(outputs)
    }
}
