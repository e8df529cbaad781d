//! Idle mode: waiting for the daemon to report changes.
//!
//! After `idle`, the daemon holds the response back until one of the watched
//! subsystems changes, then lists the changed subsystems. `noidle` makes it
//! answer right away.

use crate::{
    error::{Error, Result},
    protocol::{Command, IdleEvents},
};

use super::{Connection, Phase};

impl Connection {
    /// Enters idle mode for all subsystems.
    pub fn send_idle(&mut self) -> Result<()> {
        self.enter_idle(Command::new("idle"))
    }

    /// Enters idle mode for the subsystems in `mask`.
    ///
    /// # Errors
    ///
    /// Fails with [`Argument`](crate::error::ErrorKind::Argument) for an
    /// empty mask.
    pub fn send_idle_mask(&mut self, mask: IdleEvents) -> Result<()> {
        if mask.is_empty() {
            return Err(Error::argument("idle mask is empty"));
        }
        let command = mask
            .names()
            .fold(Command::new("idle"), |command, name| command.arg(name));
        self.enter_idle(command)
    }

    fn enter_idle(&mut self, command: Command) -> Result<()> {
        self.check_no_list()?;
        self.check_ready()?;

        debug!("sending {command}");
        self.write_line(command.as_str())?;
        self.phase = Phase::Idle { noidle_sent: false };
        Ok(())
    }

    /// Asks the daemon to leave idle mode; collect its answer with
    /// [`Self::recv_idle`].
    ///
    /// # Errors
    ///
    /// Fails with [`State`](crate::error::ErrorKind::State) if the
    /// connection is not idle.
    pub fn send_noidle(&mut self) -> Result<()> {
        self.transport()?;
        match self.phase {
            Phase::Idle { noidle_sent: false } => {
                debug!("sending noidle");
                self.write_line("noidle")?;
                self.phase = Phase::Idle { noidle_sent: true };
                Ok(())
            }
            Phase::Idle { noidle_sent: true } => Ok(()),
            Phase::Ready | Phase::Receiving { .. } => {
                Err(Error::state("connection is not idle"))
            }
        }
    }

    /// Waits for the end of idle mode and returns the changed subsystems.
    ///
    /// With `disable_timeout`, waits indefinitely instead of failing once the
    /// connection's timeout expires. Unknown subsystem names are ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`State`](crate::error::ErrorKind::State) if the
    /// connection is not idle, or like [`Self::recv_pair`].
    pub fn recv_idle(&mut self, disable_timeout: bool) -> Result<IdleEvents> {
        self.check_no_list()?;
        self.transport()?;
        if !matches!(self.phase, Phase::Idle { .. }) {
            return Err(Error::state("connection is not idle"));
        }

        if disable_timeout {
            let result = self.transport()?.block_reads(true);
            result.map_err(|e| self.fail(e))?;
        }

        let events = self.recv_idle_events();

        if disable_timeout {
            if let Some(transport) = self.transport.as_mut() {
                if let Err(e) = transport.block_reads(false) {
                    return Err(self.fail(e));
                }
            }
        }

        events
    }

    fn recv_idle_events(&mut self) -> Result<IdleEvents> {
        let mut events = IdleEvents::empty();
        while let Some(pair) = self.read_pair()? {
            if pair.key != "changed" {
                continue;
            }
            match IdleEvents::from_subsystem(&pair.value) {
                Some(event) => events |= event,
                None => trace!("ignoring unknown subsystem {}", pair.value),
            }
        }
        Ok(events)
    }

    /// Waits, without timeout, until any subsystem changes.
    pub fn run_idle(&mut self) -> Result<IdleEvents> {
        self.send_idle()?;
        self.recv_idle(true)
    }

    /// Waits, without timeout, until a subsystem in `mask` changes.
    pub fn run_idle_mask(&mut self, mask: IdleEvents) -> Result<IdleEvents> {
        self.send_idle_mask(mask)?;
        self.recv_idle(true)
    }

    /// Leaves idle mode, returning the changes the daemon reported until
    /// then.
    pub fn run_noidle(&mut self) -> Result<IdleEvents> {
        self.send_noidle()?;
        self.recv_idle(false)
    }
}
