//! Playback control, player options and status queries.

use std::time::Duration;

use crate::{
    error::{Error, Result},
    protocol::{Command, Mode, Song, Stats, Status},
};

use super::Connection;

impl Connection {
    simple_commands! {
        /// Starts playback at the current song.
        "play" => fn send_play, run_play();
        /// Starts playback at a queue position.
        "play" => fn send_play_pos, run_play_pos(pos: u32);
        /// Starts playback at a queue id.
        "playid" => fn send_play_id, run_play_id(id: u32);
        "stop" => fn send_stop, run_stop();
        /// Toggles between play and pause.
        "pause" => fn send_toggle_pause, run_toggle_pause();
        /// Pauses or resumes playback.
        "pause" => fn send_pause, run_pause(pause: bool);
        "next" => fn send_next, run_next();
        "previous" => fn send_previous, run_previous();
        /// Seeks to a position within the song at a queue position.
        "seek" => fn send_seek_pos, run_seek_pos(pos: u32, time: Duration);
        /// Seeks to a position within the song with a queue id.
        "seekid" => fn send_seek_id, run_seek_id(id: u32, time: Duration);
        "repeat" => fn send_repeat, run_repeat(mode: bool);
        "random" => fn send_random, run_random(mode: bool);
        /// Stops after the current song, or repeats it with `repeat`.
        "single" => fn send_single, run_single(mode: Mode);
        /// Removes songs from the queue once played.
        "consume" => fn send_consume, run_consume(mode: Mode);
        /// Sets the crossfade between songs in whole seconds.
        "crossfade" => fn send_crossfade, run_crossfade(seconds: u32);
    }

    /// Sets the volume in percent.
    ///
    /// # Errors
    ///
    /// Fails with [`Argument`](crate::error::ErrorKind::Argument) for
    /// volumes above 100.
    pub fn send_set_volume(&mut self, volume: u8) -> Result<()> {
        if volume > 100 {
            return Err(Error::argument(format!("volume {volume} exceeds 100")));
        }
        self.send_command(Command::new("setvol").arg(volume))
    }

    /// Sets the volume in percent and waits for the daemon to apply it.
    pub fn run_set_volume(&mut self, volume: u8) -> Result<()> {
        self.check_no_list()?;
        self.send_set_volume(volume)?;
        self.response_finish()
    }

    pub fn send_status(&mut self) -> Result<()> {
        self.send_command(Command::new("status"))
    }

    /// Queries the player status.
    pub fn run_status(&mut self) -> Result<Status> {
        self.check_no_list()?;
        self.send_status()?;
        let status = self.recv_status()?;
        self.response_finish()?;
        Ok(status)
    }

    pub fn send_stats(&mut self) -> Result<()> {
        self.send_command(Command::new("stats"))
    }

    /// Queries database and uptime statistics.
    pub fn run_stats(&mut self) -> Result<Stats> {
        self.check_no_list()?;
        self.send_stats()?;
        let stats = self.recv_stats()?;
        self.response_finish()?;
        Ok(stats)
    }

    pub fn send_current_song(&mut self) -> Result<()> {
        self.send_command(Command::new("currentsong"))
    }

    /// Queries the current song; `None` when the player is stopped.
    pub fn run_current_song(&mut self) -> Result<Option<Song>> {
        self.check_no_list()?;
        self.send_current_song()?;
        let song = self.recv_song()?;
        self.response_finish()?;
        Ok(song)
    }
}
