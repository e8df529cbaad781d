//! The queue: the list of songs the player works through.

use std::ops::Range;

use crate::{
    error::{Error, Result},
    protocol::{Command, Song},
};

use super::Connection;

impl Connection {
    simple_commands! {
        /// Appends a song or, recursively, a directory to the queue.
        "add" => fn send_add, run_add(uri: &str);
        /// Removes the song at a queue position.
        "delete" => fn send_delete, run_delete(pos: u32);
        /// Removes the songs in a range of queue positions.
        "delete" => fn send_delete_range, run_delete_range(range: Range<u32>);
        /// Removes the song with a queue id.
        "deleteid" => fn send_delete_id, run_delete_id(id: u32);
        "shuffle" => fn send_shuffle, run_shuffle();
        /// Shuffles a range of queue positions.
        "shuffle" => fn send_shuffle_range, run_shuffle_range(range: Range<u32>);
        /// Removes all songs from the queue.
        "clear" => fn send_clear, run_clear();
        /// Moves the song at position `from` to position `to`.
        "move" => fn send_move, run_move(from: u32, to: u32);
        /// Moves the song with a queue id to position `to`.
        "moveid" => fn send_move_id, run_move_id(id: u32, to: u32);
        /// Swaps the songs at two queue positions.
        "swap" => fn send_swap, run_swap(pos1: u32, pos2: u32);
        /// Swaps the songs with two queue ids.
        "swapid" => fn send_swap_id, run_swap_id(id1: u32, id2: u32);
    }

    /// Requests all songs of the queue; read them with
    /// [`Self::recv_song`].
    pub fn send_list_queue_meta(&mut self) -> Result<()> {
        self.send_command(Command::new("playlistinfo"))
    }

    /// Requests the songs in a range of queue positions.
    pub fn send_list_queue_range_meta(&mut self, range: Range<u32>) -> Result<()> {
        self.send_command(Command::new("playlistinfo").arg(range))
    }

    /// Requests the song at a queue position.
    pub fn send_get_queue_song_pos(&mut self, pos: u32) -> Result<()> {
        self.send_command(Command::new("playlistinfo").arg(pos))
    }

    /// Requests the song with a queue id.
    pub fn send_get_queue_song_id(&mut self, id: u32) -> Result<()> {
        self.send_command(Command::new("playlistid").arg(id))
    }

    /// Requests the songs that changed since queue version `version`.
    pub fn send_queue_changes_meta(&mut self, version: u32) -> Result<()> {
        self.send_command(Command::new("plchanges").arg(version))
    }

    /// Requests position and id of the songs that changed since queue
    /// version `version`; read them with [`Self::recv_queue_change_brief`].
    pub fn send_queue_changes_brief(&mut self, version: u32) -> Result<()> {
        self.send_command(Command::new("plchangesposid").arg(version))
    }

    /// Queries the song at a queue position.
    pub fn run_get_queue_song_pos(&mut self, pos: u32) -> Result<Option<Song>> {
        self.check_no_list()?;
        self.send_get_queue_song_pos(pos)?;
        let song = self.recv_song()?;
        self.response_finish()?;
        Ok(song)
    }

    /// Queries the song with a queue id.
    pub fn run_get_queue_song_id(&mut self, id: u32) -> Result<Option<Song>> {
        self.check_no_list()?;
        self.send_get_queue_song_id(id)?;
        let song = self.recv_song()?;
        self.response_finish()?;
        Ok(song)
    }

    /// Appends a song and requests its queue id.
    pub fn send_add_id(&mut self, uri: &str) -> Result<()> {
        self.send_command(Command::new("addid").arg(uri))
    }

    /// Inserts a song at a queue position and requests its queue id.
    pub fn send_add_id_to(&mut self, uri: &str, to: u32) -> Result<()> {
        self.send_command(Command::new("addid").arg(uri).arg(to))
    }

    /// Receives the queue id sent in response to `addid`.
    pub fn recv_song_id(&mut self) -> Result<Option<u32>> {
        self.recv_number_named("Id")
    }

    /// Appends a song and returns its queue id.
    ///
    /// # Errors
    ///
    /// Fails with [`Malformed`](crate::error::ErrorKind::Malformed) if the
    /// daemon does not report an id.
    pub fn run_add_id(&mut self, uri: &str) -> Result<u32> {
        self.check_no_list()?;
        self.send_add_id(uri)?;
        let id = self.recv_song_id()?;
        self.response_finish()?;
        id.ok_or_else(|| self.fail(Error::malformed("addid did not return an id")))
    }
}
