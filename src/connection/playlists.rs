//! Stored playlists in the playlist directory.

use crate::{error::Result, protocol::Command};

use super::Connection;

impl Connection {
    simple_commands! {
        /// Removes all songs from a stored playlist.
        "playlistclear" => fn send_playlist_clear, run_playlist_clear(name: &str);
        /// Appends a song to a stored playlist, creating it if needed.
        "playlistadd" => fn send_playlist_add, run_playlist_add(name: &str, uri: &str);
        /// Moves a song within a stored playlist.
        "playlistmove" => fn send_playlist_move, run_playlist_move(name: &str, from: u32, to: u32);
        /// Removes the song at a position of a stored playlist.
        "playlistdelete" => fn send_playlist_delete, run_playlist_delete(name: &str, pos: u32);
        /// Saves the queue as a new stored playlist.
        "save" => fn send_save, run_save(name: &str);
        /// Appends a stored playlist to the queue.
        "load" => fn send_load, run_load(name: &str);
        "rename" => fn send_rename, run_rename(from: &str, to: &str);
        /// Deletes a stored playlist.
        "rm" => fn send_rm, run_rm(name: &str);
    }

    /// Requests all stored playlists; read them with
    /// [`Self::recv_playlist`].
    pub fn send_list_playlists(&mut self) -> Result<()> {
        self.send_command(Command::new("listplaylists"))
    }

    /// Requests the URIs in a stored playlist; read them with
    /// [`Self::recv_song`], which yields songs without metadata.
    pub fn send_list_playlist(&mut self, name: &str) -> Result<()> {
        self.send_command(Command::new("listplaylist").arg(name))
    }

    /// Requests the songs in a stored playlist with their metadata.
    pub fn send_list_playlist_meta(&mut self, name: &str) -> Result<()> {
        self.send_command(Command::new("listplaylistinfo").arg(name))
    }
}
