//! Typed receivers built on top of the raw pair stream.

use crate::{
    error::{Error, Result},
    protocol::{self, Entity, Pair, Record},
};

use super::Connection;

/// Pull iterator over the pairs of a pending response.
///
/// Ends at the end of the response, after the first error, or at the end of
/// the current member's response in a discrete command list. Holding the
/// iterator borrows the connection, so nothing else can be sent meanwhile.
#[derive(Debug)]
pub struct Response<'a> {
    connection: &'a mut Connection,
    done: bool,
}

impl<'a> Response<'a> {
    pub(super) fn new(connection: &'a mut Connection) -> Self {
        Self {
            connection,
            done: false,
        }
    }

    /// Skips the remaining pairs, including those of later command list
    /// members.
    ///
    /// # Errors
    ///
    /// Fails like [`Connection::response_finish`].
    pub fn finish(self) -> Result<()> {
        self.connection.response_finish()
    }
}

impl Iterator for Response<'_> {
    type Item = Result<Pair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.connection.recv_pair().transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

impl Connection {
    /// Reads pairs until one whose key satisfies `begin`.
    fn recv_pair_where<F>(&mut self, begin: F) -> Result<Option<Pair>>
    where
        F: Fn(&str) -> bool,
    {
        while let Some(pair) = self.recv_pair()? {
            if begin(&pair.key) {
                return Ok(Some(pair));
            }
        }
        Ok(None)
    }

    /// Decodes `pair` into `record`; decoding failures are fatal.
    fn decode<T: Record>(&mut self, record: &mut T, pair: &Pair) -> Result<()> {
        record.decode(pair).map_err(|e| self.fail(e))
    }

    /// Receives the next record of a listing.
    ///
    /// Pairs in front of the record's first key are skipped. The record
    /// ends before the next key in [`Record::END`], which is pushed back.
    pub(crate) fn recv_record<T: Record>(&mut self) -> Result<Option<T>> {
        let Some(first) = self.recv_pair_where(|key| T::BEGIN.contains(&key))? else {
            return Ok(None);
        };

        let mut record = T::default();
        self.decode(&mut record, &first)?;

        while let Some(pair) = self.recv_pair()? {
            if T::END.contains(&pair.key.as_str()) {
                self.enqueue_pair(pair)?;
                break;
            }
            self.decode(&mut record, &pair)?;
        }

        Ok(Some(record))
    }

    /// Folds the rest of the current response into one record.
    pub(crate) fn recv_whole<T: Record>(&mut self) -> Result<T> {
        let mut record = T::default();
        while let Some(pair) = self.recv_pair()? {
            self.decode(&mut record, &pair)?;
        }
        Ok(record)
    }

    /// Receives the value of the next `name` pair as a number.
    pub(crate) fn recv_number_named<T>(&mut self, name: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        Error: From<T::Err>,
    {
        match self.recv_value_named(name)? {
            Some(value) => protocol::number(&value)
                .map(Some)
                .map_err(|e| self.fail(e)),
            None => Ok(None),
        }
    }

    /// Receives the next song of a listing.
    ///
    /// # Errors
    ///
    /// Fails like [`Connection::recv_pair`], or with
    /// [`Malformed`](crate::error::ErrorKind::Malformed) if a known field
    /// cannot be decoded.
    pub fn recv_song(&mut self) -> Result<Option<protocol::Song>> {
        self.recv_record()
    }

    /// Receives the next directory, song or playlist of a database listing.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_song`].
    pub fn recv_entity(&mut self) -> Result<Option<Entity>> {
        let Some(first) = self.recv_pair_where(|key| Entity::BEGIN.contains(&key))? else {
            return Ok(None);
        };

        let mut entity = Entity::begin(&first)
            .and_then(|entity| {
                entity.ok_or_else(|| Error::malformed(format!("{first} does not open an entity")))
            })
            .map_err(|e| self.fail(e))?;

        while let Some(pair) = self.recv_pair()? {
            if Entity::BEGIN.contains(&pair.key.as_str()) {
                self.enqueue_pair(pair)?;
                break;
            }
            entity.decode(&pair).map_err(|e| self.fail(e))?;
        }

        Ok(Some(entity))
    }

    /// Receives the next output of an `outputs` response.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_song`].
    pub fn recv_output(&mut self) -> Result<Option<protocol::Output>> {
        self.recv_record()
    }

    /// Receives the next stored playlist of a `listplaylists` response.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_song`].
    pub fn recv_playlist(&mut self) -> Result<Option<protocol::StoredPlaylist>> {
        self.recv_record()
    }

    /// Receives the next entry of a `plchangesposid` response.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_song`].
    pub fn recv_queue_change_brief(&mut self) -> Result<Option<protocol::QueueChange>> {
        self.recv_record()
    }

    /// Receives the status record that spans the whole response.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_song`].
    pub fn recv_status(&mut self) -> Result<protocol::Status> {
        self.recv_whole()
    }

    /// Receives the statistics record that spans the whole response.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::recv_song`].
    pub fn recv_stats(&mut self) -> Result<protocol::Stats> {
        self.recv_whole()
    }
}
