//! Integration tests for listings and typed records
//! Tests: LSINFO, LISTALLINFO, OUTPUTS, PLCHANGESPOSID, LISTPLAYLISTS, TAGTYPES, COMMANDS, STATS, PLAYLISTINFO

use mpdclient::{
    protocol::{Entity, QueueChange, TagType},
    ErrorKind,
};

use super::stub_daemon::{Step, StubDaemon, GREETING};

#[test]
fn test_lsinfo_entities() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![Step::Reply(
            1,
            "directory: Queen\n\
             Last-Modified: 2021-05-01T10:00:00Z\n\
             file: Queen - Innuendo.flac\n\
             Title: Innuendo\n\
             Artist: Queen\n\
             Time: 391\n\
             playlist: Favourites.m3u\n\
             OK\n",
        )],
    );
    let mut mpd = daemon.connect();

    mpd.send_list_meta(None).unwrap();

    let Some(Entity::Directory(dir)) = mpd.recv_entity().unwrap() else {
        panic!("expected a directory");
    };
    assert_eq!(dir.path, "Queen");
    assert!(dir.last_modified.is_some());

    let Some(Entity::Song(song)) = mpd.recv_entity().unwrap() else {
        panic!("expected a song");
    };
    assert_eq!(song.uri, "Queen - Innuendo.flac");
    assert_eq!(song.tag(TagType::Artist, 0), Some("Queen"));
    assert_eq!(song.duration_secs(), 391);

    let Some(Entity::Playlist(playlist)) = mpd.recv_entity().unwrap() else {
        panic!("expected a playlist");
    };
    assert_eq!(playlist.path, "Favourites.m3u");

    assert!(mpd.recv_entity().unwrap().is_none());

    mpd.close();
    assert_eq!(daemon.received(), ["lsinfo"]);
}

#[test]
fn test_outputs() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(
                1,
                "outputid: 0\noutputname: Speakers\nplugin: alsa\noutputenabled: 1\n\
                 outputid: 1\noutputname: Stream\nplugin: httpd\noutputenabled: 0\n\
                 attribute: dop=0\nOK\n",
            ),
            Step::Reply(1, "OK\n"),
        ],
    );
    let mut mpd = daemon.connect();

    let outputs = mpd.run_outputs().unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].name, "Speakers");
    assert!(outputs[0].enabled);
    assert_eq!(outputs[1].plugin.as_deref(), Some("httpd"));
    assert!(!outputs[1].enabled);

    mpd.run_enable_output(1).unwrap();

    mpd.close();
    assert_eq!(daemon.received(), ["outputs", "enableoutput 1"]);
}

#[test]
fn test_queue_changes_brief() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![Step::Reply(1, "cpos: 0\nId: 12\ncpos: 1\nId: 15\nOK\n")],
    );
    let mut mpd = daemon.connect();

    mpd.send_queue_changes_brief(41).unwrap();
    let mut changes = Vec::new();
    while let Some(change) = mpd.recv_queue_change_brief().unwrap() {
        changes.push(change);
    }
    mpd.response_finish().unwrap();

    assert_eq!(
        changes,
        [
            QueueChange { position: 0, id: 12 },
            QueueChange { position: 1, id: 15 },
        ]
    );

    mpd.close();
    assert_eq!(daemon.received(), ["plchangesposid 41"]);
}

#[test]
fn test_stored_playlists() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(
                1,
                "playlist: Favourites\nLast-Modified: 2024-01-31T12:00:00Z\nplaylist: Road Trip\nOK\n",
            ),
            Step::Reply(1, "file: a.flac\nfile: b.flac\nOK\n"),
            Step::Reply(1, "OK\n"),
        ],
    );
    let mut mpd = daemon.connect();

    mpd.send_list_playlists().unwrap();
    let first = mpd.recv_playlist().unwrap().unwrap();
    assert_eq!(first.path, "Favourites");
    assert_eq!(first.last_modified.unwrap().unix_timestamp(), 1_706_702_400);
    let second = mpd.recv_playlist().unwrap().unwrap();
    assert_eq!(second.path, "Road Trip");
    assert!(second.last_modified.is_none());
    assert!(mpd.recv_playlist().unwrap().is_none());

    mpd.send_list_playlist("Road Trip").unwrap();
    let uris: Vec<String> = std::iter::from_fn(|| mpd.recv_song().unwrap())
        .map(|song| song.uri)
        .collect();
    assert_eq!(uris, ["a.flac", "b.flac"]);

    mpd.run_playlist_add("Road Trip", "c.flac").unwrap();

    mpd.close();
    assert_eq!(
        daemon.received(),
        [
            "listplaylists",
            "listplaylist \"Road Trip\"",
            "playlistadd \"Road Trip\" c.flac",
        ]
    );
}

#[test]
fn test_typed_records_stop_at_other_entities() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(
                1,
                "file: a.flac\n\
                 Last-Modified: 2020-06-01T00:00:00Z\n\
                 directory: Queen\n\
                 Last-Modified: 2024-06-01T00:00:00Z\n\
                 file: Queen/b.flac\n\
                 Title: B\n\
                 playlist: Queen/best.m3u\n\
                 Last-Modified: 2023-06-01T00:00:00Z\n\
                 OK\n",
            ),
            Step::Reply(
                1,
                "playlist: a.m3u\n\
                 Last-Modified: 2020-06-01T00:00:00Z\n\
                 file: x.flac\n\
                 Last-Modified: 2024-06-01T00:00:00Z\n\
                 playlist: b.m3u\n\
                 OK\n",
            ),
        ],
    );
    let mut mpd = daemon.connect();

    mpd.send_list_all_meta(None).unwrap();
    let first = mpd.recv_song().unwrap().unwrap();
    assert_eq!(first.uri, "a.flac");
    assert_eq!(first.last_modified.unwrap().year(), 2020);
    let second = mpd.recv_song().unwrap().unwrap();
    assert_eq!(second.uri, "Queen/b.flac");
    assert_eq!(second.tag(TagType::Title, 0), Some("B"));
    assert!(second.last_modified.is_none());
    assert!(mpd.recv_song().unwrap().is_none());

    mpd.send_list_meta(None).unwrap();
    let first = mpd.recv_playlist().unwrap().unwrap();
    assert_eq!(first.path, "a.m3u");
    assert_eq!(first.last_modified.unwrap().year(), 2020);
    let second = mpd.recv_playlist().unwrap().unwrap();
    assert_eq!(second.path, "b.m3u");
    assert!(second.last_modified.is_none());
    assert!(mpd.recv_playlist().unwrap().is_none());

    mpd.close();
    assert_eq!(daemon.received(), ["listallinfo", "lsinfo"]);
}

#[test]
fn test_reflection() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(1, "command: add\ncommand: play\nOK\n"),
            Step::Reply(1, "tagtype: Artist\ntagtype: X-Custom\ntagtype: Title\nOK\n"),
            Step::Reply(1, "handler: http://\nhandler: nfs://\nOK\n"),
        ],
    );
    let mut mpd = daemon.connect();

    mpd.send_allowed_commands().unwrap();
    assert_eq!(mpd.recv_command_pair().unwrap().as_deref(), Some("add"));
    assert_eq!(mpd.recv_command_pair().unwrap().as_deref(), Some("play"));
    assert_eq!(mpd.recv_command_pair().unwrap(), None);

    assert_eq!(
        mpd.run_tag_types().unwrap(),
        [TagType::Artist, TagType::Title]
    );

    mpd.send_list_url_schemes().unwrap();
    let mut schemes = Vec::new();
    while let Some(scheme) = mpd.recv_url_scheme_pair().unwrap() {
        schemes.push(scheme);
    }
    assert_eq!(schemes, ["http://", "nfs://"]);

    mpd.close();
    assert_eq!(daemon.received(), ["commands", "tagtypes", "urlhandlers"]);
}

#[test]
fn test_stats_and_current_song() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(
                1,
                "uptime: 3600\nplaytime: 1200\nartists: 42\nalbums: 7\nsongs: 300\n\
                 db_playtime: 72000\ndb_update: 1706702400\nOK\n",
            ),
            Step::Reply(1, "OK\n"),
            Step::Reply(1, "file: x.flac\nPos: 3\nId: 17\nOK\n"),
        ],
    );
    let mut mpd = daemon.connect();

    let stats = mpd.run_stats().unwrap();
    assert_eq!(stats.songs, 300);
    assert_eq!(stats.db_update.unwrap().unix_timestamp(), 1_706_702_400);

    // Stopped: no current song.
    assert!(mpd.run_current_song().unwrap().is_none());

    let song = mpd.run_get_queue_song_id(17).unwrap().unwrap();
    assert_eq!(song.pos, Some(3));

    mpd.close();
    assert_eq!(daemon.received(), ["stats", "currentsong", "playlistid 17"]);
}

#[test]
fn test_bad_value_for_known_key() {
    let daemon = StubDaemon::start(GREETING, vec![Step::Reply(1, "file: x.flac\nPos: third\nOK\n")]);
    let mut mpd = daemon.connect();

    mpd.send_list_queue_meta().unwrap();
    let err = mpd.recv_song().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Malformed);
    assert!(mpd.is_closed());

    drop(mpd);
    assert_eq!(daemon.received(), ["playlistinfo"]);
}
