//! Integration tests for command lists
//! Tests: discrete and plain lists, member boundaries, errors inside lists, misuse

use mpdclient::{protocol::Command, ErrorKind};

use super::stub_daemon::{Step, StubDaemon, GREETING};

#[test]
fn test_discrete_list_ends_cleanly() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(4, "list_OK\nlist_OK\nOK\n"),
            Step::Reply(1, "volume: 5\nOK\n"),
        ],
    );
    let mut mpd = daemon.connect();

    mpd.command_list_begin(true).unwrap();
    mpd.send_add("x.mp3").unwrap();
    mpd.send_add("x.mp3").unwrap();
    mpd.command_list_end().unwrap();

    mpd.response_next().unwrap();
    mpd.response_next().unwrap();

    // Nothing of the list is left over for the next command.
    assert_eq!(mpd.run_status().unwrap().volume, Some(5));

    mpd.close();
    assert_eq!(
        daemon.received(),
        [
            "command_list_ok_begin",
            "add x.mp3",
            "add x.mp3",
            "command_list_end",
            "status",
        ]
    );
}

#[test]
fn test_discrete_list_members_are_separate() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(
                4,
                "volume: 30\nstate: pause\nlist_OK\nfile: a.flac\nTitle: A\nlist_OK\nOK\n",
            ),
            Step::Reply(1, "OK\n"),
        ],
    );
    let mut mpd = daemon.connect();

    mpd.command_list_begin(true).unwrap();
    mpd.send_status().unwrap();
    mpd.send_current_song().unwrap();
    mpd.command_list_end().unwrap();

    let status = mpd.recv_status().unwrap();
    assert_eq!(status.volume, Some(30));
    assert!(status.error.is_none());
    mpd.response_next().unwrap();

    let song = mpd.recv_song().unwrap().unwrap();
    assert_eq!(song.uri, "a.flac");
    assert!(mpd.recv_song().unwrap().is_none());
    mpd.response_finish().unwrap();

    mpd.run_stop().unwrap();

    mpd.close();
    assert_eq!(
        daemon.received(),
        [
            "command_list_ok_begin",
            "status",
            "currentsong",
            "command_list_end",
            "stop",
        ]
    );
}

#[test]
fn test_plain_list_has_one_response() {
    let daemon = StubDaemon::start(GREETING, vec![Step::Reply(5, "OK\n")]);
    let mut mpd = daemon.connect();

    mpd.command_list_begin(false).unwrap();
    mpd.send_clear().unwrap();
    mpd.send_add("Queen/Innuendo").unwrap();
    mpd.send_play().unwrap();
    mpd.command_list_end().unwrap();
    mpd.response_finish().unwrap();

    mpd.close();
    assert_eq!(
        daemon.received(),
        [
            "command_list_begin",
            "clear",
            "add Queen/Innuendo",
            "play",
            "command_list_end",
        ]
    );
}

#[test]
fn test_failing_member_reports_its_index() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![Step::Reply(4, "list_OK\nACK [50@1] {play} song doesn't exist\n")],
    );
    let mut mpd = daemon.connect();

    mpd.command_list_begin(true).unwrap();
    mpd.send_add("a.flac").unwrap();
    mpd.send_play_pos(7).unwrap();
    mpd.command_list_end().unwrap();

    let err = mpd.response_finish().unwrap_err();
    assert_eq!(err.kind, ErrorKind::ServerAck);
    assert_eq!(mpd.server_error_location(), Some(1));
    assert_eq!(err.ack().unwrap().command, "play");

    assert!(mpd.clear_error());

    mpd.close();
    assert_eq!(
        daemon.received(),
        ["command_list_ok_begin", "add a.flac", "play 7", "command_list_end"]
    );
}

#[test]
fn test_empty_list_is_rejected() {
    let daemon = StubDaemon::start(GREETING, vec![Step::Reply(1, "state: stop\nOK\n")]);
    let mut mpd = daemon.connect();

    mpd.command_list_begin(true).unwrap();
    let err = mpd.command_list_end().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Argument);
    assert!(mpd.error().is_none());

    // The empty list was dropped, so plain commands work again.
    mpd.run_status().unwrap();

    mpd.close();
    assert_eq!(daemon.received(), ["status"]);
}

#[test]
fn test_misuse_inside_list() {
    let daemon = StubDaemon::start(GREETING, vec![Step::Reply(3, "OK\n")]);
    let mut mpd = daemon.connect();

    assert_eq!(mpd.command_list_end().unwrap_err().kind, ErrorKind::State);

    mpd.command_list_begin(false).unwrap();
    assert_eq!(
        mpd.command_list_begin(true).unwrap_err().kind,
        ErrorKind::State
    );
    assert_eq!(mpd.run_status().unwrap_err().kind, ErrorKind::State);
    assert_eq!(mpd.recv_pair().unwrap_err().kind, ErrorKind::State);
    assert_eq!(mpd.response_finish().unwrap_err().kind, ErrorKind::State);
    assert_eq!(mpd.send_idle().unwrap_err().kind, ErrorKind::State);
    assert_eq!(
        mpd.send_command(Command::new("")).unwrap_err().kind,
        ErrorKind::Argument
    );

    mpd.send_next().unwrap();
    mpd.command_list_end().unwrap();
    mpd.response_finish().unwrap();

    mpd.close();
    assert_eq!(
        daemon.received(),
        ["command_list_begin", "next", "command_list_end"]
    );
}
