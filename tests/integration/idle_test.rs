//! Integration tests for idle mode
//! Tests: IDLE with and without mask, NOIDLE, timeouts, misuse while idle

use std::time::Duration;

use mpdclient::{protocol::IdleEvents, ErrorKind};

use super::stub_daemon::{Step, StubDaemon, GREETING};

#[test]
fn test_idle_reports_changes() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![Step::Reply(
            1,
            "changed: player\nchanged: mixer\nchanged: neighbor\nOK\n",
        )],
    );
    let mut mpd = daemon.connect();

    let events = mpd.run_idle().unwrap();
    assert_eq!(events, IdleEvents::PLAYER | IdleEvents::MIXER);

    mpd.close();
    assert_eq!(daemon.received(), ["idle"]);
}

#[test]
fn test_idle_times_out_unless_disabled() {
    let daemon = StubDaemon::start(GREETING, vec![Step::Reply(1, "")]);
    let mut mpd = daemon.connect();
    mpd.set_timeout(Duration::from_millis(100)).unwrap();

    mpd.send_idle_mask(IdleEvents::DATABASE).unwrap();
    let err = mpd.recv_idle(false).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
    assert!(mpd.is_closed());

    assert_eq!(daemon.received(), ["idle database"]);
}

#[test]
fn test_idle_without_timeout_restores_it() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![
            Step::Reply(1, ""),
            Step::Pause(Duration::from_millis(400)),
            Step::Reply(0, "changed: update\nOK\n"),
            Step::Reply(1, ""),
        ],
    );
    let mut mpd = daemon.connect();
    mpd.set_timeout(Duration::from_millis(100)).unwrap();

    mpd.send_idle().unwrap();
    assert_eq!(mpd.recv_idle(true).unwrap(), IdleEvents::UPDATE);
    assert_eq!(mpd.timeout(), Duration::from_millis(100));

    let err = mpd.run_status().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);

    assert_eq!(daemon.received(), ["idle", "status"]);
}

#[test]
fn test_pairs_are_not_read_while_idle() {
    let daemon = StubDaemon::start(GREETING, vec![Step::Reply(1, "changed: player\nOK\n")]);
    let mut mpd = daemon.connect();

    mpd.send_idle().unwrap();
    assert_eq!(mpd.recv_status().unwrap_err().kind, ErrorKind::State);
    assert_eq!(mpd.recv_pair().unwrap_err().kind, ErrorKind::State);
    assert_eq!(mpd.response_next().unwrap_err().kind, ErrorKind::State);
    assert!(mpd.error().is_none());

    assert_eq!(mpd.recv_idle(false).unwrap(), IdleEvents::PLAYER);

    mpd.close();
    assert_eq!(daemon.received(), ["idle"]);
}

#[test]
fn test_noidle() {
    let daemon = StubDaemon::start(
        GREETING,
        vec![Step::Reply(1, ""), Step::Reply(1, "changed: playlist\nOK\n")],
    );
    let mut mpd = daemon.connect();

    mpd.send_idle_mask(IdleEvents::PLAYLIST | IdleEvents::PLAYER).unwrap();

    assert_eq!(mpd.send_status().unwrap_err().kind, ErrorKind::State);
    assert_eq!(
        mpd.command_list_begin(false).unwrap_err().kind,
        ErrorKind::State
    );
    assert_eq!(mpd.response_finish().unwrap_err().kind, ErrorKind::State);

    assert_eq!(mpd.run_noidle().unwrap(), IdleEvents::PLAYLIST);
    assert_eq!(mpd.send_noidle().unwrap_err().kind, ErrorKind::State);
    assert_eq!(mpd.recv_idle(false).unwrap_err().kind, ErrorKind::State);

    mpd.close();
    assert_eq!(daemon.received(), ["idle playlist player", "noidle"]);
}

#[test]
fn test_empty_mask_is_rejected() {
    let daemon = StubDaemon::start(GREETING, vec![]);
    let mut mpd = daemon.connect();

    assert_eq!(
        mpd.send_idle_mask(IdleEvents::empty()).unwrap_err().kind,
        ErrorKind::Argument
    );

    mpd.close();
    assert!(daemon.received().is_empty());
}
