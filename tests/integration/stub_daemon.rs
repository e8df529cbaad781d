//! A scripted stand-in for the daemon.
//!
//! The stub greets the client, then works through its script: each step
//! reads a number of request lines and answers with canned bytes. Once the
//! script is done it keeps recording requests until the client disconnects,
//! unless the script ends with [`Step::HangUp`].

use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
    time::Duration,
};

#[cfg(unix)]
use std::{os::unix::net::UnixListener, path::PathBuf};

use mpdclient::Connection;

/// Greeting of a daemon speaking protocol 0.21.0.
pub const GREETING: &str = "OK MPD 0.21.0\n";

pub enum Step {
    /// Reads this many request lines, then writes the reply.
    Reply(usize, &'static str),
    /// Waits before the next step.
    Pause(Duration),
    /// Closes the socket.
    HangUp,
}

pub struct StubDaemon {
    host: String,
    port: u16,
    handle: JoinHandle<Vec<String>>,
}

const READ_TIMEOUT: Duration = Duration::from_secs(10);

impl StubDaemon {
    pub fn start(greeting: &'static str, script: Vec<Step>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            stream.set_read_timeout(Some(READ_TIMEOUT)).unwrap();
            let reader = stream.try_clone().unwrap();
            Self::serve(reader, stream, greeting, script)
        });

        Self {
            host: "127.0.0.1".to_owned(),
            port,
            handle,
        }
    }

    /// Like [`Self::start`], but listens on a Unix domain socket at `path`.
    #[cfg(unix)]
    pub fn start_unix(path: PathBuf, greeting: &'static str, script: Vec<Step>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let _ = std::fs::remove_file(&path);
        let listener = UnixListener::bind(&path).unwrap();
        let host = path.to_str().unwrap().to_owned();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            stream.set_read_timeout(Some(READ_TIMEOUT)).unwrap();
            let reader = stream.try_clone().unwrap();
            let received = Self::serve(reader, stream, greeting, script);
            let _ = std::fs::remove_file(&path);
            received
        });

        Self {
            host,
            port: 0,
            handle,
        }
    }

    fn serve<R: Read, W: Write>(
        reader: R,
        mut stream: W,
        greeting: &str,
        script: Vec<Step>,
    ) -> Vec<String> {
        let mut reader = BufReader::new(reader);
        let mut received = Vec::new();

        let mut read_line = |received: &mut Vec<String>| {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => false,
                Ok(_) => {
                    received.push(line.trim_end_matches('\n').to_owned());
                    true
                }
            }
        };

        stream.write_all(greeting.as_bytes()).unwrap();

        for step in script {
            match step {
                Step::Reply(lines, reply) => {
                    for _ in 0..lines {
                        if !read_line(&mut received) {
                            return received;
                        }
                    }
                    stream.write_all(reply.as_bytes()).unwrap();
                }
                Step::Pause(duration) => thread::sleep(duration),
                Step::HangUp => return received,
            }
        }

        while read_line(&mut received) {}
        received
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn connect(&self) -> Connection {
        Connection::connect(&self.host, self.port, Duration::from_secs(5)).unwrap()
    }

    /// Waits for the client to disconnect and returns the request lines it
    /// sent.
    pub fn received(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}
