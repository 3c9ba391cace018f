use std::ffi::OsString;
use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How a blocking wait on the coordinator ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Done,
    /// A child exited with this non-zero status.
    Failed(i32),
    Interrupted,
}

struct Completion {
    function: String,
    status: i32,
}

/// ## Concurrency coordinator
///
/// Every `async` call is a child process running the same program with a
/// target function. The coordinator counts outstanding children and learns
/// about their exit over a channel. Output is relayed by helper threads.
pub struct Coordinator {
    interpreter: PathBuf,
    args: Vec<OsString>,
    outstanding: usize,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Coordinator {
    /// Children run as `interpreter args... function`.
    pub fn new(interpreter: PathBuf, args: Vec<OsString>) -> Coordinator {
        let (sender, receiver) = channel();
        Coordinator {
            interpreter,
            args,
            outstanding: 0,
            sender,
            receiver,
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn spawn(&mut self, function: &str) -> io::Result<()> {
        let mut child = Command::new(&self.interpreter)
            .args(&self.args)
            .arg(function)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        debug!(function, pid = child.id(), "async call started");
        let mut relays = vec![];
        if let Some(stdout) = child.stdout.take() {
            relays.push(relay(stdout, io::stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            relays.push(relay(stderr, io::stderr));
        }
        let sender = self.sender.clone();
        let function = function.to_string();
        thread::spawn(move || {
            let status = match child.wait() {
                Ok(status) => status.code().unwrap_or(1),
                Err(error) => {
                    warn!(%error, function = %function, "could not wait for async call");
                    1
                }
            };
            for relay in relays {
                let _ = relay.join();
            }
            let _ = sender.send(Completion { function, status });
        });
        self.outstanding += 1;
        Ok(())
    }

    /// Collect finished children without blocking. Returns the status of
    /// the first child that failed.
    pub fn reap(&mut self) -> Option<i32> {
        while let Ok(completion) = self.receiver.try_recv() {
            if let Some(status) = self.complete(completion) {
                return Some(status);
            }
        }
        None
    }

    /// `sleep` while still watching children.
    pub fn sleep(&mut self, duration: Duration, interrupted: &AtomicBool) -> Wait {
        let deadline = Instant::now().checked_add(duration);
        loop {
            if let Some(status) = self.reap() {
                return Wait::Failed(status);
            }
            if interrupted.load(Ordering::SeqCst) {
                return Wait::Interrupted;
            }
            let timeout = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Wait::Done;
                    }
                    POLL_INTERVAL.min(deadline - now)
                }
                None => POLL_INTERVAL,
            };
            if let Some(status) = self.poll(timeout) {
                return Wait::Failed(status);
            }
        }
    }

    /// Block until every outstanding child has exited.
    pub fn drain(&mut self, interrupted: &AtomicBool) -> Wait {
        while self.outstanding > 0 {
            if let Some(status) = self.reap() {
                return Wait::Failed(status);
            }
            if interrupted.load(Ordering::SeqCst) {
                return Wait::Interrupted;
            }
            if let Some(status) = self.poll(POLL_INTERVAL) {
                return Wait::Failed(status);
            }
        }
        Wait::Done
    }

    fn poll(&mut self, timeout: Duration) -> Option<i32> {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => self.complete(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn complete(&mut self, completion: Completion) -> Option<i32> {
        self.outstanding = self.outstanding.saturating_sub(1);
        debug!(
            function = %completion.function,
            status = completion.status,
            outstanding = self.outstanding,
            "async call finished"
        );
        match completion.status {
            0 => None,
            status => Some(status),
        }
    }
}

fn relay<R, W>(mut from: R, to: fn() -> W) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
    W: Write + 'static,
{
    thread::spawn(move || {
        let mut buf = [0; 4096];
        loop {
            match from.read(&mut buf) {
                Ok(0) => break,
                Ok(len) => {
                    let mut out = to();
                    if out.write_all(&buf[..len]).and_then(|_| out.flush()).is_err() {
                        break;
                    }
                }
                Err(ref error) if error.kind() == ErrorKind::Interrupted => {}
                Err(_) => break,
            }
        }
    })
}
