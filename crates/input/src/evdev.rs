//! Linux input event device source (`/dev/input/eventN`).
//!
//! The kernel delivers fixed-size `struct input_event` records:
//!
//! ```text
//! struct timeval time;
//! __u16 type;
//! __u16 code;
//! __s32 value;
//! ```
//!
//! The device is opened non-blocking and polled, so a listener never sits in
//! a read the cancel token cannot interrupt.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::mem;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::InputError;
use crate::source::{AxisEvent, InputSource};

const TIMEVAL_LEN: usize = mem::size_of::<libc::timeval>();
pub const EVENT_LEN: usize = mem::size_of::<libc::input_event>();
const IDLE_POLL: Duration = Duration::from_millis(4);

/// Event type codes from `linux/input-event-codes.h` (not exported by `libc`).
#[allow(dead_code)]
mod ev {
    pub const EV_SYN: u16 = 0x00;
    pub const EV_KEY: u16 = 0x01;
    pub const EV_ABS: u16 = 0x03;
}

pub struct EvdevSource {
    file: File,
    path: PathBuf,
    buf: [u8; EVENT_LEN],
}

impl EvdevSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&path)
            .map_err(|source| InputError::SourceUnavailable {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            file,
            path,
            buf: [0; EVENT_LEN],
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decode one raw record into an absolute-axis sample.
///
/// Returns `None` for any other event type (sync, key, relative, ...).
pub fn decode_abs_event(record: &[u8]) -> Option<AxisEvent> {
    if record.len() < EVENT_LEN {
        return None;
    }
    let field = &record[TIMEVAL_LEN..TIMEVAL_LEN + 8];
    let ty = u16::from_ne_bytes([field[0], field[1]]);
    if ty != ev::EV_ABS {
        return None;
    }
    let code = u16::from_ne_bytes([field[2], field[3]]);
    let value = i32::from_ne_bytes([field[4], field[5], field[6], field[7]]);
    Some(AxisEvent::new(code, value))
}

impl InputSource for EvdevSource {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<AxisEvent>, InputError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.file.read(&mut self.buf) {
                Ok(0) => return Err(InputError::Disconnected),
                Ok(n) if n == EVENT_LEN => {
                    if let Some(ev) = decode_abs_event(&self.buf) {
                        return Ok(Some(ev));
                    }
                }
                Ok(n) => {
                    return Err(InputError::Read(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("short input_event read: {n} bytes"),
                    )))
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(None);
                    }
                    thread::sleep(IDLE_POLL.min(deadline - now));
                }
                Err(e) => return Err(InputError::Read(e)),
            }
        }
    }
}
