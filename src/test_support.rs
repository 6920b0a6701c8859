//! Sources and a log capture shared by the unit tests.

#![expect(clippy::indexing_slicing, reason = "Okay in tests")]

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::read::Source;
use crate::{Error, Result};

/// Hands out at most one byte per pull, so every read spans many refills.
pub struct Trickle<'a> {
    pub data: &'a [u8],
}

impl Source for Trickle<'_> {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        match (self.data.split_first(), buf.first_mut()) {
            (Some((&byte, rest)), Some(slot)) => {
                *slot = byte;
                self.data = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// Never runs out of zero bytes.
pub struct Zeros;

impl Source for Zeros {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        buf.fill(0);
        Ok(buf.len())
    }
}

/// Yields `data`, then fails every pull with the error built by `fail`.
pub struct Failing<'a> {
    pub data: &'a [u8],
    pub fail: fn() -> Error,
}

impl Source for Failing<'_> {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.data.is_empty() {
            return Err((self.fail)());
        }

        let n = self.data.len().min(buf.len());
        let (head, rest) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = rest;
        Ok(n)
    }
}

thread_local! {
    static WARNINGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;
static INIT: Once = Once::new();

/// Runs `f` and returns its result with every warning it logged on this thread.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Warn);
        }
    });

    WARNINGS.with(|w| w.borrow_mut().clear());
    let out = f();
    let warnings = WARNINGS.with(|w| w.borrow_mut().drain(..).collect());

    (out, warnings)
}
