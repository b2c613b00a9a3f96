// crates/core/src/reader.rs
//! Bounded line splitting over any `BufRead`.

use std::io::{self, BufRead};

/// Why a line could not be produced.
#[derive(Debug)]
pub(crate) enum LineError {
    TooLong,
    Io(io::Error),
}

/// Read the next line into `buf`, without its `\n` or `\r\n` terminator.
///
/// Returns `Ok(false)` at end of stream. A final segment without a trailing
/// newline still counts as a line, so an empty stream has no lines and
/// `"a\n"` has exactly one. `buf` never grows past `limit + 1` bytes.
pub(crate) fn read_line<R: BufRead + ?Sized>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> Result<bool, LineError> {
    buf.clear();
    let mut consumed_any = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(LineError::Io(e)),
        };
        if available.is_empty() {
            if !consumed_any {
                return Ok(false);
            }
            break;
        }
        consumed_any = true;

        // One spare byte leaves room for a '\r' that gets dropped below.
        match memchr::memchr(b'\n', available) {
            Some(newline) => {
                if buf.len() + newline > limit.saturating_add(1) {
                    return Err(LineError::TooLong);
                }
                buf.extend_from_slice(&available[..newline]);
                reader.consume(newline + 1);
                break;
            }
            None => {
                let len = available.len();
                if buf.len() + len > limit.saturating_add(1) {
                    return Err(LineError::TooLong);
                }
                buf.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }

    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if buf.len() > limit {
        return Err(LineError::TooLong);
    }
    Ok(true)
}
