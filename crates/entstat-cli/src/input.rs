//! Input side: open the byte source and pump it through the engine.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use entstat_core::StatsEngine;

/// Default read buffer size.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Open `path` for reading, or stdin when it is absent or `-`.
pub fn open(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = File::open(p)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", p.display())))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Feed `reader` to `engine` in chunks of at most `chunk_size` bytes until
/// EOF. Returns the number of bytes read.
pub fn pump<R: Read + ?Sized>(
    reader: &mut R,
    engine: &mut StatsEngine,
    chunk_size: usize,
) -> io::Result<u64> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        engine.ingest(&buf[..n]);
        total += n as u64;
    }
    log::debug!("read {total} bytes in chunks of {chunk_size}");
    Ok(total)
}
