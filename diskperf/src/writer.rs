use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use tracing::debug;

// size of the zeroed chunk offered to the buffered writer on every iteration.
// buffered writer capacity matches it, so full chunks bypass the intermediate copy.
pub(crate) const CHUNK_SIZE: usize = 4096;

#[derive(thiserror::Error, Debug)]
pub(crate) enum WriteError {
    #[error("write failed after {written} bytes")]
    Write { written: u64, source: io::Error },
    #[error("flush failed after {written} bytes")]
    Flush { written: u64, source: io::Error },
    #[error("sync failed after {written} bytes")]
    Sync { written: u64, source: io::Error },
}

impl WriteError {
    pub(crate) fn written(&self) -> u64 {
        match self {
            WriteError::Write { written, .. } | WriteError::Flush { written, .. } | WriteError::Sync { written, .. } => {
                *written
            }
        }
    }
}

// write_zeros writes exactly count zero bytes into dst through a buffered writer
// and flushes it before returning. every write error is fatal, nothing is retried:
// on error the buffered tail is discarded instead of being flushed on drop.
pub(crate) fn write_zeros<W: Write>(dst: W, count: u64) -> Result<u64, WriteError> {
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, dst);
    let written = match fill(&mut writer, count) {
        Ok(written) => written,
        Err(err) => {
            let _ = writer.into_parts();
            return Err(err);
        }
    };
    if let Err(source) = writer.flush() {
        let _ = writer.into_parts();
        return Err(WriteError::Flush { written, source });
    }
    debug!("flushed {} bytes", written);
    Ok(written)
}

fn fill<W: Write>(writer: &mut BufWriter<W>, count: u64) -> Result<u64, WriteError> {
    let chunk = [0u8; CHUNK_SIZE];
    let mut written: u64 = 0;
    while written < count {
        let size = (count - written).min(CHUNK_SIZE as u64) as usize;
        match writer.write(&chunk[..size]) {
            Ok(0) => {
                return Err(WriteError::Write {
                    written,
                    source: io::Error::new(io::ErrorKind::WriteZero, "failed to write whole buffer"),
                })
            }
            Ok(n) => written += n as u64,
            Err(source) => return Err(WriteError::Write { written, source }),
        }
    }
    Ok(written)
}

// write_file is write_zeros followed by an optional fsync of the file.
pub(crate) fn write_file(file: &mut File, count: u64, fsync: bool) -> Result<u64, WriteError> {
    let written = write_zeros(&mut *file, count)?;
    if fsync {
        file.sync_all().map_err(|source| WriteError::Sync { written, source })?;
        debug!("synced {} bytes", written);
    }
    Ok(written)
}
