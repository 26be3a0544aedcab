use std::path::PathBuf;

use anyhow::Result;

use crate::{size::parse_bytes, Opt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    // number of bytes to write
    pub bytes: u64,
    // destination file. temporary file is used when it is none
    pub target: Option<PathBuf>,
    // sync file to the device before timer is stopped
    pub fsync: bool,
}

impl TryFrom<Opt> for Config {
    type Error = anyhow::Error;

    fn try_from(opt: Opt) -> Result<Self> {
        let bytes = parse_bytes(&opt.bytes)?;
        let target = if opt.file.is_empty() {
            None
        } else {
            Some(PathBuf::from(opt.file))
        };
        Ok(Config {
            bytes,
            target,
            fsync: opt.fsync,
        })
    }
}
