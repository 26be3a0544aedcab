use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

use crate::size::{GB, KB, MB};

/// Throughput in bytes per second. Displayed as bytes, KB, MB or GB per second, units are powers of 1024.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ByteRate(pub(crate) f64);

impl ByteRate {
    pub(crate) fn new(bytes: u64, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        if secs == 0.0 {
            return ByteRate(0.0);
        }
        ByteRate(bytes as f64 / secs)
    }
}

impl Display for ByteRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rate = self.0;
        if rate < KB as f64 {
            write!(f, "{:.2} bytes/sec", rate)
        } else if rate < MB as f64 {
            write!(f, "{:.2} KB/sec", rate / KB as f64)
        } else if rate < GB as f64 {
            write!(f, "{:.2} MB/sec", rate / MB as f64)
        } else {
            write!(f, "{:.2} GB/sec", rate / GB as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(ByteRate(0.0).to_string(), "0.00 bytes/sec");
        assert_eq!(ByteRate(1023.99).to_string(), "1023.99 bytes/sec");
        assert_eq!(ByteRate(1024.0).to_string(), "1.00 KB/sec");
        assert_eq!(ByteRate(1_048_575.0).to_string(), "1024.00 KB/sec");
        assert_eq!(ByteRate(1_048_576.0).to_string(), "1.00 MB/sec");
        assert_eq!(ByteRate(1_073_741_824.0).to_string(), "1.00 GB/sec");
        assert_eq!(ByteRate(5.0 * 1_073_741_824.0 * 1024.0).to_string(), "5120.00 GB/sec");
    }

    #[test]
    fn test_from_elapsed() {
        assert_eq!(ByteRate::new(10240, Duration::from_secs(2)), ByteRate(5120.0));
        assert_eq!(ByteRate::new(3 * MB, Duration::from_millis(500)).to_string(), "6.00 MB/sec");
        assert_eq!(ByteRate::new(0, Duration::from_nanos(1)), ByteRate(0.0));
        assert_eq!(ByteRate::new(4096, Duration::ZERO), ByteRate(0.0));
    }
}
