//! Mock writer standing in for a file that refuses writes.
use mockall::mock;

use std::io::{self, Write};

mock! {
    pub Sink {}
    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
}

/// A sink whose every write fails with `PermissionDenied`.
pub fn refusing_sink() -> MockSink {
    let mut sink = MockSink::default();
    sink.expect_write()
        .returning(|_buf| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
    sink.expect_flush().returning(|| Ok(()));
    sink
}
