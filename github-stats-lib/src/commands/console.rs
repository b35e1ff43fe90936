use std::io::Write;

/// Where command output goes; abstracted so commands can be exercised in tests.
pub trait Console: Send + Sync {
    /// Collected metrics and command results (e.g., stdout)
    fn output(&mut self) -> impl Write;

    /// Per-repository errors and diagnostics (e.g., stderr)
    fn error(&mut self) -> impl Write;
}

/// Console that captures both streams in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestConsole {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
}

#[cfg(test)]
impl TestConsole {
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Console for TestConsole {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }
}
