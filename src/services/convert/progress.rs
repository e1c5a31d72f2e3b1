/// Receives conversion progress. The converter never prints on its own.
pub trait Progress {
    /// One tick per top-level export, `current` counting from zero.
    fn tick(&mut self, label: &str, current: usize, total: usize);

    fn info(&mut self, line: &str);
}

/// Forwards progress to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn tick(&mut self, label: &str, current: usize, total: usize) {
        log::debug!("{} [{}/{}]", label, current + 1, total);
    }

    fn info(&mut self, line: &str) {
        log::info!("{}", line);
    }
}
