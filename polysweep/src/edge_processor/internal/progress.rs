/// Percentage progress of a sweep, reported through `log` in steps of ten percent.
#[derive(Debug, Clone)]
pub struct Progress {
    description: String,
    total: usize,
    next_report: usize,
}

impl Progress {
    pub fn new(description: &str, total: usize) -> Self {
        Self {
            description: description.to_string(),
            total,
            next_report: 10,
        }
    }

    pub fn set(&mut self, done: usize) {
        if self.total == 0 {
            return;
        }
        let percent = done.min(self.total) * 100 / self.total;
        if percent >= self.next_report {
            log::info!("{}: {}%", self.description, percent);
            self.next_report = percent - percent % 10 + 10;
        }
    }
}
