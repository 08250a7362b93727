/// Events emitted while an analysis runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback; without one every
/// call is a no-op.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn phase_start(&self, name: &'static str) {
        self.report(Progress::PhaseStart { name });
    }

    pub fn phase_finish(&self) {
        self.report(Progress::PhaseFinish);
    }

    pub fn task_start(&self, total_steps: usize) {
        self.report(Progress::TaskStart {
            total_steps: total_steps as u64,
        });
    }

    pub fn task_increment(&self) {
        self.report(Progress::TaskIncrement);
    }

    pub fn task_finish(&self) {
        self.report(Progress::TaskFinish);
    }

    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}
