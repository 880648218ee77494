use std::future::Future;
use std::pin::Pin;

use tokio::task::JoinHandle;
use tracing::{Instrument, info, info_span};

type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Collects named background jobs and spawns them together at startup.
pub struct TaskRunner {
    tasks: Vec<(&'static str, BoxedTask)>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push((name, Box::pin(task)));
    }

    pub fn start_all(self) -> Vec<JoinHandle<()>> {
        self.tasks
            .into_iter()
            .map(|(name, task)| {
                info!(task = name, "starting background task");
                tokio::spawn(task.instrument(info_span!("task", name)))
            })
            .collect()
    }
}
