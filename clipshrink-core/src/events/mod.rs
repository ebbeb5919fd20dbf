//! Pipeline events and their fan-out.
//!
//! The orchestrator reports progress by emitting `Event`s to an
//! `EventDispatcher`. Front ends register `EventHandler`s to render them; the
//! core never writes to the terminal itself.

use std::path::PathBuf;
use std::sync::Arc;

use crate::processing::probe::FrameRate;
use crate::processing::transcode::TranscodeStatus;
use crate::reporting::{CompressionReport, FileFailure, RunSummary};
use crate::staging::StagingConflict;

pub mod json_handler;

pub use json_handler::JsonProgressHandler;

/// Orchestrator states. A run moves strictly forward through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    ValidatingRoot,
    Discovering,
    Processing { index: usize, total: usize },
    Done,
}

impl RunPhase {
    pub fn label(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::ValidatingRoot => "validating_root",
            RunPhase::Discovering => "discovering",
            RunPhase::Processing { .. } => "processing",
            RunPhase::Done => "done",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    PhaseChanged {
        phase: RunPhase,
    },

    // Discovery and planning
    DiscoveryComplete {
        root: PathBuf,
        total_files: usize,
    },
    StagingSkipped {
        conflict: StagingConflict,
    },
    NothingToProcess {
        root: PathBuf,
    },

    // Per-file progress
    FileStarted {
        index: usize,
        total: usize,
        source: PathBuf,
    },
    FileStaged {
        staged_path: PathBuf,
    },
    FrameRateProbed {
        path: PathBuf,
        frame_rate: Option<FrameRate>,
    },
    TranscodeStarted {
        input: PathBuf,
        output: PathBuf,
    },
    FileCompleted {
        report: CompressionReport,
        status: TranscodeStatus,
    },
    FileFailed {
        failure: FileFailure,
    },

    RunComplete {
        summary: RunSummary,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl EventHandler for Recorder {
        fn handle(&self, event: &Event) {
            if let Event::PhaseChanged { phase } = event {
                self.0.lock().unwrap().push(phase.label().to_string());
            }
        }
    }

    #[test]
    fn dispatcher_fans_out_to_every_handler() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(first.clone());
        dispatcher.add_handler(second.clone());

        dispatcher.emit(Event::PhaseChanged {
            phase: RunPhase::Discovering,
        });

        assert_eq!(*first.0.lock().unwrap(), vec!["discovering"]);
        assert_eq!(*second.0.lock().unwrap(), vec!["discovering"]);
    }
}
