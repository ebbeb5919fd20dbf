// clipshrink-core/tests/common/mod.rs
//
// Test doubles for the external tool boundaries. The encoder double writes a
// real output file so the rest of the pipeline sees the filesystem state it
// would see after a real encode.

#![allow(dead_code)]

use clipshrink_core::error::{CoreError, CoreResult};
use clipshrink_core::events::{Event, EventHandler, RunPhase};
use clipshrink_core::external::{EncoderSpawner, ProbeExecutor};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;
use std::sync::Mutex;

// Helper to create a dummy file of `size` bytes
pub fn create_dummy_file(dir: &Path, filename: &str, size: usize) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create parent dir");
    let file_path = dir.join(filename);
    let mut file = File::create(&file_path).expect("Failed to create dummy file");
    file.write_all(&vec![b'x'; size])
        .expect("Failed to write dummy content");
    file_path
}

pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

/// Frame rate prober answering from a fixed response.
#[derive(Clone, Default)]
pub struct MockProbeExecutor {
    response: Option<String>,
    received_calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockProbeExecutor {
    pub fn returning(raw: &str) -> Self {
        Self {
            response: Some(raw.to_string()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn get_received_calls(&self) -> Vec<PathBuf> {
        self.received_calls.borrow().clone()
    }
}

impl ProbeExecutor for MockProbeExecutor {
    fn query_frame_rate(&self, input_path: &Path) -> CoreResult<String> {
        self.received_calls.borrow_mut().push(input_path.to_path_buf());
        match &self.response {
            Some(raw) => Ok(raw.clone()),
            None => Err(CoreError::OperationFailed("mock ffprobe failure".to_string())),
        }
    }
}

/// What the encoder double does for one input.
#[derive(Clone, Debug)]
pub enum EncodeBehavior {
    /// Write `bytes` bytes to the output, then exit with `exit_code`
    Output { bytes: usize, exit_code: i32 },
    /// Write nothing, then exit with `exit_code`
    NoOutput { exit_code: i32 },
    /// Fail to start at all
    StartFailure,
}

/// Encoder double. Behavior is chosen by the input file name, falling back to
/// a clean exit with a 60-byte output.
#[derive(Clone)]
pub struct MockEncoderSpawner {
    default_behavior: EncodeBehavior,
    behaviors: Rc<RefCell<HashMap<String, EncodeBehavior>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl Default for MockEncoderSpawner {
    fn default() -> Self {
        Self {
            default_behavior: EncodeBehavior::Output {
                bytes: 60,
                exit_code: 0,
            },
            behaviors: Rc::default(),
            received_calls: Rc::default(),
        }
    }
}

impl MockEncoderSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(behavior: EncodeBehavior) -> Self {
        Self {
            default_behavior: behavior,
            ..Self::default()
        }
    }

    pub fn set_behavior_for(&self, input_file_name: &str, behavior: EncodeBehavior) {
        self.behaviors
            .borrow_mut()
            .insert(input_file_name.to_string(), behavior);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

fn value_after(args: &[String], flag: &str) -> Option<String> {
    let position = args.iter().position(|arg| arg == flag)?;
    args.get(position + 1).cloned()
}

impl EncoderSpawner for MockEncoderSpawner {
    fn run(&self, args: &[OsString]) -> CoreResult<ExitStatus> {
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let input = value_after(&args, "-i").expect("encoder called without -i");
        let output = value_after(&args, "-o").expect("encoder called without -o");
        let input_name = Path::new(&input)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let behavior = self
            .behaviors
            .borrow()
            .get(&input_name)
            .cloned()
            .unwrap_or_else(|| self.default_behavior.clone());

        match behavior {
            EncodeBehavior::Output { bytes, exit_code } => {
                fs::write(&output, vec![b'y'; bytes])?;
                Ok(exit_status(exit_code))
            }
            EncodeBehavior::NoOutput { exit_code } => Ok(exit_status(exit_code)),
            EncodeBehavior::StartFailure => Err(CoreError::CommandStart(
                "HandBrakeCLI".to_string(),
                io::Error::new(io::ErrorKind::NotFound, "mock: not found"),
            )),
        }
    }
}

/// Event handler that keeps every event it sees.
#[derive(Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<Event>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<RunPhase> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::PhaseChanged { phase } => Some(phase),
                _ => None,
            })
            .collect()
    }
}

impl EventHandler for RecordingHandler {
    fn handle(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}
