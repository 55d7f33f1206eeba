//! Shared test doubles for the engine tests

#![allow(dead_code)]

use async_trait::async_trait;
use complexity_common::{AnalyzerError, HarnessConfig, Result};
use complexity_engine::{BenchmarkRunner, ModelClient};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    });
}

/// What a [`ScriptedModel`] answers with
pub enum Reply {
    Text(String),
    Upstream(String),
    MissingCredential,
}

/// Model client returning a fixed reply and counting calls
pub struct ScriptedModel {
    reply: Reply,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedModel {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Reply::Text(text.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    fn has_credential(&self) -> bool {
        !matches!(self.reply, Reply::MissingCredential)
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Upstream(msg) => Err(AnalyzerError::upstream(msg.clone())),
            Reply::MissingCredential => Err(AnalyzerError::configuration(
                "GEMINI_API_KEY environment variable not set",
            )),
        }
    }
}

/// Benchmark runner returning fixed output (or an execution failure)
pub struct ScriptedRunner {
    outcome: std::result::Result<String, String>,
    calls: AtomicUsize,
    last_source: Mutex<Option<String>>,
}

impl ScriptedRunner {
    pub fn output(output: impl Into<String>) -> Self {
        Self::with_outcome(Ok(output.into()))
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_outcome(Err(reason.into()))
    }

    fn with_outcome(outcome: std::result::Result<String, String>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_source: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_source(&self) -> Option<String> {
        self.last_source.lock().unwrap().clone()
    }
}

#[async_trait]
impl BenchmarkRunner for ScriptedRunner {
    async fn run(&self, source: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_source.lock().unwrap() = Some(source.to_string());
        match &self.outcome {
            Ok(output) => Ok(output.clone()),
            Err(reason) => Err(AnalyzerError::execution(reason.clone(), "")),
        }
    }
}

/// A model reply wrapped in a markdown fence, as models often do
pub fn fenced_reply(test_code: &str) -> String {
    let body = serde_json::json!({
        "complexity": "O(n²)",
        "confidence": 88.0,
        "staticAnalysis": [
            "Compares every pair of elements with two nested loops",
            "Swaps adjacent elements until no swaps occur"
        ],
        "testCode": test_code,
    });
    format!("```json\n{}\n```", serde_json::to_string_pretty(&body).unwrap())
}

/// Harness configuration running programs with `sh` under `scratch_root`
pub fn sh_harness_config(scratch_root: &Path, timeout_secs: u64) -> HarnessConfig {
    HarnessConfig {
        program: "sh".to_string(),
        args: Vec::new(),
        source_file: "bench.sh".to_string(),
        timeout_secs,
        scratch_root: Some(scratch_root.to_path_buf()),
        ..HarnessConfig::default()
    }
}

/// Number of entries left in a directory
pub fn entries_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
