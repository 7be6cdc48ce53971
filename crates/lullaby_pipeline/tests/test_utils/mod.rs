//! Mock generation clients shared by the pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lullaby_core::GenerationRequest;
use lullaby_error::{ProviderError, ProviderErrorKind};
use lullaby_interface::GenerationClient;
use std::sync::Mutex;

/// One recorded call to a mock client.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub model: String,
}

/// Mock client that answers every prompt with `"{prefix} {n}: {prompt}"`
/// and records each call. Optionally fails on one call.
pub struct RecordingClient {
    prefix: String,
    echo: bool,
    fail_on: Option<usize>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingClient {
    /// Answers `"{prefix} {n}"` without echoing the prompt.
    pub fn numbered(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            echo: false,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers `"{prefix} {n}: {prompt}"`.
    pub fn echo(prefix: &str) -> Self {
        Self {
            echo: true,
            ..Self::numbered(prefix)
        }
    }

    /// Fail the call with this zero-based index with a provider error.
    pub fn failing_on(mut self, call_index: usize) -> Self {
        self.fail_on = Some(call_index);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationClient for RecordingClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, ProviderError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                model: model.to_string(),
            });
            calls.len() - 1
        };

        if self.fail_on == Some(index) {
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }));
        }

        let n = index + 1;
        if self.echo {
            Ok(format!("{} {}: {}", self.prefix, n, prompt))
        } else {
            Ok(format!("{} {}", self.prefix, n))
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

pub fn request(diary: &str, mood: &str, character: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .diary(diary)
        .mood(mood)
        .character(character)
        .build()
        .expect("valid request")
}
