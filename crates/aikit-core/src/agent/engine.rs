//! Agent execution engine for aikit.
//!
//! An [`Agent`] supplies the task-specific pieces (validation, prompts,
//! response parsing, sampling settings). [`AgentEngine`] owns the one
//! control flow every agent shares: validate, build the request, call the
//! provider once, parse, and wrap the outcome in an [`AgentResult`] with
//! timing and provider metadata.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Map;
use tracing::{Instrument, debug, info_span, warn};

use aikit_types::agent::{AgentContext, AgentError, AgentResult, ResultMetadata};
use aikit_types::llm::{CompletionRequest, Message, Usage};

use crate::llm::box_provider::BoxLlmProvider;

/// Sampling temperature used when an agent does not override it.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Output token cap used when an agent does not override it.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Task-specific behaviour plugged into [`AgentEngine`].
///
/// Prompt and message builders should be pure functions of their
/// arguments. Agents hold no per-call state, so one instance can serve
/// concurrent executions.
pub trait Agent: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Reject malformed input before any provider call.
    fn validate_input(&self, _input: &Self::Input) -> Result<(), AgentError> {
        Ok(())
    }

    fn build_system_prompt(&self, context: Option<&AgentContext>) -> Result<String, AgentError>;

    fn build_messages(
        &self,
        input: &Self::Input,
        context: Option<&AgentContext>,
    ) -> Result<Vec<Message>, AgentError>;

    fn parse_response(
        &self,
        text: &str,
        context: Option<&AgentContext>,
    ) -> Result<Self::Output, AgentError>;

    fn temperature(&self) -> f64 {
        DEFAULT_TEMPERATURE
    }

    fn max_tokens(&self) -> u32 {
        DEFAULT_MAX_TOKENS
    }
}

/// Runs an [`Agent`] against an LLM provider.
///
/// Stateless between calls; clone the provider `Arc` to share one binding
/// across several engines.
pub struct AgentEngine<A> {
    agent: A,
    provider: Arc<BoxLlmProvider>,
    deadline: Option<Duration>,
}

impl<A: Agent> AgentEngine<A> {
    pub fn new(agent: A, provider: impl Into<Arc<BoxLlmProvider>>) -> Self {
        Self {
            agent,
            provider: provider.into(),
            deadline: None,
        }
    }

    /// Bound the provider call. Without a deadline a hung provider call
    /// hangs `execute`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn provider(&self) -> &Arc<BoxLlmProvider> {
        &self.provider
    }

    /// Execute the agent once.
    ///
    /// Never fails: validation, provider, and parse errors all come back as
    /// an `AgentResult` with `success == false` and the error message. On
    /// success the context metadata is merged into the result metadata.
    /// No retries are attempted.
    pub async fn execute(
        &self,
        input: &A::Input,
        context: Option<&AgentContext>,
    ) -> AgentResult<A::Output> {
        let start = Instant::now();
        let provider_name = self.provider.name().to_string();

        let span = info_span!(
            "gen_ai.invoke_agent",
            gen_ai.agent.name = self.agent.name(),
            gen_ai.provider.name = %provider_name,
            gen_ai.request.temperature = self.agent.temperature(),
            gen_ai.request.max_tokens = self.agent.max_tokens(),
        );

        let outcome = self.run(input, context).instrument(span.clone()).await;
        let execution_time_ms = start.elapsed().as_millis() as u64;
        let _guard = span.enter();

        match outcome {
            Ok((data, usage)) => {
                debug!(execution_time_ms, "agent execution succeeded");
                let extra = context
                    .map(|ctx| merge_context_metadata(&ctx.metadata))
                    .unwrap_or_default();
                AgentResult::succeeded(
                    data,
                    usage,
                    ResultMetadata {
                        execution_time_ms,
                        provider: provider_name,
                        extra,
                    },
                )
            }
            Err(err) => {
                warn!(execution_time_ms, kind = err.kind(), error = %err, "agent execution failed");
                AgentResult::failed(
                    err.to_string(),
                    ResultMetadata {
                        execution_time_ms,
                        provider: provider_name,
                        extra: Map::new(),
                    },
                )
            }
        }
    }

    async fn run(
        &self,
        input: &A::Input,
        context: Option<&AgentContext>,
    ) -> Result<(A::Output, Option<Usage>), AgentError> {
        self.agent.validate_input(input)?;

        let request = CompletionRequest {
            system: Some(self.agent.build_system_prompt(context)?),
            messages: self.agent.build_messages(input, context)?,
            temperature: Some(self.agent.temperature()),
            max_tokens: Some(self.agent.max_tokens()),
        };

        let response = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.provider.complete(&request))
                .await
                .map_err(|_| AgentError::Timeout(deadline))??,
            None => self.provider.complete(&request).await?,
        };

        let output = self.agent.parse_response(&response.content, context)?;
        Ok((output, response.usage))
    }
}

/// Copy context metadata, skipping keys the engine sets itself.
fn merge_context_metadata(metadata: &Map<String, serde_json::Value>) -> Map<String, serde_json::Value> {
    metadata
        .iter()
        .filter(|(key, _)| {
            let reserved = ResultMetadata::RESERVED_KEYS.contains(&key.as_str());
            if reserved {
                debug!(key = %key, "ignoring reserved context metadata key");
            }
            !reserved
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
