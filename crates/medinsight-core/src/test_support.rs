//! Scripted model provider for unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use medinsight_types::{Request, UpstreamError};

use crate::invoker::{GenerativeModel, ModelProvider};

type Reply = Result<String, UpstreamError>;

/// One recorded call against a scripted model.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub model: String,
    pub at: Instant,
    pub prompt: String,
    pub had_image: bool,
}

#[derive(Default)]
struct Script {
    queued: HashMap<String, VecDeque<Reply>>,
    always: HashMap<String, Reply>,
    broken: HashMap<String, String>,
    calls: Vec<Call>,
}

/// Provider whose models replay queued replies, then a standing reply.
#[derive(Clone, Default)]
pub(crate) struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot reply for `model`.
    pub fn then(self, model: &str, reply: Reply) -> Self {
        self.lock().queued.entry(model.to_string()).or_default().push_back(reply);
        self
    }

    /// Reply used once the queue for `model` is empty.
    pub fn always(self, model: &str, reply: Reply) -> Self {
        self.lock().always.insert(model.to_string(), reply);
        self
    }

    /// Make construction of `model` fail.
    pub fn broken(self, model: &str, message: &str) -> Self {
        self.lock().broken.insert(model.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn called_models(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }

    /// Time between consecutive calls.
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        self.calls().windows(2).map(|w| w[1].at - w[0].at).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn next_reply(&self, model: &str, request: &Request) -> Reply {
        let mut script = self.lock();
        script.calls.push(Call {
            model: model.to_string(),
            at: Instant::now(),
            prompt: request.prompt().to_string(),
            had_image: request.image().is_some(),
        });
        if let Some(reply) = script.queued.get_mut(model).and_then(VecDeque::pop_front) {
            return reply;
        }
        script
            .always
            .get(model)
            .cloned()
            .unwrap_or_else(|| Err(UpstreamError::new(format!("no scripted reply for {}", model))))
    }
}

struct ScriptedModel {
    id: String,
    provider: ScriptedProvider,
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, request: &Request) -> Result<String, UpstreamError> {
        tokio::task::yield_now().await;
        self.provider.next_reply(&self.id, request)
    }
}

impl ModelProvider for ScriptedProvider {
    fn model(&self, model_id: &str) -> Result<Box<dyn GenerativeModel>, UpstreamError> {
        if let Some(message) = self.lock().broken.get(model_id) {
            return Err(UpstreamError::new(message.clone()));
        }
        Ok(Box::new(ScriptedModel { id: model_id.to_string(), provider: self.clone() }))
    }
}

pub(crate) fn ok(text: &str) -> Reply {
    Ok(text.to_string())
}

pub(crate) fn err(message: &str) -> Reply {
    Err(UpstreamError::new(message))
}
