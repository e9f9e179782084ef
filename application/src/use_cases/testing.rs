//! Test doubles shared by the use case tests

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use pm_assist_domain::{Idea, Model, Stage, TechStackOption};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A recorded gateway call
#[derive(Debug, Clone)]
pub struct Call {
    pub model: Model,
    pub prompt: String,
    pub temperature: f32,
}

/// Gateway replaying scripted responses in order
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, response: Result<String, GatewayError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn invoke(
        &self,
        model: &Model,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(Call {
            model: model.clone(),
            prompt: prompt.to_string(),
            temperature,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

/// Progress notifier recording stage events
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl ProgressNotifier for RecordingProgress {
    fn on_stage_start(&self, stage: Stage, position: usize, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {} {}/{}", stage.as_str(), position, total));
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {} {}", stage.as_str(), success));
    }
}

pub fn idea(text: &str) -> Idea {
    Idea::new(text).unwrap()
}

pub fn canonical_plan_json() -> String {
    serde_json::json!({
        "problemAndSolution": "Meal planning is tedious; automate it",
        "targetUser": "Home cooks",
        "coreFeatures": ["Recipe import", "Weekly planner"],
        "technicalConsiderations": "Mobile first",
        "risksAndEdgeCases": ["Dietary restrictions"],
        "openQuestions": ["Pricing?"],
        "suggestedNextSteps": ["Interview ten cooks"],
    })
    .to_string()
}

pub fn stacks() -> Vec<TechStackOption> {
    ["Modern Web Stack", "Mobile-First Stack", "Rapid Prototype Stack"]
        .iter()
        .map(|name| TechStackOption {
            name: name.to_string(),
            description: format!("{name} description"),
            technologies: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            pros: vec!["Fast".to_string()],
            cons: vec!["Niche".to_string()],
        })
        .collect()
}

pub fn stacks_json() -> String {
    serde_json::to_string(&stacks()).unwrap()
}
