//! Run Pipeline use case
//!
//! Sequences Validation → Expansion → (Critique) → (Refinement) according to
//! the requested depth and packages a [`PipelineResult`].

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::stages::{StageError, StageRunner};
use crate::ports::llm_gateway::LlmGateway;
use chrono::Local;
use pm_assist_domain::{Depth, Idea, PipelineResult, ProductPlan, Stage};
use std::future::Future;
use tracing::info;

/// Input for the RunPipeline use case
#[derive(Debug, Clone)]
pub struct RunPipelineInput {
    pub idea: Idea,
    pub depth: Depth,
}

impl RunPipelineInput {
    pub fn new(idea: Idea) -> Self {
        Self {
            idea,
            depth: Depth::default(),
        }
    }

    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }
}

/// Use case for the linear idea → plan pipeline
pub struct RunPipelineUseCase<G: LlmGateway + 'static> {
    runner: StageRunner<G>,
}

impl<G: LlmGateway + 'static> RunPipelineUseCase<G> {
    pub fn new(runner: StageRunner<G>) -> Self {
        Self { runner }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunPipelineInput) -> Result<PipelineResult, StageError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Any stage error after validation aborts the run.
    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineResult, StageError> {
        let RunPipelineInput { idea, depth } = input;
        let total = depth.as_u8() as usize;
        info!("Starting pipeline at depth {}", depth);

        let verdict = tracked(progress, Stage::Validation, 0, total, self.runner.validate(&idea))
            .await?;
        if !verdict.is_valid {
            info!("Input is not a product idea, returning simple response");
            progress.on_short_circuit(&verdict.canned_reply);
            return Ok(PipelineResult::simple(&idea, verdict.canned_reply, Local::now()));
        }

        let expanded = tracked(progress, Stage::Expansion, 1, total, self.runner.expand(&idea))
            .await?;

        if !depth.includes_critique() {
            let plan = ProductPlan::from_expansion(expanded.clone());
            return Ok(PipelineResult::completed(
                &idea,
                depth,
                expanded,
                String::new(),
                plan,
                Local::now(),
            ));
        }

        let critique = tracked(
            progress,
            Stage::Critique,
            2,
            total,
            self.runner.critique(&expanded),
        )
        .await?;

        let plan = if depth.includes_refinement() {
            tracked(
                progress,
                Stage::Refinement,
                3,
                total,
                self.runner.refine(&expanded, &critique),
            )
            .await?
        } else {
            ProductPlan::from_expansion_and_critique(expanded.clone(), critique.clone())
        };

        info!("Pipeline complete");
        Ok(PipelineResult::completed(
            &idea,
            depth,
            expanded,
            critique,
            plan,
            Local::now(),
        ))
    }
}

/// Await a stage future between start/complete notifications
pub(crate) async fn tracked<T>(
    progress: &dyn ProgressNotifier,
    stage: Stage,
    position: usize,
    total: usize,
    work: impl Future<Output = Result<T, StageError>>,
) -> Result<T, StageError> {
    progress.on_stage_start(stage, position, total);
    let result = work.await;
    progress.on_stage_complete(stage, result.is_ok());
    result
}
