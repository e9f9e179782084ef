//! Prompt templates for the pipeline and guided-session stages

use crate::guided::tech_stack::{QuestionAnswer, TechStackOption};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Classification prompt asking for `{isValid, reasoning, response}`
    pub fn validation(idea: &str) -> String {
        format!(
            r#"You must determine if this user input is a real product idea or just casual chat/testing.

INPUT: "{idea}"

STRICT RULES:
1. If input is 1-3 words AND doesn't describe a product/service → NOT VALID
2. If input is: test, hello, hi, hey, yes, no, greetings → NOT VALID
3. If input asks "what can you do?" or similar → NOT VALID
4. If input describes ANY product, app, tool, service, platform → VALID
5. If input describes a problem that needs a solution → VALID

You MUST respond with ONLY this JSON (no other text):
{{"isValid": true, "reasoning": "your reason", "response": "friendly response or 'valid'"}}

Example 1 - Input: "test"
{{"isValid": false, "reasoning": "Single test word", "response": "Hi! I'm PM Assist. I help turn product ideas into detailed plans. Share a product idea to get started!"}}

Example 2 - Input: "a fitness app"
{{"isValid": true, "reasoning": "Product concept mentioned", "response": "valid"}}

NOW RESPOND FOR: "{idea}""#
        )
    }

    /// Free-form expansion of a rough idea
    pub fn expansion(idea: &str) -> String {
        format!(
            r#"You are a product thinking partner. A user has shared a rough product idea. Your job is to expand and flesh out this idea by exploring:

1. The core problem being solved
2. Who the target users are
3. What the key features might be
4. How this could be technically implemented
5. What the value proposition is

Here's the idea:
"{idea}"

Provide a detailed expansion of this idea. Think broadly and explore different angles. Be creative but grounded. Write in a clear, structured way."#
        )
    }

    pub fn critique(expanded_idea: &str) -> String {
        format!(
            r#"You are a critical product analyst. You've been given an expanded product idea. Your job is to:

1. Challenge assumptions and identify gaps
2. Point out potential risks and edge cases
3. Ask tough questions that need answers
4. Identify what's unclear or underspecified
5. Suggest what's missing from the plan

Be constructive but critical. Your goal is to make this idea stronger by finding its weaknesses.

Here's the expanded idea:
{expanded_idea}

Provide a thorough critique with specific concerns, questions, and suggestions for improvement."#
        )
    }

    /// Synthesis of expansion and critique into a JSON product plan
    pub fn refinement(expanded_idea: &str, critique: &str) -> String {
        format!(
            r#"You are a product strategist. You've been given an expanded product idea and a critique of it. Your job is to synthesize these into a clear, comprehensive product plan.

EXPANDED IDEA:
{expanded_idea}

CRITIQUE:
{critique}

Create a structured product plan with these sections:

1. **Problem & Solution**: Clear statement of the problem and proposed solution
2. **Target User**: Who this is for (be specific)
3. **Core Features (MVP)**: List of essential features for a first version
4. **Technical Considerations**: Key technical approaches, architecture decisions, or technologies
5. **Risks & Edge Cases**: Potential issues or challenges to watch for
6. **Open Questions**: Important questions that need answers before building
7. **Suggested Next Steps**: Concrete actions to move forward

IMPORTANT: You MUST respond with ONLY a valid JSON object. No markdown, no code blocks, just the raw JSON.

Format:
{{
  "problemAndSolution": "string",
  "targetUser": "string",
  "coreFeatures": ["string"],
  "technicalConsiderations": "string",
  "risksAndEdgeCases": ["string"],
  "openQuestions": ["string"],
  "suggestedNextSteps": ["string"]
}}

Be specific, actionable, and comprehensive. Integrate insights from the critique to strengthen the plan."#
        )
    }

    /// Request for 3-4 technology stack options as a JSON array
    pub fn tech_stacks(idea: &str) -> String {
        format!(
            r#"Based on this product idea: "{idea}"

Generate 3-4 different technology stack options that would be suitable for building this product.

For each stack, provide:
- Name (e.g., "Modern Web Stack", "Mobile-First Stack", "Rapid Prototype Stack")
- Brief description (1 sentence)
- Key technologies (4-6 items)
- 2-3 pros
- 2-3 cons

Consider different approaches: web vs mobile, simple vs scalable, rapid prototype vs production-ready, etc.

Respond ONLY with valid JSON array:
[
  {{
    "name": "Stack Name",
    "description": "Brief description",
    "technologies": ["Tech1", "Tech2", "Tech3"],
    "pros": ["Pro 1", "Pro 2"],
    "cons": ["Con 1", "Con 2"]
  }}
]"#
        )
    }

    pub fn open_questions(idea: &str, expanded_idea: &str, stack: &TechStackOption) -> String {
        format!(
            r#"Product Idea: {idea}

Expanded Context: {expanded_idea}

Selected Tech Stack: {name}
Technologies: {technologies}

Generate 4-6 critical open questions that need to be answered before building this product.
Focus on:
- Business/market questions
- User behavior/needs
- Technical decisions
- Risk mitigation
- Scope/priorities

Respond ONLY with a JSON array of question strings:
["Question 1?", "Question 2?", ...]"#,
            name = stack.name,
            technologies = stack.technologies_list(),
        )
    }

    /// Markdown plan built from the whole guided session
    pub fn guided_plan(
        idea: &str,
        expanded_idea: &str,
        stack: &TechStackOption,
        answers: &[QuestionAnswer],
    ) -> String {
        format!(
            r#"Create a comprehensive product plan based on this guided brainstorming session:

ORIGINAL IDEA:
{idea}

EXPANDED CONTEXT:
{expanded_idea}

SELECTED TECH STACK:
{name} - {description}
Technologies: {technologies}

QUESTIONS & ANSWERS:
{qa}

Generate a detailed product plan in markdown format with these sections:

# Product Plan

## Problem & Solution
[Clear problem statement and proposed solution]

## Target User
[Specific user personas based on the answers]

## Core Features (MVP)
[Essential features for first version, prioritized]

## Technical Architecture
[High-level architecture using the selected tech stack]

## Implementation Roadmap
[Break down into phases with specific milestones]

## Risks & Mitigation
[Key risks and how to address them based on Q&A]

## Next Steps
[Immediate actionable steps to start building]

Be specific and actionable based on the user's answers."#,
            name = stack.name,
            description = stack.description,
            technologies = stack.technologies_list(),
            qa = Self::numbered_answers(answers),
        )
    }

    /// `Q1:`/`A1:` blocks separated by blank lines
    fn numbered_answers(answers: &[QuestionAnswer]) -> String {
        answers
            .iter()
            .enumerate()
            .map(|(i, qa)| format!("Q{n}: {}\nA{n}: {}", qa.question, qa.answer, n = i + 1))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
