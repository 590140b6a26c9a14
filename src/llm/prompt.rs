#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/* ============================================================
   Estimation
   ============================================================ */

pub fn estimation_prompt(qa_standards: &str, user_story: &str) -> Prompt {
    let system = r#"
You are a Principal QA Automation Architect.
You estimate test effort and cost for user stories and answer with strict JSON only.
"#
    .trim()
    .to_string();

    let user = format!(
        r#"Follow these estimation standards:
{standards}

USER STORY:
{story}

Return STRICT JSON ONLY, no prose and no code fences:

{{
  "total_test_cases": int,
  "manual_execution_time_per_test_hrs": float,
  "automation_dev_time_per_test_hrs": float,
  "automation_maintenance_time_per_cycle_hrs": float,
  "manual_cost_per_hour": float,
  "automation_cost_per_hour": float,
  "tooling_cost_per_year": float,
  "execution_cycles_per_year": int,
  "estimation_reasoning": "Short explanation"
}}"#,
        standards = qa_standards.trim(),
        story = user_story.trim(),
    );

    Prompt { system, user }
}

/* ============================================================
   Test cases
   ============================================================ */

pub fn test_case_prompt(testing_standards: &str, user_story: &str) -> Prompt {
    let system = r#"
You are a senior QA engineer writing concise, reviewable manual test cases.
"#
    .trim()
    .to_string();

    let user = format!(
        r#"Follow these testing standards:
{standards}

USER STORY:
{story}

Return a STRICT JSON ARRAY ONLY. Each element has the keys
"Title", "Description", "Preconditions", "Steps" (array of strings),
"Expected Result" and "Priority"."#,
        standards = testing_standards.trim(),
        story = user_story.trim(),
    );

    Prompt { system, user }
}
