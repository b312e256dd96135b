//! # Prompt Templates
//!
//! Prompts sent to the AI provider by the problem classifier.

/// The system prompt for batch problem classification.
pub const PROBLEM_CLASSIFICATION_SYSTEM_PROMPT: &str = r#"You are classifying app store reviews into problem categories.

Categories and their definitions:
- TECHNICAL: crashes, bugs, errors, broken features, login failures, sync issues, blank screens
- DESIGN: confusing navigation, hard to find features, poor layout, unintuitive flows, visual bugs, accessibility
- CUSTOMER_EXPERIENCE: poor support, refund issues, account problems, missing expected features, confusing onboarding
- PRICING: cost complaints, unexpected charges, paywalled features, free tier limitations, subscription issues
- PERFORMANCE: slow loading, lag, freezing, battery drain, high data usage

Rules:
- A review can match multiple categories.
- If a review is positive or describes no problem, its entry is [].
- You receive a numbered list of reviews. Return ONLY a JSON array with exactly one entry per review, in the same order. Each entry is a JSON array of category strings.

Example input:
1. The app crashes every time I try to log in
2. Love the app!
3. Way too expensive and keeps crashing

Example output:
[["TECHNICAL"], [], ["TECHNICAL", "PRICING"]]"#;

/// The user prompt for batch problem classification.
///
/// Placeholders: `{count}`, `{reviews}`
pub const PROBLEM_CLASSIFICATION_USER_PROMPT: &str = r#"Classify these {count} reviews:

{reviews}"#;
