// The demo itself: create a topic, add three questions, read them back,
// start an interview and explain how to carry on. Any failing call stops
// the run; resources already created on the server are left alone.

use crate::api::{ApiClient, InterviewSession, ResourceId};
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::ui::{Narrator, Tone};

/// Questions added to the demo topic, in creation order.
pub const SAMPLE_QUESTIONS: [&str; 3] = [
    "What is the difference between var, let, and const in JavaScript?",
    "Explain the concept of closures in JavaScript with an example.",
    "What is the difference between synchronous and asynchronous JavaScript? How do promises work?",
];

/// Shown in place of a value the service did not return.
pub const MISSING: &str = "(none)";

/// Shown in the example snippets when no session id came back.
const SESSION_ID_PLACEHOLDER: &str = "<session_id>";

/// Everything created during a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub topic_id: ResourceId,
    pub topic_name: String,
    pub question_ids: Vec<ResourceId>,
    pub session: InterviewSession,
}

impl DemoReport {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Topic ID: {}", self.topic_id),
            format!("Topic Name: {}", self.topic_name),
        ];
        for (i, id) in self.question_ids.iter().enumerate() {
            lines.push(format!("Question {} ID: {}", i + 1, id));
        }
        lines.push(format!(
            "Interview Session ID: {}",
            or_missing(self.session.session_id.as_ref())
        ));
        lines
    }
}

/// Run the six demo steps against the service behind `api`.
pub fn run(api: &ApiClient) -> Result<DemoReport, DemoError> {
    let config = api.config();
    let out = api.narrator();

    out.say(Tone::Info, "=== Mock Interview Platform Demo ===");
    out.say(Tone::Detail, &format!("User ID: {}", config.user_id));
    out.say(Tone::Detail, &format!("Topic: {}", config.topic_name));
    out.blank();

    // Step 1
    log::info!("creating topic {:?}", config.topic_name);
    out.say(
        Tone::Info,
        &format!("Step 1: Creating topic '{}'", config.topic_name),
    );
    let topic_id = api.create_topic(&config.topic_name)?;
    out.say(Tone::Success, &format!("✓ Topic created with ID: {topic_id}"));
    out.blank();

    // Step 2
    log::info!("adding {} questions to topic {topic_id}", SAMPLE_QUESTIONS.len());
    out.say(Tone::Info, "Step 2: Adding questions to the topic");
    let mut question_ids = Vec::with_capacity(SAMPLE_QUESTIONS.len());
    for (i, question) in SAMPLE_QUESTIONS.iter().enumerate() {
        let n = i + 1;
        out.say(Tone::Detail, &format!("Adding Question {n}..."));
        let id = api.create_question(&topic_id, question)?;
        out.say(Tone::Success, &format!("✓ Question {n} created with ID: {id}"));
        question_ids.push(id);
    }
    out.blank();

    // Step 3
    log::info!("listing questions");
    out.say(Tone::Info, "Step 3: Verifying questions were added");
    api.list_questions()?;
    out.say(Tone::Success, "✓ All questions retrieved");
    out.blank();

    // Step 4
    log::info!("starting interview for topic {topic_id}");
    out.say(
        Tone::Info,
        &format!("Step 4: Starting interview with topic ID: {topic_id}"),
    );
    let session = api.start_interview(&topic_id)?;
    out.say(Tone::Success, "✓ Interview started successfully!");
    out.say(
        Tone::Success,
        &format!("Session ID: {}", or_missing(session.session_id.as_ref())),
    );
    out.say(Tone::Detail, "Initial Question from AI:");
    out.say(
        Tone::Info,
        session.initial_question.as_deref().unwrap_or(MISSING),
    );
    out.blank();

    // Step 5
    let session_ref = session
        .session_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| SESSION_ID_PLACEHOLDER.to_string());
    out.say(Tone::Info, "Step 5: Example of how to continue the interview");
    out.say(Tone::Detail, "To continue the interview, you can use:");
    out.blank();
    out.say(Tone::Info, &continue_snippet(config, &session_ref));
    out.say(Tone::Detail, "To end the interview manually:");
    out.say(Tone::Info, &end_snippet(config, &session_ref));

    // Step 6
    let report = DemoReport {
        topic_id,
        topic_name: config.topic_name.clone(),
        question_ids,
        session,
    };
    out.say(Tone::Info, "=== Summary of Created Resources ===");
    for line in report.summary_lines() {
        out.say(Tone::Success, &line);
    }
    out.blank();

    out.say(Tone::Success, "✓ Demo completed successfully!");
    out.say(
        Tone::Detail,
        "The interview is now ready to continue with the questions from the database.",
    );
    Ok(report)
}

/// Example request for answering the current interview question.
pub fn continue_snippet(config: &DemoConfig, session_id: &str) -> String {
    format!(
        "\n# Continue interview example\n\
         curl -X POST \"{url}\" \\\n  \
         -H \"X-User-ID: {user}\" \\\n  \
         -H \"Content-Type: application/json\" \\\n  \
         -d '{{\"text\": \"Your answer here\"}}'\n",
        url = config.endpoint(&format!("/v1/interview/{session_id}")),
        user = config.user_id,
    )
}

/// Example request for ending the interview early.
pub fn end_snippet(config: &DemoConfig, session_id: &str) -> String {
    format!(
        "\n# End interview example\n\
         curl -X POST \"{url}\" \\\n  \
         -H \"X-User-ID: {user}\"\n",
        url = config.endpoint(&format!("/v1/interview/end/{session_id}")),
        user = config.user_id,
    )
}

fn or_missing(id: Option<&ResourceId>) -> String {
    id.map(ToString::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}
