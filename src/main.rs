// Entrypoint for the demo.
// - Keeps `main` small: load configuration, build the client, run the
//   workflow.
// - Any setup failure (bad configuration, unusable HTTP client) is printed
//   in red and exits with code 2. A failed workflow step has already been
//   reported on the console and only sets the exit code.

use std::sync::Arc;

use mock_interview_demo::{
    api::ApiClient,
    config::DemoConfig,
    error::EXIT_CONFIGURATION,
    ui::{ConsoleNarrator, Narrator, Tone},
    workflow,
};

fn main() {
    env_logger::init();

    let narrator = Arc::new(ConsoleNarrator);
    let api = match setup(narrator.clone()) {
        Ok(api) => api,
        Err(err) => {
            log::error!("setup failed: {err:#}");
            narrator.say(Tone::Failure, &format!("✗ {err:#}"));
            std::process::exit(EXIT_CONFIGURATION);
        }
    };

    if let Err(err) = workflow::run(&api) {
        log::error!("demo aborted: {err}");
        if err.is_configuration() {
            narrator.say(Tone::Failure, &format!("✗ {err}"));
        }
        std::process::exit(err.exit_code());
    }
}

fn setup(narrator: Arc<ConsoleNarrator>) -> anyhow::Result<ApiClient> {
    // Defaults can be overridden with MOCK_INTERVIEW_BASE_URL,
    // MOCK_INTERVIEW_USER_ID and MOCK_INTERVIEW_TOPIC.
    let config = DemoConfig::from_env()?;
    ApiClient::new(config, narrator)
}
