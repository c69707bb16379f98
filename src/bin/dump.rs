use grok_inspector::api::ApiClient;
use grok_inspector::commands::{dump, report_failure, run_until_interrupted};
use grok_inspector::config::Config;
use grok_inspector::telemetry::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    if let Err(err) = init_logging(&config) {
        eprintln!("Logging unavailable: {err}");
    }

    let client = match ApiClient::new(&config.api_base_url) {
        Ok(client) => client,
        Err(err) => {
            report_failure(&err);
            return Ok(());
        }
    };

    let mut stdout = std::io::stdout();

    match run_until_interrupted(dump::run(&client, &config, &mut stdout)).await {
        Some(Ok(outcome)) => tracing::info!(
            documents = outcome.documents,
            with_response = outcome.with_response,
            saved = outcome.saved.len(),
            errors = outcome.errors,
            "Dump finished"
        ),
        Some(Err(err)) => report_failure(&err),
        None => println!("\nInterrupted."),
    }

    Ok(())
}
