use grok_inspector::api::ApiClient;
use grok_inspector::commands::{latest, report_failure, run_until_interrupted};
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

    match run_until_interrupted(latest::run(&client, &config, &mut stdout)).await {
        Some(Ok(outcome)) => tracing::info!(
            document.id = outcome.document_id.as_deref().unwrap_or(""),
            found = outcome.found,
            "Latest finished"
        ),
        Some(Err(err)) => report_failure(&err),
        None => println!("\nInterrupted."),
    }

    Ok(())
}
