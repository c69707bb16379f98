use grok_inspector::api::ApiClient;
use grok_inspector::commands::{report_failure, run_until_interrupted, viewer};
use grok_inspector::config::Config;
use grok_inspector::telemetry::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    if let Err(err) = init_logging(&config) {
        eprintln!("Logging unavailable: {err}");
    }

    tracing::info!(api_base_url = %config.api_base_url, "Starting grok-viewer");

    let client = match ApiClient::new(&config.api_base_url) {
        Ok(client) => client,
        Err(err) => {
            report_failure(&err);
            return Ok(());
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    match run_until_interrupted(viewer::run(&client, &config, stdin, &mut stdout)).await {
        Some(Ok(outcome)) => tracing::info!(
            viewed = outcome.viewed,
            saved = outcome.saved.len(),
            "Viewer finished"
        ),
        Some(Err(err)) => report_failure(&err),
        None => {
            println!("\nGoodbye!");
            // A pending stdin read would otherwise hold up runtime shutdown.
            std::process::exit(0);
        }
    }

    Ok(())
}
