use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use biopass_enroll::{
    api::request::SUBSCRIPTION_KEY_HEADER,
    core::identity::types::EnrollPersonRequest,
    utils::{config::Config, logging},
    Application,
};
use clap::Parser;
use tracing::{error, info};

/// Enroll a person's face samples with the BioPass ID multibiometrics API
#[derive(Parser)]
#[command(name = "biopass-enroll", version, about)]
struct Cli {
    /// Extra configuration file, applied after config/default and config/local
    #[arg(long)]
    config: Option<PathBuf>,

    /// Identifier the person is enrolled under
    #[arg(long)]
    custom_id: String,

    /// Face image file (JPEG or PNG), may be repeated
    #[arg(long = "face", value_name = "PATH")]
    faces: Vec<PathBuf>,

    /// Face image already encoded as base64, may be repeated
    #[arg(long = "face-base64", value_name = "DATA")]
    faces_base64: Vec<String>,

    /// Print the request that would be sent and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::new(cli.config.as_deref()).context("failed to load configuration")?;
    let _log_guard = logging::init(&config.node);

    info!("Starting biopass-enroll v{}", env!("CARGO_PKG_VERSION"));

    let app = Application::new(config).map_err(|e| {
        error!("Failed to initialize application: {}", e);
        e
    })?;

    let mut samples = Vec::with_capacity(cli.faces.len() + cli.faces_base64.len());
    for path in &cli.faces {
        samples.push(
            app.load_face(path)
                .await
                .with_context(|| format!("invalid face image {}", path.display()))?,
        );
    }
    for encoded in &cli.faces_base64 {
        samples.push(app.decode_face(encoded).context("invalid --face-base64 value")?);
    }

    if cli.dry_run {
        let faces = if samples.is_empty() {
            None
        } else {
            Some(samples.into_iter().map(|s| s.into_payload()).collect())
        };
        let request = EnrollPersonRequest::new(cli.custom_id, faces);
        let (url, call) = app.preview(&request)?;

        println!("{} {}", call.method, url);
        for (name, value) in &call.headers {
            let shown = if *name == SUBSCRIPTION_KEY_HEADER { "<redacted>" } else { value.as_str() };
            println!("{}: {}", name, shown);
        }
        println!();
        println!("{}", String::from_utf8_lossy(&call.body));
        return Ok(());
    }

    if samples.is_empty() && app.config().enrollment.require_faces {
        bail!("at least one --face or --face-base64 is required");
    }

    let receipt = app.enroll(cli.custom_id, samples).await.map_err(|e| {
        error!("Enrollment failed: {}", e);
        e
    })?;

    info!(
        request_id = %receipt.request_id,
        faces = receipt.face_count,
        "Enrollment accepted for {}",
        receipt.custom_id
    );
    println!("{}", serde_json::to_string_pretty(&receipt.response)?);

    Ok(())
}
