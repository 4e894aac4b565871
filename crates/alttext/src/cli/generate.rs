//! The `alttext generate` command.

use alttext_core::{AltTextClient, AltTextGenerator, CancellationToken, Config, ProviderError};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File extensions that are sent to a provider. Anything else gets an empty suggestion.
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Image file to describe
    pub image: PathBuf,

    /// Locale of the description (e.g. "de-DE", "fr")
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Use only this provider instead of falling back across all of them
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Print the result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Exit with an error instead of printing an empty suggestion
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct Suggestion {
    text: String,
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let text = suggest(&args, config).await?;

    if args.json {
        println!("{}", serde_json::to_string(&Suggestion { text })?);
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Produce the suggestion for `args.image`.
///
/// Provider failures degrade to an empty string unless `--strict` is set.
async fn suggest(args: &GenerateArgs, config: Config) -> anyhow::Result<String> {
    if !is_supported_image(&args.image) {
        tracing::info!(path = %args.image.display(), "Not a supported image type, skipping");
        return Ok(String::new());
    }

    let image = std::fs::read(&args.image)?;
    let generator = AltTextGenerator::from_config(config)?;

    let token = CancellationToken::new();
    let ctrl_c = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    };

    let result = run(&generator, &image, args, &token).await;
    ctrl_c.abort();

    match result {
        Ok(text) => Ok(text),
        Err(e) if args.strict || matches!(e, ProviderError::Cancelled) => Err(e.into()),
        Err(e) => {
            tracing::error!(path = %args.image.display(), "Alt-text generation failed: {e}");
            Ok(String::new())
        }
    }
}

async fn run(
    generator: &AltTextGenerator,
    image: &[u8],
    args: &GenerateArgs,
    token: &CancellationToken,
) -> Result<String, ProviderError> {
    let locale = args.locale.as_deref();
    match args.provider.as_deref() {
        Some(provider) => {
            let client = generator.create_client(Some(provider));
            tracing::info!(provider = %client.kind(), "Using single provider");
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(ProviderError::Cancelled),
                result = client.build_alt_text(image, locale) => result,
            }
        }
        None => generator.build_alt_text_cancellable(image, locale, token).await,
    }
}

/// Whether the file extension is one of the supported image types (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}
