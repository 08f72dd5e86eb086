//! SigWizard CLI - JSON bridge to the signature engine
//!
//! Commands: render, copy, share, decode, session, complement, contrast, palette
//! Outputs JSON to stdout, logs to stderr
//! Exit 1 on bad input, 2 on an undecodable share token

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sigwizard_core::{
    complementary_color, contrast_color,
    palette::suggestion_from_response,
    share::{self, token_from_link},
    FileStore, Language, Layout, ShareOptions, SignatureRecord, SignatureStudio, StudioConfig,
    SystemClipboard, Theme,
};

#[derive(Parser)]
#[command(name = "sigwizard-cli")]
#[command(about = "SigWizard CLI - Email Signature Composer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct RecordArgs {
    /// JSON payload (SignatureRecord); omitted fields are blank. Defaults to the sample record
    #[arg(short, long)]
    payload: Option<String>,

    #[arg(short, long, default_value = "classic")]
    layout: Layout,

    #[arg(short, long, default_value = "light")]
    theme: Theme,

    /// Language for labels and default button text
    #[arg(long)]
    lang: Option<Language>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render signature markup
    Render {
        #[command(flatten)]
        record: RecordArgs,

        /// Print the plain-text rendition instead of JSON
        #[arg(long)]
        plain: bool,
    },

    /// Render and place the signature on the system clipboard
    Copy {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Build a share link
    Share {
        #[command(flatten)]
        record: RecordArgs,

        /// Leave layout and colors out of the link
        #[arg(long)]
        no_appearance: bool,

        /// Leave company details out of the link
        #[arg(long)]
        no_company: bool,
    },

    /// Decode a share token or link
    Decode {
        /// Token, or a full link carrying the template parameter
        input: String,
    },

    /// Load the saved session (optionally with a share link applied) and render it
    Session {
        /// Share link to apply over the saved state
        #[arg(long)]
        link: Option<String>,

        /// Persist the resulting state
        #[arg(long)]
        save: bool,
    },

    /// Complementary color of a hex value
    Complement { hex: String },

    /// Black or white text color for a hex background
    Contrast { hex: String },

    /// Extract the accent pair from a color-scheme service response
    Palette {
        /// JSON body returned by the scheme endpoint
        #[arg(short, long)]
        response: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => println!(r#"{{"error": "Failed to serialize output: {e}"}}"#),
    }
}

fn fail(code: u8, message: String) -> ExitCode {
    print_json(&serde_json::json!({ "success": false, "error": message }));
    ExitCode::from(code)
}

fn studio_for(args: &RecordArgs, config: StudioConfig) -> Result<SignatureStudio, String> {
    let record = match &args.payload {
        Some(payload) => serde_json::from_str::<SignatureRecord>(payload)
            .map_err(|e| format!("Invalid payload: {e}"))?,
        None => SignatureRecord::sample(),
    };
    let mut studio = SignatureStudio::new(config).with_defaults(record);
    studio.set_layout(args.layout);
    studio.set_theme(args.theme);
    if let Some(lang) = args.lang {
        studio.set_language(lang);
    }
    Ok(studio)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match StudioConfig::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => return fail(1, e.to_string()),
    };

    match cli.command {
        Commands::Render { record, plain } => {
            let studio = match studio_for(&record, config) {
                Ok(s) => s,
                Err(e) => return fail(1, e),
            };
            let rendered = studio.render();
            if plain {
                println!("{}", rendered.plain_text);
            } else {
                print_json(&serde_json::json!({ "success": true, "signature": rendered }));
            }
            ExitCode::SUCCESS
        }

        Commands::Copy { record } => {
            let studio = match studio_for(&record, config) {
                Ok(s) => s,
                Err(e) => return fail(1, e),
            };
            let status = studio.copy_signature(&SystemClipboard);
            let copied = status.outcome == sigwizard_core::CopyOutcome::Copied;
            print_json(&serde_json::json!({ "success": copied, "status": status }));
            if copied {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }

        Commands::Share { record, no_appearance, no_company } => {
            let studio = match studio_for(&record, config) {
                Ok(s) => s,
                Err(e) => return fail(1, e),
            };
            let options = ShareOptions {
                include_appearance: !no_appearance,
                include_company_info: !no_company,
            };
            let link = match studio.share_link(options) {
                Ok(link) => link,
                Err(e) => return fail(1, e.to_string()),
            };
            let output = serde_json::json!({
                "success": true,
                "token": studio.share_token(options),
                "link": link,
            });
            print_json(&output);
            ExitCode::SUCCESS
        }

        Commands::Decode { input } => {
            let token = if input.contains('?') {
                token_from_link(&input)
            } else {
                Some(input)
            };
            match share::decode(token.as_deref()) {
                Ok(payload) => {
                    print_json(&serde_json::json!({ "success": true, "template": payload }));
                    ExitCode::SUCCESS
                }
                Err(e) => fail(2, e.to_string()),
            }
        }

        Commands::Session { link, save } => {
            let storage_dir = match config.storage_dir() {
                Ok(dir) => dir,
                Err(e) => return fail(1, e.to_string()),
            };
            let mut store = FileStore::new(storage_dir);
            let mut studio = SignatureStudio::new(config);
            match link {
                Some(link) => studio.load_from_link(&store, &link),
                None => studio.load(&store, None),
            }
            if save {
                if let Err(e) = studio.save(&mut store) {
                    return fail(1, e.to_string());
                }
            }
            print_json(&serde_json::json!({
                "success": true,
                "session": studio.snapshot(),
                "signature": studio.render(),
            }));
            ExitCode::SUCCESS
        }

        Commands::Complement { hex } => {
            print_json(&serde_json::json!({ "input": hex, "complement": complementary_color(&hex) }));
            ExitCode::SUCCESS
        }

        Commands::Contrast { hex } => {
            print_json(&serde_json::json!({ "input": hex, "contrast": contrast_color(&hex) }));
            ExitCode::SUCCESS
        }

        Commands::Palette { response } => match suggestion_from_response(&response) {
            Ok(s) => {
                print_json(&serde_json::json!({
                    "success": true,
                    "primaryColor": s.primary,
                    "secondaryColor": s.secondary,
                }));
                ExitCode::SUCCESS
            }
            Err(e) => fail(1, e.to_string()),
        },
    }
}
