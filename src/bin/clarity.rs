//! clarity: command line front end for the Clarity demo panels.
//!
//! Usage:
//!   clarity analyze [TEXT] [--file <path>]     Score a text (stdin when both omitted)
//!   clarity chat                               Talk to ClarityBot
//!   clarity image <PROMPT> [--size 2K] [-o p]  Generate a 16:9 header image
//!   clarity key status|set                     Inspect or select the API key

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use clarity_gemini::credentials::{KeyPrompt, StoreKeySelector};
use clarity_gemini::{
    AnalyzerPanel, ChatPanel, ChatRole, ClientConfig, CredentialStore, GeminiClient, ImagePanel,
    ImageSize, KeyGate, KeyringStore,
};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_MISSING_KEY: u8 = 2;

#[derive(Parser)]
#[command(name = "clarity")]
#[command(about = "Analyze articles, chat with ClarityBot and generate header images")]
#[command(version)]
struct Cli {
    /// YAML configuration file (defaults plus CLARITY_* environment otherwise)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a text for usefulness, fluff and AI likelihood
    Analyze {
        /// Text to analyze
        text: Option<String>,

        /// Read the text from a file
        #[arg(long, short = 'f', conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Interactive chat with ClarityBot (empty line or `exit` quits)
    Chat,

    /// Generate a header image
    Image {
        /// What the image should show
        prompt: String,

        /// Resolution tag: 1K, 2K or 4K
        #[arg(long, short = 's', default_value = "1K")]
        size: ImageSize,

        /// Where to write the PNG
        #[arg(long, short = 'o', default_value = "header.png")]
        out: PathBuf,
    },

    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Report whether a key is configured
    Status,
    /// Prompt for a key and store it in the OS keyring
    Set,
}

/// The single buffered input reader. The chat loop and the key prompt both
/// read through it so piped input is consumed line by line, in order.
struct SharedInput<R>(Arc<Mutex<Lines<BufReader<R>>>>);

type SharedStdin = SharedInput<tokio::io::Stdin>;

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl SharedStdin {
    fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> SharedInput<R> {
    fn new(reader: R) -> Self {
        Self(Arc::new(Mutex::new(BufReader::new(reader).lines())))
    }

    async fn next_line(&self) -> std::io::Result<Option<String>> {
        self.0.lock().await.next_line().await
    }

    async fn read_all(&self) -> std::io::Result<String> {
        let mut lines = self.0.lock().await;
        let mut buf = String::new();
        lines.get_mut().read_to_string(&mut buf).await?;
        Ok(buf)
    }
}

/// Reads a key from the shared input after printing a prompt to stderr.
struct LineKeyPrompt<R>(SharedInput<R>);

#[async_trait]
impl<R: AsyncRead + Unpin + Send + 'static> KeyPrompt for LineKeyPrompt<R> {
    async fn prompt_for_key(&self) -> clarity_gemini::Result<Option<String>> {
        let mut stderr = tokio::io::stderr();
        stderr.write_all(b"Enter your Gemini API key: ").await?;
        stderr.flush().await?;

        Ok(self
            .0
            .next_line()
            .await?
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty()))
    }
}

struct App {
    client: Arc<GeminiClient>,
    gate: KeyGate,
    store: Arc<KeyringStore>,
    stdin: SharedStdin,
}

impl App {
    fn new(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => ClientConfig::from_yaml_path(&path)
                .with_context(|| format!("loading {}", path.display()))?
                .overlay(|name| std::env::var(name).ok()),
            None => ClientConfig::from_env(),
        };

        let store = Arc::new(KeyringStore::default());
        let client = GeminiClient::builder()
            .config(config)
            .credentials(store.clone())
            .build()?;

        let stdin = SharedStdin::stdin();
        let selector = StoreKeySelector::new(store.clone(), Arc::new(LineKeyPrompt(stdin.clone())));
        Ok(Self {
            client: Arc::new(client),
            gate: KeyGate::new(Arc::new(selector)),
            store,
            stdin,
        })
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let app = App::new(cli.config)?;

    match cli.command {
        Commands::Analyze { text, file } => cmd_analyze(&app, text, file).await,
        Commands::Chat => cmd_chat(&app).await,
        Commands::Image { prompt, size, out } => cmd_image(&app, prompt, size, out).await,
        Commands::Key { action } => cmd_key(&app, action).await,
    }
}

async fn cmd_analyze(app: &App, text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<u8> {
    let text = match (text, file) {
        (Some(t), _) => t,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => app.stdin.read_all().await?,
    };

    let panel = AnalyzerPanel::new(app.client.clone(), app.gate.clone());
    panel.set_text(text);
    if !panel.can_submit() {
        eprintln!("nothing to analyze");
        return Ok(EXIT_ERROR);
    }
    panel.analyze().await;

    let state = panel.state();
    if let Some(err) = state.error {
        eprintln!("{err}");
        return Ok(if app.gate.has_key().await {
            EXIT_ERROR
        } else {
            EXIT_MISSING_KEY
        });
    }
    match state.result {
        Some(r) => {
            println!("Summary:          {}", r.summary);
            println!("Usefulness score: {}/100{}", r.score, if r.is_useful() { "" } else { "  (!)" });
            println!("AI likelihood:    {}%", r.ai);
            println!("Fluff:            {}%", r.fluff);
            Ok(EXIT_SUCCESS)
        }
        None => Ok(EXIT_ERROR),
    }
}

async fn cmd_chat(app: &App) -> anyhow::Result<u8> {
    let panel = ChatPanel::new(app.client.clone(), app.gate.clone());
    panel.toggle();
    let interactive = std::io::stdin().is_terminal();

    let mut shown = 0;
    loop {
        for msg in panel.messages_since(shown) {
            shown += 1;
            if msg.role == ChatRole::Model {
                println!("ClarityBot: {}", msg.text);
            }
        }
        if interactive {
            print!("> ");
            use std::io::Write as _;
            std::io::stdout().flush()?;
        }

        let Some(line) = app.stdin.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line == "exit" || line == "quit" {
            break;
        }
        panel.send(line).await;
    }
    Ok(EXIT_SUCCESS)
}

async fn cmd_image(app: &App, prompt: String, size: ImageSize, out: PathBuf) -> anyhow::Result<u8> {
    let panel = ImagePanel::new(app.client.clone(), app.gate.clone());
    panel.set_prompt(prompt);
    panel.set_size(size);
    panel.generate().await;

    if let Some(err) = panel.state().error {
        eprintln!("{err}");
        return Ok(EXIT_ERROR);
    }
    let written = panel.save_image(&out).await?;
    println!("wrote {} ({} bytes, {})", out.display(), written, size);
    Ok(EXIT_SUCCESS)
}

async fn cmd_key(app: &App, action: KeyAction) -> anyhow::Result<u8> {
    match action {
        KeyAction::Status => {
            if app.store.load().is_some() {
                println!("API key configured");
                Ok(EXIT_SUCCESS)
            } else {
                println!("no API key configured");
                Ok(EXIT_MISSING_KEY)
            }
        }
        KeyAction::Set => {
            app.gate.request_key().await?;
            println!("API key saved");
            Ok(EXIT_SUCCESS)
        }
    }
}
