//! AutoGraph interactive client.
//!
//! Reads commands from the terminal, keeps one diagram per run and talks to the
//! generation service at the configured base URL (default `http://127.0.0.1:8000`).

use std::error::Error;
use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use autograph_client::app::{self, DEFAULT_DESCRIPTION, HELP};
use autograph_client::{editor, Command, MermaidInkRenderer, ServiceClient, Session};
use autograph_core::ClientSettings;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--url <service-base-url>]\n\nThe API key is read from GROQ_API_KEY when set, or entered with `key <api-key>`."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    url: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => {
                if options.url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.url = Some(url);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "autograph".to_owned());
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    let mut settings = autograph_core::read_settings().client;
    if let Some(url) = options.url {
        settings.base_url = url;
    }

    if let Err(err) = run(settings).await {
        eprintln!("autograph: {err}");
        std::process::exit(1);
    }
}

async fn run(settings: ClientSettings) -> Result<(), Box<dyn Error>> {
    let service = ServiceClient::new(&settings.base_url);
    let renderer = MermaidInkRenderer::new(&settings.render_base_url);
    let mut session = Session::default();
    let mut credential = std::env::var("GROQ_API_KEY").unwrap_or_default();
    let mut description = DEFAULT_DESCRIPTION.to_string();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("AutoGraph: service at {}", service.base_url());
    println!("{HELP}");

    loop {
        print!("autograph> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Key(key) => {
                credential = key;
                if credential.is_empty() {
                    println!("API key cleared.");
                } else {
                    println!("API key set.");
                }
            }
            Command::Generate(arg) => {
                if let Some(text) = arg {
                    description = text;
                }
                if !credential.is_empty() {
                    println!("Talking to backend...");
                }
                match app::request_generation(&mut session, &service, &description, &credential)
                    .await
                {
                    Ok(revision) => {
                        println!("Generated revision {revision}.");
                        show(&session);
                    }
                    Err(notice) => println!("{notice}"),
                }
            }
            Command::Show => show(&session),
            Command::Edit => edit(&mut session, &mut lines).await?,
            Command::Render => match app::render(&session, &renderer, settings.render_height).await {
                Ok(rendered) => match app::write_preview(&rendered, &settings.preview_path()).await {
                    Ok(path) => println!("Rendered to {}", path.display()),
                    Err(notice) => println!("{notice}"),
                },
                Err(notice) => println!("{notice}"),
            },
            Command::Export => match app::export(&session) {
                Some(link) => {
                    println!("{link}");
                    if let Err(e) = editor::open_url(&link) {
                        println!("warning: could not open browser: {e}");
                    }
                }
                None => println!("Nothing to export."),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(word) => println!("unknown command `{word}`, try `help`"),
        }
    }

    Ok(())
}

fn show(session: &Session) {
    println!("--- {} ---", session.editor_key());
    println!("{}", session.diagram());
    println!("---");
}

async fn edit(
    session: &mut Session,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Box<dyn Error>> {
    if let Some(editor_cmd) = editor::find_editor() {
        match editor::edit_text(&editor_cmd, session.diagram().as_str()).await {
            Ok(text) => {
                session.edit_directly(text);
                show(session);
            }
            Err(e) => println!("warning: edit discarded: {e}"),
        }
        return Ok(());
    }

    println!("No editor found. Type the new source, end with a line containing only `.`:");
    let mut collected = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim_end() == "." {
            break;
        }
        collected.push(line);
    }
    session.edit_directly(collected.join("\n"));
    show(session);
    Ok(())
}
