use std::fmt;
use std::path::{Path, PathBuf};

use autograph_core::{export_link, GenerationRequest};

use crate::api::GenerationBackend;
use crate::render::{DiagramRenderer, RenderError, Rendered};
use crate::session::Session;

pub const DEFAULT_DESCRIPTION: &str =
    "To make coffee: Grind beans. Boil water. Pour water over grounds.";

/// Something the user should see after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Warning(msg) => write!(f, "warning: {msg}"),
            Notice::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// Ask the backend for a new diagram. On success the session holds the new source
/// and its revision moved by one; on failure the session is untouched.
pub async fn request_generation(
    session: &mut Session,
    backend: &dyn GenerationBackend,
    description: &str,
    credential: &str,
) -> Result<u64, Notice> {
    if credential.is_empty() {
        return Err(Notice::Warning("Please enter API Key.".to_string()));
    }

    let request = GenerationRequest::new(description, credential);
    match backend.generate(&request).await {
        Ok(source) => {
            session.apply_generated(source);
            tracing::debug!(revision = session.revision(), "generation applied");
            Ok(session.revision())
        }
        Err(e) => Err(Notice::Error(e.to_string())),
    }
}

/// Render the current diagram. Parser failures are reported generically.
pub async fn render(
    session: &Session,
    renderer: &dyn DiagramRenderer,
    height: u32,
) -> Result<Rendered, Notice> {
    renderer
        .render(session.diagram(), height)
        .await
        .map_err(|e| match e {
            RenderError::Syntax => Notice::Warning("Syntax error in diagram code".to_string()),
            other => Notice::Warning(other.to_string()),
        })
}

/// Write a rendered diagram to `path`, creating its directory first. Failures are
/// reported, never fatal.
pub async fn write_preview(rendered: &Rendered, path: &Path) -> Result<PathBuf, Notice> {
    let written = async {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, &rendered.svg).await
    };
    written
        .await
        .map(|()| path.to_path_buf())
        .map_err(|e| Notice::Warning(format!("could not write preview: {e}")))
}

/// mermaid.live link for the current diagram; `None` while it is empty.
pub fn export(session: &Session) -> Option<String> {
    (!session.diagram().is_empty()).then(|| export_link(session.diagram()))
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Key(String),
    Generate(Option<String>),
    Show,
    Edit,
    Render,
    Export,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match word {
            "" => Command::Empty,
            "key" => Command::Key(rest.to_string()),
            "gen" | "generate" => Command::Generate(arg),
            "show" => Command::Show,
            "edit" => Command::Edit,
            "render" => Command::Render,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  key <api-key>        set the provider API key for this session
  gen [description]    generate a flowchart (reuses the last description when omitted)
  show                 print the current diagram source
  edit                 edit the diagram source directly
  render               render the diagram to the preview file
  export               print and open a mermaid.live link
  help                 show this help
  quit                 leave";
