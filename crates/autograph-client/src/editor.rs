use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Editors tried, in order, when neither `$VISUAL` nor `$EDITOR` is set.
const KNOWN_EDITORS: &[&str] = &["nvim", "vim", "vi", "nano", "hx", "micro"];

/// Resolve editor: $VISUAL → $EDITOR → first known editor on PATH.
pub fn find_editor() -> Option<String> {
    pick_editor(
        std::env::var("VISUAL").ok(),
        std::env::var("EDITOR").ok(),
        |name| which::which(name).is_ok(),
    )
}

fn pick_editor(
    visual: Option<String>,
    editor: Option<String>,
    on_path: impl Fn(&str) -> bool,
) -> Option<String> {
    visual
        .filter(|v| !v.trim().is_empty())
        .or_else(|| editor.filter(|v| !v.trim().is_empty()))
        .or_else(|| {
            KNOWN_EDITORS
                .iter()
                .find(|name| on_path(name))
                .map(|s| s.to_string())
        })
}

/// Open `text` in `editor` and return what the user saved, minus the final newline
/// the editor adds.
pub async fn edit_text(editor: &str, text: &str) -> std::io::Result<String> {
    let path = scratch_path();
    tokio::fs::write(&path, format!("{text}\n")).await?;

    let result = run_editor(editor, &path).await;
    let edited = match result {
        Ok(()) => tokio::fs::read_to_string(&path).await,
        Err(e) => Err(e),
    };
    let _ = tokio::fs::remove_file(&path).await;

    Ok(strip_final_newline(&edited?).to_string())
}

async fn run_editor(editor: &str, path: &Path) -> std::io::Result<()> {
    // $EDITOR may carry flags, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "empty editor command"))?;

    let status = tokio::process::Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .await?;

    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{program} exited with {status}")))
    }
}

fn scratch_path() -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("autograph-{}-{n}.mmd", std::process::id()))
}

fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Open a URL in the platform browser without waiting for it.
pub fn open_url(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(windows) {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        std::process::Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
