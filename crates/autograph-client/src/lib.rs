//! Terminal client for the AutoGraph generation service.
//!
//! Holds one [`Session`] per run, talks to the service through [`ServiceClient`],
//! renders through a mermaid.ink compatible endpoint and hands edits off to `$EDITOR`.

pub mod api;
pub mod app;
pub mod editor;
pub mod render;
pub mod session;

pub use api::{ClientError, GenerationBackend, ServiceClient};
pub use app::{Command, Notice};
pub use render::{DiagramRenderer, MermaidInkRenderer, RenderError, Rendered};
pub use session::Session;
