use autograph_core::{DiagramSource, INITIAL_DIAGRAM};

/// Session-scoped client state: the current diagram and the generation revision.
///
/// The revision is the identity of the editable surface. It moves only when a
/// generation lands, so a surface keyed on it always shows freshly generated text
/// instead of a stale local edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    diagram: DiagramSource,
    revision: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            diagram: DiagramSource::from(INITIAL_DIAGRAM),
            revision: 0,
        }
    }
}

impl Session {
    pub fn diagram(&self) -> &DiagramSource {
        &self.diagram
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Key of the editable surface showing the current diagram.
    pub fn editor_key(&self) -> String {
        format!("editor-{}", self.revision)
    }

    /// Replace the diagram with a fresh generation and bump the revision.
    pub fn apply_generated(&mut self, source: DiagramSource) {
        self.diagram = source;
        self.revision += 1;
    }

    /// Replace the diagram with user-typed text. The revision stays put.
    pub fn edit_directly(&mut self, text: impl Into<String>) {
        self.diagram = DiagramSource::new(text);
    }
}
