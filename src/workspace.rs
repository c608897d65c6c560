// Host workspace surface: snapshot types and the calls the plugin issues back

/// Stable identifier for one open workspace tab ("leaf").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub u64);

pub const VIEW_TYPE_EMPTY: &str = "empty";

/// A document on disk, as the host's metadata cache describes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRef {
    /// Unique stable path. An empty path marks a malformed entry.
    pub path: String,
    pub basename: String,
    /// Front-matter aliases, in declaration order. May be empty.
    pub aliases: Vec<String>,
    /// Tags attached to the document. May be empty.
    pub tags: Vec<String>,
}

/// Snapshot of one open tab. Owned by the host; the plugin only reads it
/// and issues detach/activate requests by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub id: LeafId,
    /// View discriminator, e.g. "markdown" or "empty".
    pub view_type: String,
    pub file: Option<FileRef>,
    /// True when the host has not yet loaded the tab's content.
    pub deferred: bool,
}

impl Leaf {
    /// The bound file, if any. A FileRef with an empty path is treated as
    /// no binding at all rather than an error.
    pub fn bound_file(&self) -> Option<&FileRef> {
        match &self.file {
            Some(f) if !f.path.is_empty() => Some(f),
            _ => None,
        }
    }

    pub fn is_empty_view(&self) -> bool {
        self.view_type == VIEW_TYPE_EMPTY
    }
}

/// The host calls the plugin is allowed to make. `leaves` returns a fresh
/// snapshot in host tab order; the mutating calls are fire-and-forget (a
/// detach of an already-closed tab is a host-side no-op we never observe).
pub trait Workspace {
    fn leaves(&self) -> Vec<Leaf>;
    fn detach(&mut self, id: LeafId);
    fn set_active(&mut self, id: LeafId);
    fn load_deferred(&mut self, id: LeafId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_file_present() {
        let leaf = Leaf {
            id: LeafId(1),
            view_type: "markdown".to_string(),
            file: Some(FileRef {
                path: "notes/a.md".to_string(),
                basename: "a".to_string(),
                aliases: vec![],
                tags: vec![],
            }),
            deferred: false,
        };
        assert_eq!(leaf.bound_file().map(|f| f.path.as_str()), Some("notes/a.md"));
    }

    #[test]
    fn test_bound_file_absent() {
        let leaf = Leaf {
            id: LeafId(2),
            view_type: VIEW_TYPE_EMPTY.to_string(),
            file: None,
            deferred: false,
        };
        assert!(leaf.bound_file().is_none());
        assert!(leaf.is_empty_view());
    }

    #[test]
    fn test_malformed_path_treated_as_unbound() {
        let leaf = Leaf {
            id: LeafId(3),
            view_type: "markdown".to_string(),
            file: Some(FileRef {
                path: String::new(),
                basename: "ghost".to_string(),
                aliases: vec![],
                tags: vec![],
            }),
            deferred: false,
        };
        assert!(leaf.bound_file().is_none());
        assert!(!leaf.is_empty_view());
    }
}
