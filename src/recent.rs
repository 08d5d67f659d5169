//! Recent-project registry.
//!
//! An ordered, deduplicated, capacity-bounded list of `(path, name)` pairs,
//! persisted as a single delimited configuration string:
//! `path1|name1,path2|name2,...` — most recent first, at most 8 pairs.
//!
//! Known format limitation: paths containing `|` or `,` are not escaped.
//! Such entries parse back as malformed tokens and are dropped on load.

use std::path::{Path, PathBuf};

use log::debug;

/// Maximum number of entries kept in the list.
pub const MAX_RECENT_PROJECTS: usize = 8;

/// One remembered project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    /// Path to the project file.
    pub path: PathBuf,
    /// Display name of the project.
    pub name: String,
}

/// The most-recently-used project list.
#[derive(Debug, Clone, Default)]
pub struct RecentProjects {
    entries: Vec<RecentEntry>,
    last_opened: Option<RecentEntry>,
}

impl RecentProjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted list string.
    ///
    /// Malformed tokens (not exactly `path|name`) are dropped silently.
    /// Entries whose path no longer exists on disk are dropped with a
    /// diagnostic. The first entry of the raw parse whose path still exists
    /// becomes the last-opened-project candidate.
    pub fn load(serialized: &str) -> Self {
        let mut parsed = Vec::new();
        for token in serialized.split(',') {
            let parts: Vec<&str> = token.split('|').collect();
            if parts.len() == 2 {
                parsed.push(RecentEntry {
                    path: PathBuf::from(parts[0]),
                    name: parts[1].to_string(),
                });
            }
        }

        let last_opened = parsed
            .first()
            .filter(|entry| entry.path.exists())
            .cloned();

        let mut entries = Vec::new();
        for entry in parsed {
            if entry.path.exists() {
                entries.push(entry);
            } else {
                debug!(
                    "[RECENT] dropping stale recent project: {}",
                    entry.path.display()
                );
            }
        }

        Self {
            entries,
            last_opened,
        }
    }

    /// Serialize to the persisted string form.
    ///
    /// An empty list serializes to the empty string.
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .take(MAX_RECENT_PROJECTS)
            .map(|entry| format!("{}|{}", entry.path.display(), entry.name))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Insert a project at the front of the list.
    ///
    /// Any existing entry with the same path is removed first, then the list
    /// is truncated to capacity.
    pub fn insert(&mut self, path: impl Into<PathBuf>, name: impl Into<String>) {
        let path = path.into();
        self.entries.retain(|entry| entry.path != path);
        self.entries.insert(
            0,
            RecentEntry {
                path,
                name: name.into(),
            },
        );
        self.entries.truncate(MAX_RECENT_PROJECTS);
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The project to reopen on startup, if any.
    pub fn last_opened(&self) -> Option<&RecentEntry> {
        self.last_opened.as_ref()
    }

    /// Whether a path is present in the list.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_most_recent_first() {
        let mut recent = RecentProjects::new();
        recent.insert("/tmp/a.mix", "A");
        recent.insert("/tmp/b.mix", "B");

        assert_eq!(recent.entries()[0].name, "B");
        assert_eq!(recent.entries()[1].name, "A");
    }

    #[test]
    fn test_reinsert_moves_to_front_without_duplicates() {
        let mut recent = RecentProjects::new();
        recent.insert("/tmp/a.mix", "A");
        recent.insert("/tmp/b.mix", "B");
        recent.insert("/tmp/a.mix", "A again");

        assert_eq!(recent.len(), 2);
        assert_eq!(recent.entries()[0].name, "A again");
        assert_eq!(recent.entries()[1].name, "B");
    }

    #[test]
    fn test_capacity_is_eight() {
        let mut recent = RecentProjects::new();
        for i in 0..12 {
            recent.insert(format!("/tmp/p{i}.mix"), format!("P{i}"));
        }

        assert_eq!(recent.len(), MAX_RECENT_PROJECTS);
        assert_eq!(recent.entries()[0].name, "P11");
        // Oldest entries fell off the end.
        assert!(!recent.contains(Path::new("/tmp/p0.mix")));
    }

    #[test]
    fn test_empty_list_serializes_to_empty_string() {
        let recent = RecentProjects::new();
        assert_eq!(recent.serialize(), "");
    }

    #[test]
    fn test_serialize_format() {
        let mut recent = RecentProjects::new();
        recent.insert("/tmp/a.mix", "A");
        recent.insert("/tmp/b.mix", "B");
        assert_eq!(recent.serialize(), "/tmp/b.mix|B,/tmp/a.mix|A");
    }

    #[test]
    fn test_load_drops_malformed_tokens() {
        // Tokens need exactly two parts.
        let recent = RecentProjects::load("garbage,|,a|b|c,");
        assert!(recent.is_empty());
        assert!(recent.last_opened().is_none());
    }

    #[test]
    fn test_load_drops_stale_paths() {
        let dir = tempfile::tempdir().unwrap();
        let live = dir.path().join("live.mix");
        std::fs::write(&live, b"").unwrap();

        let serialized = format!("/nonexistent/gone.mix|Gone,{}|Live", live.display());
        let recent = RecentProjects::load(&serialized);

        assert_eq!(recent.len(), 1);
        assert_eq!(recent.entries()[0].name, "Live");
        // The first raw entry's path does not exist, so there is no
        // last-opened candidate even though a later entry survived.
        assert!(recent.last_opened().is_none());
    }

    #[test]
    fn test_load_last_opened_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let live = dir.path().join("live.mix");
        std::fs::write(&live, b"").unwrap();

        let serialized = format!("{}|Live,/nonexistent/gone.mix|Gone", live.display());
        let recent = RecentProjects::load(&serialized);

        assert_eq!(recent.last_opened().unwrap().name, "Live");
    }

    #[test]
    fn test_round_trip_stability() {
        let dir = tempfile::tempdir().unwrap();
        let mut recent = RecentProjects::new();
        for name in ["one", "two", "three"] {
            let path = dir.path().join(format!("{name}.mix"));
            std::fs::write(&path, b"").unwrap();
            recent.insert(path, name);
        }

        let serialized = recent.serialize();
        let reloaded = RecentProjects::load(&serialized);
        assert_eq!(reloaded.serialize(), serialized);
    }

    #[test]
    fn test_clear() {
        let mut recent = RecentProjects::new();
        recent.insert("/tmp/a.mix", "A");
        recent.clear();
        assert!(recent.is_empty());
        assert_eq!(recent.serialize(), "");
    }
}
