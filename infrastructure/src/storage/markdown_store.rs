//! Directory-backed markdown plan store.

use chrono::{DateTime, Local};
use pm_assist_application::{PlanRepository, StoreError, StoredPlan};
use pm_assist_domain::PipelineResult;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXTENSION: &str = ".md";

/// Plan documents stored as `.md` files in one directory
///
/// Names are plain file names: anything containing `..`, `/` or `\` is
/// rejected before the filesystem is touched.
pub struct MarkdownPlanStore {
    dir: PathBuf,
}

impl MarkdownPlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `product-plan-YYYY-MM-DD-HH-MM-SS.md`
    pub fn timestamp_filename(timestamp: DateTime<Local>) -> String {
        format!(
            "product-plan-{}{}",
            timestamp.format("%Y-%m-%d-%H-%M-%S"),
            EXTENSION
        )
    }

    fn checked_name(name: &str) -> Result<&str, StoreError> {
        let name = name.trim();
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(StoreError::InvalidFilename(name.to_string()));
        }
        Ok(name)
    }

    /// Caller-supplied name (with `.md` ensured) or the timestamp name
    fn target_name(filename: Option<&str>, timestamp: DateTime<Local>) -> Result<String, StoreError> {
        match filename {
            None => Ok(Self::timestamp_filename(timestamp)),
            Some(name) => {
                let name = Self::checked_name(name)?;
                if name.ends_with(EXTENSION) {
                    Ok(name.to_string())
                } else {
                    Ok(format!("{}{}", name, EXTENSION))
                }
            }
        }
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, content)?;
        info!("Wrote plan to {}", path.display());
        Ok(path)
    }

    fn existing(&self, name: &str) -> Result<PathBuf, StoreError> {
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(path)
    }
}

impl PlanRepository for MarkdownPlanStore {
    fn save_result(
        &self,
        result: &PipelineResult,
        filename: Option<&str>,
    ) -> Result<PathBuf, StoreError> {
        if !result.is_persistable() {
            return Err(StoreError::SimpleResponse);
        }
        let name = Self::target_name(filename, result.timestamp)?;
        self.write(&name, &result.to_markdown())
    }

    fn save_markdown(
        &self,
        markdown: &str,
        timestamp: DateTime<Local>,
        filename: Option<&str>,
    ) -> Result<PathBuf, StoreError> {
        let name = Self::target_name(filename, timestamp)?;
        self.write(&name, markdown)
    }

    fn list(&self) -> Result<Vec<StoredPlan>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Output directory {} does not exist yet", self.dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut plans = Vec::new();
        for entry in entries {
            let entry = entry?;
            let filename = entry.file_name().to_string_lossy().into_owned();
            let metadata = entry.metadata()?;
            if !metadata.is_file() || !filename.ends_with(EXTENSION) {
                continue;
            }
            plans.push(StoredPlan {
                filename,
                path: entry.path(),
                size: metadata.len(),
                modified: DateTime::<Local>::from(metadata.modified()?),
            });
        }

        plans.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        Ok(plans)
    }

    fn read(&self, filename: &str) -> Result<String, StoreError> {
        let name = Self::checked_name(filename)?;
        let path = self.existing(name)?;
        Ok(fs::read_to_string(path)?)
    }

    fn delete(&self, filename: &str) -> Result<(), StoreError> {
        let name = Self::checked_name(filename)?;
        if !name.ends_with(EXTENSION) {
            return Err(StoreError::NotMarkdown(name.to_string()));
        }
        let path = self.existing(name)?;
        fs::remove_file(&path)?;
        info!("Deleted {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pm_assist_domain::{Depth, Idea, ProductPlan};

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    fn completed() -> PipelineResult {
        PipelineResult::completed(
            &Idea::new("a recipe app").unwrap(),
            Depth::Expand,
            "expanded",
            "",
            ProductPlan::from_expansion("expanded"),
            timestamp(),
        )
    }

    #[test]
    fn test_timestamp_filename() {
        assert_eq!(
            MarkdownPlanStore::timestamp_filename(timestamp()),
            "product-plan-2025-01-02-03-04-05.md"
        );
    }

    #[test]
    fn test_save_result_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkdownPlanStore::new(dir.path().join("output"));

        let path = store.save_result(&completed(), None).unwrap();
        assert!(path.ends_with("product-plan-2025-01-02-03-04-05.md"));

        let content = store.read("product-plan-2025-01-02-03-04-05.md").unwrap();
        assert!(content.starts_with("# Product Plan"));
        assert!(content.contains("## Problem & Solution\n\nexpanded"));
    }

    #[test]
    fn test_simple_response_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkdownPlanStore::new(dir.path());
        let simple =
            PipelineResult::simple(&Idea::new("hi").unwrap(), "Hi there!", timestamp());
        assert!(matches!(
            store.save_result(&simple, None),
            Err(StoreError::SimpleResponse)
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_custom_name_gets_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkdownPlanStore::new(dir.path());
        let path = store
            .save_markdown("# Guided", timestamp(), Some("recipes"))
            .unwrap();
        assert_eq!(path, dir.path().join("recipes.md"));
    }

    #[test]
    fn test_traversal_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkdownPlanStore::new(dir.path());
        for name in ["../secret.md", "nested/plan.md", "nested\\plan.md", ".."] {
            assert!(
                matches!(store.read(name), Err(StoreError::InvalidFilename(_))),
                "{name} should be rejected"
            );
            assert!(matches!(store.delete(name), Err(StoreError::InvalidFilename(_))));
        }
        assert!(matches!(
            store.save_markdown("x", timestamp(), Some("../escape")),
            Err(StoreError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_delete_only_markdown() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        let store = MarkdownPlanStore::new(dir.path());

        assert!(matches!(
            store.delete("notes.txt"),
            Err(StoreError::NotMarkdown(_))
        ));
        assert!(dir.path().join("notes.txt").exists());
        assert!(matches!(
            store.delete("missing.md"),
            Err(StoreError::NotFound(_))
        ));

        store.save_markdown("# Plan", timestamp(), Some("gone.md")).unwrap();
        store.delete("gone.md").unwrap();
        assert!(!dir.path().join("gone.md").exists());
    }

    #[test]
    fn test_list_newest_first_markdown_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkdownPlanStore::new(dir.path());
        fs::write(dir.path().join(".gitkeep"), "").unwrap();
        store
            .save_markdown("a", timestamp(), Some("product-plan-2025-01-01-00-00-00.md"))
            .unwrap();
        store
            .save_markdown("b", timestamp(), Some("product-plan-2025-01-03-00-00-00.md"))
            .unwrap();

        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|p| p.filename)
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.ends_with(".md")));
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkdownPlanStore::new(dir.path().join("never-created"));
        assert!(store.list().unwrap().is_empty());
    }
}
