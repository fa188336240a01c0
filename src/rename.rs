use std::fs;
use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use log::warn;

use crate::metadata::read_metadata;
use crate::slug::slug;

/// One stale folder: its current name and the name its metadata implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub old: String,
    pub new: String,
}

/// Per-entry result of applying a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// A folder already sits at the target name; nothing was touched.
    SkippedCollision,
    Failed(String),
}

/// Scan the immediate subdirectories of the posts root and return, in
/// lexical folder-name order, the renames needed to make every folder
/// match its own metadata. Folders without usable metadata or with an
/// invalid date are skipped with a warning. Mutates nothing, so two
/// successive scans over unchanged storage yield identical plans.
pub fn plan_renames(posts_dir: &Path) -> anyhow::Result<Vec<RenameEntry>> {
    let mut folders = Vec::new();
    for entry in
        fs::read_dir(posts_dir).with_context(|| format!("while reading {posts_dir:?}"))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            folders.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    folders.sort();

    let mut plan = Vec::new();
    for folder_name in folders {
        let Some(meta) = read_metadata(&posts_dir.join(&folder_name)) else {
            warn!("no usable metadata in {folder_name:?}, skipped");
            continue;
        };
        let Some(date) = validated_date(&meta.date) else {
            warn!("invalid date {:?} in {folder_name:?}, skipped", meta.date);
            continue;
        };

        let canonical = format!("{}-{}", date, slug(&meta.title));
        if canonical != folder_name {
            plan.push(RenameEntry {
                old: folder_name,
                new: canonical,
            });
        }
    }
    Ok(plan)
}

// The first 10 code points must form a calendar date; anything after them
// (a time suffix, garbled or not) is ignored for naming.
fn validated_date(raw: &str) -> Option<String> {
    let prefix: String = raw.chars().take(10).collect();
    NaiveDate::parse_from_str(&prefix, "%Y-%m-%d").ok()?;
    Some(prefix)
}

/// Apply a plan strictly in order, returning one outcome per entry. A
/// collision or a filesystem error affects only its own entry; the batch
/// always runs to the end. Renames are sequential, so a later entry may
/// take a name an earlier entry freed.
pub fn execute_renames(posts_dir: &Path, plan: &[RenameEntry]) -> Vec<RenameOutcome> {
    let mut outcomes = Vec::with_capacity(plan.len());
    for entry in plan {
        let target = posts_dir.join(&entry.new);
        if target.exists() {
            outcomes.push(RenameOutcome::SkippedCollision);
            continue;
        }
        match fs::rename(posts_dir.join(&entry.old), &target) {
            Ok(()) => outcomes.push(RenameOutcome::Renamed),
            Err(err) => outcomes.push(RenameOutcome::Failed(err.to_string())),
        }
    }
    outcomes
}

/// Read one line of input and accept only a case-insensitive `y`.
/// Anything else, including end of input, declines.
pub fn confirm(mut input: impl BufRead) -> std::io::Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write_post(posts_dir: &Path, folder: &str, title: &str, date: &str) {
        let dir = posts_dir.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("index.qmd"),
            format!("---\ntitle: \"{title}\"\ndate: \"{date}\"\ncategories: []\n---\n\nbody\n"),
        )
        .unwrap();
    }

    #[test]
    fn stale_folder_yields_one_entry() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "2025-01-01-old-name", "New Title", "2025-01-02");

        let plan = plan_renames(root.path()).unwrap();
        assert_eq!(
            plan,
            vec![RenameEntry {
                old: "2025-01-01-old-name".to_string(),
                new: "2025-01-02-new-title".to_string(),
            }]
        );
        // planning alone must not touch the filesystem
        assert!(root.path().join("2025-01-01-old-name").is_dir());
    }

    #[test]
    fn canonical_folders_are_left_out() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "2025-01-02-new-title", "New Title", "2025-01-02");

        assert!(plan_renames(root.path()).unwrap().is_empty());
    }

    #[test]
    fn time_suffix_is_ignored_for_naming() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "2025-01-01-a", "A", "2025-01-02 99:99 garbled");

        let plan = plan_renames(root.path()).unwrap();
        assert_eq!(plan[0].new, "2025-01-02-a");
    }

    #[test]
    fn bad_metadata_is_skipped_without_affecting_others() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("2025-01-01-no-metadata")).unwrap();
        write_post(root.path(), "2025-01-02-bad-date", "Bad Date", "not a date");
        write_post(root.path(), "2025-01-03-bad-month", "Bad Month", "2025-13-03 10:00");
        write_post(root.path(), "2025-01-04-old", "Fine", "2025-01-05");
        fs::write(root.path().join("stray.txt"), "not a folder").unwrap();

        let plan = plan_renames(root.path()).unwrap();
        assert_eq!(
            plan,
            vec![RenameEntry {
                old: "2025-01-04-old".to_string(),
                new: "2025-01-05-fine".to_string(),
            }]
        );
    }

    #[test]
    fn plan_is_ordered_and_repeatable() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "2025-03-03-c", "C", "2025-03-04");
        write_post(root.path(), "2025-01-01-a", "A", "2025-01-02");
        write_post(root.path(), "2025-02-02-b", "B", "2025-02-03");

        let first = plan_renames(root.path()).unwrap();
        let olds: Vec<&str> = first.iter().map(|e| e.old.as_str()).collect();
        assert_eq!(olds, ["2025-01-01-a", "2025-02-02-b", "2025-03-03-c"]);

        let second = plan_renames(root.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn execute_renames_stale_folders() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "2025-01-01-old-name", "New Title", "2025-01-02");

        let plan = plan_renames(root.path()).unwrap();
        let outcomes = execute_renames(root.path(), &plan);

        assert_eq!(outcomes, vec![RenameOutcome::Renamed]);
        assert!(!root.path().join("2025-01-01-old-name").exists());
        let renamed = root.path().join("2025-01-02-new-title");
        assert!(renamed.is_dir());
        assert!(renamed.join("index.qmd").is_file());
    }

    #[test]
    fn collision_is_skipped_and_both_folders_survive() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "2025-01-01-old-name", "New Title", "2025-01-02");
        write_post(root.path(), "2025-01-02-new-title", "New Title", "2025-01-02");

        let plan = plan_renames(root.path()).unwrap();
        assert_eq!(plan.len(), 1);
        let outcomes = execute_renames(root.path(), &plan);

        assert_eq!(outcomes, vec![RenameOutcome::SkippedCollision]);
        assert!(root.path().join("2025-01-01-old-name").is_dir());
        assert!(root.path().join("2025-01-02-new-title").is_dir());
    }

    #[test]
    fn later_entry_may_take_a_freed_name() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "2025-01-01-a", "A", "2025-09-09");
        write_post(root.path(), "2025-01-02-b", "A", "2025-01-01");

        let plan = plan_renames(root.path()).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].new, "2025-09-09-a");
        assert_eq!(plan[1].new, "2025-01-01-a");

        let outcomes = execute_renames(root.path(), &plan);
        assert_eq!(outcomes, vec![RenameOutcome::Renamed, RenameOutcome::Renamed]);
        assert!(root.path().join("2025-09-09-a").is_dir());
        assert!(root.path().join("2025-01-01-a").is_dir());
    }

    #[test]
    fn missing_source_is_a_per_entry_failure() {
        let root = TempDir::new().unwrap();
        let plan = vec![
            RenameEntry {
                old: "vanished".to_string(),
                new: "elsewhere".to_string(),
            },
            RenameEntry {
                old: "also-vanished".to_string(),
                new: "elsewhere-too".to_string(),
            },
        ];

        let outcomes = execute_renames(root.path(), &plan);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], RenameOutcome::Failed(_)));
        assert!(matches!(outcomes[1], RenameOutcome::Failed(_)));
    }

    #[test]
    fn confirm_accepts_only_a_single_y() {
        assert!(confirm(Cursor::new("y\n")).unwrap());
        assert!(confirm(Cursor::new("Y\n")).unwrap());
        assert!(confirm(Cursor::new("  y  \n")).unwrap());
        assert!(!confirm(Cursor::new("yes\n")).unwrap());
        assert!(!confirm(Cursor::new("n\n")).unwrap());
        assert!(!confirm(Cursor::new("\n")).unwrap());
        assert!(!confirm(Cursor::new("")).unwrap());
    }
}
