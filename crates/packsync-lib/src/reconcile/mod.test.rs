use super::*;
use crate::networking::MockContentFetcher;
use crate::plan::{OverrideEntry, UpdateFile, UpdatePlan};
use tempfile::TempDir;

/// Instance root with an empty `mods/` directory
fn instance() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join(MODS_DIR)).unwrap();
    temp_dir
}

fn write_mod(root: &Path, filename: &str, content: &str) {
    std::fs::write(root.join(MODS_DIR).join(filename), content).unwrap();
}

fn mod_exists(root: &Path, filename: &str) -> bool {
    root.join(MODS_DIR).join(filename).exists()
}

async fn reconciler(
    responses: &[(&str, &str)],
    failures: &[&str],
) -> Reconciler<LiveFileMutator, MockContentFetcher> {
    let mut fetcher = MockContentFetcher::new();
    for (url, body) in responses {
        fetcher = fetcher.with_response(url, *body).await;
    }
    for url in failures {
        fetcher = fetcher.with_failure(url, "simulated network failure").await;
    }
    Reconciler::new(LiveFileMutator::new(), fetcher)
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn test_add_disable_remove_scenario() {
    let root = instance();
    write_mod(root.path(), "b.jar", "b");
    write_mod(root.path(), "c.jar", "c");

    let plan = UpdatePlan {
        new_addons: vec![UpdateFile::new("a.jar").with_download_url("https://x/a.jar")],
        disabled_addons: vec![UpdateFile::new("b.jar")],
        removed_addons: vec![UpdateFile::new("c.jar")],
        ..UpdatePlan::default()
    };
    assert_eq!(plan.total(), 3);

    let reconciler = reconciler(&[("https://x/a.jar", "alpha")], &[]).await;
    let mut seen = Vec::new();
    let report = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(root.path().join("mods/a.jar")).unwrap(),
        "alpha"
    );
    assert!(!mod_exists(root.path(), "b.jar"));
    assert!(mod_exists(root.path(), "b.jar.disabled"));
    assert!(!mod_exists(root.path(), "c.jar"));

    let expected: Vec<f64> = (1..=3).map(|k| k as f64 / 3.0 * 100.0).collect();
    assert_eq!(seen, expected);
    assert_eq!(seen[2], 100.0);
    assert_eq!(report.completed, 3);
    assert!(report.is_complete());
    assert!(report.recoverable.is_empty());
}

#[tokio::test]
async fn test_two_entry_plan_reports_fifty_then_hundred() {
    let root = instance();
    write_mod(root.path(), "b.jar", "b");

    let plan = UpdatePlan {
        new_addons: vec![UpdateFile::new("a.jar").with_download_url("https://x/a.jar")],
        disabled_addons: vec![UpdateFile::new("b.jar")],
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[("https://x/a.jar", "alpha")], &[]).await;
    let mut seen = Vec::new();
    reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    assert_eq!(seen, vec![50.0, 100.0]);
}

// ============================================================================
// Progress accounting
// ============================================================================

#[tokio::test]
async fn test_progress_values_follow_fixed_denominator() {
    let root = instance();
    for name in ["d1.jar", "d2.jar", "r1.jar"] {
        write_mod(root.path(), name, "x");
    }

    let plan = UpdatePlan {
        overrides: vec![OverrideEntry::file("overrides/README", "hi")],
        overrides_total: 1,
        new_addons: vec![UpdateFile::new("n1.jar").with_download_url("https://x/n1.jar")],
        disabled_addons: vec![UpdateFile::new("d1.jar"), UpdateFile::new("d2.jar")],
        removed_addons: vec![UpdateFile::new("r1.jar")],
        ..UpdatePlan::default()
    };
    let total = plan.total() as f64;

    let reconciler = reconciler(&[("https://x/n1.jar", "n1")], &[]).await;
    let mut seen = Vec::new();
    reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    let expected: Vec<f64> = (1..=5).map(|k| k as f64 / total * 100.0).collect();
    assert_eq!(seen, expected);
    assert!(seen.iter().all(|p| (0.0..=100.0).contains(p)));
}

#[tokio::test]
async fn test_skipped_entries_under_report_completion() {
    let root = instance();

    let plan = UpdatePlan {
        new_addons: vec![
            UpdateFile::new("a.jar").with_download_url("https://x/a.jar"),
            UpdateFile::new("no-url.jar"),
        ],
        changed_addons: vec![UpdateFile::new("no-old.jar").with_download_url("https://x/n.jar")],
        overrides: vec![OverrideEntry {
            key: "overrides/empty.txt".to_string(),
            content: None,
            is_file: true,
        }],
        overrides_total: 1,
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[("https://x/a.jar", "a")], &[]).await;
    let mut seen = Vec::new();
    let report = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    // Only a.jar emits; the three skipped entries stay in the denominator
    assert_eq!(seen, vec![25.0]);
    assert_eq!(report.completed, 1);
    assert_eq!(report.total, 4);
    assert_eq!(report.skipped, 3);
    assert!(!report.is_complete());
    assert_eq!(reconciler.fetcher().calls().await, vec!["https://x/a.jar"]);
}

#[tokio::test]
async fn test_percent_clamped_when_overrides_exceed_declared_total() {
    let root = instance();

    let plan = UpdatePlan {
        overrides: vec![
            OverrideEntry::file("overrides/one", "1"),
            OverrideEntry::file("overrides/two", "2"),
        ],
        overrides_total: 1,
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[], &[]).await;
    let mut seen = Vec::new();
    reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    assert_eq!(seen, vec![100.0, 100.0]);
}

#[test]
fn test_progress_percent_edge_cases() {
    assert_eq!(progress_percent(0, 0), 100.0);
    assert_eq!(progress_percent(1, 4), 25.0);
    assert_eq!(progress_percent(5, 4), 100.0);
}

// ============================================================================
// Fatal phases
// ============================================================================

#[tokio::test]
async fn test_add_failure_aborts_remaining_entries_and_phases() {
    let root = instance();
    write_mod(root.path(), "keep.jar", "keep");

    let plan = UpdatePlan {
        new_addons: vec![
            UpdateFile::new("a.jar").with_download_url("https://x/a.jar"),
            UpdateFile::new("broken.jar").with_download_url("https://x/broken.jar"),
            UpdateFile::new("c.jar").with_download_url("https://x/c.jar"),
        ],
        disabled_addons: vec![UpdateFile::new("keep.jar")],
        overrides: vec![OverrideEntry::file("overrides/README", "x")],
        overrides_total: 1,
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(
        &[("https://x/a.jar", "a"), ("https://x/c.jar", "c")],
        &["https://x/broken.jar"],
    )
    .await;
    let mut seen = Vec::new();
    let err = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::AddFailed { ref filename, .. } if filename == "broken.jar"));
    assert_eq!(err.phase(), Some(Phase::Add));
    assert_eq!(seen.len(), 1);
    assert_eq!(
        reconciler.fetcher().calls().await,
        vec!["https://x/a.jar", "https://x/broken.jar"]
    );
    assert!(!mod_exists(root.path(), "c.jar"));
    assert!(mod_exists(root.path(), "keep.jar"));
    assert!(!root.path().join("README").exists());
}

#[tokio::test]
async fn test_replace_swaps_old_for_new() {
    let root = instance();
    write_mod(root.path(), "jei-1.0.jar", "old");

    let plan = UpdatePlan {
        changed_addons: vec![
            UpdateFile::new("jei-2.0.jar")
                .with_download_url("https://x/jei-2.0.jar")
                .with_old_filename("jei-1.0.jar"),
        ],
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[("https://x/jei-2.0.jar", "new")], &[]).await;
    let mut seen = Vec::new();
    reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    assert!(!mod_exists(root.path(), "jei-1.0.jar"));
    assert_eq!(
        std::fs::read_to_string(root.path().join("mods/jei-2.0.jar")).unwrap(),
        "new"
    );
    assert_eq!(seen, vec![100.0]);
}

#[tokio::test]
async fn test_replace_same_filename_keeps_new_content() {
    let root = instance();
    write_mod(root.path(), "mod.jar", "old");

    let plan = UpdatePlan {
        changed_addons: vec![
            UpdateFile::new("mod.jar")
                .with_download_url("https://x/mod.jar")
                .with_old_filename("mod.jar"),
        ],
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[("https://x/mod.jar", "new")], &[]).await;
    reconciler
        .apply(plan, root.path(), &mut |_: f64| {})
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(root.path().join("mods/mod.jar")).unwrap(),
        "new"
    );
}

#[tokio::test]
async fn test_replace_delete_failure_is_fatal_and_skips_fetch() {
    let root = instance();

    let plan = UpdatePlan {
        changed_addons: vec![
            UpdateFile::new("new.jar")
                .with_download_url("https://x/new.jar")
                .with_old_filename("missing-old.jar"),
        ],
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[("https://x/new.jar", "new")], &[]).await;
    let err = reconciler
        .apply(plan, root.path(), &mut |_: f64| {})
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::ReplaceDeleteFailed { ref old_filename, .. } if old_filename == "missing-old.jar"
    ));
    assert!(reconciler.fetcher().calls().await.is_empty());
    assert!(!mod_exists(root.path(), "new.jar"));
}

#[tokio::test]
async fn test_replace_fetch_failure_stops_later_entries_and_phases() {
    let root = instance();
    for name in ["ok-1.jar", "broken-1.jar", "later-1.jar", "existing.jar"] {
        write_mod(root.path(), name, "old");
    }

    let plan = UpdatePlan {
        changed_addons: vec![
            UpdateFile::new("ok-2.jar")
                .with_download_url("https://x/ok-2.jar")
                .with_old_filename("ok-1.jar"),
            UpdateFile::new("broken-2.jar")
                .with_download_url("https://x/broken-2.jar")
                .with_old_filename("broken-1.jar"),
            UpdateFile::new("later-2.jar")
                .with_download_url("https://x/later-2.jar")
                .with_old_filename("later-1.jar"),
        ],
        removed_addons: vec![UpdateFile::new("existing.jar")],
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(
        &[("https://x/ok-2.jar", "ok"), ("https://x/later-2.jar", "later")],
        &["https://x/broken-2.jar"],
    )
    .await;
    let mut seen = Vec::new();
    let err = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::ReplaceFetchFailed { ref filename, .. } if filename == "broken-2.jar"
    ));
    assert_eq!(err.phase(), Some(Phase::Replace));
    assert_eq!(seen, vec![25.0]);
    assert_eq!(
        reconciler.fetcher().calls().await,
        vec!["https://x/ok-2.jar", "https://x/broken-2.jar"]
    );

    assert!(mod_exists(root.path(), "ok-2.jar"));
    // Old file is already gone: the directory is left mid-update
    assert!(!mod_exists(root.path(), "broken-1.jar"));
    assert!(mod_exists(root.path(), "later-1.jar"));
    assert!(!mod_exists(root.path(), "later-2.jar"));
    assert!(mod_exists(root.path(), "existing.jar"));
}

#[tokio::test]
async fn test_remove_failure_aborts_before_overrides() {
    let root = instance();
    write_mod(root.path(), "r1.jar", "x");
    write_mod(root.path(), "r3.jar", "x");

    let plan = UpdatePlan {
        removed_addons: vec![
            UpdateFile::new("r1.jar"),
            UpdateFile::new("missing.jar"),
            UpdateFile::new("r3.jar"),
        ],
        overrides: vec![OverrideEntry::file("overrides/README", "x")],
        overrides_total: 1,
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[], &[]).await;
    let mut seen = Vec::new();
    let err = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::RemoveFailed { ref filename, .. } if filename == "missing.jar"));
    assert_eq!(seen, vec![25.0]);
    assert!(!mod_exists(root.path(), "r1.jar"));
    assert!(mod_exists(root.path(), "r3.jar"));
    assert!(!root.path().join("README").exists());
}

#[tokio::test]
async fn test_missing_instance_root() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let reconciler = reconciler(&[], &[]).await;
    let err = reconciler
        .apply(UpdatePlan::default(), &missing, &mut |_: f64| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::InstanceNotFound { .. }));
    assert_eq!(err.phase(), None);
}

// ============================================================================
// Recoverable phases
// ============================================================================

#[tokio::test]
async fn test_disable_missing_file_is_recoverable() {
    let root = instance();
    write_mod(root.path(), "b.jar.disabled", "already");
    write_mod(root.path(), "d.jar", "d");

    let plan = UpdatePlan {
        disabled_addons: vec![UpdateFile::new("b.jar"), UpdateFile::new("d.jar")],
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[], &[]).await;
    let mut seen = Vec::new();
    let report = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    // Failed attempt still counts towards progress
    assert_eq!(seen, vec![50.0, 100.0]);
    assert_eq!(report.recoverable.len(), 1);
    assert_eq!(report.recoverable[0].phase, Phase::Disable);
    assert_eq!(report.recoverable[0].entry, "b.jar");

    assert_eq!(
        std::fs::read_to_string(root.path().join("mods/b.jar.disabled")).unwrap(),
        "already"
    );
    assert!(mod_exists(root.path(), "d.jar.disabled"));
    assert!(!mod_exists(root.path(), "d.jar"));
}

#[tokio::test]
async fn test_overrides_text_binary_and_paths() {
    let root = instance();

    let plan = UpdatePlan {
        overrides: vec![
            OverrideEntry::file("overrides/config/foo.txt", "Zm9v"),
            OverrideEntry::file("overrides/README", "plain text"),
            OverrideEntry::file("overrides/icons/a.png", "data:image/png;base64,iVBORw0KGgo="),
        ],
        overrides_total: 3,
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[], &[]).await;
    let mut seen = Vec::new();
    let report = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    assert_eq!(std::fs::read(root.path().join("config/foo.txt")).unwrap(), b"foo");
    assert_eq!(
        std::fs::read_to_string(root.path().join("README")).unwrap(),
        "plain text"
    );
    assert_eq!(
        std::fs::read(root.path().join("icons/a.png")).unwrap(),
        vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
    );
    assert_eq!(seen.len(), 3);
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_override_failures_are_collected_and_loop_continues() {
    let root = instance();

    let plan = UpdatePlan {
        overrides: vec![
            OverrideEntry::file("overrides/bad.png", "%%%not-base64%%%"),
            OverrideEntry::file("overrides/../escape", "x"),
            OverrideEntry {
                key: "overrides/config".to_string(),
                content: None,
                is_file: false,
            },
            OverrideEntry::file("overrides/good", "ok"),
        ],
        overrides_total: 3,
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[], &[]).await;
    let mut seen = Vec::new();
    let report = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    assert_eq!(report.recoverable.len(), 2);
    assert!(report.recoverable.iter().all(|f| f.phase == Phase::Overrides));
    assert_eq!(report.recoverable[0].entry, "overrides/bad.png");
    assert_eq!(report.skipped, 1);
    assert_eq!(report.completed, 1);
    assert_eq!(seen.len(), 1);
    assert!(root.path().join("good").exists());
    assert!(!root.path().join("bad.png").exists());
}

#[tokio::test]
async fn test_declined_override_write_does_not_advance() {
    let root = instance();
    std::fs::write(root.path().join("options"), "user settings").unwrap();

    let plan = UpdatePlan {
        overrides: vec![
            OverrideEntry::file("overrides/options", "pack settings"),
            OverrideEntry::file("overrides/servers", "list"),
        ],
        overrides_total: 2,
        ..UpdatePlan::default()
    };

    let reconciler = Reconciler::new(LiveFileMutator::no_overwrite(), MockContentFetcher::new());
    let mut seen = Vec::new();
    let report = reconciler
        .apply(plan, root.path(), &mut |p: f64| seen.push(p))
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(root.path().join("options")).unwrap(),
        "user settings"
    );
    assert_eq!(seen, vec![50.0]);
    assert_eq!(report.skipped, 1);
    assert!(report.recoverable.is_empty());
}

#[tokio::test]
async fn test_add_creates_missing_mods_dir() {
    let root = TempDir::new().unwrap();

    let plan = UpdatePlan {
        new_addons: vec![UpdateFile::new("a.jar").with_download_url("https://x/a.jar")],
        ..UpdatePlan::default()
    };

    let reconciler = reconciler(&[("https://x/a.jar", "a")], &[]).await;
    reconciler
        .apply(plan, root.path(), &mut |_: f64| {})
        .await
        .unwrap();

    assert!(root.path().join("mods/a.jar").exists());
}
