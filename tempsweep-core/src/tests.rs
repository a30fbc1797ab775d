//! End-to-end scenarios for tempsweep-core.

use crate::*;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &[u8]) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("tempsweep_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(dir.join("lib")).unwrap();
    dir
}

fn lib(root: &Path, rel: &str, content: &str) {
    write_file(&root.join("lib").join(rel), content.as_bytes());
}

fn sep(p: &str) -> String {
    p.replace('/', &MAIN_SEPARATOR.to_string())
}

fn analyze(root: &Path) -> AnalysisResult {
    Tempsweep::new(root).detect_package(false).analyze().unwrap()
}

#[test]
fn test_isolated_debug_file_is_safe_and_main_is_critical() {
    let root = setup_temp_project();
    lib(&root, "main.dart", "void main() {}");
    lib(&root, "debug_x.dart", "void x() {}");

    let result = analyze(&root);
    assert_eq!(result.assessment("debug_x.dart").unwrap().tier, RiskTier::Safe);

    let files = FileClassifier::default();
    let critical = CriticalFileSet::default();
    let rc = RiskClassifier::new(&files, &critical, RiskPolicy::default());
    assert_eq!(rc.classify("main.dart", &result.graph), RiskTier::Critical);

    let plan = result.plan();
    assert!(plan.phases.iter().all(|p| !p.files.iter().any(|f| f == "main.dart")));
    assert_eq!(plan.phases[0].files, vec!["debug_x.dart"]);
}

#[test]
fn test_six_production_importers_is_high() {
    let root = setup_temp_project();
    lib(&root, "fix_a.dart", "");
    for i in 1..=6 {
        lib(&root, &format!("p{}.dart", i), "import 'fix_a.dart';");
    }

    let result = analyze(&root);
    let a = result.assessment("fix_a.dart").unwrap();
    assert_eq!(a.tier, RiskTier::High);
    assert_eq!(a.production_importers.len(), 6);
}

#[test]
fn test_five_production_importers_is_medium() {
    let root = setup_temp_project();
    lib(&root, "fix_a.dart", "");
    for i in 1..=5 {
        lib(&root, &format!("p{}.dart", i), "import \"fix_a.dart\";");
    }

    let result = analyze(&root);
    assert_eq!(result.assessment("fix_a.dart").unwrap().tier, RiskTier::Medium);
}

#[test]
fn test_only_temporary_importers_never_above_low() {
    let root = setup_temp_project();
    lib(&root, "debug_core.dart", "");
    for name in [
        "test_a.dart",
        "test_b.dart",
        "quick_c.dart",
        "fix_d.dart",
        "simple_e.dart",
        "deep_f.dart",
        "dual_g.dart",
    ] {
        lib(&root, name, "import 'debug_core.dart';");
    }

    let result = analyze(&root);
    assert_eq!(result.assessment("debug_core.dart").unwrap().tier, RiskTier::Low);
    for a in &result.assessments {
        assert!(a.tier <= RiskTier::Low, "{} got {}", a.path, a.tier);
    }
}

#[test]
fn test_unreadable_file_warns_and_run_completes() {
    let root = setup_temp_project();
    lib(&root, "home.dart", "import 'test_widget.dart';");
    lib(&root, "test_widget.dart", "");
    lib(&root, "debug_orphan.dart", "");
    write_file(&root.join("lib/debug_broken.dart"), &[0x69, 0x6d, 0x70, 0xff, 0xfe, 0xfd]);

    let result = analyze(&root);

    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].path, "debug_broken.dart");
    assert!(result.graph.imports_of("debug_broken.dart").is_empty());
    assert_eq!(result.scanned, 4);

    assert_eq!(result.assessment("test_widget.dart").unwrap().tier, RiskTier::Medium);
    assert_eq!(result.assessment("debug_orphan.dart").unwrap().tier, RiskTier::Safe);

    let summary = render_scan_summary(&result);
    assert!(summary.starts_with("Scan complete: 4 file(s)"));
    assert!(summary.contains("production files: 1"));
    assert!(summary.ends_with("unreadable (skipped): 1\n"));
}

#[test]
fn test_rescan_is_deterministic() {
    let root = setup_temp_project();
    lib(&root, "main.dart", "import 'a/home.dart';\nimport 'debug_x.dart';");
    lib(&root, "a/home.dart", "import 'debug_x.dart';\nimport 'debug_x.dart';");
    lib(&root, "a/b/test_y.dart", "import 'a/home.dart';");
    lib(&root, "debug_x.dart", "");
    lib(&root, "z.dart", "import 'package:flutter/material.dart';");

    let first = analyze(&root);
    let second = analyze(&root);

    assert_eq!(first.graph, second.graph);
    assert_eq!(first.graph.imports_map(), second.graph.imports_map());
    assert_eq!(first.graph.imported_by_map(), second.graph.imported_by_map());
    assert_eq!(first.assessments, second.assessments);
    assert_eq!(
        first.graph.importers_of("debug_x.dart"),
        vec![sep("a/home.dart"), sep("a/home.dart"), "main.dart".to_string()]
    );
}

#[test]
fn test_package_imports_resolve_to_nested_paths() {
    let root = setup_temp_project();
    write_file(&root.join("pubspec.yaml"), b"name: chat_app\n");
    lib(&root, "screens/chat.dart", "import 'package:chat_app/screens/debug_overlay.dart';");
    lib(&root, "screens/debug_overlay.dart", "");

    let result = Tempsweep::new(&root).analyze().unwrap();
    assert_eq!(result.package.as_deref(), Some("chat_app"));

    let overlay = sep("screens/debug_overlay.dart");
    let a = result.assessment(&overlay).unwrap();
    assert_eq!(a.tier, RiskTier::Medium);
    assert_eq!(a.importers, vec![sep("screens/chat.dart")]);
}

#[test]
fn test_critical_temporary_file_goes_to_do_not_delete() {
    let root = setup_temp_project();
    lib(&root, "debug_keep.dart", "");
    lib(&root, "debug_drop.dart", "import 'debug_keep.dart';");

    let result = Tempsweep::new(&root)
        .detect_package(false)
        .critical_files(["main.dart", "debug_keep.dart"])
        .analyze()
        .unwrap();

    assert_eq!(result.assessment("debug_keep.dart").unwrap().tier, RiskTier::Critical);
    let plan = result.plan();
    assert_eq!(plan.do_not_delete, vec!["debug_keep.dart"]);
    assert!(plan.phases.iter().all(|p| !p.files.contains(&"debug_keep.dart".to_string())));
}

#[test]
fn test_critical_importer_makes_high() {
    let root = setup_temp_project();
    lib(&root, "main.dart", "import 'simple_boot.dart';");
    lib(&root, "simple_boot.dart", "");

    let result = analyze(&root);
    let a = result.assessment("simple_boot.dart").unwrap();
    assert_eq!(a.tier, RiskTier::High);
    assert_eq!(a.critical_importers, vec!["main.dart"]);
}

#[test]
fn test_missing_lib_is_fatal() {
    let root = setup_temp_project();
    fs::remove_dir_all(root.join("lib")).unwrap();

    let err = Tempsweep::new(&root).analyze().unwrap_err();
    match err.downcast_ref::<SweepError>() {
        Some(SweepError::MissingSourceDir { dir, .. }) => assert_eq!(dir, "lib"),
        other => panic!("expected MissingSourceDir, got {:?}", other),
    }
}

#[test]
fn test_config_file_thresholds_apply() {
    let root = setup_temp_project();
    write_file(&root.join(CONFIG_FILE), b"[risk]\nhigh_threshold = 1\n");
    lib(&root, "fix_a.dart", "");
    lib(&root, "p1.dart", "import 'fix_a.dart';");
    lib(&root, "p2.dart", "import 'fix_a.dart';");

    let config = SweepConfig::load(&root).unwrap();
    let result = Tempsweep::new(&root)
        .with_config(config)
        .detect_package(false)
        .analyze()
        .unwrap();
    assert_eq!(result.assessment("fix_a.dart").unwrap().tier, RiskTier::High);
}

#[test]
fn test_write_reports_json_content() {
    let root = setup_temp_project();
    lib(&root, "main.dart", "import 'home.dart';");
    lib(&root, "home.dart", "import 'test_data.dart';");
    lib(&root, "test_data.dart", "import 'home.dart';");
    lib(&root, "debug_a.dart", "");
    lib(&root, "fix_b.dart", "");
    lib(&root, "quick_c.dart", "import 'fix_b.dart';");

    let result = analyze(&root);
    let plan = result.plan();
    let written = write_reports(&result, &plan, &root.join("out")).unwrap();
    assert!(written.markdown.exists());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written.json).unwrap()).unwrap();

    assert_eq!(json["summary"]["total_files"], 4);
    assert_eq!(json["summary"]["production_files"], 2);
    assert_eq!(json["summary"]["by_category"]["debug"], 1);
    assert_eq!(json["summary"]["by_category"]["test"], 1);
    assert_eq!(json["summary"]["by_category"]["fix"], 1);
    assert_eq!(json["summary"]["by_category"]["other"], 1);
    assert_eq!(json["summary"]["by_risk"]["safe"], 2);
    assert_eq!(json["summary"]["by_risk"]["low"], 1);
    assert_eq!(json["summary"]["by_risk"]["medium"], 1);
    assert_eq!(json["summary"]["by_risk"]["critical"], 0);

    let medium = json["files_by_risk"]["MEDIUM"].as_array().unwrap();
    assert_eq!(medium.len(), 1);
    assert_eq!(medium[0]["path"], "test_data.dart");
    assert_eq!(medium[0]["imported_by"][0], "home.dart");
    assert_eq!(medium[0]["imports"][0], "home.dart");
    assert!(json["files_by_risk"]["CRITICAL"].as_array().unwrap().is_empty());
    assert_eq!(json["plan"]["phases"].as_array().unwrap().len(), 4);
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_markdown_mirrors_assessments() {
    let root = setup_temp_project();
    lib(&root, "home.dart", "import 'test_data.dart';");
    lib(&root, "test_data.dart", "import 'home.dart';");
    lib(&root, "debug_a.dart", "");

    let result = analyze(&root);
    let md = render_markdown(&result, &result.plan());

    assert!(md.contains("## SAFE"));
    assert!(md.contains("### `debug_a.dart`"));
    assert!(md.contains("Not imported by any file (isolated)."));
    assert!(md.contains("**Imported by 1 file(s):**"));
    assert!(md.contains("### Phase 3: Medium risk"));
    assert!(!md.contains("## CRITICAL"));
}

#[test]
fn test_console_caps_importer_and_phase_lists() {
    let root = setup_temp_project();
    lib(&root, "test_shared.dart", "");
    for i in 0..7 {
        lib(&root, &format!("test_user_{}.dart", i), "import 'test_shared.dart';");
    }
    for i in 0..12 {
        lib(&root, &format!("debug_{:02}.dart", i), "");
    }

    let result = analyze(&root);
    let limits = ReportLimits::default();
    let text = render_console(&result, &result.plan(), &limits);

    assert!(text.contains("imported by 7 file(s):"));
    assert!(text.contains("... and 2 more\n"));
    // 12 debug files + 7 test users are isolated, phase 1 shows 10 of 19
    assert!(text.contains("... and 9 more file(s)"));
    assert!(render_scan_summary(&result).contains("debug files: 12"));
}

#[test]
fn test_custom_extension_and_source_dir() {
    let root = setup_temp_project();
    write_file(&root.join("src/app.ts"), b"import \"./debug_probe\";");
    write_file(&root.join("src/debug_probe.ts"), b"");
    write_file(&root.join("src/ignored.dart"), b"");

    let result = Tempsweep::new(&root)
        .source_dir("src")
        .extension("ts")
        .detect_package(false)
        .analyze()
        .unwrap();

    assert_eq!(result.scanned, 2);
    // Relative "./" specifiers are recorded verbatim and do not resolve
    assert_eq!(result.assessment("debug_probe.ts").unwrap().tier, RiskTier::Safe);
    assert_eq!(result.graph.imports_of("app.ts"), vec![sep("./debug_probe")]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_source_file_contributes_imports() {
    let root = setup_temp_project();
    write_file(&root.join("shared/debug_real.dart"), b"import 'fix_a.dart';");
    lib(&root, "fix_a.dart", "");
    std::os::unix::fs::symlink(
        root.join("shared/debug_real.dart"),
        root.join("lib/debug_link.dart"),
    )
    .unwrap();

    let result = analyze(&root);
    assert_eq!(result.scanned, 2);
    assert_eq!(result.files.debug, vec!["debug_link.dart"]);
    assert_eq!(result.graph.importers_of("fix_a.dart"), vec!["debug_link.dart"]);
    assert_eq!(result.assessment("fix_a.dart").unwrap().tier, RiskTier::Low);
    assert_eq!(result.assessment("debug_link.dart").unwrap().tier, RiskTier::Safe);
}
