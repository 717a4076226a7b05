// tests/integration_analyze.rs
//! End-to-end runs over temporary source trees.

use anyhow::Result;
use depscope_core::config::{Config, LayoutStrategy};
use depscope_core::error::{AnalysisError, ErrorClass, WarningKind};
use depscope_core::graph::Role;
use depscope_core::report;
use depscope_core::{analyze, Analysis};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// --- Helpers ---

fn tree(files: &[(&str, &str)]) -> Result<TempDir> {
    let dir = TempDir::new()?;
    for (rel, content) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(dir)
}

fn run(dir: &TempDir) -> Result<Analysis> {
    Ok(analyze(dir.path(), &Config::default())?)
}

fn labels(analysis: &Analysis) -> Vec<&str> {
    analysis.graph.nodes().iter().map(|n| n.label()).collect()
}

// --- Scenarios ---

#[test]
fn test_single_import() -> Result<()> {
    let dir = tree(&[("a.ts", "import \"./b\";\n"), ("b.ts", "export const b = 1;\n")])?;
    let analysis = run(&dir)?;

    assert_eq!(labels(&analysis), vec!["a.ts", "b.ts"]);
    assert_eq!(analysis.graph.edge_count(), 1);

    let a = analysis.root.join("a.ts");
    let b = analysis.root.join("b.ts");
    assert!(analysis.graph.contains_edge(&a, &b));

    let Some(node_a) = analysis.graph.node(&a) else {
        panic!("a.ts missing");
    };
    let Some(node_b) = analysis.graph.node(&b) else {
        panic!("b.ts missing");
    };
    assert_eq!(node_a.dependency_count(), 1);
    assert_eq!(node_b.dependent_count(), 1);
    assert!(!node_a.is_circular() && !node_b.is_circular());
    assert_eq!(analysis.stats.circular_dependencies, 0);
    Ok(())
}

#[test]
fn test_mutual_import() -> Result<()> {
    let dir = tree(&[
        ("a.ts", "import { b } from './b';\nexport const a = b;\n"),
        ("b.ts", "import { a } from './a';\nexport const b = a;\n"),
    ])?;
    let analysis = run(&dir)?;

    assert!(analysis.graph.nodes().iter().all(|n| n.is_circular()));
    assert_eq!(analysis.stats.circular_dependencies, 2);
    assert_eq!(analysis.stats.total_dependencies, 2);
    Ok(())
}

#[test]
fn test_unresolved_import_dropped() -> Result<()> {
    let dir = tree(&[("a.ts", "import x from './missing';\n")])?;
    let analysis = run(&dir)?;

    assert_eq!(analysis.graph.len(), 1);
    assert_eq!(analysis.graph.edge_count(), 0);
    assert!(analysis.warnings.is_empty(), "unresolved is not a warning");
    Ok(())
}

#[test]
fn test_ignored_directory_only() -> Result<()> {
    let dir = tree(&[("node_modules/x.ts", "export {};\n")])?;
    let analysis = run(&dir)?;

    assert!(analysis.graph.is_empty());
    assert_eq!(analysis.stats.total_files, 0);
    Ok(())
}

// --- Resolution ---

#[test]
fn test_directory_index_and_reexports() -> Result<()> {
    let dir = tree(&[
        ("src/app.tsx", "import { Button } from './ui';\nexport * from './api/client';\n"),
        ("src/ui/index.ts", "export { Button } from './Button';\n"),
        ("src/ui/Button.tsx", "export const Button = () => <button />;\n"),
        ("src/api/client.js", "import axios from 'axios';\nexport default axios;\n"),
    ])?;
    let analysis = run(&dir)?;
    let root = &analysis.root;

    assert_eq!(analysis.graph.len(), 4);
    assert!(analysis
        .graph
        .contains_edge(&root.join("src/app.tsx"), &root.join("src/ui/index.ts")));
    assert!(analysis
        .graph
        .contains_edge(&root.join("src/app.tsx"), &root.join("src/api/client.js")));
    assert!(analysis
        .graph
        .contains_edge(&root.join("src/ui/index.ts"), &root.join("src/ui/Button.tsx")));
    // `axios` is a package, not a project file.
    assert_eq!(analysis.stats.total_dependencies, 3);
    Ok(())
}

#[test]
fn test_duplicate_imports_collapse() -> Result<()> {
    let dir = tree(&[
        ("a.ts", "import { x } from './b';\nimport type { Y } from './b.ts';\n"),
        ("b.ts", "export const x = 1; export type Y = number;\n"),
    ])?;
    let analysis = run(&dir)?;
    assert_eq!(analysis.graph.edge_count(), 1);
    Ok(())
}

// --- Failure isolation ---

#[test]
fn test_parse_failure_is_warning() -> Result<()> {
    let dir = tree(&[
        ("good.ts", "import './bad';\n"),
        ("bad.ts", "import { from './good'\nexport = = ;\n"),
    ])?;
    let analysis = run(&dir)?;

    assert_eq!(analysis.graph.len(), 2);
    assert_eq!(analysis.warnings.len(), 1);
    assert_eq!(analysis.warnings[0].kind, WarningKind::Parse);
    assert!(analysis.warnings[0].path.ends_with("bad.ts"));

    let bad = analysis.root.join("bad.ts");
    let Some(node) = analysis.graph.node(&bad) else {
        panic!("bad.ts should still be a node");
    };
    assert_eq!(node.dependency_count(), 0);
    assert_eq!(node.dependent_count(), 1);
    Ok(())
}

#[test]
fn test_unreadable_text_is_warning() -> Result<()> {
    let dir = tree(&[("a.ts", "import './bin';\n"), ("b.ts", "export {};\n")])?;
    fs::write(dir.path().join("bin.ts"), [0xff_u8, 0xfe, 0x00])?;
    let analysis = run(&dir)?;

    assert_eq!(analysis.graph.len(), 3);
    assert_eq!(analysis.warnings.len(), 1);
    assert_eq!(analysis.warnings[0].kind, WarningKind::Read);
    assert!(analysis.warnings[0].path.ends_with("bin.ts"));

    let Some(node) = analysis.graph.node(&analysis.root.join("bin.ts")) else {
        panic!("bin.ts should still be a node");
    };
    assert_eq!(node.dependency_count(), 0);
    assert_eq!(node.dependent_count(), 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlink_collapses_into_target() -> Result<()> {
    let dir = tree(&[
        ("a.ts", "import './link';\n"),
        ("real.ts", "export const r = 1;\n"),
    ])?;
    std::os::unix::fs::symlink(dir.path().join("real.ts"), dir.path().join("link.ts"))?;
    let analysis = run(&dir)?;

    assert_eq!(labels(&analysis), vec!["a.ts", "real.ts"]);
    let real = analysis.root.join("real.ts");
    assert!(analysis.graph.contains_edge(&analysis.root.join("a.ts"), &real));
    assert_eq!(
        analysis.graph.node(&real).map(|n| n.relative_path()),
        Some("real.ts")
    );
    Ok(())
}

#[test]
fn test_missing_root_is_not_found() {
    let result = analyze(Path::new("/no/such/depscope/root"), &Config::default());
    let Err(err) = result else {
        panic!("missing root must fail");
    };
    assert!(matches!(err, AnalysisError::NotFound { .. }));
    assert_eq!(err.class(), ErrorClass::NotFound);
}

#[test]
fn test_empty_root_is_input_error() {
    let result = analyze(Path::new(""), &Config::default());
    let Err(err) = result else {
        panic!("empty root must fail");
    };
    assert_eq!(err.class(), ErrorClass::Client);
}

#[test]
fn test_file_root_is_input_error() -> Result<()> {
    let dir = tree(&[("a.ts", "")])?;
    let result = analyze(&dir.path().join("a.ts"), &Config::default());
    assert!(matches!(result, Err(AnalysisError::Input { .. })));
    Ok(())
}

// --- Classification through the pipeline ---

#[test]
fn test_roles() -> Result<()> {
    let dir = tree(&[
        ("main.ts", "import './utils';\nimport './store';\n"),
        ("utils.ts", "export const u = 1;\n"),
        ("store.ts", "export const s = 1;\n"),
        ("lonely.ts", "export const l = 1;\n"),
    ])?;
    let analysis = run(&dir)?;
    let role = |name: &str| analysis.graph.node(&analysis.root.join(name)).map(|n| n.role());

    assert_eq!(role("utils.ts"), Some(Role::Utility));
    assert_eq!(role("lonely.ts"), Some(Role::Standalone));
    assert_eq!(role("store.ts"), Some(Role::Core));
    assert_eq!(role("main.ts"), Some(Role::Core));
    Ok(())
}

// --- Config ---

#[test]
fn test_config_file_at_root_is_used() -> Result<()> {
    let dir = tree(&[
        ("depscope.toml", "[scan]\nignore_dirs = [\"vendor\"]\n\n[layout]\nstrategy = \"zoned\"\nseed = 7\n"),
        ("vendor/lib.ts", "export {};\n"),
        ("dist/out.ts", "export {};\n"),
        ("a.ts", "export {};\n"),
    ])?;
    let config = Config::load(dir.path(), None)?;
    assert_eq!(config.layout.strategy, LayoutStrategy::Zoned);

    let analysis = analyze(dir.path(), &config)?;
    assert_eq!(labels(&analysis), vec!["a.ts", "out.ts"]);
    Ok(())
}

// --- Output shape ---

#[test]
fn test_json_shape() -> Result<()> {
    let dir = tree(&[("a.ts", "import './b';\n"), ("b.ts", "")])?;
    let analysis = run(&dir)?;
    let json = report::to_json(&analysis.report(), false)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(value["stats"]["totalFiles"], 2);
    assert_eq!(value["stats"]["totalDependencies"], 1);
    assert_eq!(value["stats"]["circularDependencies"], 0);

    let node = &value["nodes"][0];
    for key in ["id", "label", "dependencyCount", "dependentCount", "isCircular", "role"] {
        assert!(node.get(key).is_some(), "node missing {key}");
    }
    assert!(node["position"]["x"].is_number());
    assert_eq!(node["role"], "core");

    let a = analysis.root.join("a.ts");
    let b = analysis.root.join("b.ts");
    let edge = &value["edges"][0];
    assert_eq!(
        edge["id"],
        format!("e-{}-{}", a.display(), b.display()).as_str()
    );
    assert_eq!(edge["source"], a.to_string_lossy().as_ref());
    assert!(value["warnings"].as_array().is_some_and(Vec::is_empty));
    Ok(())
}
