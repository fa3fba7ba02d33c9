mod common;

use common::test_workspace;
use rigging::{reconcile, Format, ManagedFile, Outcome, ReconcileError};
use serde_json::json;
use std::fs;

#[tokio::test]
async fn test_creates_missing_toml_file() {
    let (_dir, ws) = test_workspace();

    let unit = ManagedFile::new("app", Format::Toml)
        .expecting(json!({"tool": {"x": {"version": "1.0"}}}));

    let outcome = reconcile(&unit, &ws).await.expect("Should reconcile");
    assert_eq!(outcome, Outcome::Created);

    let path = ws.root().join("app.toml");
    let content = fs::read_to_string(&path).expect("Should read app.toml");
    assert!(content.contains("[tool.x]"));

    let loaded = Format::Toml.load(&path).await.expect("Should parse");
    assert_eq!(loaded, json!({"tool": {"x": {"version": "1.0"}}}));
}

#[tokio::test]
async fn test_superset_file_is_left_alone() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join("app.toml");

    // User already extended the managed config.
    fs::write(&path, "[tool.x]\nversion = \"1.0\"\ndebug = true\n").unwrap();

    let unit = ManagedFile::new("app", Format::Toml)
        .expecting(json!({"tool": {"x": {"version": "1.0"}}}));

    let outcome = reconcile(&unit, &ws).await.expect("Should reconcile");
    assert_eq!(outcome, Outcome::Unchanged);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "[tool.x]\nversion = \"1.0\"\ndebug = true\n");
}

#[tokio::test]
async fn test_missing_key_is_merged_back() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join("app.toml");

    // User deleted the required key but added their own.
    fs::write(&path, "[tool.x]\ndebug = true\n").unwrap();

    let unit = ManagedFile::new("app", Format::Toml)
        .expecting(json!({"tool": {"x": {"version": "1.0"}}}));

    let outcome = reconcile(&unit, &ws).await.expect("Should reconcile");
    assert_eq!(outcome, Outcome::Merged);

    let loaded = Format::Toml.load(&path).await.expect("Should parse");
    assert_eq!(loaded, json!({"tool": {"x": {"debug": true, "version": "1.0"}}}));
}

#[tokio::test]
async fn test_repeat_runs_are_idempotent() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join("app.toml");

    let unit = ManagedFile::new("app", Format::Toml)
        .expecting(json!({"tool": {"x": {"version": "1.0", "deps": ["a", "b"]}}}));

    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Created);
    let first = fs::read_to_string(&path).unwrap();

    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Unchanged);
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_merge_preserves_user_content_and_key_order() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join("settings.json");

    fs::write(&path, "{\n  \"b\": 2,\n  \"extra\": 1\n}").unwrap();

    let unit = ManagedFile::new("settings", Format::Json).expecting(json!({"a": 1, "b": 2}));

    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Merged);

    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let keys: Vec<&str> = merged
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    // Existing keys keep their place, missing keys land at the end.
    assert_eq!(keys, vec!["b", "extra", "a"]);
    assert_eq!(merged, json!({"b": 2, "extra": 1, "a": 1}));
}

#[tokio::test]
async fn test_unwanted_unit_touches_nothing() {
    let (_dir, ws) = test_workspace();

    let unit = ManagedFile::new("legacy", Format::Yaml)
        .unwanted()
        .expecting(json!({"obsolete": true}));

    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Skipped);

    let entries = fs::read_dir(ws.root()).unwrap().count();
    assert_eq!(entries, 0);
}

#[tokio::test]
async fn test_dotfile_lines_unit_appends_missing_entries() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join(".gitignore");

    fs::write(&path, "node_modules/\n\n# mine\ntarget/\n").unwrap();

    let unit = ManagedFile::new("", Format::Lines)
        .with_extension("gitignore")
        .expecting(json!(["target/", "dist/"]));

    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Merged);

    let content = fs::read_to_string(&path).unwrap();
    // User lines, blanks and comments stay put; only the missing entry lands.
    assert_eq!(content, "node_modules/\n\n# mine\ntarget/\ndist/\n");
}

#[tokio::test]
async fn test_text_marker_with_custom_validity() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join("NOTICE");

    let marker = "Managed by rigging.";
    let unit = ManagedFile::new("NOTICE", Format::Text)
        .expecting(json!(format!("{marker}\n")))
        .validated_by(|expected, current| {
            match (expected.as_str(), current.as_str()) {
                (Some(want), Some(have)) => have.contains(want.trim_end()),
                _ => false,
            }
        });

    // Missing: created with the expected content.
    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Created);
    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{marker}\n"));

    // The user appended their own text around the marker line.
    fs::write(&path, format!("Preamble.\n{marker}\nPostscript.\n")).unwrap();
    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Unchanged);
}

#[tokio::test]
async fn test_presence_only_marker_file() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join(".keep");

    let unit = ManagedFile::new("", Format::Text).with_extension("keep");

    // Missing: an empty file is created.
    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Created);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    // Whatever the user put there later is already enough.
    fs::write(&path, "anything at all\n").unwrap();
    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Unchanged);
}

#[tokio::test]
async fn test_managed_manifest_lifecycle() {
    let (_dir, ws) = test_workspace();
    let path = ws.root().join("app.toml");

    let unit = ManagedFile::new("app", Format::Toml)
        .expecting(json!({"tool": {"x": {"version": "1.0"}}}));

    // Empty directory: the file is created with exactly the expected structure.
    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Created);
    let loaded = Format::Toml.load(&path).await.expect("Should parse");
    assert_eq!(loaded, json!({"tool": {"x": {"version": "1.0"}}}));

    // The user extends the managed table; a re-run leaves the file byte-identical.
    fs::write(&path, "[tool.x]\nversion = \"1.0\"\ndebug = true\n").unwrap();
    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Unchanged);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[tool.x]\nversion = \"1.0\"\ndebug = true\n"
    );

    // The user strips the required key; the next run merges it back in.
    fs::write(&path, "[tool.x]\n").unwrap();
    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Merged);
    let loaded = Format::Toml.load(&path).await.expect("Should parse");
    assert_eq!(loaded, json!({"tool": {"x": {"version": "1.0"}}}));
}

#[tokio::test]
async fn test_parse_error_propagates() {
    let (_dir, ws) = test_workspace();
    fs::write(ws.root().join("broken.json"), "not json at all").unwrap();

    let unit = ManagedFile::new("broken", Format::Json).expecting(json!({"a": 1}));

    let err = reconcile(&unit, &ws).await.unwrap_err();
    assert!(matches!(err, ReconcileError::FormatError(_)));
}

#[tokio::test]
async fn test_unit_in_nested_directory_creates_parents() {
    let (_dir, ws) = test_workspace();

    let unit = ManagedFile::new("ci", Format::Yaml)
        .in_dir(".github/workflows")
        .with_extension("yml")
        .expecting(json!({"name": "ci", "on": ["push"]}));

    assert_eq!(reconcile(&unit, &ws).await.unwrap(), Outcome::Created);

    let path = ws.root().join(".github/workflows/ci.yml");
    let loaded = Format::Yaml.load(&path).await.expect("Should parse");
    assert_eq!(loaded, json!({"name": "ci", "on": ["push"]}));
}
