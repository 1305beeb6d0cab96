use shelfgap_catalog::vocab::{PlatformVocab, load_defs};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_yaml(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn load_platform_def_from_yaml() {
    let tmp = TempDir::new().unwrap();
    let vocab_dir = tmp.path().join("platforms");
    fs::create_dir(&vocab_dir).unwrap();

    write_yaml(
        &vocab_dir,
        "neo-geo.yaml",
        r#"
tag: Neo Geo
display_name: "SNK Neo Geo"
aliases:
  - Neo-Geo AES
  - AES
"#,
    );

    let defs = load_defs(&vocab_dir).unwrap();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].tag, "Neo Geo");
    assert_eq!(defs[0].aliases.len(), 2);
}

#[test]
fn overrides_extend_builtin_vocabulary() {
    let tmp = TempDir::new().unwrap();
    let vocab_dir = tmp.path().join("platforms");
    fs::create_dir(&vocab_dir).unwrap();

    write_yaml(
        &vocab_dir,
        "neo-geo.yaml",
        r#"
tag: Neo Geo
display_name: "SNK Neo Geo"
aliases:
  - AES
"#,
    );

    let vocab = PlatformVocab::with_overrides(&vocab_dir).unwrap();
    assert_eq!(vocab.canonical("AES"), "Neo Geo");
    // Built-ins still resolve.
    assert_eq!(vocab.canonical("PlayStation 2"), "PS2");
}

#[test]
fn later_defs_win_alias_collisions() {
    let tmp = TempDir::new().unwrap();
    let vocab_dir = tmp.path().join("platforms");
    fs::create_dir(&vocab_dir).unwrap();

    // Re-point the "DC" alias away from Dreamcast.
    write_yaml(
        &vocab_dir,
        "dc-override.yaml",
        r#"
tag: Dreamcast 2
display_name: "Hypothetical Dreamcast 2"
aliases:
  - DC
"#,
    );

    let vocab = PlatformVocab::with_overrides(&vocab_dir).unwrap();
    assert_eq!(vocab.canonical("DC"), "Dreamcast 2");
}

#[test]
fn missing_dir_returns_empty() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nonexistent");
    assert!(load_defs(&missing).unwrap().is_empty());
}

#[test]
fn parse_error_carries_path() {
    let tmp = TempDir::new().unwrap();
    let vocab_dir = tmp.path().join("platforms");
    fs::create_dir(&vocab_dir).unwrap();
    write_yaml(&vocab_dir, "broken.yaml", ": not : valid : yaml : [");

    let err = load_defs(&vocab_dir).unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}
