use std::path::PathBuf;

use docpress::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".docpressrc");
    let content = r#"
# comment
--no-highlight

--theme light

--docs-dir=public/docs
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_highlight);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.docs_dir, Some(PathBuf::from("public/docs")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".docpressrc");
    let content = "--json\n--theme light\n--base-url https://staging.example.com\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "docpress".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--no-highlight".to_string(),
        "render".to_string(),
        "README.md".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.json, "file flags should remain enabled");
    assert!(effective.no_highlight, "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(
        effective.base_url.as_deref(),
        Some("https://staging.example.com"),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "docpress".to_string(),
        "--theme=dark".to_string(),
        "--base-url=http://localhost:8080".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::Dark));
    assert_eq!(flags.base_url.as_deref(), Some("http://localhost:8080"));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        json: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        no_highlight: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.json);
    assert!(merged.no_highlight);
}
