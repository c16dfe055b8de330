use anyhow::Result;

use crate::{CliTest, run};

const SOURCE: &str = r#"{
  "i18n.page.logo_alt_text": "Our logo.",
  "i18n.page.title": "Title"
}
"#;

const GERMAN: &str = r#"{
  "i18n.page.logo_alt_text": "Unser Logo.",
  "i18n.page.title": "Titel"
}
"#;

const PAGE: &str = r#"
export const title = t("i18n.page.title");
export const logoAlt = t('i18n.page.logo_alt_text');
"#;

fn clean_project() -> Result<CliTest> {
    CliTest::with_files(&[
        ("src/i18n/en-US.json", SOURCE),
        ("src/i18n/de.json", GERMAN),
        ("src/page.ts", PAGE),
    ])
}

#[test]
fn test_clean_project_passes_every_check() -> Result<()> {
    let test = clean_project()?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    for check in [
        "invalid-keys",
        "nonexistent-keys",
        "unused-keys",
        "non-source-keys",
        "repeat-keys",
        "repeat-values",
        "ordered-keys",
        "missing-keys",
        "nested-keys",
        "alt-texts",
        "aria-labels",
    ] {
        assert!(stdout.contains(&format!("✓ {check}:")), "missing {check}: {stdout}");
    }
    assert!(stdout.contains("✓ Checked 1 source file, 2 locale files - no issues found"));

    Ok(())
}

#[test]
fn test_misnamed_key() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/i18n/en-US.json",
            r#"{"i18n.wrong_identifier_path.content_reference": "Content"}"#,
        ),
        (
            "src/test_file.ts",
            "t('i18n.wrong_identifier_path.content_reference');",
        ),
    ])?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("✘ invalid-keys: There is 1 i18n key that is not named correctly."));
    assert!(stdout.contains(
        "error: \"i18n.wrong_identifier_path.content_reference\"  invalid-key-name"
    ));
    assert!(stdout.contains("= hint: rename to i18n.test_file.content_reference"));
    assert!(stdout.contains("= used: src/test_file.ts"));
    assert!(stdout.contains("help: run `i18n-check check invalid-keys --fix`"));

    Ok(())
}

#[test]
fn test_invalid_key_format() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/i18n/en-US.json", r#"{"i18n.page.Invalid-Key": "x"}"#),
        ("src/page.ts", "t('i18n.page.Invalid-Key');"),
    ])?;

    let (code, stdout, _) = run(test.check_command().arg("invalid-keys"))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("not formatted correctly"));
    assert!(stdout.contains("error: \"i18n.page.Invalid-Key\"  invalid-key-format"));

    Ok(())
}

#[test]
fn test_selected_check_only() -> Result<()> {
    let test = clean_project()?;
    test.write_file("src/other.ts", "t('i18n.other.missing');")?;

    let (code, stdout, _) = run(test.check_command().arg("nonexistent-keys"))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("✘ nonexistent-keys: There is 1 i18n key that is not in the i18n source file."));
    assert!(stdout.contains("error: \"i18n.other.missing\"  nonexistent-key"));
    assert!(stdout.contains("--> src/other.ts:1:4"));
    assert!(!stdout.contains("unused-keys"));

    Ok(())
}

#[test]
fn test_unused_and_missing_keys() -> Result<()> {
    let test = clean_project()?;
    test.write_file(
        "src/i18n/en-US.json",
        r#"{
  "i18n.page.logo_alt_text": "Our logo.",
  "i18n.page.subtitle": "Subtitle",
  "i18n.page.title": "Title"
}
"#,
    )?;

    let (code, stdout, _) = run(test.check_command().args(["unused-keys", "missing-keys"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: \"i18n.page.subtitle\"  unused-key"));
    assert!(stdout.contains("✘ missing-keys: There is 1 locale file with missing keys."));
    assert!(stdout.contains("--> src/i18n/de.json"));
    assert!(stdout.contains("✘ 2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_non_source_and_repeat_keys() -> Result<()> {
    let test = clean_project()?;
    test.write_file(
        "src/i18n/de.json",
        r#"{
  "i18n.page.logo_alt_text": "Unser Logo.",
  "i18n.page.old": "Alt",
  "i18n.page.title": "Titel",
  "i18n.page.title": "Titel 2"
}
"#,
    )?;

    let (code, stdout, _) =
        run(test.check_command().args(["non-source-keys", "repeat-keys"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: \"i18n.page.old\"  non-source-key"));
    assert!(stdout.contains("--> src/i18n/de.json:3:3"));
    assert!(stdout.contains("✘ repeat-keys: Duplicate keys found. All i18n keys must be unique."));
    assert!(stdout.contains("--> src/i18n/de.json:5:3"));

    Ok(())
}

#[test]
fn test_repeat_values() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/i18n/en-US.json",
            r#"{"i18n.sub_dir_first_file.save": "Save", "i18n.sub_dir_second_file.save": "save."}"#,
        ),
        ("src/sub_dir/sub_dir_first_file.ts", "t('i18n.sub_dir_first_file.save')"),
        ("src/sub_dir/sub_dir_second_file.ts", "t('i18n.sub_dir_second_file.save')"),
    ])?;

    let (code, stdout, _) = run(test.check_command().arg("repeat-values"))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("There is 1 repeat i18n value present in the i18n source file."));
    assert!(stdout.contains("combine into i18n.sub_dir._global.CONTENT_REFERENCE"));

    Ok(())
}

#[test]
fn test_punctuation_checks() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/i18n/en-US.json",
            r#"{"i18n.page.close_aria_label": "Close.", "i18n.page.logo_alt_text": "Our logo"}"#,
        ),
        ("src/page.ts", "t('i18n.page.close_aria_label'); t('i18n.page.logo_alt_text');"),
    ])?;

    let (code, stdout, _) = run(test.check_command().args(["alt-texts", "aria-labels"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("change to \"Our logo.\""));
    assert!(stdout.contains("change to \"Close\""));

    Ok(())
}

#[test]
fn test_nested_and_unordered_files() -> Result<()> {
    let test = clean_project()?;
    test.write_file(
        "src/i18n/fr.json",
        r#"{"i18n": {"page": {"title": "Titre"}}, "a": "b"}"#,
    )?;

    let (code, stdout, _) = run(test.check_command().args(["ordered-keys", "nested-keys"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains(
        "✘ ordered-keys: 1 i18n JSON file has keys that are not ordered alphabetically."
    ));
    assert!(stdout.contains("✘ nested-keys: 1 i18n JSON file is nested."));
    assert!(stdout.contains("--> src/i18n/fr.json"));

    Ok(())
}

#[test]
fn test_inactive_check_is_skipped() -> Result<()> {
    let test = clean_project()?;
    test.write_file(
        "src/i18n/en-US.json",
        r#"{"i18n.page.logo_alt_text": "Our logo.", "i18n.page.title": "Title", "i18n.page.unused": "Unused"}"#,
    )?;
    test.write_file(
        "src/i18n/de.json",
        r#"{"i18n.page.logo_alt_text": "Unser Logo.", "i18n.page.title": "Titel", "i18n.page.unused": "Ungenutzt"}"#,
    )?;
    test.write_file(
        ".i18n-check.json",
        r#"{"checks": {"unusedKeys": {"active": false}, "invalidKeys": {"keysToIgnore": ["^i18n\\.page\\.unused$"]}}}"#,
    )?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(!stdout.contains("unused-keys"));

    Ok(())
}

#[test]
fn test_keys_to_ignore() -> Result<()> {
    let test = clean_project()?;
    test.write_file("src/other.ts", "t('i18n.legacy.thing');")?;
    test.write_file(
        ".i18n-check.json",
        r#"{"checks": {"nonexistentKeys": {"keysToIgnore": ["^i18n\\.legacy\\."]}}}"#,
    )?;

    let (code, _, _) = run(test.check_command().arg("nonexistent-keys"))?;
    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_malformed_locale_file_is_a_warning() -> Result<()> {
    let test = clean_project()?;
    test.write_file("src/i18n/broken.json", "{ not json")?;

    let (code, stdout, stderr) = run(test.check_command().arg("missing-keys"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("✓ missing-keys:"));
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("--> src/i18n/broken.json"));
    assert!(stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_missing_source_dictionary_is_fatal() -> Result<()> {
    let test = CliTest::with_files(&[("src/page.ts", PAGE)])?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Error: i18n-src file not found"));

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = clean_project()?;
    test.write_file(
        ".i18n-check.json",
        r#"{"checks": {"global": {"keysToIgnore": ["("]}}}"#,
    )?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Error:"));

    Ok(())
}

#[test]
fn test_cli_overrides_paths() -> Result<()> {
    let test = CliTest::with_files(&[
        ("app/locales/en.json", r#"{"i18n.page.title": "Title"}"#),
        ("app/page.ts", "t('i18n.page.title');"),
    ])?;

    let (code, stdout, stderr) = run(test.check_command().args([
        "unused-keys",
        "--src-dir",
        "app",
        "--i18n-dir",
        "app/locales",
        "--i18n-src",
        "app/locales/en.json",
    ]))?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("✓ unused-keys:"));

    Ok(())
}

#[test]
fn test_root_flag() -> Result<()> {
    let test = clean_project()?;
    let mut cmd = test.command();
    cmd.current_dir(std::env::temp_dir());
    cmd.args(["check", "unused-keys", "--root"]).arg(test.root());

    let (code, stdout, stderr) = run(cmd)?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("✓ unused-keys:"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("check"));
    assert!(stdout.contains("init"));

    Ok(())
}
