use anyhow::Result;

use crate::{CliTest, run, run_with_input};

#[test]
fn test_fix_sorts_keys() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/i18n/en-US.json",
            "{\n  \"i18n.page.title\": \"Title\",\n  \"i18n.page.body\": \"Body\"\n}\n",
        ),
        ("src/page.ts", "t('i18n.page.title'); t('i18n.page.body');"),
    ])?;

    let (code, stdout, stderr) = run(test.check_command().args(["ordered-keys", "--fix"]))?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("Fixed ordered-keys: 1 change in 1 file"));
    assert!(stdout.contains("✓ ordered-keys:"));
    let sorted = test.read_file("src/i18n/en-US.json")?;
    assert_eq!(
        sorted,
        "{\n  \"i18n.page.body\": \"Body\",\n  \"i18n.page.title\": \"Title\"\n}\n"
    );

    let (code, stdout, _) = run(test.check_command().args(["ordered-keys", "--fix"]))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Fixed ordered-keys: 0 changes in 0 files"));
    assert_eq!(test.read_file("src/i18n/en-US.json")?, sorted);

    Ok(())
}

#[test]
fn test_without_fix_files_are_untouched() -> Result<()> {
    let content = "{\n  \"i18n.page.title\": \"Title\",\n  \"i18n.page.body\": \"Body\"\n}\n";
    let test = CliTest::with_files(&[("src/i18n/en-US.json", content), ("src/page.ts", "")])?;

    let (code, stdout, _) = run(test.check_command().arg("ordered-keys"))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("help: run `i18n-check check ordered-keys --fix`"));
    assert_eq!(test.read_file("src/i18n/en-US.json")?, content);

    Ok(())
}

#[test]
fn test_fix_renames_misnamed_keys() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/i18n/en-US.json",
            "{\n  \"i18n.wrong_identifier_path.content_reference\": \"Content\"\n}\n",
        ),
        (
            "src/i18n/de.json",
            "{\n  \"i18n.wrong_identifier_path.content_reference\": \"Inhalt\"\n}\n",
        ),
        (
            "src/test_file.ts",
            "export const c = t(\"i18n.wrong_identifier_path.content_reference\");\n",
        ),
    ])?;

    let (code, stdout, stderr) = run(test.check_command().args(["invalid-keys", "--fix"]))?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("Fixed invalid-keys: 3 changes in 3 files"));
    assert_eq!(
        test.read_file("src/i18n/en-US.json")?,
        "{\n  \"i18n.test_file.content_reference\": \"Content\"\n}\n"
    );
    assert_eq!(
        test.read_file("src/i18n/de.json")?,
        "{\n  \"i18n.test_file.content_reference\": \"Inhalt\"\n}\n"
    );
    assert_eq!(
        test.read_file("src/test_file.ts")?,
        "export const c = t(\"i18n.test_file.content_reference\");\n"
    );

    Ok(())
}

#[test]
fn test_fix_skips_rename_onto_existing_key() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/i18n/en-US.json",
            "{\n  \"i18n.other.title\": \"Title\",\n  \"i18n.page.title\": \"Page title\"\n}\n",
        ),
        ("src/page.ts", "t('i18n.other.title'); t('i18n.page.title');"),
    ])?;

    let (code, stdout, _) = run(test.check_command().args(["invalid-keys", "--fix"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("Fixed invalid-keys: 0 changes in 0 files (1 skipped)"));
    assert!(stdout.contains("rename to i18n.page.title"));

    Ok(())
}

#[test]
fn test_fix_punctuation_and_order_together() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/i18n/en-US.json",
            "{\n  \"i18n.page.logo_alt_text\": \"Logo\",\n  \"i18n.page.close_aria_label\": \"Close!\"\n}\n",
        ),
        (
            "src/page.ts",
            "t('i18n.page.logo_alt_text'); t('i18n.page.close_aria_label');",
        ),
    ])?;

    let (code, stdout, stderr) = run(test.check_command().args([
        "alt-texts",
        "aria-labels",
        "ordered-keys",
        "--fix",
    ]))?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert_eq!(
        test.read_file("src/i18n/en-US.json")?,
        "{\n  \"i18n.page.close_aria_label\": \"Close\",\n  \"i18n.page.logo_alt_text\": \"Logo.\"\n}\n"
    );
    assert!(stdout.contains("✓ alt-texts:"));
    assert!(stdout.contains("✓ aria-labels:"));
    assert!(stdout.contains("✓ ordered-keys:"));

    Ok(())
}

#[test]
fn test_fix_renames_in_files_skipped_by_invalid_keys() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".i18n-check.json",
            r#"{"checks": {"invalidKeys": {"directoriesToSkip": ["legacy"]}}}"#,
        ),
        ("src/i18n/en-US.json", "{\n  \"i18n.wrong.title\": \"Title\"\n}\n"),
        ("src/page.ts", "t('i18n.wrong.title');\n"),
        ("src/legacy/Old.ts", "t(\"i18n.wrong.title\");\n"),
    ])?;

    let (code, stdout, stderr) = run(test.check_command().args(["invalid-keys", "--fix"]))?;

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("Fixed invalid-keys: 3 changes in 3 files"));
    assert_eq!(test.read_file("src/page.ts")?, "t('i18n.page.title');\n");
    assert_eq!(test.read_file("src/legacy/Old.ts")?, "t(\"i18n.page.title\");\n");

    let (code, stdout, _) = run(test.check_command().arg("nonexistent-keys"))?;
    assert_eq!(code, 0, "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_fix_adds_nonexistent_keys_from_input() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/i18n/en-US.json", "{\n  \"i18n.page.body\": \"Body\"\n}\n"),
        (
            "src/page.ts",
            "t('i18n.page.body'); t('i18n.page.skip'); t('i18n.page.title');",
        ),
    ])?;

    let (code, stdout, stderr) = run_with_input(
        test.check_command().args(["nonexistent-keys", "--fix"]),
        "\nPage title\n",
    )?;

    assert_eq!(code, 1, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("skipped 'i18n.page.skip'"));
    assert!(stdout.contains("added 'i18n.page.title': 'Page title'"));
    assert!(stdout.contains("Fixed nonexistent-keys: 1 change in 1 file (1 skipped)"));
    assert!(stdout.contains("error: \"i18n.page.skip\"  nonexistent-key"));
    assert_eq!(
        test.read_file("src/i18n/en-US.json")?,
        "{\n  \"i18n.page.body\": \"Body\",\n  \"i18n.page.title\": \"Page title\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_fix_nonexistent_keys_cancelled_by_end_of_input() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/i18n/en-US.json", "{}\n"),
        ("src/page.ts", "t('i18n.page.a'); t('i18n.page.b');"),
    ])?;

    let (code, stdout, _) = run_with_input(
        test.check_command().args(["nonexistent-keys", "--fix"]),
        "Alpha\n",
    )?;

    assert_eq!(code, 1);
    assert!(stdout.contains("cancelled: added 1 of 2 keys"));
    assert_eq!(
        test.read_file("src/i18n/en-US.json")?,
        "{\n  \"i18n.page.a\": \"Alpha\"\n}\n"
    );

    Ok(())
}
