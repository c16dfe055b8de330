use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("✓ Created .i18n-check.json"));

    let content = test.read_file(".i18n-check.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["srcDir"], "src");
    assert_eq!(parsed["i18nSrc"], "src/i18n/en-US.json");
    assert_eq!(parsed["keyNamespace"], "i18n.");
    assert!(parsed["checks"]["global"].is_object());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18n-check.json", "{}")?;

    let (code, _, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 1);
    assert!(stderr.contains("Error: .i18n-check.json already exists"));
    assert_eq!(test.read_file(".i18n-check.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    test.write_file("src/i18n/en-US.json", r#"{"i18n.page.title": "Title"}"#)?;
    test.write_file("src/page.ts", "t('i18n.page.title');")?;

    let (code, stdout, stderr) = run(test.check_command())?;
    assert_eq!(
        code, 0,
        "Check command should work with initialized config. stdout: {stdout}\nstderr: {stderr}"
    );

    Ok(())
}
