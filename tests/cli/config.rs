use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["locales"], serde_json::json!(["en"]));
    assert_eq!(parsed["defaultCurrency"], "USD");
    assert_eq!(parsed["bin"], "pybabel");
    assert_eq!(parsed["translationsDir"], "translations");
    assert!(
        parsed.get("extractTemplateExtensions").is_some(),
        "Config should have 'extractTemplateExtensions' field"
    );

    // 2-space indentation
    assert!(content.contains("\n  \"locales\""));

    Ok(())
}

#[test]
fn test_config_creates_file() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("config");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .polyglotrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".polyglotrc.json").exists());
    assert_config_content(&test.read_file(".polyglotrc.json")?)?;

    Ok(())
}

#[test]
fn test_config_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".polyglotrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("config");
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .polyglotrc.json already exists
    ");

    assert_eq!(test.read_file(".polyglotrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
    let test = CliTest::with_file(
        ".polyglotrc.json",
        r#"{ "currencies": ["USD"], "defaultCurrency": "EUR" }"#,
    )?;

    let output = test.command().arg("compile").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("'defaultCurrency' \"EUR\" is not listed in 'currencies'"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
