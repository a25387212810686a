use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_extracts_then_creates_locale() -> Result<()> {
    let test = CliTest::new()?;
    let tool = test.install_fake_tool()?;

    let mut cmd = test.command();
    cmd.args(["init", "fr", "--bin", tool.as_str()]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracting translatable strings from . in translations/messages.pot
    Initializing new translation 'fr' in translations/fr
    ✓ Translation 'fr' updated

    ----- stderr -----
    ");

    assert_eq!(test.tool_calls()?, vec!["extract", "init"]);
    assert!(
        test.read_file("translations/fr/LC_MESSAGES/messages.po")?
            .contains("msgid \"Hello\"")
    );

    Ok(())
}

#[test]
fn test_update_reports_each_locale() -> Result<()> {
    let test = CliTest::new()?;
    let tool = test.install_fake_tool()?;
    test.command().args(["init", "fr", "--bin", tool.as_str()]).output()?;
    test.command().args(["init", "de", "--bin", tool.as_str()]).output()?;

    let mut cmd = test.command();
    cmd.args(["update", "--no-extract", "--bin", tool.as_str()]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Updating all translations
    ✓ Translation 'de' updated
    ✓ Translation 'fr' updated

    ----- stderr -----
    ");

    assert_eq!(
        test.tool_calls()?,
        vec!["extract", "init", "init", "update"]
    );

    Ok(())
}

#[test]
fn test_update_extracts_by_default() -> Result<()> {
    let test = CliTest::new()?;
    let tool = test.install_fake_tool()?;

    let output = test.command().args(["update", "--bin", tool.as_str()]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.tool_calls()?, vec!["extract", "update"]);
    assert!(stdout(&output).contains("warning: no locale catalogs found"));

    Ok(())
}

#[test]
fn test_update_without_extract_creates_missing_master() -> Result<()> {
    let test = CliTest::new()?;
    let tool = test.install_fake_tool()?;

    let output = test
        .command()
        .args(["update", "--no-extract", "--bin", tool.as_str()])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.tool_calls()?, vec!["extract", "update"]);
    assert!(test.root().join("translations/messages.pot").exists());

    Ok(())
}

#[test]
fn test_compile_uses_configured_bin() -> Result<()> {
    let test = CliTest::new()?;
    let tool = test.install_fake_tool()?;
    test.write_file(
        ".polyglotrc.json",
        &format!("{{ \"bin\": {} }}", serde_json::to_string(&tool)?),
    )?;

    let mut cmd = test.command();
    cmd.arg("compile");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Compiling all translations
    ✓ Compiled all translations

    ----- stderr -----
    ");

    assert_eq!(test.tool_calls()?, vec!["compile"]);

    Ok(())
}

#[test]
fn test_tool_failure_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("bin/broken", "#!/bin/sh\nexit 3\n")?;
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(
            test.root().join("bin/broken"),
            std::fs::Permissions::from_mode(0o755),
        )?;
    }
    let tool = test.root().join("bin/broken");

    let output = test
        .command()
        .arg("compile")
        .arg("--bin")
        .arg(&tool)
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: "));
    assert!(stderr(&output).contains("failed with exit status: 3"));

    Ok(())
}

#[test]
fn test_gotrans_requires_existing_catalog() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["gotrans", "fr"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Catalog not found"));

    Ok(())
}
