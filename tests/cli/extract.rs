use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use polyglot::catalog::po::read_po;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_extract_writes_master_catalog() -> Result<()> {
    let test = CliTest::new()?;
    let tool = test.install_fake_tool()?;

    let mut cmd = test.command();
    cmd.args(["extract", "--bin", tool.as_str()]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracting translatable strings from . in translations/messages.pot
    ✓ Extracted 2 messages from 1 source root

    ----- stderr -----
    ");

    assert_eq!(test.tool_calls()?, vec!["extract"]);

    let catalog = read_po(&test.root().join("translations/messages.pot"))?;
    let ids: Vec<&str> = catalog
        .iter()
        .filter(|m| !m.is_header())
        .map(|m| m.id())
        .collect();
    assert_eq!(ids, vec!["Hello", "Welcome %(name)s"]);

    Ok(())
}

#[test]
fn test_extract_merges_source_roots() -> Result<()> {
    let test = CliTest::with_file(
        ".polyglotrc.json",
        r#"{
  "sourceRoots": [
    { "path": "plugins/blog", "templateDirs": ["views"] }
  ]
}"#,
    )?;
    test.write_file("plugins/blog/views/index.html", "<p>{{ _('Plugin page') }}</p>")?;
    let tool = test.install_fake_tool()?;

    let output = test.command().args(["extract", "--bin", tool.as_str()]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ Extracted 3 messages from 2 source roots (1 from additional roots)"));
    assert_eq!(test.tool_calls()?, vec!["extract", "extract"]);

    let catalog = read_po(&test.root().join("translations/messages.pot"))?;
    let ids: Vec<&str> = catalog
        .iter()
        .filter(|m| !m.is_header())
        .map(|m| m.id())
        .collect();
    assert_eq!(ids, vec!["Hello", "Welcome %(name)s", "Plugin page"]);

    Ok(())
}

#[test]
fn test_extract_with_relative_project_root() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "<p>{{ _('Hello') }}</p>")?;
    let tool = test.install_fake_tool()?;

    let mut cmd = test.command();
    cmd.args(["--project-root", "app", "extract", "--bin", tool.as_str()]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracting translatable strings from . in translations/messages.pot
    ✓ Extracted 2 messages from 1 source root

    ----- stderr -----
    ");

    assert!(test.root().join("app/translations/messages.pot").exists());
    assert!(!test.root().join("app/app").exists());
    assert!(!test.root().join("translations").exists());

    Ok(())
}

#[test]
fn test_extract_with_missing_tool_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["extract", "--bin", "/nonexistent/pybabel"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to run '/nonexistent/pybabel'"));

    Ok(())
}
