use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod config;
#[cfg(unix)]
mod extract;
#[cfg(unix)]
mod workflow;

const BIN_NAME: &str = "polyglot";

/// Stand-in for the catalog tool: records each call in `calls.log` next to
/// itself and writes catalogs the way the real tool lays them out.
const FAKE_TOOL: &str = r#"#!/bin/sh
cmd="$1"
shift
echo "$cmd" >> "${0%/*}/calls.log"
case "$cmd" in
  extract)
    out=""
    root=""
    while [ $# -gt 0 ]; do
      case "$1" in
        -o) out="$2"; shift 2 ;;
        -F|-k) shift 2 ;;
        *) root="$1"; shift ;;
      esac
    done
    if [ "$root" = "." ]; then
      printf 'msgid ""\nmsgstr ""\n"Content-Type: text/plain; charset=UTF-8\\n"\n\nmsgid "Hello"\nmsgstr ""\n\nmsgid "Welcome %%(name)s"\nmsgstr ""\n' > "$out"
    else
      printf 'msgid "Hello"\nmsgstr ""\n\nmsgid "Plugin page"\nmsgstr ""\n' > "$out"
    fi
    ;;
  init)
    while [ $# -gt 0 ]; do
      case "$1" in
        -i) pot="$2"; shift 2 ;;
        -d) dir="$2"; shift 2 ;;
        -l) locale="$2"; shift 2 ;;
        *) shift ;;
      esac
    done
    mkdir -p "$dir/$locale/LC_MESSAGES"
    cp "$pot" "$dir/$locale/LC_MESSAGES/messages.po"
    ;;
  update|compile)
    ;;
  *)
    echo "unknown command: $cmd" >&2
    exit 1
    ;;
esac
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        // The fake tool needs mkdir and cp.
        if let Some(path) = env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        cmd
    }

    /// Install the fake catalog tool and return its absolute path.
    #[cfg(unix)]
    pub fn install_fake_tool(&self) -> Result<String> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.project_dir.join("bin/pybabel");
        self.write_file("bin/pybabel", FAKE_TOOL)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// Commands the fake tool has received, in order.
    pub fn tool_calls(&self) -> Result<Vec<String>> {
        let log = self.project_dir.join("bin/calls.log");
        if !log.exists() {
            return Ok(Vec::new());
        }
        Ok(self
            .read_file("bin/calls.log")?
            .lines()
            .map(str::to_string)
            .collect())
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
