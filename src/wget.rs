use std::path::PathBuf;
use std::process::Command;

use crate::error::GeodataError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub trait WgetRunner: Send + Sync {
    fn run(&self, args: &[String]) -> Result<CommandOutput, GeodataError>;
}

impl<T: WgetRunner + ?Sized> WgetRunner for &T {
    fn run(&self, args: &[String]) -> Result<CommandOutput, GeodataError> {
        (**self).run(args)
    }
}

#[derive(Clone)]
pub struct SystemWget {
    wget: Option<PathBuf>,
}

impl SystemWget {
    pub fn new() -> Self {
        Self {
            wget: find_in_path("wget"),
        }
    }
}

impl Default for SystemWget {
    fn default() -> Self {
        Self::new()
    }
}

impl WgetRunner for SystemWget {
    fn run(&self, args: &[String]) -> Result<CommandOutput, GeodataError> {
        let wget = self
            .wget
            .as_ref()
            .ok_or_else(|| GeodataError::MissingTool("wget".to_string()))?;
        let output = Command::new(wget)
            .args(args)
            .output()
            .map_err(|err| GeodataError::MissingTool(format!("{}: {err}", wget.display())))?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

pub fn redacted_command(args: &[String]) -> String {
    let mut parts = vec!["wget".to_string()];
    for arg in args {
        if arg.starts_with("Authorization:") {
            parts.push("\"Authorization: Bearer ***\"".to_string());
        } else {
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for path in std::env::split_paths(&path_var) {
        let exe = path.join(format!("{name}.exe"));
        if exe.exists() {
            return Some(exe);
        }
        let plain = path.join(name);
        if plain.exists() {
            return Some(plain);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_hides_token() {
        let args = vec![
            "--header".to_string(),
            "Authorization: Bearer secret".to_string(),
            "-P".to_string(),
            "out".to_string(),
        ];
        let rendered = redacted_command(&args);
        assert!(!rendered.contains("secret"));
        assert!(rendered.ends_with("-P out"));
    }
}
