use crate::error::{Error, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

pub const NO_FZF_ENV: &str = "DENOTE_MENU_NO_FZF";

pub struct FzfSelector {
    prompt: Option<String>,
    preview_command: Option<String>,
    multi_select: bool,
    height: Option<String>,
    layout: Option<String>,
}

impl FzfSelector {
    pub fn new() -> Self {
        Self {
            prompt: None,
            preview_command: None,
            multi_select: false,
            height: None,
            layout: None,
        }
    }

    /// Multi-select over keyword names.
    pub fn for_keywords() -> Self {
        Self::new()
            .multi_select(true)
            .prompt("Filter by keyword: ")
            .height("40%")
            .layout("reverse")
    }

    /// Single-select over note paths with a file preview.
    pub fn for_notes() -> Self {
        Self {
            preview_command: Some("sed -n '1,120p' {}".to_string()),
            ..Self::new().prompt("Open note: ").height("70%").layout("reverse")
        }
    }

    pub fn multi_select(mut self, enabled: bool) -> Self {
        self.multi_select = enabled;
        self
    }

    pub fn prompt(mut self, prompt: &str) -> Self {
        self.prompt = Some(prompt.to_string());
        self
    }

    pub fn height(mut self, height: &str) -> Self {
        self.height = Some(height.to_string());
        self
    }

    pub fn layout(mut self, layout: &str) -> Self {
        self.layout = Some(layout.to_string());
        self
    }

    pub fn select_paths(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let input = paths
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(self.select_from_input(&input)?.into_iter().map(PathBuf::from).collect())
    }

    /// Select from raw input lines. An empty result means the user cancelled.
    pub fn select_from_input(&self, input: &str) -> Result<Vec<String>> {
        if !is_fzf_available() {
            return Err(Error::usage(format!(
                "fzf is not installed or {NO_FZF_ENV} is set"
            )));
        }

        let mut cmd = Command::new("fzf");
        if self.multi_select {
            cmd.arg("--multi");
        }
        if let Some(ref prompt) = self.prompt {
            cmd.arg("--prompt").arg(prompt);
        }
        if let Some(ref height) = self.height {
            cmd.arg("--height").arg(height);
        }
        if let Some(ref layout) = self.layout {
            cmd.arg("--layout").arg(layout);
        }
        if let Some(ref preview) = self.preview_command {
            cmd.arg("--preview").arg(preview);
        }

        let mut child =
            cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).spawn()?;
        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(input.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() || output.stdout.is_empty() {
            return Ok(Vec::new());
        }
        let selected = String::from_utf8_lossy(&output.stdout);
        Ok(selected.lines().map(|s| s.to_string()).collect())
    }
}

impl Default for FzfSelector {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_fzf_available() -> bool {
    if std::env::var(NO_FZF_ENV).is_ok() {
        return false;
    }

    static FZF_AVAILABLE: OnceLock<bool> = OnceLock::new();
    *FZF_AVAILABLE.get_or_init(|| {
        Command::new("fzf")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    })
}
