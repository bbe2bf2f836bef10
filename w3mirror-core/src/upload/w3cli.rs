use super::StorageClient;
use crate::cid::Cid;
use crate::error::UploadError;
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Storage client backed by the external `w3` binary (web3.storage CLI).
///
/// The binary keeps its own agent keys and delegations between runs; this
/// client only issues `login`, `space use` and `up`.
#[derive(Debug, Clone)]
pub struct W3CliClient {
    binary_path: PathBuf,
}

impl W3CliClient {
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Look for `w3` on PATH
    pub fn from_path() -> Option<Self> {
        which::which("w3").ok().map(Self::new)
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Run the binary and return its stdout, or a failure description.
    /// `inherit_stderr` lets interactive prompts (the login email link) reach
    /// the terminal.
    async fn run(&self, args: Vec<OsString>, inherit_stderr: bool) -> Result<String, String> {
        debug!("Running {} {:?}", self.binary_path.display(), args);

        let mut command = Command::new(&self.binary_path);
        command.args(&args).stdin(Stdio::null());
        if inherit_stderr {
            command.stderr(Stdio::inherit());
        }

        let output = command
            .output()
            .await
            .map_err(|e| format!("failed to execute {}: {}", self.binary_path.display(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            stdout.trim().to_string()
        } else {
            stderr
        };
        Err(format!("w3 exited with {}: {}", output.status, detail))
    }
}

#[async_trait]
impl StorageClient for W3CliClient {
    fn name(&self) -> &str {
        "w3-cli"
    }

    async fn login(&self, email: &str) -> Result<(), UploadError> {
        self.run(vec!["login".into(), email.into()], true)
            .await
            .map(|_| ())
            .map_err(|reason| UploadError::Auth {
                email: email.to_string(),
                reason,
            })
    }

    async fn use_space(&self, space: &str) -> Result<(), UploadError> {
        self.run(vec!["space".into(), "use".into(), space.into()], false)
            .await
            .map(|_| ())
            .map_err(|reason| UploadError::Space {
                space: space.to_string(),
                reason,
            })
    }

    async fn upload_directory(&self, files: &[PathBuf]) -> Result<Cid, UploadError> {
        let mut args: Vec<OsString> = vec!["up".into(), "--json".into()];
        args.extend(files.iter().map(|file| file.as_os_str().to_os_string()));

        let stdout = self.run(args, false).await.map_err(UploadError::Transport)?;
        parse_up_output(&stdout)
    }
}

#[derive(Deserialize)]
struct UpOutput {
    root: CidLink,
}

#[derive(Deserialize)]
struct CidLink {
    #[serde(rename = "/")]
    cid: String,
}

/// Pull the root CID out of `w3 up` output.
///
/// Understands the `--json` form (`{"root":{"/":"bafy..."}}`, possibly
/// pretty-printed or preceded by progress lines) and falls back to the
/// `https://w3s.link/ipfs/<cid>` link printed in plain mode.
pub fn parse_up_output(stdout: &str) -> Result<Cid, UploadError> {
    let trimmed = stdout.trim();

    let from_json = |text: &str| {
        serde_json::from_str::<UpOutput>(text)
            .ok()
            .and_then(|up| Cid::parse(&up.root.cid))
    };

    if let Some(cid) = from_json(trimmed) {
        return Ok(cid);
    }

    for line in trimmed.lines().rev() {
        let line = line.trim();
        if line.starts_with('{')
            && let Some(cid) = from_json(line)
        {
            return Ok(cid);
        }
    }

    if let Some(pos) = trimmed.find("/ipfs/") {
        let token: String = trimmed[pos + "/ipfs/".len()..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if let Some(cid) = Cid::parse(&token) {
            return Ok(cid);
        }
    }

    Err(UploadError::Output(trimmed.to_string()))
}
