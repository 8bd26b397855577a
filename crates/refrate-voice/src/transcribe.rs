//! External speech-to-text integration.
//!
//! Transcription shells out to an operator-configured command template, e.g.
//!
//! ```text
//! whisper-cli --language {lang} --output-txt --output-file {out} {audio}
//! ```
//!
//! The template is split on whitespace and the placeholders `{audio}`,
//! `{lang}` and `{out}` are substituted per invocation. When the template
//! contains `{out}` the transcript is read from that file, otherwise from
//! the command's stdout.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::{
  error::{Error, Result},
  normalize::Lang,
};

pub struct Transcriber {
  template: String,
}

impl Transcriber {
  pub fn new(template: impl Into<String>) -> Self {
    Self { template: template.into() }
  }

  /// Runs the configured command over `audio` and returns the transcript.
  pub async fn transcribe(&self, audio: &[u8], lang: Lang) -> Result<String> {
    let dir = tempfile::tempdir()?;
    let audio_path = dir.path().join("audio.webm");
    let out_path = dir.path().join("transcript.txt");
    tokio::fs::write(&audio_path, audio).await?;

    let uses_out_file = self.template.contains("{out}");
    let argv: Vec<String> = self
      .template
      .split_whitespace()
      .map(|token| {
        token
          .replace("{audio}", &audio_path.to_string_lossy())
          .replace("{lang}", lang.as_str())
          .replace("{out}", &out_path.to_string_lossy())
      })
      .collect();
    let (program, args) = match argv.split_first() {
      Some(split) => split,
      None => return Err(Error::AsrNotConfigured),
    };

    debug!(%program, "running speech-to-text");
    let output = Command::new(program)
      .args(args)
      .stdin(Stdio::null())
      .output()
      .await
      .map_err(|err| Error::AsrFailed(format!("{program}: {err}")))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(Error::AsrFailed(format!(
        "{program} exited with {}: {}",
        output.status,
        stderr.trim(),
      )));
    }

    let transcript = if uses_out_file {
      tokio::fs::read_to_string(&out_path)
        .await
        .map_err(|err| Error::AsrFailed(format!("missing output file: {err}")))?
    } else {
      String::from_utf8_lossy(&output.stdout).into_owned()
    };

    let transcript = transcript.trim().to_string();
    if transcript.is_empty() {
      return Err(Error::AsrEmptyOutput);
    }
    Ok(transcript)
  }
}
