use crate::config::UploadConfig;
use crate::constants::{CLOUDINARY_BASE_URL, UPLOAD_CHUNK_SIZE};
use crate::error::{KiranaError, Result};
use futures::stream;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde_json::Value;
use tokio::sync::mpsc;

/// One upload is a finite, non-restartable event sequence: zero or more
/// `Progress` ticks (0–100) followed by exactly one `Completed` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Progress(u8),
    Completed(String),
    Failed(String),
}

/// Cloudinary unsigned uploader. Transport only; presentation of progress
/// belongs to the caller.
pub struct Uploader {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl Uploader {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: format!("{}/{}/image/upload", CLOUDINARY_BASE_URL, config.cloud_name),
            upload_preset: config.upload_preset.clone(),
        }
    }

    /// Starts the upload and returns the event stream. Progress is reported
    /// as bytes are handed to the transport; dropping the receiver abandons
    /// the transfer with no partial effects observable locally.
    pub fn upload(&self, bytes: Vec<u8>, file_name: String, mime: &str) -> mpsc::Receiver<UploadEvent> {
        let (tx, rx) = mpsc::channel(32);
        let client = self.client.clone();
        let upload_url = self.upload_url.clone();
        let upload_preset = self.upload_preset.clone();
        let mime = mime.to_string();

        tokio::spawn(async move {
            let result =
                run_upload(client, upload_url, upload_preset, bytes, file_name, mime, tx.clone())
                    .await;
            let terminal = match result {
                Ok(url) => UploadEvent::Completed(url),
                Err(e) => UploadEvent::Failed(e.to_string()),
            };
            let _ = tx.send(terminal).await;
        });
        rx
    }

}

async fn run_upload(
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    bytes: Vec<u8>,
    file_name: String,
    mime: String,
    tx: mpsc::Sender<UploadEvent>,
) -> Result<String> {
    let total = bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = bytes
        .chunks(UPLOAD_CHUNK_SIZE)
        .map(|c| c.to_vec())
        .collect();

    // Each chunk reports cumulative progress as the transport pulls it.
    let progress_tx = tx.clone();
    let body_stream = stream::unfold(
        (chunks.into_iter(), 0u64, progress_tx),
        move |(mut iter, mut loaded, tx)| async move {
            let chunk = iter.next()?;
            loaded += chunk.len() as u64;
            let _ = tx
                .send(UploadEvent::Progress(progress_percent(loaded, total)))
                .await;
            Some((Ok::<_, std::io::Error>(chunk), (iter, loaded, tx)))
        },
    );

    let file_part = Part::stream_with_length(Body::wrap_stream(body_stream), total)
        .file_name(file_name)
        .mime_str(&mime)
        .map_err(|e| KiranaError::Upload(e.to_string()))?;
    let form = Form::new()
        .part("file", file_part)
        .text("upload_preset", upload_preset);

    let response = client.post(&upload_url).multipart(form).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(KiranaError::Upload(format!("server returned {}", status)));
    }
    let body: Value = response.json().await?;
    body.get("secure_url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| KiranaError::Upload("response had no secure_url".to_string()))
}

pub fn progress_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((loaded as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

/// Uploaded images are always re-encoded JPEG, so the remote file keeps the
/// source stem with a `.jpg` extension.
pub fn jpg_file_name(original: &str) -> String {
    match original.rfind('.') {
        Some(dot) if dot > 0 => format!("{}.jpg", &original[..dot]),
        _ => format!("{}.jpg", original),
    }
}
