use crate::extract::{HtmlParser, HttpFetcher};
use crate::handler::{GenerateRequest, VideoGenerator};
use crate::{Document, Error, Result};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Generate(GenerateRequest, oneshot::Sender<Result<Document>>),
    Extract(String, oneshot::Sender<Result<String>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly video service backed by a dedicated worker thread.
///
/// The worker thread owns the `VideoGenerator` (and with it the blocking HTTP
/// client, which must never be created or dropped inside an async runtime)
/// and executes commands sent from async tasks.
#[derive(Clone)]
pub struct VideoService {
    cmd_tx: Sender<Command>,
}

impl VideoService {
    /// Create a service using a real HTTP client built from `config`.
    #[cfg(feature = "fetch")]
    pub async fn new(config: Option<crate::VideoConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        Self::spawn_with(move || VideoGenerator::from_config(config)).await
    }

    /// Create a service whose generator is built by `factory` on the worker
    /// thread.
    pub async fn spawn_with<F, P, M>(factory: M) -> Result<Self>
    where
        F: HttpFetcher + 'static,
        P: HtmlParser + 'static,
        M: FnOnce() -> Result<VideoGenerator<F, P>> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::Builder::new()
            .name("newsreel-service".into())
            .spawn(move || {
                let generator = match factory() {
                    Ok(g) => g,
                    Err(err) => {
                        let _ = init_tx.send(Err(err));
                        return;
                    }
                };
                let _ = init_tx.send(Ok(()));

                while let Ok(cmd) = cmd_rx.recv() {
                    match cmd {
                        Command::Generate(request, resp) => {
                            let _ = resp.send(generator.generate(&request));
                        }
                        Command::Extract(url, resp) => {
                            let _ = resp.send(generator.extractor().extract(&url));
                        }
                        Command::Close(resp) => {
                            let _ = resp.send(Ok(()));
                            break;
                        }
                    }
                }
            })
            .map_err(|e| Error::InitializationError(format!("Failed to spawn worker: {}", e)))?;

        init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;

        Ok(Self { cmd_tx })
    }

    /// Generate the video document for `request`.
    pub async fn generate(&self, request: GenerateRequest) -> Result<Document> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Generate(request, tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Generate canceled: {}", e)))?
    }

    /// Fetch `url` and extract its readable text.
    pub async fn extract(&self, url: &str) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Extract(url.to_string(), tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Extract canceled: {}", e)))?
    }

    /// Shut down the worker thread. Clones of this handle stop working too.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Close(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }

    fn send(&self, cmd: Command) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| Error::Other("video service worker has stopped".into()))
    }
}
