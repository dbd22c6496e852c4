use std::fs;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{info, warn};

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    fire: Option<Arc<Vec<u8>>>,
    fire_volume: f32,
}

impl AudioManager {
    /// `None` when no output device is available; the game runs silent then.
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        Some(Self {
            _stream,
            handle,
            fire: None,
            fire_volume: 0.8,
        })
    }

    pub fn load_fire(&mut self, path: &Path) {
        match fs::read(path) {
            Ok(bytes) => {
                info!(path = %path.display(), "fire sound loaded");
                self.fire = Some(Arc::new(bytes));
            }
            Err(e) => warn!(path = %path.display(), error = %e, "fire sound not loaded"),
        }
    }

    pub fn play_fire(&self) {
        // own sink per shot so rapid fire overlaps instead of queueing
        let Some(data) = self.fire.clone() else {
            return;
        };
        let Ok(dec) = Decoder::new(BufReader::new(Cursor::new(data.as_ref().clone()))) else {
            return;
        };
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(dec.amplify(self.fire_volume));
            sink.detach();
        }
    }
}
