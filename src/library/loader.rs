use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use tracing::warn;

use super::parser::Dialect;
use super::Catalog;
use crate::event::Event;

/// Where the catalog is in its one-time load.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Catalog),
    Failed(String),
}

impl LoadState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            LoadState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Read and parse the CSV on a background thread, then report
/// `Event::CatalogReady` with either the whole catalog or the error.
pub fn spawn_load(path: PathBuf, dialect: Dialect, tx: Sender<Event>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let result = Catalog::load(&path, dialect);
        if let Err(ref e) = result {
            warn!(path = %path.display(), error = %e, "catalog load failed");
        }
        let _ = tx.send(Event::CatalogReady(result));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn reports_loaded_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "歌曲,歌手,年分,類型\n晴天,周杰伦,2003,流行").unwrap();

        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = spawn_load(file.path().to_path_buf(), Dialect::Naive, tx);
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        handle.join().unwrap();

        match event {
            Event::CatalogReady(Ok(catalog)) => assert_eq!(catalog.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn reports_missing_file_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        spawn_load(dir.path().join("songlist.csv"), Dialect::Naive, tx);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Event::CatalogReady(Err(crate::Error::Io(_))) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn non_utf8_file_is_not_partially_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"title,artist\nok,fine\n\"broken,\xff\n").unwrap();

        let (tx, rx) = crossbeam_channel::unbounded();
        spawn_load(file.path().to_path_buf(), Dialect::Quoted, tx);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Event::CatalogReady(Err(_)) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn load_state_exposes_catalog_only_when_ready() {
        assert!(LoadState::default().is_loading());
        assert!(LoadState::Failed("nope".into()).catalog().is_none());
    }
}
