use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use super::errors::WatchError;
use crate::events::{FsChangeKind, PlayspaceEvent};

/// Recursive watch on one directory.
///
/// notify delivers events on its own thread; they queue on a channel until
/// [`drain_events`](Self::drain_events) is called from the frame loop.
pub struct FileSystemHooks {
    /// Must be kept alive for events to arrive.
    _watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    root: PathBuf,
}

impl FileSystemHooks {
    pub fn install(path: &Path) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();

        let mut watcher =
            notify::recommended_watcher(tx).map_err(|e| WatchError::WatcherCreateFailed {
                message: e.to_string(),
            })?;

        watcher
            .watch(path, RecursiveMode::Recursive)
            .map_err(|e| WatchError::WatchFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        info!(event = "core.watch.started", path = %path.display());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            root: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Everything created or deleted since the last call (non-blocking).
    pub fn drain_events(&self) -> Vec<PlayspaceEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => events.extend(Self::translate(&event)),
                Ok(Err(e)) => {
                    warn!(event = "core.watch.event_error", error = %e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!(event = "core.watch.channel_disconnected", path = %self.root.display());
                    break;
                }
            }
        }
        if !events.is_empty() {
            debug!(
                event = "core.watch.drain_completed",
                path = %self.root.display(),
                count = events.len()
            );
        }
        events
    }

    /// Creations and removals only; modifications and access are ignored.
    fn translate(event: &Event) -> Vec<PlayspaceEvent> {
        let kind = match event.kind {
            EventKind::Create(_) => FsChangeKind::Created,
            EventKind::Remove(_) => FsChangeKind::Deleted,
            _ => return Vec::new(),
        };
        event
            .paths
            .iter()
            .map(|path| PlayspaceEvent::FileSystemChange {
                kind,
                path: path.clone(),
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

impl std::fmt::Debug for FileSystemHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystemHooks")
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
    use std::time::{Duration, Instant};

    fn make_event(kind: EventKind, paths: Vec<PathBuf>) -> Event {
        Event {
            kind,
            paths,
            attrs: Default::default(),
        }
    }

    #[test]
    fn test_translate_create() {
        let event = make_event(
            EventKind::Create(CreateKind::File),
            vec![PathBuf::from("/drop/notes.txt")],
        );
        assert_eq!(
            FileSystemHooks::translate(&event),
            vec![PlayspaceEvent::FileSystemChange {
                kind: FsChangeKind::Created,
                path: PathBuf::from("/drop/notes.txt"),
                name: "notes.txt".to_string(),
            }]
        );
    }

    #[test]
    fn test_translate_remove() {
        let event = make_event(
            EventKind::Remove(RemoveKind::Folder),
            vec![PathBuf::from("/drop/old")],
        );
        let translated = FileSystemHooks::translate(&event);
        assert!(matches!(
            translated.as_slice(),
            [PlayspaceEvent::FileSystemChange { kind: FsChangeKind::Deleted, name, .. }] if name == "old"
        ));
    }

    #[test]
    fn test_translate_ignores_modify_and_access() {
        let path = vec![PathBuf::from("/drop/notes.txt")];
        let modify = make_event(EventKind::Modify(ModifyKind::Any), path.clone());
        let access = make_event(EventKind::Access(AccessKind::Any), path);
        assert!(FileSystemHooks::translate(&modify).is_empty());
        assert!(FileSystemHooks::translate(&access).is_empty());
    }

    #[test]
    fn test_install_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let error = FileSystemHooks::install(&missing).unwrap_err();
        assert_eq!(crate::errors::SillError::error_code(&error), "WATCH_FAILED");
    }

    #[test]
    fn test_created_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let hooks = FileSystemHooks::install(dir.path()).unwrap();
        std::fs::write(dir.path().join("hello.txt"), b"hi").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen = Vec::new();
        while Instant::now() < deadline {
            seen.extend(hooks.drain_events());
            let created = seen.iter().any(|e| {
                matches!(e, PlayspaceEvent::FileSystemChange { kind: FsChangeKind::Created, name, .. } if name == "hello.txt")
            });
            if created {
                return;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        panic!("no create event for hello.txt, got {seen:?}");
    }
}
