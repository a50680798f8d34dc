/*!
# Config File Watcher

Watches the config file on a background thread and forwards its contents to
the simulation through a channel. Parsing and validation happen on the
simulation side so a bad edit never replaces a good snapshot.
*/

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use notify::{Event as NotifyEvent, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub fn spawn_config_watcher(config_path: PathBuf) -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded::<String>();

    std::thread::spawn(move || {
        run_watcher(config_path, tx);
    });

    rx
}

fn run_watcher(config_path: PathBuf, tx: Sender<String>) {
    let watched = config_path.clone();
    let closed = Arc::new(AtomicBool::new(false));
    let closed_flag = Arc::clone(&closed);
    let mut watcher: RecommendedWatcher =
        match notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if closed_flag.load(Ordering::Relaxed) {
                return;
            }
            if let Ok(event) = res {
                if !handle_fs_event(event, &tx, &watched) {
                    closed_flag.store(true, Ordering::Relaxed);
                }
            }
        }) {
            Ok(w) => w,
            Err(e) => {
                warn!("Failed to create config watcher: {e}");
                return;
            }
        };

    // notify needs a directory to observe single files reliably
    let parent = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if let Err(e) = watcher.watch(&parent, RecursiveMode::NonRecursive) {
        warn!("Failed to watch {}: {e}", parent.display());
        return;
    }
    info!("Watching {} for changes", config_path.display());

    // The watcher stops when dropped, so this thread owns it until the app goes away.
    while !closed.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_secs(1));
    }
    info!("Config receiver closed, no longer watching {}", config_path.display());
}

/// Forwards the config contents if the event touches it. Returns false once
/// the receiving side is gone.
fn handle_fs_event(event: NotifyEvent, tx: &Sender<String>, config_path: &Path) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return true;
    }

    for path in &event.paths {
        if !path_matches(path, config_path) {
            continue;
        }
        match std::fs::read_to_string(path) {
            Ok(content) => {
                if let Err(e) = tx.send(content) {
                    warn!("Dropping config update for {}: {e}", path.display());
                    return false;
                }
            }
            Err(e) => warn!("Failed to read {}: {e}", path.display()),
        }
        break;
    }
    true
}

fn path_matches(a: &Path, b: &Path) -> bool {
    let ca = std::fs::canonicalize(a).unwrap_or_else(|_| a.to_path_buf());
    let cb = std::fs::canonicalize(b).unwrap_or_else(|_| b.to_path_buf());
    ca == cb
}
