use super::{DebugLogger, create_private_directory, open_private_append_file};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn temp_path(prefix: &str) -> PathBuf {
    let unique = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock should be after epoch").as_nanos();
    std::env::temp_dir().join(format!("ssh-menu-log-debug-{prefix}-{unique}"))
}

#[test]
fn appends_to_existing_log_file() {
    let root = temp_path("append");
    let log_dir = root.join("logs");
    let log_path = log_dir.join("ssh-menu.log");

    create_private_directory(&log_dir).expect("create log directory");
    fs::write(&log_path, "earlier\n").expect("seed log file");
    {
        use std::io::Write;
        let mut file = open_private_append_file(&log_path).expect("open log file");
        file.write_all(b"later\n").expect("append entry");
    }

    assert_eq!(fs::read_to_string(&log_path).expect("read log"), "earlier\nlater\n");
    let _ = fs::remove_dir_all(root);
}

#[cfg(unix)]
#[test]
fn private_directory_and_file_permissions_are_restrictive() {
    let root = temp_path("permissions");
    let log_dir = root.join("logs");
    let log_path = log_dir.join("ssh-menu.log");

    create_private_directory(&log_dir).expect("create private log directory");
    let _file = open_private_append_file(&log_path).expect("create private log file");

    let dir_mode = fs::metadata(&log_dir).expect("directory metadata").permissions().mode() & 0o777;
    let file_mode = fs::metadata(&log_path).expect("file metadata").permissions().mode() & 0o777;

    assert_eq!(dir_mode, 0o700);
    assert_eq!(file_mode, 0o600);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn writer_is_opened_lazily() {
    let logger = DebugLogger::new();
    assert!(logger.writer.lock().expect("writer lock").is_none());
}
