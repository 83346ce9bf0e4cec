// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use tracing_appender::rolling::RollingFileAppender;

/// Appender that writes every event to one file, `path_str`, without rotating it. The
/// file is created if it is missing.
///
/// Note that wrapping this in [`tracing_appender::non_blocking`] drops events that are
/// still buffered when a short lived program exits, so it is used as is.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => {
            return Err(miette::miette!(
                "Can't access the folder of {}. It might not exist, or you might not have the required permissions.",
                path.display()
            ));
        }
    };

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or you might not have the required permissions.",
            path.display()
        )
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_create_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("readline.log");
        let appender = try_create(file_path.to_str().unwrap());
        assert!(appender.is_ok());
        assert!(file_path.exists());
    }

    #[test]
    fn test_try_create_without_file_name_fails() {
        assert!(try_create("/").is_err());
    }
}
