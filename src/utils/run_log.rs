use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Run log: buffers timestamped lines in memory while also emitting them to
/// the live tracing stream. When a log file is configured, the buffered
/// lines are appended to it when the last owner drops the log, so the file
/// is written on every exit path.
pub struct RunLog {
    lines: Mutex<Vec<String>>,
    log_file: Option<PathBuf>,
}

impl RunLog {
    pub fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// 引擎與管道共用同一份 run log。
    pub fn shared(log_file: Option<PathBuf>) -> Arc<Self> {
        Arc::new(Self::new(log_file))
    }

    pub fn record(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{}", message);
        let line = format!("[{}] {}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"), message);
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    fn append_to_file(&self) -> std::io::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let lines = self.lines();
        if lines.is_empty() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for line in &lines {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        if let Err(e) = self.append_to_file() {
            tracing::warn!("Failed to append run log to file: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_buffers_timestamped_lines() {
        let log = RunLog::new(None);
        log.record("fetching page 1");
        log.record("fetching page 2");

        let lines = log.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("fetching page 1"));
    }

    #[test]
    fn test_drop_appends_to_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("run.log");

        {
            let log = RunLog::new(Some(log_path.clone()));
            log.record("first run");
        }
        {
            let log = RunLog::new(Some(log_path.clone()));
            log.record("second run");
        }

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first run"));
        assert!(lines[1].ends_with("second run"));
    }

    #[test]
    fn test_no_file_configured_is_a_noop_on_drop() {
        let log = RunLog::new(None);
        log.record("only in memory");
        drop(log);
    }
}
