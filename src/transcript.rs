use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Append-only, timestamped record of every turn.
pub struct TranscriptLog {
    file: Mutex<std::fs::File>,
}

impl TranscriptLog {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn log(&self, session: &str, action: &str, details: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!(
            "[{}] [{}] [{}] {}\n",
            timestamp,
            session,
            action,
            details.replace('\n', " ")
        );

        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }

    pub fn log_user(&self, session: &str, message: &str) {
        self.log(session, "USER", message);
    }

    pub fn log_scripted(&self, session: &str, reply: &str) {
        self.log(session, "SCRIPTED", reply);
    }

    pub fn log_model(&self, session: &str, reply: &str) {
        self.log(session, "MODEL", reply);
    }

    pub fn log_fallback(&self, session: &str, reply: &str) {
        self.log(session, "FALLBACK", reply);
    }

    pub fn log_error(&self, session: &str, error: &str) {
        self.log(session, "ERROR", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.log");

        let log = TranscriptLog::new(&path).unwrap();
        log.log_user("abc", "make me\na potato");
        log.log_scripted("abc", "Would you describe yourself?");
        drop(log);

        let again = TranscriptLog::new(&path).unwrap();
        again.log_error("abc", "remote down");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("[abc] [USER] make me a potato"));
        assert!(lines[1].contains("[SCRIPTED]"));
        assert!(lines[2].contains("[ERROR] remote down"));
    }
}
