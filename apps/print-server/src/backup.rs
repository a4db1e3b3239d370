//! # Closeout Backups
//!
//! Every closeout request leaves a copy of the submitted ledger on disk,
//! exactly as the client sent it:
//!
//! ```text
//! <backup_dir>/historial_<date>_<HH-MM-SS>.json
//!
//! date "18/10/2026", time 21:05:09 → historial_18-10-2026_21-05-09.json
//! ```
//!
//! Two closeouts within the same second overwrite each other. The name is
//! kept for compatibility with existing backup folders, not for uniqueness.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde_json::Value;
use tracing::info;

/// Builds the backup file name for `date` at `time`.
pub fn backup_filename(date: &str, time: NaiveTime) -> String {
    format!(
        "historial_{}_{}.json",
        date.replace('/', "-"),
        time.format("%H-%M-%S")
    )
}

/// Writes the submitted `sales` as pretty JSON, creating `dir` if needed.
pub async fn write_backup(
    dir: &Path,
    date: &str,
    time: NaiveTime,
    sales: &Value,
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(backup_filename(date, time));
    let json = serde_json::to_vec_pretty(sales)?;
    tokio::fs::write(&path, json).await?;

    let count = sales.as_array().map_or(0, Vec::len);
    info!(path = %path.display(), sales = count, "Closeout backup written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sales() -> Value {
        json!([{
            "date": "18/10/2026",
            "customer": "Ana",
            "entries": [{ "number": 12, "quantity": 4 }],
            "totalUnits": 4,
            "totalDue": 1.0
        }])
    }

    #[test]
    fn test_backup_filename() {
        let time = NaiveTime::from_hms_opt(21, 5, 9).unwrap();
        assert_eq!(
            backup_filename("18/10/2026", time),
            "historial_18-10-2026_21-05-09.json"
        );
    }

    #[tokio::test]
    async fn test_write_backup_creates_dir_and_round_trips() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("backups");
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        let path = write_backup(&dir, "18/10/2026", time, &sales()).await.unwrap();
        assert_eq!(path, dir.join("historial_18-10-2026_08-00-00.json"));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'));
        let written: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(written, sales());
    }

    #[tokio::test]
    async fn test_write_backup_fails_when_dir_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("backups");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert!(write_backup(&blocker, "18/10/2026", time, &sales()).await.is_err());
    }
}
