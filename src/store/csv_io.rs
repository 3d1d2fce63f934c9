// store/csv_io.rs
//
// Every file is UTF-8 CSV with a byte-order mark and a header row, so the
// sheets open cleanly in Excel. Writes go to a hidden temp file that is
// renamed over the target, so a file is either the old version or the new one.

use crate::store::StoreError;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `header` and `records` to `path`, replacing any existing file.
pub fn write_csv_atomic<'a, I, R>(path: &Path, header: &[&str], records: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = &'a str>,
{
    let mut writer = csv::Writer::from_writer(BOM.to_vec());

    writer
        .write_record(header)
        .map_err(|e| StoreError::csv(path, e))?;
    for record in records {
        writer
            .write_record(record)
            .map_err(|e| StoreError::csv(path, e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::file_access(path, e.into_error()))?;

    write_atomic(path, &bytes)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = temp_path(path);

    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::file_access(path, e));
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Read every row of a CSV written by [`write_csv_atomic`] (or by a spreadsheet
/// tool). Columns are matched by header name; unknown columns are ignored.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::file_access(path, e))?;
    let body = bytes.strip_prefix(BOM).unwrap_or(&bytes);

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| StoreError::csv(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pair {
        #[serde(rename = "Key")]
        key: String,
        #[serde(rename = "Value", default)]
        value: String,
    }

    #[test]
    fn writes_bom_and_header_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.csv");

        write_csv_atomic(&path, &["Key", "Value"], vec![["a", "1"], ["b", "x, y"]]).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(BOM));

        let rows: Vec<Pair> = read_csv(&path).unwrap();
        assert_eq!(
            rows,
            vec![
                Pair { key: "a".into(), value: "1".into() },
                Pair { key: "b".into(), value: "x, y".into() },
            ]
        );
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv_atomic(&path, &["Key", "Value"], Vec::<[&str; 2]>::new()).unwrap();

        let rows: Vec<Pair> = read_csv(&path).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn overwrite_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.csv");

        write_csv_atomic(&path, &["Key"], vec![["old"]]).unwrap();
        write_csv_atomic(&path, &["Key"], vec![["new"]]).unwrap();

        let rows: Vec<Pair> = read_csv(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv::<Pair>(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, StoreError::FileAccess { .. }));
    }
}
