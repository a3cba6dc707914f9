use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;

use super::model::{EngineSample, NavSample};

/// Candidate directories probed in order; first match wins.
pub const SEARCH_DIRS: [&str; 3] = [".", "Debug", "Release"];

/// Engine telemetry log filename.
pub const ENGINE_LOG: &str = "log.csv";
/// Navigation benchmark log filename.
pub const NAV_LOG: &str = "data.csv";

pub fn default_search_dirs() -> Vec<PathBuf> {
    SEARCH_DIRS.iter().map(PathBuf::from).collect()
}

/// Load the engine log, or `None` when no candidate directory has one.
pub fn load_engine_log(dirs: &[PathBuf]) -> Result<Option<Vec<EngineSample>>> {
    load_log(dirs, ENGINE_LOG)
}

/// Load the navigation log, or `None` when no candidate directory has one.
pub fn load_nav_log(dirs: &[PathBuf]) -> Result<Option<Vec<NavSample>>> {
    load_log(dirs, NAV_LOG)
}

fn load_log<T: DeserializeOwned>(dirs: &[PathBuf], file_name: &str) -> Result<Option<Vec<T>>> {
    let Some(path) = locate(dirs, file_name) else {
        debug!("{file_name} not found under any of {dirs:?}");
        return Ok(None);
    };
    debug!("loading {}", path.display());
    read_rows(&path).map(Some)
}

/// First candidate directory containing `file_name`. Later candidates are
/// not probed.
fn locate(dirs: &[PathBuf], file_name: &str) -> Option<PathBuf> {
    dirs.iter().map(|dir| dir.join(file_name)).find(|p| p.exists())
}

/// Parse every record of a CSV file. A malformed row is a hard error, not
/// a skip: these logs are self-produced and a bad row means a bad run.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("{}: row {row_no}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const ENGINE_CSV: &str = "time,mouseX,mouseY,uuidType,fps,entities,drawCalls,pointAmount,linesAmount,polyAmount\n\
        0.1,10,20,-1,60,3,6,1,1,1\n\
        0.2,11,21,0,59.5,3,6,1,1,1\n";

    /// Fresh `base/{Debug,Release}` tree under the system temp dir.
    fn temp_base(tag: &str) -> PathBuf {
        let base = std::env::temp_dir().join(format!(
            "telemetry-charts-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(base.join("Debug")).unwrap();
        fs::create_dir_all(base.join("Release")).unwrap();
        base
    }

    #[test]
    fn picks_first_directory_containing_the_file() {
        let base = temp_base("probe");
        fs::write(base.join("Release").join(ENGINE_LOG), ENGINE_CSV).unwrap();

        let dirs = vec![base.clone(), base.join("Debug"), base.join("Release")];
        let rows = load_engine_log(&dirs).unwrap().expect("log should be found");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mouse_x, 10.0);
        assert_eq!(rows[1].uuid_type, 0);

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn earlier_directory_shadows_later_ones() {
        let base = temp_base("shadow");
        fs::write(base.join(ENGINE_LOG), ENGINE_CSV).unwrap();
        let mut shadowed = ENGINE_CSV.to_string();
        shadowed.push_str("0.3,12,22,1,59,3,6,1,1,1\n");
        fs::write(base.join("Release").join(ENGINE_LOG), shadowed).unwrap();

        let dirs = vec![base.clone(), base.join("Debug"), base.join("Release")];
        let rows = load_engine_log(&dirs).unwrap().unwrap();
        assert_eq!(rows.len(), 2);

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn absent_file_is_not_an_error() {
        let base = temp_base("absent");
        let dirs = vec![base.clone(), base.join("Debug"), base.join("Release")];
        assert!(load_engine_log(&dirs).unwrap().is_none());
        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn malformed_rows_are_fatal() {
        let base = temp_base("malformed");
        fs::write(
            base.join(ENGINE_LOG),
            "time,mouseX,mouseY,uuidType,fps,entities,drawCalls,pointAmount,linesAmount,polyAmount\n\
             0.1,not-a-number,20,-1,60,3,6,1,1,1\n",
        )
        .unwrap();

        let dirs = vec![base.clone()];
        assert!(load_engine_log(&dirs).is_err());
        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn missing_columns_are_fatal() {
        let base = temp_base("columns");
        fs::write(base.join(NAV_LOG), "rows,cols\n64,64\n").unwrap();

        let dirs = vec![base.clone()];
        assert!(load_nav_log(&dirs).is_err());
        fs::remove_dir_all(&base).unwrap();
    }
}
