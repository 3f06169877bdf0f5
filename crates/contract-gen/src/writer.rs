use std::fs;
use std::path::{Component, Path, PathBuf};

use contract_core::errors::{ErrorInfo, GenError};
use contract_core::provenance::PlanProvenance;
use contract_plan::to_canonical_json_bytes;

fn io_error(code: &str, path: &Path, err: std::io::Error) -> GenError {
    GenError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Writes plan artifacts into an output directory.
#[derive(Debug, Clone)]
pub struct PlanWriter {
    out_dir: PathBuf,
}

impl PlanWriter {
    pub fn create(out_dir: &Path) -> Result<Self, GenError> {
        fs::create_dir_all(out_dir).map_err(|err| io_error("create-out-dir", out_dir, err))?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
        })
    }

    /// Writes `<name>.plan.json` and `<name>.provenance.json`, mirroring the schema
    /// file's directories under the output directory; returns the plan path.
    pub fn write(
        &self,
        schema_file: &str,
        plan_json: &str,
        provenance: &PlanProvenance,
    ) -> Result<PathBuf, GenError> {
        let relative = relative_stem(schema_file)?;
        let base = self.out_dir.join(&relative);
        if let Some(parent) = base.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error("create-out-dir", parent, err))?;
        }

        let plan_path = with_suffix(&base, "plan.json");
        fs::write(&plan_path, plan_json).map_err(|err| io_error("write-plan", &plan_path, err))?;

        let provenance_path = with_suffix(&base, "provenance.json");
        let bytes = to_canonical_json_bytes(provenance)?;
        fs::write(&provenance_path, bytes)
            .map_err(|err| io_error("write-provenance", &provenance_path, err))?;
        Ok(plan_path)
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// `acs/token.proto` becomes `acs/token`. Root, `.` and `..` components are dropped
/// so output never leaves the output directory.
pub fn relative_stem(schema_file: &str) -> Result<PathBuf, GenError> {
    let path = Path::new(schema_file);
    let mut relative: PathBuf = path
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|component| match component {
                    Component::Normal(part) => Some(part),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .filter(|stem| !stem.is_empty() && stem.to_str() != Some(".."))
        .ok_or_else(|| {
            GenError::Config(
                ErrorInfo::new("invalid-file-name", "schema file name has no stem")
                    .with_context("file", schema_file),
            )
        })?;
    relative.push(stem);
    Ok(relative)
}
