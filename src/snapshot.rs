//! Flat text snapshots.
//!
//! One row per line, values separated by a single space, no header.
//! Rows follow the first free axis and columns the second; readers
//! must know the shape from the run configuration.
//! Values use the shortest representation that parses back to the
//! same `f64`.

use crate::domain::*;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} line {line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("{path:?} line {line}: expected {expected} values, found {found}")]
    Ragged {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("failed to encode {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl SnapshotError {
    fn io<P: AsRef<Path>>(path: &P, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Receives fields from the iteration controller.
/// Writers only borrow the field, a failed write cannot disturb the run.
pub trait SnapshotWriter<const GRID_DIMENSION: usize> {
    /// Called after the step with zero based index `step` completed.
    fn write_step<DomainType: DomainView<GRID_DIMENSION>>(
        &mut self,
        step: usize,
        field: &DomainType,
    ) -> Result<(), SnapshotError>;

    /// Called once with the field a steady state run settled on.
    fn write_final<DomainType: DomainView<GRID_DIMENSION>>(
        &mut self,
        field: &DomainType,
    ) -> Result<(), SnapshotError>;
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullWriter;

impl<const GRID_DIMENSION: usize> SnapshotWriter<GRID_DIMENSION> for NullWriter {
    fn write_step<DomainType: DomainView<GRID_DIMENSION>>(
        &mut self,
        _step: usize,
        _field: &DomainType,
    ) -> Result<(), SnapshotError> {
        Ok(())
    }

    fn write_final<DomainType: DomainView<GRID_DIMENSION>>(
        &mut self,
        _field: &DomainType,
    ) -> Result<(), SnapshotError> {
        Ok(())
    }
}

/// Hand each field to both writers. Both are always attempted,
/// the first error is returned.
impl<const GRID_DIMENSION: usize, A, B> SnapshotWriter<GRID_DIMENSION> for (A, B)
where
    A: SnapshotWriter<GRID_DIMENSION>,
    B: SnapshotWriter<GRID_DIMENSION>,
{
    fn write_step<DomainType: DomainView<GRID_DIMENSION>>(
        &mut self,
        step: usize,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        let a = self.0.write_step(step, field);
        let b = self.1.write_step(step, field);
        a.and(b)
    }

    fn write_final<DomainType: DomainView<GRID_DIMENSION>>(
        &mut self,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        let a = self.0.write_final(field);
        let b = self.1.write_final(field);
        a.and(b)
    }
}

/// `wave_00042.dat` style names.
pub fn step_file_name(prefix: &str, step: usize, extension: &str) -> String {
    format!("{prefix}_{step:05}.{extension}")
}

/// File names for the midpoint slices of a 3D field,
/// indexed by the axis the slice holds fixed.
pub const MIDPOINT_SLICE_NAMES: [&str; 3] =
    ["slice_YZ.dat", "slice_XZ.dat", "slice_XY.dat"];

const AXIS_PLANE_TAGS: [&str; 3] = ["YZ", "XZ", "XY"];

/// The planes through the middle of each axis, indexed by fixed axis.
pub fn midpoint_slices<DomainType: DomainView<3>>(
    domain: &DomainType,
) -> [Slice2D; 3] {
    let aabb = *domain.aabb();
    let exclusive_bounds = aabb.exclusive_bounds();
    std::array::from_fn(|axis| {
        let mid = aabb.bounds[(axis, 0)] + exclusive_bounds[axis] / 2;
        slice_3d(domain, axis, mid)
    })
}

pub fn write_slice<P: AsRef<Path>>(
    path: &P,
    slice: &Slice2D,
) -> Result<(), SnapshotError> {
    profiling::scope!("snapshot::write_slice");
    let file =
        std::fs::File::create(path).map_err(|e| SnapshotError::io(path, e))?;
    let mut output = std::io::BufWriter::new(file);
    write_rows(&mut output, slice).map_err(|e| SnapshotError::io(path, e))?;
    output.flush().map_err(|e| SnapshotError::io(path, e))
}

fn write_rows<W: Write>(output: &mut W, slice: &Slice2D) -> std::io::Result<()> {
    for row in slice.row_iter() {
        for (c, value) in row.iter().enumerate() {
            if c > 0 {
                write!(output, " ")?;
            }
            write!(output, "{value:?}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}

/// Parse a snapshot back. Blank lines are skipped,
/// every row must have the same number of values.
pub fn read_slice<P: AsRef<Path>>(path: &P) -> Result<Slice2D, SnapshotError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
    let mut values = Vec::new();
    let mut rows = 0;
    let mut cols = None;
    for (l, line) in text.lines().enumerate() {
        let before = values.len();
        for token in line.split_whitespace() {
            let v = token.parse::<f64>().map_err(|source| SnapshotError::Parse {
                path: path.as_ref().to_path_buf(),
                line: l + 1,
                source,
            })?;
            values.push(v);
        }
        let found = values.len() - before;
        if found == 0 {
            continue;
        }
        let expected = *cols.get_or_insert(found);
        if found != expected {
            return Err(SnapshotError::Ragged {
                path: path.as_ref().to_path_buf(),
                line: l + 1,
                expected,
                found,
            });
        }
        rows += 1;
    }
    Ok(Slice2D::new(rows, cols.unwrap_or(0), values))
}

/// Writes flat text snapshots into an existing directory.
///
/// 2D fields: `<prefix>_<step>.dat` per step, `<prefix>_final.dat` at the end.
/// 3D fields: the three midpoint planes, `<prefix>_<step>_YZ.dat` and so on
/// per step, `slice_YZ.dat`, `slice_XZ.dat`, `slice_XY.dat` at the end.
#[derive(Clone, Debug)]
pub struct TextSnapshotWriter {
    output_dir: PathBuf,
    prefix: String,
    written: usize,
}

impl TextSnapshotWriter {
    pub fn new<P: AsRef<Path>>(output_dir: &P) -> Self {
        TextSnapshotWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
            prefix: "wave".to_string(),
            written: 0,
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn step_path(&self, step: usize) -> PathBuf {
        self.output_dir
            .join(step_file_name(&self.prefix, step, "dat"))
    }

    /// Files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    fn write(&mut self, path: &Path, slice: &Slice2D) -> Result<(), SnapshotError> {
        write_slice(&path, slice)?;
        self.written += 1;
        Ok(())
    }
}

impl SnapshotWriter<2> for TextSnapshotWriter {
    fn write_step<DomainType: DomainView<2>>(
        &mut self,
        step: usize,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        let path = self.step_path(step);
        self.write(&path, &slice_2d(field))
    }

    fn write_final<DomainType: DomainView<2>>(
        &mut self,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        let path = self.output_dir.join(format!("{}_final.dat", self.prefix));
        self.write(&path, &slice_2d(field))
    }
}

impl SnapshotWriter<3> for TextSnapshotWriter {
    fn write_step<DomainType: DomainView<3>>(
        &mut self,
        step: usize,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        for (axis, slice) in midpoint_slices(field).iter().enumerate() {
            let name = format!(
                "{}_{:05}_{}.dat",
                self.prefix, step, AXIS_PLANE_TAGS[axis]
            );
            let path = self.output_dir.join(name);
            self.write(&path, slice)?;
        }
        Ok(())
    }

    fn write_final<DomainType: DomainView<3>>(
        &mut self,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        for (axis, slice) in midpoint_slices(field).iter().enumerate() {
            println!("Writing {} slice", AXIS_PLANE_TAGS[axis]);
            let path = self.output_dir.join(MIDPOINT_SLICE_NAMES[axis]);
            self.write(&path, slice)?;
        }
        Ok(())
    }
}
