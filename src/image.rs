use crate::domain::*;
use crate::snapshot::*;
use std::path::{Path, PathBuf};

/// Colour map a slice, rows run down the image.
/// Values are scaled from `[min, max]` onto the gradient and clamped.
pub fn slice_to_image(
    slice: &Slice2D,
    range: (f64, f64),
    gradient: colorous::Gradient,
) -> image::RgbImage {
    let (min, max) = range;
    debug_assert!(max > min);
    let mut img = image::RgbImage::new(slice.cols() as u32, slice.rows() as u32);
    for (r, row) in slice.row_iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            let t = ((v - min) / (max - min)).clamp(0.0, 1.0);
            let colour = gradient.eval_continuous(if t.is_nan() { 0.5 } else { t });
            img.put_pixel(c as u32, r as u32, image::Rgb(colour.as_array()));
        }
    }
    img
}

pub fn write_png<P: AsRef<Path>>(
    path: &P,
    slice: &Slice2D,
    range: (f64, f64),
    gradient: colorous::Gradient,
) -> Result<(), SnapshotError> {
    profiling::scope!("image::write_png");
    slice_to_image(slice, range, gradient)
        .save(path)
        .map_err(|source| SnapshotError::Image {
            path: path.as_ref().to_path_buf(),
            source,
        })
}

/// PNG previews of a 2D field, `<prefix>_<step>.png` per step.
pub struct ImageSnapshotWriter {
    output_dir: PathBuf,
    prefix: String,
    range: (f64, f64),
    gradient: colorous::Gradient,
}

impl ImageSnapshotWriter {
    /// Red to blue over a fixed range, so frames share one scale.
    pub fn new<P: AsRef<Path>>(output_dir: &P, range: (f64, f64)) -> Self {
        ImageSnapshotWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
            prefix: "frame".to_string(),
            range,
            gradient: colorous::RED_BLUE,
        }
    }
}

impl SnapshotWriter<2> for ImageSnapshotWriter {
    fn write_step<DomainType: DomainView<2>>(
        &mut self,
        step: usize,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        let path = self
            .output_dir
            .join(step_file_name(&self.prefix, step, "png"));
        write_png(&path, &slice_2d(field), self.range, self.gradient)
    }

    fn write_final<DomainType: DomainView<2>>(
        &mut self,
        field: &DomainType,
    ) -> Result<(), SnapshotError> {
        let path = self.output_dir.join(format!("{}_final.png", self.prefix));
        write_png(&path, &slice_2d(field), self.range, self.gradient)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn image_shape_and_clamp() {
        let slice = Slice2D::new(2, 3, vec![-100.0, 0.0, 100.0, -50.0, 25.0, 50.0]);
        let gradient = colorous::RED_BLUE;
        let img = slice_to_image(&slice, (-50.0, 50.0), gradient);
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        let low = image::Rgb(gradient.eval_continuous(0.0).as_array());
        let high = image::Rgb(gradient.eval_continuous(1.0).as_array());
        assert_eq!(*img.get_pixel(0, 0), low);
        assert_eq!(*img.get_pixel(0, 1), low);
        assert_eq!(*img.get_pixel(2, 0), high);
        assert_eq!(*img.get_pixel(2, 1), high);
    }
}
