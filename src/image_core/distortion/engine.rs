use crate::image_core::calibration::types::CalibrationMatrix;
use crate::image_core::distortion::types::{PixelCoord, RayDirection};

/// Maps a ray direction to the corresponding pixel coordinate in an image of
/// the given target dimensions, correcting for lens distortion by bilinear
/// interpolation over the calibration grid.
///
/// The grid's y origin sits at the image bottom, so the vertical coordinate
/// is flipped. Horizontally the full 63 cells of interpolation room are
/// used; vertically one extra row of margin is reserved, hence the 63/62
/// pair of constants. Cell lookups one past the grid edge are clamped to
/// the edge cell, so rays far outside the calibrated field of view produce
/// edge-extended values.
pub fn warp(
    ray: RayDirection,
    target_width: f32,
    target_height: f32,
    matrix: &CalibrationMatrix,
) -> PixelCoord {
    let cal_x = 63.0 * ray.x / target_width;
    let cal_y = 62.0 * (1.0 - ray.y / target_height);

    let fx = cal_x.floor();
    let fy = cal_y.floor();
    let wx = cal_x - fx;
    let wy = cal_y - fy;

    let x1 = fx as i64;
    let y1 = fy as i64;
    let x2 = x1 + 1;
    let y2 = y1 + 1;

    let w11 = (1.0 - wx) * (1.0 - wy);
    let w21 = wx * (1.0 - wy);
    let w12 = (1.0 - wx) * wy;
    let w22 = wx * wy;

    let ix = w11 * matrix.sample(x1, y1, 0)
        + w21 * matrix.sample(x2, y1, 0)
        + w12 * matrix.sample(x1, y2, 0)
        + w22 * matrix.sample(x2, y2, 0);

    let iy = w11 * matrix.sample(x1, y1, 1)
        + w21 * matrix.sample(x2, y1, 1)
        + w12 * matrix.sample(x1, y2, 1)
        + w22 * matrix.sample(x2, y2, 1);

    PixelCoord::new(ix * target_width, iy * target_height)
}

/// Converts a pixel coordinate into the corrected ray direction.
///
/// This is an approximation, not a true mathematical inverse of [`warp`]:
/// the calibration grid encodes forward distortion only, so the pixel
/// position is first pushed through [`warp`] and the result rescaled into
/// ray-slope space with the matrix's offset and scale factors.
pub fn rectify(
    uv: PixelCoord,
    matrix: &CalibrationMatrix,
    width: f32,
    height: f32,
) -> RayDirection {
    let warped = warp(RayDirection::new(uv.x, uv.y), width, height, matrix);
    RayDirection {
        x: (warped.x / width - matrix.ray_offset_x()) / matrix.ray_scale_x(),
        y: (warped.y / height - matrix.ray_offset_y()) / matrix.ray_scale_y(),
    }
}
