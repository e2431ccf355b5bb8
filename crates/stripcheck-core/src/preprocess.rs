use image::RgbImage;

/// 3x3 sharpening kernel (identity plus a 4-neighbour Laplacian).
pub const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Sharpen the frame before fiducial location and sampling.
pub fn sharpen(image: &RgbImage) -> RgbImage {
    image::imageops::filter3x3(image, &SHARPEN_KERNEL)
}
