use fast_image_resize as fr;

use crate::backend::PageFrame;
use crate::error::{AppError, AppResult};

pub(crate) const SIMD_DOWNSCALE_FILTER: fr::FilterType = fr::FilterType::CatmullRom;

/// Resizes an RGBA frame to the exact halfblock resolution of a page band.
pub fn resize_frame(frame: &PageFrame, dst_width: u32, dst_height: u32) -> AppResult<PageFrame> {
    if dst_width == 0 || dst_height == 0 {
        return Err(AppError::invalid_argument(
            "target frame dimensions must be non-zero",
        ));
    }
    if frame.width == dst_width && frame.height == dst_height {
        return Ok(frame.clone());
    }

    let src = fr::images::Image::from_vec_u8(
        frame.width,
        frame.height,
        frame.pixels.as_ref().to_vec(),
        fr::PixelType::U8x4,
    )
    .map_err(|_| {
        AppError::invalid_argument("rgba frame pixels length does not match dimensions")
    })?;

    let mut dst = fr::images::Image::new(dst_width, dst_height, fr::PixelType::U8x4);
    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(SIMD_DOWNSCALE_FILTER));

    resizer
        .resize(&src, &mut dst, &options)
        .map_err(|_| AppError::unsupported("failed to resize frame with SIMD"))?;

    Ok(PageFrame {
        width: dst_width,
        height: dst_height,
        pixels: dst.into_vec().into(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::backend::PageFrame;

    use super::resize_frame;

    fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> PageFrame {
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        PageFrame {
            width,
            height,
            pixels: Arc::from(pixels),
        }
    }

    #[test]
    fn resize_produces_exact_target_dimensions() {
        let frame = solid_frame(64, 128, [200, 10, 10, 255]);
        let resized = resize_frame(&frame, 16, 32).expect("resize should succeed");
        assert_eq!((resized.width, resized.height), (16, 32));
        assert_eq!(resized.byte_len(), 16 * 32 * 4);
        // Solid input stays solid modulo fixed-point rounding.
        assert!((i16::from(resized.pixels[0]) - 200).abs() <= 2);
    }

    #[test]
    fn same_size_input_passes_through() {
        let frame = solid_frame(8, 8, [0, 0, 0, 255]);
        let resized = resize_frame(&frame, 8, 8).expect("resize should succeed");
        assert_eq!(resized, frame);
    }

    #[test]
    fn zero_target_and_mismatched_buffers_are_rejected() {
        let frame = solid_frame(8, 8, [0, 0, 0, 255]);
        assert!(resize_frame(&frame, 0, 8).is_err());

        let broken = PageFrame {
            width: 8,
            height: 8,
            pixels: Arc::from(vec![0_u8; 12]),
        };
        assert!(resize_frame(&broken, 4, 4).is_err());
    }
}
