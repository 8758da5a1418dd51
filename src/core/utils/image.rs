//! 图片解码与 tensor 转换

use std::{fs::File, io::BufReader, path::Path};

use candle_core::{DType, Device, Tensor};
use image::{
    codecs::gif::GifDecoder, AnimationDecoder, DynamicImage, GenericImageView, ImageDecoder,
    ImageFormat, ImageReader,
};

use crate::error::Error;

/// 无 alpha 通道时的默认 mask 尺寸
pub const EMPTY_MASK_SIZE: usize = 64;

/// 读取图片的所有帧
///
/// - GIF 动图按帧展开
/// - 其他格式按 EXIF 方向旋转后返回单帧
pub fn decode_frames(path: &Path) -> Result<Vec<DynamicImage>, Error> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;

    if reader.format() == Some(ImageFormat::Gif) {
        let decoder = GifDecoder::new(BufReader::new(File::open(path)?))?;
        let frames = decoder.into_frames().collect_frames()?;
        return Ok(frames
            .into_iter()
            .map(|frame| DynamicImage::ImageRgba8(frame.into_buffer()))
            .collect());
    }

    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);

    Ok(vec![image])
}

/// 将图像转换为张量
///
/// output: HWC
pub fn image_to_tensor(image: &DynamicImage, device: &Device) -> Result<Tensor, Error> {
    let (width, height) = image.dimensions();

    let img_buffer = image.to_rgb32f().into_raw();
    // HWC
    let tensor = Tensor::from_vec(img_buffer, (height as usize, width as usize, 3), device)?;

    Ok(tensor)
}

/// 从图像提取alpha通道并转换成Mask张量
///
/// 有 alpha 通道时为 1 - alpha, 否则为 64x64 的全零 mask
///
/// output: [1, H, W]
pub fn image_mask_to_tensor(image: &DynamicImage, device: &Device) -> Result<Tensor, Error> {
    if !image.color().has_alpha() {
        return Ok(Tensor::zeros(
            (1, EMPTY_MASK_SIZE, EMPTY_MASK_SIZE),
            DType::F32,
            device,
        )?);
    }

    let rgba = image.to_rgba32f();
    let (width, height) = rgba.dimensions();

    // 提取alpha通道
    let alpha: Vec<f32> = rgba.pixels().map(|p| p.0[3]).collect();

    // [H, W] -> [1, H, W]
    let mask = Tensor::from_vec(alpha, (height as usize, width as usize), device)?.unsqueeze(0)?;

    // 反转 mask (1 - alpha)
    let mask = (1.0 - mask)?;

    Ok(mask)
}

/// 将多帧图像转换为批次张量
///
/// output: (images NHWC, masks NHW)
pub fn frames_to_batch(frames: &[DynamicImage], device: &Device) -> Result<(Tensor, Tensor), Error> {
    let mut images = Vec::with_capacity(frames.len());
    let mut masks = Vec::with_capacity(frames.len());
    for frame in frames {
        // HWC -> NHWC
        images.push(image_to_tensor(frame, device)?.unsqueeze(0)?);
        masks.push(image_mask_to_tensor(frame, device)?);
    }

    let images = Tensor::cat(&images, 0)?;
    let masks = Tensor::cat(&masks, 0)?;

    Ok((images, masks))
}

#[cfg(test)]
mod tests {
    use image::{
        codecs::{gif::GifEncoder, png::PngEncoder},
        ExtendedColorType, Frame, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage,
    };

    use super::*;

    /// 大端 EXIF, 仅包含方向标签 (0x0112)
    fn exif_with_orientation(orientation: u8) -> Vec<u8> {
        vec![
            b'M', b'M', 0, 42, // TIFF 头
            0, 0, 0, 8, // IFD 偏移
            0, 1, // 条目数
            0x01, 0x12, 0, 3, 0, 0, 0, 1, 0, orientation, 0, 0, // 方向, SHORT
            0, 0, 0, 0, // 下一个 IFD
        ]
    }

    #[test]
    fn test_image_to_tensor_shape() -> anyhow::Result<()> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 2, Rgb([255, 0, 0])));
        let tensor = image_to_tensor(&image, &Device::Cpu)?;

        assert_eq!(tensor.dims(), &[2, 4, 3]);
        let pixel = tensor.get(0)?.get(0)?.to_vec1::<f32>()?;
        assert_eq!(pixel, vec![1.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_mask_without_alpha() -> anyhow::Result<()> {
        let image = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        let mask = image_mask_to_tensor(&image, &Device::Cpu)?;

        assert_eq!(mask.dims(), &[1, EMPTY_MASK_SIZE, EMPTY_MASK_SIZE]);
        assert_eq!(mask.sum_all()?.to_scalar::<f32>()?, 0.0);
        Ok(())
    }

    #[test]
    fn test_mask_inverts_alpha() -> anyhow::Result<()> {
        let mut rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        rgba.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
        let image = DynamicImage::ImageRgba8(rgba);

        let mask = image_mask_to_tensor(&image, &Device::Cpu)?;
        assert_eq!(mask.dims(), &[1, 2, 3]);

        let rows = mask.squeeze(0)?.to_vec2::<f32>()?;
        assert_eq!(rows[0][0], 1.0);
        assert_eq!(rows[1][2], 0.0);
        Ok(())
    }

    #[test]
    fn test_frames_to_batch() -> anyhow::Result<()> {
        let frames = vec![
            DynamicImage::ImageRgba8(RgbaImage::new(5, 7)),
            DynamicImage::ImageRgba8(RgbaImage::new(5, 7)),
        ];
        let (images, masks) = frames_to_batch(&frames, &Device::Cpu)?;

        assert_eq!(images.dims(), &[2, 7, 5, 3]);
        assert_eq!(masks.dims(), &[2, 7, 5]);
        Ok(())
    }

    #[test]
    fn test_decode_frames_png() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(6, 3, Rgb([255, 0, 0])).save(&path)?;

        let frames = decode_frames(&path)?;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].dimensions(), (6, 3));
        Ok(())
    }

    #[test]
    fn test_decode_frames_gif_batch() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("anim.gif");
        {
            let mut encoder = GifEncoder::new(std::fs::File::create(&path)?);
            encoder.encode_frames(vec![
                Frame::new(RgbaImage::from_pixel(4, 3, Rgba([255, 0, 0, 255]))),
                Frame::new(RgbaImage::from_pixel(4, 3, Rgba([0, 0, 255, 255]))),
            ])?;
        }

        let frames = decode_frames(&path)?;
        assert_eq!(frames.len(), 2);

        let (images, masks) = frames_to_batch(&frames, &Device::Cpu)?;
        assert_eq!(images.dims(), &[2, 3, 4, 3]);
        assert_eq!(masks.dims(), &[2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_decode_frames_applies_orientation() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rotated.png");

        // 4x2 的图片, 方向 6 表示顺时针旋转 90 度
        let image = RgbImage::from_pixel(4, 2, Rgb([0, 255, 0]));
        let mut encoder = PngEncoder::new(std::fs::File::create(&path)?);
        encoder.set_exif_metadata(exif_with_orientation(6))?;
        encoder.write_image(image.as_raw(), 4, 2, ExtendedColorType::Rgb8)?;

        let frames = decode_frames(&path)?;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].dimensions(), (2, 4));

        let (images, _) = frames_to_batch(&frames, &Device::Cpu)?;
        assert_eq!(images.dims(), &[1, 4, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_decode_frames_not_an_image() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("notes.png");
        std::fs::write(&path, "this is not an image")?;

        let result = decode_frames(&path);
        assert!(matches!(result, Err(Error::DecodeImage(_))));
        Ok(())
    }
}
