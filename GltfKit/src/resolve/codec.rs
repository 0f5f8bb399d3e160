//! Image decoding via the `image` crate.

use image::{DynamicImage, ImageFormat};

use super::resolve_image;
use crate::error::{Error, Result};
use crate::formats::gltf::Document;

/// Resolve an image and decode its pixels.
///
/// The codec is picked from the image's MIME type, falling back to content
/// sniffing when the MIME is empty or unknown.
///
/// # Errors
///
/// Returns any error from [`resolve_image`], or [`Error::ImageDecode`] if the
/// bytes are not a PNG or JPEG the codec accepts.
pub fn decode_image(doc: &Document, index: usize) -> Result<DynamicImage> {
    let data = resolve_image(doc, index)?;

    let decoded = match ImageFormat::from_mime_type(&data.mime) {
        Some(format) => image::load_from_memory_with_format(&data.bytes, format),
        None => image::load_from_memory(&data.bytes),
    };
    let image = decoded.map_err(|source| Error::ImageDecode { index, source })?;

    tracing::debug!("Decoded image {}: {}x{}", index, image.width(), image.height());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::gltf::Image;
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    fn png_data_uri() -> String {
        let pixels: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_pixel(2, 3, Rgba([255, 0, 0, 255]));
        let mut png = Vec::new();
        pixels.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
        format!("data:image/png;base64,{}", BASE64.encode(&png))
    }

    #[test]
    fn test_decode_png() {
        let doc = Document {
            images: vec![Image { uri: Some(png_data_uri()), ..Image::default() }],
            ..Document::default()
        };
        let image = decode_image(&doc, 0).unwrap();
        assert_eq!((image.width(), image.height()), (2, 3));
    }

    #[test]
    fn test_decode_garbage() {
        let doc = Document {
            images: vec![Image { uri: Some("data:image/png;base64,AAECAw==".to_string()), ..Image::default() }],
            ..Document::default()
        };
        assert!(matches!(decode_image(&doc, 0), Err(Error::ImageDecode { index: 0, .. })));
    }
}
