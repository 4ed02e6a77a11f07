//! One-shot canvas crop: loads the chosen photo, draws the selected region
//! onto an offscreen canvas and encodes it as a JPEG payload for upload.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Portrait framing used by the creator flow.
pub(crate) const CROP_ASPECT: (f64, f64) = (3.0, 4.0);

pub(crate) const JPEG_QUALITY: f64 = 0.9;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CropError {
    #[error("image failed to load")]
    ImageLoad,
    #[error("canvas 2d context unavailable")]
    NoContext,
    #[error("image encode failed")]
    Encode,
}

/// Pixel region of the source photo, in natural image coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Largest centered region of `aspect_w:aspect_h` that fits the photo,
/// shrunk by `zoom` (>= 1) so the user can tighten the framing.
pub(crate) fn centered_crop(
    image_width: f64,
    image_height: f64,
    (aspect_w, aspect_h): (f64, f64),
    zoom: f64,
) -> CropRegion {
    let zoom = zoom.max(1.0);
    let aspect = aspect_w / aspect_h;

    let (mut width, mut height) = if image_width / image_height > aspect {
        (image_height * aspect, image_height)
    } else {
        (image_width, image_width / aspect)
    };
    width /= zoom;
    height /= zoom;

    CropRegion {
        x: (image_width - width) / 2.0,
        y: (image_height - height) / 2.0,
        width,
        height,
    }
}

/// Crops `image_src` (a data or object URL) to the centered region for
/// `aspect` at `zoom` and returns JPEG bytes ready for upload.
pub(crate) async fn crop_centered_jpeg(
    image_src: &str,
    aspect: (f64, f64),
    zoom: f64,
) -> Result<Vec<u8>, CropError> {
    let image = load_image(image_src).await?;
    let region = centered_crop(
        image.natural_width() as f64,
        image.natural_height() as f64,
        aspect,
        zoom,
    );
    encode_region_as_jpeg(&image, region).await
}

async fn load_image(image_src: &str) -> Result<HtmlImageElement, CropError> {
    let image = HtmlImageElement::new().map_err(|_| CropError::ImageLoad)?;
    image.set_cross_origin(Some("anonymous"));
    image.set_src(image_src);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| CropError::ImageLoad)?;
    Ok(image)
}

async fn encode_region_as_jpeg(
    image: &HtmlImageElement,
    region: CropRegion,
) -> Result<Vec<u8>, CropError> {
    let canvas: HtmlCanvasElement = gloo::utils::document()
        .create_element("canvas")
        .map_err(|_| CropError::NoContext)?
        .dyn_into()
        .map_err(|_| CropError::NoContext)?;
    canvas.set_width(region.width.round() as u32);
    canvas.set_height(region.height.round() as u32);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| CropError::NoContext)?
        .ok_or(CropError::NoContext)?
        .dyn_into()
        .map_err(|_| CropError::NoContext)?;

    context
        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            image,
            region.x,
            region.y,
            region.width,
            region.height,
            0.0,
            0.0,
            region.width,
            region.height,
        )
        .map_err(|_| CropError::Encode)?;

    let blob = canvas_to_jpeg_blob(&canvas).await?;
    let buffer = JsFuture::from(blob.array_buffer())
        .await
        .map_err(|_| CropError::Encode)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

async fn canvas_to_jpeg_blob(canvas: &HtmlCanvasElement) -> Result<Blob, CropError> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        if let Err(err) = canvas.to_blob_with_type_and_encoder_options(
            callback.unchecked_ref(),
            "image/jpeg",
            &JsValue::from_f64(JPEG_QUALITY),
        ) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });

    JsFuture::from(promise)
        .await
        .map_err(|_| CropError::Encode)?
        .dyn_into()
        .map_err(|_| CropError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_photo_is_cropped_to_full_height() {
        let region = centered_crop(2000.0, 1000.0, CROP_ASPECT, 1.0);
        assert_eq!(region.height, 1000.0);
        assert_eq!(region.width, 750.0);
        assert_eq!(region.x, 625.0);
        assert_eq!(region.y, 0.0);
    }

    #[test]
    fn tall_photo_is_cropped_to_full_width() {
        let region = centered_crop(600.0, 2000.0, CROP_ASPECT, 1.0);
        assert_eq!(region.width, 600.0);
        assert_eq!(region.height, 800.0);
        assert_eq!(region.x, 0.0);
        assert_eq!(region.y, 600.0);
    }

    #[test]
    fn zoom_tightens_the_region_around_the_center() {
        let base = centered_crop(1200.0, 1600.0, CROP_ASPECT, 1.0);
        let zoomed = centered_crop(1200.0, 1600.0, CROP_ASPECT, 2.0);
        assert_eq!(zoomed.width, base.width / 2.0);
        assert_eq!(zoomed.height, base.height / 2.0);
        assert_eq!(zoomed.x, 300.0);
        assert_eq!(zoomed.y, 400.0);

        // zoom below 1 never widens past the photo
        let clamped = centered_crop(1200.0, 1600.0, CROP_ASPECT, 0.25);
        assert_eq!(clamped, base);
    }
}
