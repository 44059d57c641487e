//! Rasterizes a report region (SVG markup) into a PNG bitmap.
//!
//! Native builds rasterize directly with resvg; web builds go through an
//! off-screen canvas because the browser owns font loading there.

use super::ReportError;

/// A captured region: encoded PNG plus its pixel dimensions.
#[derive(Debug, Clone)]
pub struct RegionBitmap {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub async fn rasterize(svg: &str, width: u32, height: u32) -> Result<RegionBitmap, ReportError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        rasterize_native(svg, width, height)
    }

    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(svg, width, height).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn rasterize_native(svg: &str, width: u32, height: u32) -> Result<RegionBitmap, ReportError> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();

    let mut options = usvg::Options::default();
    options.fontdb = std::sync::Arc::new(fontdb);

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| ReportError::Capture(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ReportError::Capture("empty capture area".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| ReportError::Capture(e.to_string()))?;

    Ok(RegionBitmap { png, width, height })
}

#[cfg(target_arch = "wasm32")]
async fn rasterize_web(svg: &str, width: u32, height: u32) -> Result<RegionBitmap, ReportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url};

    let capture = |message: &str| ReportError::Capture(message.to_string());

    let mut opts = BlobPropertyBag::new();
    opts.type_("image/svg+xml");
    let mut parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| capture("unable to build SVG blob"))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| capture("unable to create SVG URL"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| capture("document unavailable"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| capture("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| capture("canvas cast failed"))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| capture("canvas context unavailable"))?
        .ok_or_else(|| capture("canvas context missing"))?
        .dyn_into()
        .map_err(|_| capture("context cast failed"))?;

    let image = HtmlImageElement::new().map_err(|_| capture("unable to create image"))?;
    let decode = image.decode();
    image.set_src(&url);
    JsFuture::from(decode)
        .await
        .map_err(|_| capture("image decode failed"))?;

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| capture("unable to draw image"))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| capture("unable to serialise canvas"))?;
    Url::revoke_object_url(&url).ok();

    let encoded = data_url
        .split(',')
        .nth(1)
        .ok_or_else(|| capture("malformed data URL"))?;
    let png = base64::decode(encoded).map_err(|_| capture("PNG decode failed"))?;

    Ok(RegionBitmap { png, width, height })
}
