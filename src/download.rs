//! Browser download of the exported diagram.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::{EditorError, Result};

/// Offers `contents` as a JSON file named `filename`.
pub fn download_json(filename: &str, contents: &str) -> Result<()> {
	let window = web_sys::window().ok_or_else(|| EditorError::Dom("no window".into()))?;
	let document = window
		.document()
		.ok_or_else(|| EditorError::Dom("no document".into()))?;
	let body = document
		.body()
		.ok_or_else(|| EditorError::Dom("no body".into()))?;

	let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(|_| {
		EditorError::Dom("created element is not an anchor".into())
	})?;
	anchor.set_href(&url);
	anchor.set_download(filename);
	body.append_child(&anchor)?;
	anchor.click();
	anchor.remove();
	Url::revoke_object_url(&url)?;
	log::info!("downloaded {filename} ({} bytes)", contents.len());
	Ok(())
}
