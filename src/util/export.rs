//! Plain-text export to the clipboard or a downloaded file.
//!
//! Both calls are best effort and only work in the browser. The clipboard
//! write is not awaited, so a rejected permission prompt goes unreported.

#[cfg(all(test, not(feature = "csr")))]
#[path = "export_test.rs"]
mod export_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("export is not available outside the browser")]
    Unavailable,
    #[error("browser rejected the export: {0}")]
    Browser(String),
}

#[cfg(feature = "csr")]
fn browser_error(err: &wasm_bindgen::JsValue) -> ExportError {
    ExportError::Browser(format!("{err:?}"))
}

/// Start writing `text` to the system clipboard.
///
/// # Errors
///
/// Returns `Unavailable` when there is no browser window.
pub fn copy_text(text: &str) -> Result<(), ExportError> {
    #[cfg(feature = "csr")]
    {
        let window = web_sys::window().ok_or(ExportError::Unavailable)?;
        let _ = window.navigator().clipboard().write_text(text);
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = text;
        Err(ExportError::Unavailable)
    }
}

/// Offer `text` as a `text/plain` download named `file_name`.
///
/// # Errors
///
/// Returns `Unavailable` without a browser document, or `Browser` when the
/// blob, object URL or link cannot be created.
pub fn download_text(file_name: &str, text: &str) -> Result<(), ExportError> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::{JsCast, JsValue};

        let document = web_sys::window().and_then(|w| w.document()).ok_or(ExportError::Unavailable)?;
        let parts = js_sys::Array::of1(&JsValue::from_str(text));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("text/plain;charset=utf-8");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(|e| browser_error(&e))?;
        let href = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| browser_error(&e))?;

        let link = document
            .create_element("a")
            .map_err(|e| browser_error(&e))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|e| browser_error(&e))?;
        link.set_href(&href);
        link.set_download(file_name);
        link.click();
        let _ = web_sys::Url::revoke_object_url(&href);
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (file_name, text);
        Err(ExportError::Unavailable)
    }
}
