//! One-shot `<script>` injection shared by every caller on the page.

use std::sync::{LazyLock, Mutex, MutexGuard};

use js_sys::{Function, Promise};
use log::debug;
use touchview_core::loader::{LoadError, Request, ResourceRegistry};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};

static SCRIPTS: LazyLock<Mutex<ResourceRegistry<String>>> =
    LazyLock::new(|| Mutex::new(ResourceRegistry::new()));

fn scripts() -> MutexGuard<'static, ResourceRegistry<String>> {
    SCRIPTS.lock().unwrap_or_else(|e| e.into_inner())
}

/// Load the script at `url` once per page. Concurrent and later calls
/// resolve with the first load's outcome.
#[wasm_bindgen(js_name = loadScript)]
pub fn load_script(url: String) -> Promise {
    future_to_promise(async move {
        let request = scripts().request(url.clone());
        let outcome = match request {
            Request::Ready => Ok(()),
            Request::Failed(err) => Err(err),
            Request::Wait(waiter) => waiter
                .await
                .unwrap_or_else(|_| Err(LoadError::new("loader dropped"))),
            Request::Start => {
                let result = inject(&url).await;
                scripts().finish(&url, result.clone());
                result
            }
        };
        outcome
            .map(|()| JsValue::TRUE)
            .map_err(|e| JsError::new(&e.to_string()).into())
    })
}

async fn inject(url: &str) -> Result<(), LoadError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| LoadError::new("no document"))?;
    let head = document
        .head()
        .ok_or_else(|| LoadError::new("document has no <head>"))?;
    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| LoadError::new(format!("{e:?}")))?
        .dyn_into()
        .map_err(|_| LoadError::new("not a script element"))?;
    script.set_src(url);
    script.set_async(true);

    let loaded = Promise::new(&mut |resolve: Function, reject: Function| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    head.append_child(&script)
        .map_err(|e| LoadError::new(format!("{e:?}")))?;

    debug!("injected script {url}");
    JsFuture::from(loaded)
        .await
        .map(|_| ())
        .map_err(|_| LoadError::new(format!("failed to load {url}")))
}
