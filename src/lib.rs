/// Sort Tabs - browser extension command sorting tabs by URL
/// Built with Rust + WASM

mod bridge;
pub mod command;
pub mod error;
pub mod host;
pub mod operations;
pub mod tab_data;
pub mod url_filter;

use wasm_bindgen::prelude::*;

use crate::host::{placement_moves, ShutdownReason, SortTabsExtension};
use crate::tab_data::{SortRequest, TabDescriptor, MATCH_ALL_FILTER};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn request_from_args(url_part: Option<String>, reverse: Option<bool>) -> SortRequest {
    SortRequest::new(
        url_part.unwrap_or_else(|| MATCH_ALL_FILTER.to_string()),
        reverse.unwrap_or(false),
    )
}

/// The running extension; the background script owns one of these
#[wasm_bindgen]
pub struct SortTabsAddon {
    extension: Option<SortTabsExtension>,
}

#[wasm_bindgen]
impl SortTabsAddon {
    /// Start up and register `sorttabs`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SortTabsAddon, JsValue> {
        let extension = SortTabsExtension::startup(&mut bridge::JsCommandRegistry).map_err(to_js_error)?;
        Ok(SortTabsAddon {
            extension: Some(extension),
        })
    }

    /// Shut down with the host's reason code; true if the command was removed
    pub fn shutdown(&mut self, reason: u32) -> Result<bool, JsValue> {
        let reason = ShutdownReason::from_code(reason)
            .ok_or_else(|| to_js_error(format!("unknown shutdown reason {}", reason)))?;

        match self.extension.take() {
            Some(extension) => extension
                .shutdown(&mut bridge::JsCommandRegistry, reason)
                .map_err(to_js_error),
            None => Ok(false),
        }
    }

    /// Run a typed command line such as `sorttabs github --reverse`
    pub fn run(&self, line: String, progress: Option<js_sys::Function>) -> Result<js_sys::Promise, JsValue> {
        if self.extension.is_none() {
            return Err(to_js_error("sorttabs is shut down"));
        }
        let request = command::parse_invocation(&line).map_err(to_js_error)?;

        Ok(wasm_bindgen_futures::future_to_promise(async move {
            sort_window(&request, progress).await.map(JsValue::from)
        }))
    }
}

/// Sort the tabs of the current window and report "Sorting complete"
#[wasm_bindgen]
pub async fn sorttabs(
    url_part: Option<String>,
    reverse: Option<bool>,
    progress: Option<js_sys::Function>,
) -> Result<String, JsValue> {
    sort_window(&request_from_args(url_part, reverse), progress).await
}

/// Plan a sort without touching any tabs
#[wasm_bindgen]
pub fn plan_tabs(tabs: JsValue, url_part: Option<String>, reverse: Option<bool>) -> Result<JsValue, JsValue> {
    let tabs: Vec<TabDescriptor> = serde_wasm_bindgen::from_value(tabs)
        .map_err(|e| to_js_error(format!("Failed to parse tabs: {:?}", e)))?;

    let plan = operations::plan(&tabs, &request_from_args(url_part, reverse)).map_err(to_js_error)?;

    serde_wasm_bindgen::to_value(&plan).map_err(|e| to_js_error(format!("Failed to serialize plan: {:?}", e)))
}

async fn sort_window(request: &SortRequest, progress: Option<js_sys::Function>) -> Result<String, JsValue> {
    let tabs = bridge::get_current_tabs().await.map_err(to_js_error)?;
    let plan = operations::plan(&tabs, request).map_err(to_js_error)?;
    let moves = placement_moves(&plan, &tabs);

    if !moves.is_empty() {
        bridge::move_tabs_with_progress(&moves, progress).await.map_err(|e| {
            log::error!("Sort aborted: {}", e);
            to_js_error(e)
        })?;
    }

    log::info!("Sorted {} tabs with {} moves", plan.len(), moves.len());
    Ok(command::COMPLETION_MESSAGE.to_string())
}
