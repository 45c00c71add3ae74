/// JavaScript bridge to the browser's tabs API and command registry

use wasm_bindgen::prelude::*;

use crate::command::CommandSpec;
use crate::host::{CommandRegistry, TabMove};
use crate::tab_data::TabDescriptor;

// Import JS bridge functions
#[wasm_bindgen(module = "/sorttabs.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getCurrentWindowTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn moveTabs(moves: JsValue, progress_callback: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn registerCommand(spec: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn unregisterCommand(name: &str) -> Result<(), JsValue>;
}

/// Registry backed by the extension's background page
pub struct JsCommandRegistry;

impl CommandRegistry for JsCommandRegistry {
    fn add_command(&mut self, spec: &CommandSpec) -> Result<(), String> {
        let spec_js = serde_wasm_bindgen::to_value(spec)
            .map_err(|e| format!("Failed to serialize command: {:?}", e))?;

        registerCommand(spec_js).map_err(|e| format!("{:?}", e))
    }

    fn remove_command(&mut self, name: &str) -> Result<(), String> {
        unregisterCommand(name).map_err(|e| format!("{:?}", e))
    }
}

pub async fn get_current_tabs() -> Result<Vec<TabDescriptor>, String> {
    match getCurrentWindowTabs().await {
        Ok(tabs_js) => {
            let tabs: Vec<TabDescriptor> = serde_wasm_bindgen::from_value(tabs_js)
                .map_err(|e| format!("Failed to parse tabs: {:?}", e))?;
            Ok(tabs)
        }
        Err(e) => Err(format!("Failed to get tabs: {:?}", e)),
    }
}

/// Hand the moves to the browser, which performs them one after another
pub async fn move_tabs_with_progress(
    moves: &[TabMove],
    progress: Option<js_sys::Function>,
) -> Result<(), String> {
    let progress_callback = Closure::wrap(Box::new(move |percent: u8| {
        report_progress(progress.as_ref(), percent);
    }) as Box<dyn Fn(u8)>);

    let moves_js = serde_wasm_bindgen::to_value(moves)
        .map_err(|e| format!("Failed to serialize: {:?}", e))?;

    moveTabs(moves_js, progress_callback.as_ref().unchecked_ref())
        .await
        .map_err(|e| format!("Move failed: {:?}", e))?;

    Ok(())
}

/// Forward progress to the caller's callback; false if the callback threw
fn report_progress(progress: Option<&js_sys::Function>, percent: u8) -> bool {
    match progress {
        Some(callback) => match callback.call1(&JsValue::NULL, &JsValue::from(percent)) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Progress callback failed at {}%: {:?}", percent, e);
                false
            }
        },
        None => {
            log::debug!("Sorting tabs... {}%", percent);
            true
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_report_progress_survives_throwing_callback() {
        let callback = js_sys::Function::new_with_args("percent", "throw new Error('at ' + percent)");

        assert!(!report_progress(Some(&callback), 50));
    }

    #[wasm_bindgen_test]
    fn test_report_progress_calls_callback() {
        let callback = js_sys::Function::new_with_args("percent", "return percent");

        assert!(report_progress(Some(&callback), 100));
        assert!(report_progress(None, 100));
    }
}
