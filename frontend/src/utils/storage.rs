use web_sys::Storage;

#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Result<Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No window object".to_string())?
        .local_storage()
        .map_err(|_| "localStorage access denied".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_storage() -> Result<Storage, String> {
    Err("localStorage is only available in the browser".to_string())
}
