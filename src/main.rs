#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use inventory_core::paths::write_text_file;
use inventory_core::report::{self, SALES_CSV_FILENAME};
use inventory_core::{
    InventoryError, InventorySession, ItemForm, ItemId, PasswordChange, StorePaths,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Mutex, MutexGuard};
use tauri::{AppHandle, Manager, State};

struct AppState {
    session: Mutex<InventorySession>,
}

#[derive(Serialize)]
struct SaveCsvResult {
    ok: bool,
    canceled: bool,
    filename: String,
    path: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct StorageInfoResult {
    ok: bool,
    path_label: String,
}

#[derive(Deserialize)]
struct AuthSetupRequest {
    password: String,
}

#[derive(Deserialize)]
struct AuthVerifyRequest {
    password: String,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

#[derive(Deserialize)]
struct ItemAddRequest {
    form: ItemForm,
}

#[derive(Deserialize)]
struct ItemEditRequest {
    id: ItemId,
    form: ItemForm,
}

#[derive(Deserialize)]
struct ItemDeleteRequest {
    id: ItemId,
}

#[derive(Deserialize)]
struct ItemSellRequest {
    id: ItemId,
    quantity: String,
}

#[derive(Deserialize)]
struct IncomeResetRequest {
    password: String,
}

#[tauri::command]
fn app_version(app: AppHandle) -> String {
    app.package_info().version.to_string()
}

#[tauri::command]
fn app_quit(app: AppHandle) {
    log::info!("exiting on user request");
    app.exit(0);
}

#[tauri::command]
fn setup_status(state: State<'_, AppState>) -> Result<serde_json::Value, String> {
    let session = lock_session(&state)?;
    Ok(json!({
        "needsPassword": session.needs_password(),
        "folder": session.paths().root.to_string_lossy().to_string(),
    }))
}

#[tauri::command]
fn auth_setup(
    state: State<'_, AppState>,
    payload: AuthSetupRequest,
) -> Result<serde_json::Value, String> {
    let mut session = lock_session(&state)?;
    reply(session.set_initial_password(payload.password.as_str()))
}

#[tauri::command]
fn auth_verify(state: State<'_, AppState>, payload: AuthVerifyRequest) -> Result<bool, String> {
    let session = lock_session(&state)?;
    Ok(session.verify_owner(payload.password.as_str()))
}

#[tauri::command]
fn auth_change(
    state: State<'_, AppState>,
    payload: PasswordChange,
) -> Result<serde_json::Value, String> {
    let mut session = lock_session(&state)?;
    reply(session.change_password(&payload))
}

#[tauri::command]
fn storage_info(state: State<'_, AppState>) -> Result<StorageInfoResult, String> {
    let session = lock_session(&state)?;
    Ok(StorageInfoResult {
        ok: true,
        path_label: session.paths().root.to_string_lossy().to_string(),
    })
}

#[tauri::command]
fn inventory_rows(state: State<'_, AppState>) -> Result<serde_json::Value, String> {
    let session = lock_session(&state)?;
    Ok(json!({
        "rows": session.rows(),
        "incomeLabel": session.income_label(),
    }))
}

#[tauri::command]
fn inventory_search(
    state: State<'_, AppState>,
    payload: SearchRequest,
) -> Result<serde_json::Value, String> {
    let session = lock_session(&state)?;
    Ok(json!({
        "rows": session.search(payload.query.as_str()),
        "incomeLabel": session.income_label(),
    }))
}

#[tauri::command]
fn inventory_add(
    state: State<'_, AppState>,
    payload: ItemAddRequest,
) -> Result<serde_json::Value, String> {
    let mut session = lock_session(&state)?;
    reply(session.add(&payload.form))
}

#[tauri::command]
fn inventory_edit(
    state: State<'_, AppState>,
    payload: ItemEditRequest,
) -> Result<serde_json::Value, String> {
    let mut session = lock_session(&state)?;
    reply(session.edit(payload.id, &payload.form))
}

#[tauri::command]
fn inventory_delete(
    state: State<'_, AppState>,
    payload: ItemDeleteRequest,
) -> Result<serde_json::Value, String> {
    let mut session = lock_session(&state)?;
    reply(session.delete(payload.id))
}

#[tauri::command]
fn inventory_sell(
    state: State<'_, AppState>,
    payload: ItemSellRequest,
) -> Result<serde_json::Value, String> {
    let mut session = lock_session(&state)?;
    reply(session.sell(payload.id, payload.quantity.as_str()))
}

#[tauri::command]
fn income_reset(
    state: State<'_, AppState>,
    payload: IncomeResetRequest,
) -> Result<serde_json::Value, String> {
    let mut session = lock_session(&state)?;
    reply(session.reset_income(payload.password.as_str()))
}

#[tauri::command]
fn log_read(state: State<'_, AppState>) -> Result<String, String> {
    let session = lock_session(&state)?;
    session.read_log().map_err(|err| err.to_string())
}

#[tauri::command]
fn sales_report(state: State<'_, AppState>) -> Result<serde_json::Value, String> {
    let session = lock_session(&state)?;
    match session.sales_report() {
        Ok(totals) => Ok(json!({
            "ok": true,
            "title": report::CHART_TITLE,
            "xLabel": report::CHART_X_LABEL,
            "yLabel": report::CHART_Y_LABEL,
            "totals": totals,
        })),
        Err(err) => reply::<()>(Err(err)),
    }
}

#[tauri::command]
fn sales_export_csv(state: State<'_, AppState>) -> Result<SaveCsvResult, String> {
    let filename = SALES_CSV_FILENAME.to_string();
    // Release the lock before the dialog blocks.
    let totals = {
        let session = lock_session(&state)?;
        match session.sales_report() {
            Ok(totals) => totals,
            Err(InventoryError::Validation(err)) => {
                return Ok(SaveCsvResult {
                    ok: false,
                    canceled: false,
                    filename,
                    path: None,
                    error: Some(err.to_string()),
                });
            }
            Err(err) => return Err(err.to_string()),
        }
    };

    let path = rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(filename.as_str())
        .save_file();

    let Some(path) = path else {
        return Ok(SaveCsvResult {
            ok: false,
            canceled: true,
            filename,
            path: None,
            error: None,
        });
    };

    write_text_file(path.as_path(), report::sales_csv(totals.as_slice()).as_str())
        .map_err(|err| err.to_string())?;
    log::info!("exported {} sales totals to {}", totals.len(), path.display());
    Ok(SaveCsvResult {
        ok: true,
        canceled: false,
        filename,
        path: Some(path.to_string_lossy().to_string()),
        error: None,
    })
}

fn lock_session(state: &AppState) -> Result<MutexGuard<'_, InventorySession>, String> {
    state.session.lock().map_err(|err| err.to_string())
}

/// Validation failures become `{ok: false, error}` for the dialog; anything
/// else is a command error.
fn reply<T: Serialize>(result: inventory_core::Result<T>) -> Result<serde_json::Value, String> {
    match result {
        Ok(value) => Ok(json!({ "ok": true, "data": value })),
        Err(InventoryError::Validation(err)) => {
            Ok(json!({ "ok": false, "error": err.to_string() }))
        }
        Err(err) => {
            log::error!("inventory command failed: {err}");
            Err(err.to_string())
        }
    }
}

// A portable install keeps its data folder next to the executable.
fn portable_store_paths() -> Option<StorePaths> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    Some(StorePaths::under(dir))
}

fn resolve_store_paths(app: &AppHandle) -> Result<StorePaths, String> {
    let base = app.path().app_data_dir().map_err(|err| err.to_string())?;
    let default_paths = StorePaths::under(base.as_path());

    let mut resolved = default_paths.clone();
    if let Some(portable) = portable_store_paths() {
        if portable != default_paths && portable.data_score() > default_paths.data_score() {
            resolved = portable;
        }
    }
    log::info!("using data folder {}", resolved.root.display());
    Ok(resolved)
}

fn show_startup_error(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn main() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            let paths = resolve_store_paths(app.handle())?;
            let session = match InventorySession::open(paths) {
                Ok(session) => session,
                Err(err) => {
                    log::error!("failed to open inventory: {err}");
                    show_startup_error(format!("Could not open inventory data: {err}").as_str());
                    return Err(err.into());
                }
            };
            app.manage(AppState {
                session: Mutex::new(session),
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            app_version,
            app_quit,
            setup_status,
            auth_setup,
            auth_verify,
            auth_change,
            storage_info,
            inventory_rows,
            inventory_search,
            inventory_add,
            inventory_edit,
            inventory_delete,
            inventory_sell,
            income_reset,
            log_read,
            sales_report,
            sales_export_csv
        ])
        .run(tauri::generate_context!())
        .expect("failed to run Store Inventory Manager");
}
