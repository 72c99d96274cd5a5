use anyhow::Result;
use near_workspaces::network::Sandbox;
use near_workspaces::{sandbox, Worker};
use std::env;

pub async fn setup_sandbox() -> Result<Worker<Sandbox>> {
    let mut last_err = None;
    for attempt in 1..=6 {
        match sandbox().await {
            Ok(worker) => return Ok(worker),
            Err(e) => {
                eprintln!("[setup_sandbox] Attempt {attempt}/6 failed, retrying in 5s: {e}");
                last_err = Some(e);
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    }
    Err(anyhow::anyhow!(
        "Failed to set up sandbox after 6 attempts: {}",
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// `<NAME>_WASM_PATH` if set, else the `cargo near build` output under `target/near/`.
pub fn get_wasm_path(contract_name: &str) -> String {
    let var = format!("{}_WASM_PATH", contract_name.to_uppercase().replace('-', "_"));
    env::var(var).unwrap_or_else(|_| {
        format!(
            "{}/../target/near/{1}/{1}.wasm",
            env!("CARGO_MANIFEST_DIR"),
            contract_name.replace('-', "_")
        )
    })
}
