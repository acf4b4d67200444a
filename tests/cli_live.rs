//! Live CLI test. Run with: `cargo test --features online --test cli_live -- --nocapture`
#![cfg(feature = "online")]

use std::process::Command;

#[test]
fn run_cli_plot_from_data_gouv() {
    // Cargo sets this to the path of the compiled binary named as in Cargo.toml [[bin]].
    let exe = env!("CARGO_BIN_EXE_hospi");
    let tmp = std::env::temp_dir().join("covid_hospi_cli_plot.svg");
    let status = Command::new(exe)
        .args(["plot", "--out", tmp.to_str().unwrap(), "--rad", "true"])
        .status()
        .expect("spawn cli");
    assert!(status.success());
    assert!(std::fs::metadata(&tmp).is_ok());
    std::fs::remove_file(&tmp).ok();
}
