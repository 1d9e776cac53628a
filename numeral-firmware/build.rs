//! Build script for numeral-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates classifier.toml and embeds it as `DEVICE_CONFIG`
//! - Links the TensorFlow Lite Micro wrapper library

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use numeral_core::config::{char_prefix, DeviceConfig};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    setup_linker(&out_dir);
    let config = load_config();
    write_config(&out_dir, &config);
    link_tflm();
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate classifier.toml
fn load_config() -> DeviceConfig {
    println!("cargo:rerun-if-changed=classifier.toml");

    let config_path = Path::new("classifier.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: classifier.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a classifier.toml configuration file.     ║\n\
            ║  Please create one in the numeral-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read classifier.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax and types in one pass; missing keys take their defaults
    let config: DeviceConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid classifier.toml                                  ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid classifier configuration                         ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&format!("{:?}", e))
        );
    }

    println!("cargo:warning=classifier.toml validated successfully");
    config
}

/// Emit the validated configuration as Rust source
fn write_config(out_dir: &Path, config: &DeviceConfig) {
    let source = format!(
        "/// Device configuration from classifier.toml\n\
        pub const DEVICE_CONFIG: DeviceConfig = DeviceConfig {{\n    \
            serial: SerialSettings {{ baudrate: {baudrate} }},\n    \
            display: DisplaySettings {{ i2c_address: {address:#04x}, i2c_frequency: {frequency} }},\n    \
            pipeline: PipelineConfig {{\n        \
                progress_interval: {interval},\n        \
                read_timeout_us: {timeout},\n        \
                boot_delay_ms: {boot_delay},\n    \
            }},\n\
        }};\n",
        baudrate = config.serial.baudrate,
        address = config.display.i2c_address,
        frequency = config.display.i2c_frequency,
        interval = config.pipeline.progress_interval,
        timeout = config.pipeline.read_timeout_us,
        boot_delay = config.pipeline.boot_delay_ms,
    );

    fs::write(out_dir.join("config.rs"), source).unwrap();
}

/// Link the prebuilt TFLM wrapper (`libtflm_wrapper.a`)
fn link_tflm() {
    println!("cargo:rerun-if-env-changed=TFLM_LIB_DIR");

    match env::var("TFLM_LIB_DIR") {
        Ok(dir) => {
            println!("cargo:rustc-link-search=native={}", dir);
            println!("cargo:rustc-link-lib=static=tflm_wrapper");
        }
        Err(_) => {
            println!(
                "cargo:warning=TFLM_LIB_DIR not set, link will fail on unresolved tflm_* symbols"
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", char_prefix(line, 61))
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
