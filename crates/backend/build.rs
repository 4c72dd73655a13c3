use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=data");

    // Get the output directory where the binary will be placed
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap(); // "debug" or "release"

    // Construct path to target/debug or target/release
    // OUT_DIR is typically: target/debug/build/backend-xxx/out
    // We need to go to: target/debug or target/release
    let out_path = Path::new(&out_dir);
    let target_dir = out_path
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    // Source config.toml from workspace root
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    let source_config = workspace_root.join("config.toml");
    let dest_config = target_dir.join("config.toml");

    // Copy config.toml if it exists
    if source_config.exists() {
        fs::copy(&source_config, &dest_config)
            .unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));
        println!("cargo:warning=Copied config.toml to {:?}", dest_config);
    } else {
        println!(
            "cargo:warning=config.toml not found at {:?}, using default config",
            source_config
        );
    }

    // Copy the catalog CSVs next to the binary so the default data_dir works
    let source_data = manifest_dir.join("data");
    let dest_data = target_dir.join("data");
    if source_data.exists() {
        fs::create_dir_all(&dest_data).expect("Failed to create data directory");
        for entry in fs::read_dir(&source_data).expect("Failed to read data directory") {
            let entry = entry.expect("Failed to read data entry");
            if entry.path().is_file() {
                fs::copy(entry.path(), dest_data.join(entry.file_name()))
                    .unwrap_or_else(|e| panic!("Failed to copy catalog file: {}", e));
            }
        }
        println!("cargo:warning=Copied catalog data to {:?}", dest_data);
    }
}
