use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=SYMBOL_CATALOG_DATA_HINT");

    let hint = env::var("SYMBOL_CATALOG_DATA_HINT").ok();

    if let Some(raw_hint) = hint {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!(
            "cargo:rustc-env=SYMBOL_CATALOG_DATA_HINT={}",
            canonical.display()
        );
    }
}
