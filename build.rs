use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=ZBAR_LIB_DIR");
    println!("cargo:rerun-if-env-changed=ZBAR_STATIC");

    // Nothing to link when the native scanner is disabled
    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    let statik = env::var_os("ZBAR_STATIC").is_some();

    // An explicit library directory wins over whatever pkg-config reports
    if env::var_os("ZBAR_LIB_DIR").is_none() {
        match pkg_config::Config::new().statik(statik).probe("zbar") {
            Ok(lib) => {
                println!("cargo:version={}", lib.version);
                return;
            }
            Err(err) => {
                println!("cargo:warning=pkg-config could not find zbar ({err}), trying -lzbar");
            }
        }
    }

    if let Some(dir) = env::var_os("ZBAR_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }

    let kind = if statik { "static" } else { "dylib" };
    println!("cargo:rustc-link-lib={kind}=zbar");
}
