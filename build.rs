fn main() {
    // Embed build-time information, surfaced by `arsenal stats`
    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        chrono::Utc::now().to_rfc3339()
    );
}
