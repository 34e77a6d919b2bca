fn main() {
    // Propagate ESP-IDF sysenv (sdkconfig, linker args) when cross-compiling
    // for the chip. Host builds (tests) have nothing to propagate.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
