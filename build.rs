fn main() {
    println!("cargo:rerun-if-env-changed=THERMOWATCH_CONFIG_JSON");

    // Host builds (tests, simulation) have no ESP-IDF sysenv to forward.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
