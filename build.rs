fn main() {
    println!("cargo:rerun-if-env-changed=WELLPUMP_CONFIG");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
