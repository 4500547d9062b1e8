fn main() {
    if let Err(e) = pojobuilder_gen::build_script::generate_into_out_dir("pojobuilder.toml") {
        panic!("builder generation failed: {e}");
    }
}
