use synthgen_generate::GeneratorRegistry;

fn main() {
    let registry = GeneratorRegistry::new();
    for kind in registry.kinds() {
        println!("{kind}");
    }
}
