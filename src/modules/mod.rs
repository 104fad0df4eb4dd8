pub mod books;

use libris_kernel::{settings::Settings, ModuleRegistry};

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    registry.register(books::create_module(&settings.catalog));
}
