pub mod books;
pub mod editorials;

use bookshelf_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(editorials::create_module());
    registry.register(books::create_module());
}
