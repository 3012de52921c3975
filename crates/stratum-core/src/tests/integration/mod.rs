mod extension_tests;
mod loader_tests;
