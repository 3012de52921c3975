use std::any::Any;
use std::collections::HashMap;

/// Call-time arguments handed to factory payloads during a query.
///
/// Carries simple string arguments plus arbitrary typed values shared by the
/// caller. The registry itself never inspects the context; it is passed
/// through to the factory functions verbatim.
#[derive(Default)]
pub struct FactoryContext {
    args: HashMap<String, String>,
    data: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl FactoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a string argument.
    pub fn set_arg(&mut self, key: &str, value: &str) {
        self.args.insert(key.to_string(), value.to_string());
    }

    /// Get a string argument.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(|s| s.as_str())
    }

    /// Set a typed data value.
    pub fn set_data<T: 'static + Send + Sync>(&mut self, key: &str, value: T) {
        self.data.insert(key.to_string(), Box::new(value));
    }

    /// Get a typed data value.
    pub fn data<T: 'static + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.data.get(key).and_then(|v| v.downcast_ref::<T>())
    }
}

impl std::fmt::Debug for FactoryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data_keys: Vec<&String> = self.data.keys().collect();
        f.debug_struct("FactoryContext")
            .field("args", &self.args)
            .field("data", &data_keys)
            .finish()
    }
}
