//! Owning plugin handle.

use std::rc::Rc;

use quill_types::config::PluginDescriptor;
use quill_types::error::Result;

/// The application that owns a command tree.
///
/// Shared read-only by every builder created for it.
#[derive(Debug)]
pub struct Plugin {
    descriptor: PluginDescriptor,
}

impl Plugin {
    /// Validate the descriptor and wrap it in a shareable handle.
    pub fn new(descriptor: PluginDescriptor) -> Result<Rc<Self>> {
        descriptor.validate()?;
        Ok(Rc::new(Self { descriptor }))
    }

    /// Load from the contents of a `plugin.toml`.
    pub fn from_toml(toml_str: &str) -> Result<Rc<Self>> {
        Self::new(PluginDescriptor::from_toml(toml_str)?)
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn version(&self) -> &str {
        &self.descriptor.version
    }

    pub fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    /// Text the fallback handler sends when a node has no executors.
    pub fn no_executor_message(&self) -> &str {
        &self.descriptor.commands.no_executor_message
    }
}
