use std::collections::HashMap;

use thiserror::Error;

use crate::ir::method_descriptor::InvocationKind;
use crate::resolve::{CustomDecodeFn, CustomEncodeFn};

/// Errors that can occur during weave configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration already locked by a weave pass
    #[error("Weave configuration is already locked")]
    AlreadyLocked,
}

/// Configuration consumed by a weave pass: the networked-behaviour root
/// type, the naming-prefix convention per invocation kind, and any
/// user-supplied codec pairs.
pub struct WeaveConfig {
    pub root_type: String,
    pub command_prefix: String,
    pub broadcast_prefix: String,
    pub target_prefix: String,
    custom_codecs: HashMap<String, (CustomEncodeFn, CustomDecodeFn)>,
    locked: bool,
}

impl Default for WeaveConfig {
    fn default() -> Self {
        Self {
            root_type: "NetBehaviour".to_string(),
            command_prefix: "cmd_".to_string(),
            broadcast_prefix: "rpc_".to_string(),
            target_prefix: "target_".to_string(),
            custom_codecs: HashMap::new(),
            locked: false,
        }
    }
}

impl WeaveConfig {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn root_type(&mut self, name: &str) -> &mut Self {
        self.check_lock();
        self.root_type = name.to_string();
        self
    }

    pub fn command_prefix(&mut self, prefix: &str) -> &mut Self {
        self.check_lock();
        self.command_prefix = prefix.to_string();
        self
    }

    pub fn broadcast_prefix(&mut self, prefix: &str) -> &mut Self {
        self.check_lock();
        self.broadcast_prefix = prefix.to_string();
        self
    }

    pub fn target_prefix(&mut self, prefix: &str) -> &mut Self {
        self.check_lock();
        self.target_prefix = prefix.to_string();
        self
    }

    /// Register a user-supplied codec pair for a named type. Takes
    /// precedence over auto-generation from the module type table.
    pub fn add_codec(
        &mut self,
        type_name: &str,
        encode: CustomEncodeFn,
        decode: CustomDecodeFn,
    ) -> &mut Self {
        self.check_lock();
        self.custom_codecs
            .insert(type_name.to_string(), (encode, decode));
        self
    }

    pub fn custom_codec(&self, type_name: &str) -> Option<&(CustomEncodeFn, CustomDecodeFn)> {
        self.custom_codecs.get(type_name)
    }

    pub fn custom_codecs(
        &self,
    ) -> impl Iterator<Item = (&str, &(CustomEncodeFn, CustomDecodeFn))> {
        self.custom_codecs
            .iter()
            .map(|(name, pair)| (name.as_str(), pair))
    }

    /// The prefix mandated for a remote invocation kind; `None` for plain
    /// methods, which carry no convention.
    pub fn prefix_for(&self, kind: InvocationKind) -> Option<&str> {
        match kind {
            InvocationKind::Command => Some(&self.command_prefix),
            InvocationKind::Broadcast => Some(&self.broadcast_prefix),
            InvocationKind::Target => Some(&self.target_prefix),
            InvocationKind::Plain => None,
        }
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn try_lock(&mut self) -> Result<(), ConfigError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    /// Checks if the configuration is locked without panicking
    pub fn try_check_lock(&self) -> Result<(), ConfigError> {
        if self.locked {
            Err(ConfigError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if the configuration is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Weave configuration already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }
}
