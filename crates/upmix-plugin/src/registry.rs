//! Registry of DSP entry points a host can instantiate by GUID.

use upmix_config::SurroundParams;

use crate::pipeline::{Dsp, SurroundPipeline};

/// Identity and metadata of a DSP entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Stable identifier hosts store alongside presets.
    pub guid: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Version string.
    pub version: &'static str,
    /// Free-text description shown in the host's about box.
    pub about: &'static str,
}

/// The stereo-to-surround upmixer.
pub const UPMIX_SURROUND: PluginDescriptor = PluginDescriptor {
    guid: "F856C6D5-1888-4DE3-8761-0A4CD132A33A",
    name: "Upmix Surround",
    version: env!("CARGO_PKG_VERSION"),
    about: "Passive matrix decoder that upmixes stereo to multichannel surround",
};

/// Factory function type for creating DSP instances from a preset blob.
pub type PipelineFactory = fn(&[u8]) -> Box<dyn Dsp + Send>;

struct RegistryEntry {
    descriptor: PluginDescriptor,
    factory: PipelineFactory,
}

/// Registry of DSP entry points.
///
/// ```rust
/// use upmix_plugin::{Dsp, PluginRegistry, UPMIX_SURROUND, default_preset};
///
/// let registry = PluginRegistry::new();
/// let dsp = registry.create(UPMIX_SURROUND.guid, &default_preset());
/// assert!(dsp.is_some());
/// assert!(!dsp.unwrap().need_track_change_mark());
/// ```
pub struct PluginRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// Create a registry with the built-in entry points registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(UPMIX_SURROUND, |preset| {
            Box::new(SurroundPipeline::from_preset(preset))
        });
        registry
    }

    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            entries: Vec::with_capacity(1),
        }
    }

    /// Adds an entry point. Returns `false` if the GUID is already taken.
    pub fn register(&mut self, descriptor: PluginDescriptor, factory: PipelineFactory) -> bool {
        if self.get(descriptor.guid).is_some() {
            tracing::warn!("PluginRegistry: duplicate GUID {}", descriptor.guid);
            return false;
        }
        tracing::info!(
            "PluginRegistry: registered '{}' {}",
            descriptor.name,
            descriptor.guid
        );
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
        true
    }

    /// Returns descriptors for all registered entry points.
    pub fn all(&self) -> Vec<&PluginDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Get a descriptor by GUID, ignoring case.
    pub fn get(&self, guid: &str) -> Option<&PluginDescriptor> {
        self.find(guid).map(|e| &e.descriptor)
    }

    /// Create an instance configured from `preset`.
    ///
    /// Returns `None` if the GUID is not registered. An undecodable preset
    /// still yields an instance running on default parameters.
    pub fn create(&self, guid: &str, preset: &[u8]) -> Option<Box<dyn Dsp + Send>> {
        self.find(guid).map(|e| (e.factory)(preset))
    }

    /// Returns the number of registered entry points.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, guid: &str) -> Option<&RegistryEntry> {
        self.entries
            .iter()
            .find(|e| e.descriptor.guid.eq_ignore_ascii_case(guid))
    }
}

/// The preset blob a host stores for a freshly inserted instance.
pub fn default_preset() -> Vec<u8> {
    SurroundParams::default().to_bytes()
}
