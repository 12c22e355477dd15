// Re-export all items from the submodules
mod collector_config;
mod extension_set;
mod presets;

pub use collector_config::{
    ArchiveMode,
    CollectionSettings,
    CollectorConfig,
    MissingFilePolicy,
    Overrides,
    load_or_default,
};

pub use extension_set::ExtensionSet;

pub use presets::Preset;
