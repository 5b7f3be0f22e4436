//! Configuration parsing: pattern files and tool settings

pub mod patterns;
pub mod settings;

pub use patterns::{
    CanonicalConfig, ClassRule, PatternConfigSource, PatternDefinition, normalize,
};
pub use settings::{ColorOption, OutputConfig, PathsConfig, Settings};
