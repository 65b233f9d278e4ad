#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod namespace;
pub mod normalize;
pub mod platform;
pub mod registry;
pub mod resolver;
pub mod version;

pub use config::{Environment, ImplicitRelative, ModuleFormat, ResolverConfig};
pub use error::Error;
pub use host::StandardNormalizer;
pub use loader::{HostLoader, LoadRequest, ModuleResolver, Resolution};
pub use normalize::normalize;
pub use platform::PlatformTag;
pub use registry::{Module, ModuleRegistry};
pub use resolver::{ResolveMode, ResolveTrace, ResolveTraceStep, Resolver};
pub use version::VERSION;
