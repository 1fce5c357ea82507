pub mod config;
pub mod invocation;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, BinariesConfig,
    Config, ConfigError, TemplatesConfig,
};
pub use invocation::{
    compose_failure, AnimationPolicy, ArgumentPolicy, ClipPolicy, EncodePolicy,
    ExecutableLocator, ExitState, Gif2WebpPolicy, InputArgs, Invocation, InvocationError,
    Mp3Policy, MuxPolicy, OutputBuffer, PathLocator, ProcessOutcome, ProcessRunner,
    SystemRunner, ToolSet,
};
