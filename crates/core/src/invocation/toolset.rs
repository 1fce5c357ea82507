//! Factory for the six operations sharing one locator and runner.

use std::sync::Arc;

use super::builder::Invocation;
use super::locator::PathLocator;
use super::policy::{
    AnimationPolicy, ClipPolicy, EncodePolicy, Gif2WebpPolicy, Mp3Policy, MuxPolicy,
};
use super::runner::SystemRunner;
use super::traits::{ExecutableLocator, ProcessRunner};
use crate::config::{Config, TemplatesConfig};

/// Hands out invocations configured from one [`Config`].
#[derive(Clone)]
pub struct ToolSet {
    templates: TemplatesConfig,
    locator: Arc<dyn ExecutableLocator>,
    runner: Arc<dyn ProcessRunner>,
}

impl ToolSet {
    /// Creates a tool set that resolves executables on disk and runs them as
    /// child processes.
    pub fn new(config: &Config) -> Self {
        Self::with_collaborators(
            config,
            Arc::new(PathLocator::new(config.binaries.clone())),
            Arc::new(SystemRunner::new()),
        )
    }

    /// Creates a tool set with a custom locator and runner.
    pub fn with_collaborators(
        config: &Config,
        locator: Arc<dyn ExecutableLocator>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            templates: config.templates.clone(),
            locator,
            runner,
        }
    }

    fn invocation<P: super::traits::ArgumentPolicy>(&self, policy: P) -> Invocation<P> {
        Invocation::new(policy, Arc::clone(&self.locator), Arc::clone(&self.runner))
    }

    /// Image to WebP through `cwebp`.
    pub fn encode(&self) -> Invocation<EncodePolicy> {
        self.invocation(self.templates.encode.clone())
    }

    /// WebP muxing through `webpmux`.
    pub fn mux(&self) -> Invocation<MuxPolicy> {
        self.invocation(self.templates.mux.clone())
    }

    /// GIF to WebP through `gif2webp`.
    pub fn gif2webp(&self) -> Invocation<Gif2WebpPolicy> {
        self.invocation(self.templates.gif2webp.clone())
    }

    /// One or two images to an animated WebP through `img2webp`.
    pub fn animate(&self) -> Invocation<AnimationPolicy> {
        self.invocation(self.templates.animate.clone())
    }

    /// Video to a short animated clip through `ffmpeg`.
    pub fn clip(&self) -> Invocation<ClipPolicy> {
        self.invocation(self.templates.clip.clone())
    }

    /// Audio to MP3 through `ffmpeg`.
    pub fn mp3(&self) -> Invocation<Mp3Policy> {
        self.invocation(self.templates.mp3.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::traits::ArgumentPolicy;
    use crate::testing::{MockLocator, MockRunner};

    #[test]
    fn test_templates_flow_into_policies() {
        let mut config = Config::default();
        config.templates.encode.quality = 42;
        config.templates.animate.loop_count = 2;

        let tools = ToolSet::with_collaborators(
            &config,
            Arc::new(MockLocator::new()),
            Arc::new(MockRunner::new()),
        );
        assert_eq!(tools.encode().policy().quality, 42);
        assert_eq!(tools.animate().policy().loop_count, 2);
        assert_eq!(tools.clip().policy(), &ClipPolicy::default());
    }

    #[test]
    fn test_operations_map_to_tools() {
        let tools = ToolSet::new(&Config::default());
        assert_eq!(tools.encode().policy().tool(), "cwebp");
        assert_eq!(tools.mux().policy().tool(), "webpmux");
        assert_eq!(tools.gif2webp().policy().tool(), "gif2webp");
        assert_eq!(tools.animate().policy().tool(), "img2webp");
        assert_eq!(tools.clip().policy().operation(), "clip");
        assert_eq!(tools.mp3().policy().operation(), "mp3");
    }
}
