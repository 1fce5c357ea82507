//! Argument assembly policies, one per operation.
//!
//! Every policy is plain data: the tool's fixed parameter template with
//! documented defaults. The `[templates.*]` sections of the configuration
//! deserialize straight into these types.
//!
//! The WebP tools are told to write to stdout with `-o -` and read stdin
//! through the `-- -` marker. FFmpeg reads stdin via `-i -` and writes to
//! stdout through a trailing `-` after an explicit `-f <format>`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::traits::ArgumentPolicy;
use super::types::InputArgs;

/// Destination token meaning "standard output" (and "standard input" as a
/// source).
pub const STDIO_TOKEN: &str = "-";

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// `-o -`: tells a WebP tool to write to stdout.
fn push_webp_output(args: &mut Vec<String>) {
    args.extend(["-o".to_string(), STDIO_TOKEN.to_string()]);
}

/// The primary input of a WebP tool: `-- -` for stdin, the path otherwise.
fn push_webp_input(args: &mut Vec<String>, input: &InputArgs<'_>) {
    match input {
        InputArgs::Stdin { .. } => {
            args.extend(["--".to_string(), STDIO_TOKEN.to_string()]);
        }
        InputArgs::Files { primary, .. } => args.push(path_arg(primary)),
    }
}

/// `-i -` or `-i <path>`.
fn push_ffmpeg_input(args: &mut Vec<String>, input: &InputArgs<'_>) {
    args.push("-i".to_string());
    match input {
        InputArgs::Stdin { .. } => args.push(STDIO_TOKEN.to_string()),
        InputArgs::Files { primary, .. } => args.push(path_arg(primary)),
    }
}

/// `-f <format> -`: FFmpeg writes the given container to stdout.
fn push_ffmpeg_output(args: &mut Vec<String>, format: &str) {
    args.extend([
        "-f".to_string(),
        format.to_string(),
        STDIO_TOKEN.to_string(),
    ]);
}

/// Raster image to WebP (`cwebp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodePolicy {
    /// Compression factor for the RGB channels, 0 to 100.
    #[serde(default = "default_encode_quality")]
    pub quality: u8,
}

fn default_encode_quality() -> u8 {
    75
}

impl Default for EncodePolicy {
    fn default() -> Self {
        Self {
            quality: default_encode_quality(),
        }
    }
}

impl ArgumentPolicy for EncodePolicy {
    fn operation(&self) -> &'static str {
        "encode"
    }

    fn tool(&self) -> &'static str {
        "cwebp"
    }

    fn assemble(&self, input: &InputArgs<'_>) -> Vec<String> {
        let mut args = vec!["-q".to_string(), self.quality.to_string()];
        push_webp_output(&mut args);
        push_webp_input(&mut args, input);
        args
    }
}

/// WebP container muxing (`webpmux`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuxPolicy {}

impl ArgumentPolicy for MuxPolicy {
    fn operation(&self) -> &'static str {
        "mux"
    }

    fn tool(&self) -> &'static str {
        "webpmux"
    }

    fn assemble(&self, input: &InputArgs<'_>) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        push_webp_output(&mut args);
        push_webp_input(&mut args, input);
        args
    }
}

/// GIF to animated WebP (`gif2webp`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gif2WebpPolicy {}

impl ArgumentPolicy for Gif2WebpPolicy {
    fn operation(&self) -> &'static str {
        "gif2webp"
    }

    fn tool(&self) -> &'static str {
        "gif2webp"
    }

    fn assemble(&self, input: &InputArgs<'_>) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        push_webp_output(&mut args);
        push_webp_input(&mut args, input);
        args
    }
}

/// Up to two still images to an animated WebP (`img2webp`).
///
/// Each frame is preceded by its own `-d <ms>` duration marker and the
/// `-o -` destination comes last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationPolicy {
    /// Loop count, 0 loops forever.
    #[serde(default)]
    pub loop_count: u32,

    /// Encode frames lossily.
    #[serde(default = "default_true")]
    pub lossy: bool,

    /// Display duration of the first frame in milliseconds.
    #[serde(default = "default_first_frame_ms")]
    pub first_frame_ms: u32,

    /// Display duration of the second frame in milliseconds.
    #[serde(default = "default_second_frame_ms")]
    pub second_frame_ms: u32,
}

fn default_true() -> bool {
    true
}

fn default_first_frame_ms() -> u32 {
    5000
}

fn default_second_frame_ms() -> u32 {
    3000
}

impl Default for AnimationPolicy {
    fn default() -> Self {
        Self {
            loop_count: 0,
            lossy: default_true(),
            first_frame_ms: default_first_frame_ms(),
            second_frame_ms: default_second_frame_ms(),
        }
    }
}

impl ArgumentPolicy for AnimationPolicy {
    fn operation(&self) -> &'static str {
        "animate"
    }

    fn tool(&self) -> &'static str {
        "img2webp"
    }

    fn max_inputs(&self) -> usize {
        2
    }

    fn assemble(&self, input: &InputArgs<'_>) -> Vec<String> {
        let mut args = vec!["-loop".to_string(), self.loop_count.to_string()];
        if self.lossy {
            args.push("-lossy".to_string());
        }

        args.extend(["-d".to_string(), self.first_frame_ms.to_string()]);
        push_webp_input(&mut args, input);

        if let Some(second) = input.secondary() {
            args.extend([
                "-d".to_string(),
                self.second_frame_ms.to_string(),
                path_arg(second),
            ]);
        }

        push_webp_output(&mut args);
        args
    }
}

/// Video to a short, square, looping animated clip (`ffmpeg`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipPolicy {
    /// Output pixel format.
    #[serde(default = "default_pixel_format")]
    pub pixel_format: String,

    /// Maximum clip length in seconds.
    #[serde(default = "default_clip_duration")]
    pub duration_secs: u32,

    /// Output frame rate.
    #[serde(default = "default_clip_frame_rate")]
    pub frame_rate: u32,

    /// Video filter chain.
    #[serde(default = "default_clip_filter")]
    pub filter: String,

    /// Lossless encoding.
    #[serde(default)]
    pub lossless: bool,

    /// Loop count, 0 loops forever.
    #[serde(default)]
    pub loop_count: u32,

    /// Encoder preset.
    #[serde(default = "default_clip_preset")]
    pub preset: String,

    /// Encoder quality, 0 to 100.
    #[serde(default = "default_clip_quality")]
    pub quality: u8,

    /// Output container passed to `-f`.
    #[serde(default = "default_clip_format")]
    pub format: String,
}

fn default_pixel_format() -> String {
    "yuva420p".to_string()
}

fn default_clip_duration() -> u32 {
    10
}

fn default_clip_frame_rate() -> u32 {
    8
}

fn default_clip_filter() -> String {
    "fps=15,scale=512:512:force_original_aspect_ratio=decrease:flags=lanczos,\
     format=rgba,pad=512:512:-1:-1:color=#00000000"
        .to_string()
}

fn default_clip_preset() -> String {
    "photo".to_string()
}

fn default_clip_quality() -> u8 {
    20
}

fn default_clip_format() -> String {
    "gif".to_string()
}

impl Default for ClipPolicy {
    fn default() -> Self {
        Self {
            pixel_format: default_pixel_format(),
            duration_secs: default_clip_duration(),
            frame_rate: default_clip_frame_rate(),
            filter: default_clip_filter(),
            lossless: false,
            loop_count: 0,
            preset: default_clip_preset(),
            quality: default_clip_quality(),
            format: default_clip_format(),
        }
    }
}

impl ArgumentPolicy for ClipPolicy {
    fn operation(&self) -> &'static str {
        "clip"
    }

    fn tool(&self) -> &'static str {
        "ffmpeg"
    }

    fn assemble(&self, input: &InputArgs<'_>) -> Vec<String> {
        let mut args = Vec::with_capacity(24);
        push_ffmpeg_input(&mut args, input);
        args.extend([
            "-pix_fmt".to_string(),
            self.pixel_format.clone(),
            "-t".to_string(),
            self.duration_secs.to_string(),
            "-r".to_string(),
            self.frame_rate.to_string(),
            "-filter:v".to_string(),
            self.filter.clone(),
            "-lossless".to_string(),
            u8::from(self.lossless).to_string(),
            "-loop".to_string(),
            self.loop_count.to_string(),
            "-preset".to_string(),
            self.preset.clone(),
            "-quality".to_string(),
            self.quality.to_string(),
        ]);
        push_ffmpeg_output(&mut args, &self.format);
        args
    }
}

/// Audio track extraction to MP3 (`ffmpeg`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mp3Policy {
    /// Video codec; `copy` keeps embedded cover art untouched.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Audio codec.
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// VBR quality scale, 0 (best) to 9.
    #[serde(default = "default_audio_quality")]
    pub audio_quality: u8,

    /// Output container passed to `-f`.
    #[serde(default = "default_mp3_format")]
    pub format: String,
}

fn default_video_codec() -> String {
    "copy".to_string()
}

fn default_audio_codec() -> String {
    "libmp3lame".to_string()
}

fn default_audio_quality() -> u8 {
    4
}

fn default_mp3_format() -> String {
    "mp3".to_string()
}

impl Default for Mp3Policy {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            audio_quality: default_audio_quality(),
            format: default_mp3_format(),
        }
    }
}

impl ArgumentPolicy for Mp3Policy {
    fn operation(&self) -> &'static str {
        "mp3"
    }

    fn tool(&self) -> &'static str {
        "ffmpeg"
    }

    fn assemble(&self, input: &InputArgs<'_>) -> Vec<String> {
        let mut args = Vec::with_capacity(12);
        push_ffmpeg_input(&mut args, input);
        args.extend([
            "-codec:v".to_string(),
            self.video_codec.clone(),
            "-codec:a".to_string(),
            self.audio_codec.clone(),
            "-qscale:a".to_string(),
            self.audio_quality.to_string(),
        ]);
        push_ffmpeg_output(&mut args, &self.format);
        args
    }
}
