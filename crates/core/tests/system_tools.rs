//! Tests against real child processes.
//!
//! The first group installs small shell scripts under the tool names into a
//! temporary bin directory, so the full locate/spawn/pump path runs without
//! the real encoders. The second group needs the real WebP tools on `PATH`
//! and is ignored by default.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::TempDir;
use webpbin_core::{
    testing::fixtures::{is_webp, PNG_1X1},
    BinariesConfig, Config, InvocationError, OutputBuffer, ToolSet,
};

fn install_tool(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn isolated_tools(dir: &Path) -> ToolSet {
    let config = Config {
        binaries: BinariesConfig {
            bin_dirs: vec![dir.to_path_buf()],
            search_path: false,
            ..Default::default()
        },
        ..Default::default()
    };
    ToolSet::new(&config)
}

#[tokio::test]
async fn test_fake_encoder_streams_through() {
    let bin = TempDir::new().unwrap();
    install_tool(bin.path(), "cwebp", "cat");
    let tools = isolated_tools(bin.path());

    let output = OutputBuffer::new();
    let mut encode = tools.encode();
    encode.input(PNG_1X1).output(output.clone());
    encode.run().await.unwrap();

    assert_eq!(output.contents(), PNG_1X1);
}

#[tokio::test]
async fn test_fake_tool_failure_is_composed() {
    let bin = TempDir::new().unwrap();
    install_tool(bin.path(), "cwebp", "echo \"args: $*\" >&2\nexit 4");
    let tools = isolated_tools(bin.path());

    let mut encode = tools.encode();
    encode.input(&b"ignored"[..]).output(OutputBuffer::new());
    let err = encode.run().await.unwrap_err();

    assert_eq!(err.to_string(), "exit status: 4. args: -q 75 -o - -- -\n");
}

#[tokio::test]
async fn test_fake_ffmpeg_receives_file_argument() {
    let bin = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let input = media.path().join("track.m4a");
    std::fs::write(&input, b"m4a audio").unwrap();

    // Emits the file named after -i, like a passthrough transcode would.
    install_tool(bin.path(), "ffmpeg", "cat \"$2\"");
    let tools = isolated_tools(bin.path());

    let output = OutputBuffer::new();
    let mut mp3 = tools.mp3();
    mp3.input_file(&input).output(output.clone());
    mp3.run().await.unwrap();

    assert_eq!(output.contents(), b"m4a audio");
}

#[tokio::test]
async fn test_fake_tool_success_ignores_stderr() {
    let bin = TempDir::new().unwrap();
    install_tool(
        bin.path(),
        "gif2webp",
        "echo 'Saved output file' >&2\nprintf 'RIFF\\000\\000\\000\\000WEBP'",
    );
    let tools = isolated_tools(bin.path());

    let output = OutputBuffer::new();
    let mut gif = tools.gif2webp();
    gif.input(&b"GIF89a"[..]).output(output.clone());
    gif.run().await.unwrap();

    assert!(is_webp(&output.contents()));
}

#[tokio::test]
async fn test_tool_not_installed() {
    let bin = TempDir::new().unwrap();
    let tools = isolated_tools(bin.path());

    let mut mux = tools.mux();
    mux.input(&b"webp"[..]).output(OutputBuffer::new());
    let err = mux.run().await.unwrap_err();
    assert!(matches!(err, InvocationError::LaunchFailure { .. }));
    assert_eq!(err.to_string(), "Failed to launch webpmux: executable not found. ");
}

#[tokio::test]
async fn test_non_executable_tool_is_skipped() {
    let partial = TempDir::new().unwrap();
    let installed = TempDir::new().unwrap();
    let stale = partial.path().join("cwebp");
    std::fs::write(&stale, "#!/bin/sh\nexit 9\n").unwrap();
    std::fs::set_permissions(&stale, std::fs::Permissions::from_mode(0o644)).unwrap();
    install_tool(installed.path(), "cwebp", "cat");

    let config = Config {
        binaries: BinariesConfig {
            bin_dirs: vec![partial.path().to_path_buf(), installed.path().to_path_buf()],
            search_path: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let tools = ToolSet::new(&config);

    let output = OutputBuffer::new();
    let mut encode = tools.encode();
    encode.input(PNG_1X1).output(output.clone());
    encode.run().await.unwrap();

    assert_eq!(output.contents(), PNG_1X1);
}

#[tokio::test]
async fn test_fake_version() {
    let bin = TempDir::new().unwrap();
    install_tool(bin.path(), "img2webp", "[ \"$1\" = \"-version\" ] && echo 1.4.0");
    let tools = isolated_tools(bin.path());

    assert_eq!(tools.animate().version().await.unwrap(), "1.4.0");
}

#[tokio::test]
#[ignore = "requires cwebp on PATH"]
async fn test_real_cwebp_encodes_png() {
    let tools = ToolSet::new(&Config::default());
    let output = OutputBuffer::new();

    let mut encode = tools.encode();
    encode.input(PNG_1X1).output(output.clone());
    encode.run().await.unwrap();

    assert!(is_webp(&output.contents()));
}

#[tokio::test]
#[ignore = "requires cwebp and img2webp on PATH"]
async fn test_real_img2webp_builds_two_frame_animation() {
    let tools = ToolSet::new(&Config::default());
    let frames = TempDir::new().unwrap();

    // img2webp wants files in a format it decodes natively, so encode the
    // fixture once and reuse it for both frames.
    let still = OutputBuffer::new();
    let mut encode = tools.encode();
    encode.input(PNG_1X1).output(still.clone());
    encode.run().await.unwrap();
    let first = frames.path().join("first.webp");
    let second = frames.path().join("second.webp");
    std::fs::write(&first, still.contents()).unwrap();
    std::fs::write(&second, still.contents()).unwrap();

    let output = OutputBuffer::new();
    let mut animate = tools.animate();
    animate.input_files(&first, &second).output(output.clone());
    animate.run().await.unwrap();

    // Identical frames may be merged by the encoder, so only check that an
    // animated container came out.
    let bytes = output.contents();
    assert!(is_webp(&bytes));
    assert!(bytes.windows(4).any(|w| w == b"ANIM"));
    assert!(bytes.windows(4).any(|w| w == b"ANMF"));
}
