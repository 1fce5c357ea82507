use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Convert media through the WebP and FFmpeg command-line tools
#[derive(Parser, Debug)]
#[command(name = "webpbin")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    \
    WEBPBIN_CONFIG=<FILE>                    Configuration file\n    \
    WEBPBIN_TEMPLATES__ENCODE__QUALITY=90    Override any configuration key\n    \
    RUST_LOG=debug                           Enable debug logging")]
pub struct Cli {
    /// Configuration file (defaults to $WEBPBIN_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input and output files; stdin and stdout are used when omitted
#[derive(Args, Debug, Clone, Default)]
pub struct IoArgs {
    /// Input file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a PNG, JPEG, TIFF or WebP image to WebP (cwebp)
    Encode(IoArgs),
    /// Remux a WebP file (webpmux)
    Mux(IoArgs),
    /// Convert a GIF to an animated WebP (gif2webp)
    Gif2webp(IoArgs),
    /// Build an animated WebP from one or two images (img2webp)
    Animate {
        #[command(flatten)]
        io: IoArgs,

        /// Second frame
        #[arg(short, long)]
        second: Option<PathBuf>,
    },
    /// Cut a video into a short looping clip (ffmpeg)
    Clip(IoArgs),
    /// Extract audio as MP3 (ffmpeg)
    Mp3(IoArgs),
    /// Print the version of the tool behind an operation
    Version {
        /// Operation whose tool is queried
        #[arg(value_enum)]
        operation: Operation,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Mux,
    Gif2webp,
    Animate,
    Clip,
    Mp3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encode_with_files() {
        let cli = Cli::try_parse_from(["webpbin", "encode", "-i", "in.png", "-o", "out.webp"])
            .unwrap();
        match cli.command {
            Commands::Encode(io) => {
                assert_eq!(io.input, Some(PathBuf::from("in.png")));
                assert_eq!(io.output, Some(PathBuf::from("out.webp")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_animate_with_second_frame() {
        let cli = Cli::try_parse_from([
            "webpbin", "animate", "--input", "a.png", "--second", "b.png",
        ])
        .unwrap();
        match cli.command {
            Commands::Animate { io, second } => {
                assert_eq!(io.input, Some(PathBuf::from("a.png")));
                assert_eq!(io.output, None);
                assert_eq!(second, Some(PathBuf::from("b.png")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_stdio_defaults_and_global_config() {
        let cli = Cli::try_parse_from(["webpbin", "mp3", "--config", "webpbin.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("webpbin.toml")));
        match cli.command {
            Commands::Mp3(io) => {
                assert!(io.input.is_none());
                assert!(io.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["webpbin", "version", "gif2webp"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Version {
                operation: Operation::Gif2webp
            }
        ));
    }

    #[test]
    fn test_second_frame_only_for_animate() {
        assert!(Cli::try_parse_from(["webpbin", "encode", "--second", "b.png"]).is_err());
    }
}
