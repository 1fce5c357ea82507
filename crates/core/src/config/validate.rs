use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - WebP and clip quality values are within 0..=100
/// - Frame durations and the clip frame rate/duration are non-zero
/// - FFmpeg codecs, formats and pixel format are not empty
/// - MP3 VBR quality is within 0..=9
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let templates = &config.templates;

    if templates.encode.quality > 100 {
        return Err(ConfigError::ValidationError(
            "templates.encode.quality must be between 0 and 100".to_string(),
        ));
    }

    if templates.animate.first_frame_ms == 0 || templates.animate.second_frame_ms == 0 {
        return Err(ConfigError::ValidationError(
            "templates.animate frame durations cannot be 0".to_string(),
        ));
    }

    let clip = &templates.clip;
    if clip.quality > 100 {
        return Err(ConfigError::ValidationError(
            "templates.clip.quality must be between 0 and 100".to_string(),
        ));
    }
    if clip.frame_rate == 0 || clip.duration_secs == 0 {
        return Err(ConfigError::ValidationError(
            "templates.clip.frame_rate and duration_secs cannot be 0".to_string(),
        ));
    }

    let mp3 = &templates.mp3;
    if mp3.audio_quality > 9 {
        return Err(ConfigError::ValidationError(
            "templates.mp3.audio_quality must be between 0 and 9".to_string(),
        ));
    }

    let required = [
        ("templates.clip.pixel_format", &clip.pixel_format),
        ("templates.clip.format", &clip.format),
        ("templates.mp3.video_codec", &mp3.video_codec),
        ("templates.mp3.audio_codec", &mp3.audio_codec),
        ("templates.mp3.format", &mp3.format),
    ];
    if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_quality_out_of_range_fails() {
        let mut config = Config::default();
        config.templates.encode.quality = 101;
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_frame_duration_fails() {
        let mut config = Config::default();
        config.templates.animate.second_frame_ms = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_zero_frame_rate_fails() {
        let mut config = Config::default();
        config.templates.clip.frame_rate = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_codec_fails() {
        let mut config = Config::default();
        config.templates.mp3.audio_codec = " ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("templates.mp3.audio_codec"));
    }
}
