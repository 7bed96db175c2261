use ps_poster::*;
use std::path::PathBuf;

fn options_for(input: &str) -> PosterOptions {
    PosterOptions {
        input_file: PathBuf::from(input),
        ..Default::default()
    }
}

#[test]
fn test_defaults() {
    let options = PosterOptions::default();
    assert_eq!(options.media, "A4");
    assert_eq!(options.cut_margin, "5%");
    assert_eq!(options.white_margin, "0");
    assert_eq!(options.creator, "poster");
    assert_eq!(options.max_buffered_bytes, 64 * 1024 * 1024);
    assert!(options.image.is_none());
    assert!(!options.manual_feed);
    assert!(!options.orientation_comment);
}

#[test]
fn test_validation_no_input_file() {
    match PosterOptions::default().resolve() {
        Err(PosterError::Config(msg)) => assert!(msg.contains("No input file")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_poster_defaults_to_media() {
    let options = PosterOptions {
        media: "Letter".to_string(),
        ..options_for("in.ps")
    };
    let config = options.resolve().unwrap();

    assert_eq!(config.media, BBox::from_size(612.0, 792.0));
    assert_eq!(config.media_name, "Letter");
    assert_eq!(config.request, SizeRequest::Poster(config.media));
}

#[test]
fn test_poster_wins_over_scale() {
    let options = PosterOptions {
        scale: Some(3.0),
        poster: Some("A2".to_string()),
        ..options_for("in.ps")
    };
    let config = options.resolve().unwrap();
    assert_eq!(
        config.request,
        SizeRequest::Poster(BBox::from_size(1190.0, 1684.0))
    );
}

#[test]
fn test_scale_range() {
    for (scale, ok) in [(0.001, false), (0.01, true), (2.5, true), (1e6, true), (2e6, false)] {
        let options = PosterOptions {
            scale: Some(scale),
            ..options_for("in.ps")
        };
        assert_eq!(options.resolve().is_ok(), ok, "scale {}", scale);
    }
}

#[test]
fn test_media_must_be_portrait_and_sizeable() {
    for media in ["842x595p", "10x300p", "300x10p"] {
        let options = PosterOptions {
            media: media.to_string(),
            ..options_for("in.ps")
        };
        assert!(
            matches!(options.resolve(), Err(PosterError::Config(_))),
            "media {}",
            media
        );
    }
}

#[test]
fn test_lower_left_corners_are_dropped() {
    let options = PosterOptions {
        media: "595x842+5,5p".to_string(),
        poster: Some("1000x2000+100,100p".to_string()),
        ..options_for("in.ps")
    };
    let config = options.resolve().unwrap();

    assert_eq!(config.media, BBox::from_size(595.0, 842.0));
    assert_eq!(
        config.request,
        SizeRequest::Poster(BBox::from_size(1000.0, 2000.0))
    );
}

#[test]
fn test_margins_follow_media() {
    let options = PosterOptions {
        media: "Letter".to_string(),
        cut_margin: "10%".to_string(),
        white_margin: "1x2cm".to_string(),
        ..options_for("in.ps")
    };
    let config = options.resolve().unwrap();

    assert!((config.cut_margin.horizontal - 61.2).abs() < 1e-9);
    assert!((config.cut_margin.vertical - 79.2).abs() < 1e-9);
    assert!((config.white_margin.vertical - 56.693).abs() < 1e-9);

    let (w, h) = config.drawable_size();
    assert!((w - (612.0 - 122.4)).abs() < 1e-9);
    assert!((h - (792.0 - 158.4)).abs() < 1e-9);
}

#[test]
fn test_bad_specs_surface_as_spec_errors() {
    let options = PosterOptions {
        cut_margin: "60%".to_string(),
        ..options_for("in.ps")
    };
    match options.resolve() {
        Err(PosterError::Spec(err)) => {
            assert!(matches!(err.kind, SpecErrorKind::MarginOutOfRange { .. }))
        }
        other => panic!("Expected Spec error, got {:?}", other),
    }

    let options = PosterOptions {
        white_margin: "nan%".to_string(),
        ..options_for("in.ps")
    };
    assert!(matches!(options.resolve(), Err(PosterError::Spec(_))));

    let options = PosterOptions {
        image: Some("3x3bogus".to_string()),
        ..options_for("in.ps")
    };
    assert!(matches!(options.resolve(), Err(PosterError::Spec(_))));
}

#[test]
fn test_explicit_image_is_parsed() {
    let options = PosterOptions {
        image: Some("200x100+10,10p".to_string()),
        ..options_for("in.ps")
    };
    let config = options.resolve().unwrap();
    assert_eq!(config.image, Some(BBox::new(10.0, 10.0, 200.0, 100.0)));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = PosterOptions {
        image: Some("A3".to_string()),
        media: "Letter".to_string(),
        poster: Some("2x2Letter".to_string()),
        cut_margin: "1cm".to_string(),
        manual_feed: true,
        orientation_comment: true,
        max_buffered_bytes: 4096,
        ..options_for("drawing.ps")
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = PosterOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{ "media": "A3", "scale": 2.0 }"#)
        .await
        .unwrap();

    let loaded = PosterOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.media, "A3");
    assert_eq!(loaded.scale, Some(2.0));
    assert_eq!(loaded.cut_margin, "5%");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_malformed_json() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), "{ media: ").await.unwrap();

    assert!(matches!(
        PosterOptions::load(temp_file.path()).await,
        Err(PosterError::Config(_))
    ));
}
