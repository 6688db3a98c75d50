use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::NamedTempFile;

use vision_lessons::config::LessonsConfig;
use vision_lessons::TrackerKind;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "VISION_CONFIG",
        "VISION_TRACKER_INPUT",
        "VISION_TRACKER_OUTPUT",
        "VISION_TRACKER_KIND",
        "VISION_FACE_PROTOTXT",
        "VISION_FACE_MODEL",
        "VISION_FACE_THRESHOLD",
    ] {
        std::env::remove_var(key);
    }
}

fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_match_the_lessons() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = LessonsConfig::load(None).expect("load defaults");

    assert_eq!(cfg.filters.blur_kernel, (30, 30));
    assert_eq!(cfg.filters.bilateral.diameter, 15);
    assert_eq!(cfg.filters.canny.low_threshold, 70.0);
    assert_eq!(cfg.filters.canny.high_threshold, 200.0);
    assert_eq!(cfg.filters.corners.max_corners, 1000);
    assert_eq!(cfg.tracking.tracker, TrackerKind::Goturn);
    assert_eq!(cfg.tracking.initial_bbox.x, 245.0);
    assert_eq!(cfg.tracking.initial_bbox.y, 555.0);
    assert_eq!(cfg.tracking.fourcc, "avc1");
    assert_eq!(cfg.tracking.fps, 10.0);
    assert!(cfg.tracking.output.is_none());
    assert_eq!(cfg.face.input_width, 300);
    assert_eq!(cfg.face.mean, [104.0, 117.0, 123.0]);
    assert_eq!(cfg.face.threshold, 0.7);
    assert_eq!(cfg.window.preview_title, "Camera Preview");
}

#[test]
fn loads_toml_from_env_path_with_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = config_file(
        ".toml",
        r#"
[filters]
blur_kernel = [9, 9]

[filters.canny]
low_threshold = 50.0
high_threshold = 150.0

[tracking]
input = "clips/race.mp4"
tracker = "mil"
initial_bbox = [10.0, 20.0, 30.0, 40.0]
fps = 25.0

[face]
threshold = 0.5

[window]
filters_title = "Filters"
"#,
    );

    std::env::set_var("VISION_CONFIG", file.path());
    std::env::set_var("VISION_TRACKER_OUTPUT", "out/race-tracked.mp4");
    std::env::set_var("VISION_FACE_THRESHOLD", "0.8");

    let cfg = LessonsConfig::load(None).expect("load config");

    assert_eq!(cfg.filters.blur_kernel, (9, 9));
    assert_eq!(cfg.filters.canny.low_threshold, 50.0);
    assert_eq!(cfg.filters.bilateral.diameter, 15);
    assert_eq!(cfg.tracking.input, PathBuf::from("clips/race.mp4"));
    assert_eq!(cfg.tracking.tracker, TrackerKind::Mil);
    assert_eq!(cfg.tracking.initial_bbox.width, 30.0);
    assert_eq!(cfg.tracking.fps, 25.0);
    assert_eq!(
        cfg.tracking.output,
        Some(PathBuf::from("out/race-tracked.mp4"))
    );
    assert_eq!(cfg.face.threshold, 0.8);
    assert_eq!(cfg.window.filters_title, "Filters");
    assert_eq!(cfg.window.preview_title, "Camera Preview");

    clear_env();
}

#[test]
fn loads_json_by_extension() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = config_file(
        ".json",
        r#"{
            "tracking": { "tracker": "goturn", "fourcc": "mp4v" },
            "face": { "prototxt": "models/deploy.prototxt", "input_width": 320 }
        }"#,
    );
    std::env::set_var("VISION_TRACKER_KIND", "MIL");

    let cfg = LessonsConfig::load(Some(file.path())).expect("load config");

    assert_eq!(cfg.tracking.fourcc, "mp4v");
    assert_eq!(cfg.tracking.tracker, TrackerKind::Mil);
    assert_eq!(cfg.face.prototxt, PathBuf::from("models/deploy.prototxt"));
    assert_eq!(cfg.face.input_width, 320);
    assert_eq!(cfg.face.input_height, 300);

    clear_env();
}

#[test]
fn rejects_invalid_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let bad_fourcc = config_file(".toml", "[tracking]\nfourcc = \"h264x\"\n");
    assert!(LessonsConfig::load(Some(bad_fourcc.path())).is_err());

    let bad_bbox = config_file(".toml", "[tracking]\ninitial_bbox = [0.0, 0.0, 0.0, 10.0]\n");
    assert!(LessonsConfig::load(Some(bad_bbox.path())).is_err());

    let malformed = config_file(".json", "{ not json");
    let err = LessonsConfig::load(Some(malformed.path())).unwrap_err();
    assert!(err.to_string().contains("invalid config file"));

    std::env::set_var("VISION_FACE_THRESHOLD", "1.5");
    assert!(LessonsConfig::load(None).is_err());
    std::env::set_var("VISION_FACE_THRESHOLD", "high");
    assert!(LessonsConfig::load(None).is_err());

    std::env::set_var("VISION_FACE_THRESHOLD", "0.6");
    std::env::set_var("VISION_TRACKER_KIND", "kcf");
    assert!(LessonsConfig::load(None).is_err());

    clear_env();
}

#[test]
fn missing_config_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let err = LessonsConfig::load(Some(std::path::Path::new("/nonexistent/lessons.toml")))
        .unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
