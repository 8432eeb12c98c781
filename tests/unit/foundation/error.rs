use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RepmarkError::config("canvas.width", "x")
            .to_string()
            .contains("config error: canvas.width:")
    );
    assert!(
        RepmarkError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        RepmarkError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn export_error_names_every_failed_path() {
    let err = RepmarkError::Export {
        failures: vec![
            ExportFailure {
                artifact: ArtifactKind::Image,
                path: PathBuf::from("blocked/decalresult.png"),
                reason: "not a directory".to_string(),
            },
            ExportFailure {
                artifact: ArtifactKind::BboxJson,
                path: PathBuf::from("blocked/decalresult_bboxes.json"),
                reason: "not a directory".to_string(),
            },
        ],
    };
    let msg = err.to_string();
    assert!(msg.starts_with("export error:"));
    assert!(msg.contains("blocked/decalresult.png"));
    assert!(msg.contains("blocked/decalresult_bboxes.json"));
    assert!(err.is_export());
    assert!(!err.is_config());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RepmarkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
