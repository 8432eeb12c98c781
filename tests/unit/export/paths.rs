use super::*;

#[test]
fn defaults_land_in_the_working_directory() {
    let paths = OutputPaths::resolve(&OutputSpec::default(), None);
    assert_eq!(paths.image, PathBuf::from("decalresult.png"));
    assert_eq!(paths.bboxes_txt, PathBuf::from("decalresult_bboxes.txt"));
    assert_eq!(paths.bboxes_json, PathBuf::from("decalresult_bboxes.json"));
    assert_eq!(paths, OutputPaths::default());
}

#[test]
fn cli_dir_overrides_config_dir_and_custom_names_apply() {
    let spec = OutputSpec {
        dir: Some(PathBuf::from("from-config")),
        image: Some(PathBuf::from("sheet.png")),
        bboxes_txt: None,
        bboxes_json: Some(PathBuf::from("/abs/boxes.json")),
    };

    let paths = OutputPaths::resolve(&spec, None);
    assert_eq!(paths.image, PathBuf::from("from-config/sheet.png"));
    assert_eq!(
        paths.bboxes_txt,
        PathBuf::from("from-config/decalresult_bboxes.txt")
    );
    assert_eq!(paths.bboxes_json, PathBuf::from("/abs/boxes.json"));

    let paths = OutputPaths::resolve(&spec, Some(Path::new("cli-out")));
    assert_eq!(paths.get(ArtifactKind::Image), Path::new("cli-out/sheet.png"));
}
