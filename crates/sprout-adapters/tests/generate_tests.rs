//! End-to-end generation with the real template engine and in-memory I/O.

use std::fs;
use std::path::{Path, PathBuf};

use sprout_adapters::{
    DirectoryScanner, LocalFileWriter, MemoryFileWriter, RecordingRunner, TeraTemplateSet,
    builtin_source, default_config, standard_registry,
};
use sprout_core::prelude::*;
use sprout_core::domain::UserInfo;
use tempfile::TempDir;

fn config(license: License) -> ConfigRoot {
    default_config(
        UserInfo::new("Ann Example", "ann@example.org"),
        "github.com/ann",
        license,
    )
}

fn template_set(config: &ConfigRoot, env: &str) -> TeraTemplateSet {
    let service = TemplateService::new(Box::new(DirectoryScanner::new()));
    let sources = service
        .layered(builtin_source().unwrap(), &config.external_templates)
        .unwrap();
    let user = config.environment(env).unwrap().user;
    TeraTemplateSet::new(&sources, &standard_registry(user.as_ref()).unwrap()).unwrap()
}

fn generate(
    config: &ConfigRoot,
    request: &GenerateRequest,
) -> (SproutResult<GenerationPlan>, MemoryFileWriter, RecordingRunner) {
    let writer = MemoryFileWriter::new();
    let runner = RecordingRunner::new();
    let service = GenerateService::new(Box::new(writer.clone()), Box::new(runner.clone()));
    let mut templates = template_set(config, &request.environment);
    let result = service.generate(config, request, &mut templates);
    (result, writer, runner)
}

#[test]
fn cmdtest_project_with_newbsd_license() {
    let config = config(License::NewBsd);
    let request = GenerateRequest::new("default", "cmdtest", "go-demo");

    let (result, writer, _) = generate(&config, &request);
    result.unwrap();

    let files = writer.list_files();
    let expected: Vec<PathBuf> = [
        "go-demo/.gitignore",
        "go-demo/LICENSE",
        "go-demo/README.md",
        "go-demo/main.go",
        "go-demo/main_test.go",
    ]
    .iter()
    .map(|p| Path::new(".").join(p))
    .collect();
    assert_eq!(files, expected);

    let main = writer.read_file(&Path::new(".").join("go-demo/main.go")).unwrap();
    assert!(main.starts_with("// Copyright "));
    assert!(main.contains(", Ann Example. All rights reserved."));
    assert!(main.contains("package main\n\nimport \"fmt\"\n"));
    assert!(main.contains("fmt.Println(\"go-demo\")"));

    let test = writer.read_file(&Path::new(".").join("go-demo/main_test.go")).unwrap();
    assert!(test.contains("func TestGoDemo(t *testing.T)"));

    let readme = writer.read_file(&Path::new(".").join("go-demo/README.md")).unwrap();
    assert!(readme.starts_with("# go-demo\n"));
    assert!(readme.contains("go get github.com/ann/go-demo"));
    assert!(readme.contains("Written by Ann Example <ann@example.org>."));
    assert!(readme.contains("\nLicense\n-------\n"));

    let license = writer.read_file(&Path::new(".").join("go-demo/LICENSE")).unwrap();
    assert!(license.contains("Redistribution and use in source and binary forms"));
}

#[test]
fn pkg_project_uses_the_derived_package_name() {
    let config = config(License::None);
    let request = GenerateRequest::new("default", "pkgtest", "go-widget.go");

    let (result, writer, _) = generate(&config, &request);
    let plan = result.unwrap();
    assert_eq!(plan.project.package, "widget");

    let source = writer
        .read_file(&Path::new(".").join("go-widget.go/widget.go"))
        .unwrap();
    assert!(source.starts_with("// Package widget is generated by sprout."));
    assert!(source.contains("//\timport \"github.com/ann/go-widget.go\""));

    let test = writer
        .read_file(&Path::new(".").join("go-widget.go/widget_test.go"))
        .unwrap();
    assert!(test.starts_with("package widget\n"));

    let license = writer
        .read_file(&Path::new(".").join("go-widget.go/LICENSE"))
        .unwrap();
    assert!(license.is_empty());
}

#[test]
fn package_override_reaches_templates() {
    let config = config(License::None);
    let request = GenerateRequest::new("default", "pkg", "tools").with_package("toolkit");

    let (result, writer, _) = generate(&config, &request);
    let plan = result.unwrap();
    assert_eq!(plan.project.import, "github.com/ann/toolkit");

    let source = writer
        .read_file(&Path::new(".").join("tools/toolkit.go"))
        .unwrap();
    assert!(source.starts_with("// Package toolkit is generated by sprout."));
    assert!(source.contains("//\timport \"github.com/ann/toolkit\""));
}

#[test]
fn external_templates_shadow_builtins_and_hooks_run_in_order() {
    let external = TempDir::new().unwrap();
    fs::write(
        external.path().join("go.cmd.t"),
        "package main // custom {{ time_year() | length }}\n",
    )
    .unwrap();

    let mut config = config(License::None);
    config.external_templates = vec![external.path().to_path_buf()];
    let projects = config.projects.as_mut().unwrap();
    projects.insert(
        "hooked",
        serde_json::from_str(
            r#"{
                "Inherits": ["cmd"],
                "Hooks": {
                    "Pre": [{"Commands": ["echo start {{ Project.Name }}"]}],
                    "Post": [{"Cwd": "{{ Project.Name }}", "Commands": ["git init", "go fmt ./..."]}]
                }
            }"#,
        )
        .unwrap(),
    );
    config.validate().unwrap();

    let request = GenerateRequest::new("default", "hooked", "demo").with_output_root("out");
    let (result, writer, runner) = generate(&config, &request);
    result.unwrap();

    let main = writer.read_file(Path::new("out/demo/main.go")).unwrap();
    assert_eq!(main, "package main // custom 4\n");

    assert_eq!(
        runner.calls(),
        [
            (PathBuf::from("out"), "echo start demo".to_owned()),
            (PathBuf::from("out/demo"), "git init".to_owned()),
            (PathBuf::from("out/demo"), "go fmt ./...".to_owned()),
        ]
    );
}

#[test]
fn missing_template_aborts_before_anything_happens() {
    let mut config = config(License::None);
    config.projects.as_mut().unwrap().insert(
        "broken",
        serde_json::from_str(
            r#"{
                "Inherits": ["cmd"],
                "Hooks": {"Pre": [{"Commands": ["echo never"]}]},
                "Files": {"extra": {"Path": "{{ Project.Name }}/x.go", "Type": "go", "Templates": ["nope.t"]}}
            }"#,
        )
        .unwrap(),
    );

    let request = GenerateRequest::new("default", "broken", "demo");
    let (result, writer, runner) = generate(&config, &request);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("nope.t"));
    assert!(writer.list_files().is_empty());
    assert!(runner.calls().is_empty());
}

#[test]
fn existing_files_on_disk_are_never_overwritten() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("demo")).unwrap();
    fs::write(root.path().join("demo/main.go"), "mine").unwrap();

    let config = config(License::None);
    let request = GenerateRequest::new("default", "cmd", "demo").with_output_root(root.path());
    let service = GenerateService::new(
        Box::new(LocalFileWriter::new()),
        Box::new(RecordingRunner::new()),
    );
    let mut templates = template_set(&config, "default");

    let err = service.generate(&config, &request, &mut templates).unwrap_err();
    assert!(matches!(
        err,
        SproutError::Application(sprout_core::application::ApplicationError::FileExists { .. })
    ));
    assert_eq!(fs::read_to_string(root.path().join("demo/main.go")).unwrap(), "mine");
    assert!(!root.path().join("demo/README.md").exists());
}

#[test]
fn local_writer_creates_the_whole_tree() {
    let root = TempDir::new().unwrap();
    let config = config(License::NewBsd);
    let request = GenerateRequest::new("default", "pkgtest", "lib").with_output_root(root.path());
    let service = GenerateService::new(
        Box::new(LocalFileWriter::new()),
        Box::new(RecordingRunner::new()),
    );
    let mut templates = template_set(&config, "default");

    service.generate(&config, &request, &mut templates).unwrap();

    for file in ["README.md", "LICENSE", ".gitignore", "lib.go", "lib_test.go"] {
        assert!(root.path().join("lib").join(file).is_file(), "{file} missing");
    }
}
