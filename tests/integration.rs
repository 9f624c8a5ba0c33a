//! Integration tests for extmods


use std::fs;

use assert_cmd::Command;
use harness::{TestProject, run_extmods};
use predicates::prelude::*;

#[test]
fn test_basic_report() {
    let project = TestProject::new();
    project.add_source(
        "main.ts",
        "import express from 'express';\nimport { z } from \"zod\";\n",
    );

    let (stdout, stderr, code) = run_extmods(project.path(), &[]);
    assert_eq!(code, Some(0), "extmods should succeed: {}", stderr);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "express main.ts    ( import express from 'express'; )",
            "zod     main.ts    ( import { z } from \"zod\"; )",
            "",
            "assumed external modules:",
            r#"["express","zod"]"#,
        ]
    );
}

#[test]
fn test_shallow_citation_wins() {
    let project = TestProject::new();
    project.add_source("a/x.ts", "import foo from \"foo\";\n");
    project.add_source(
        "a/b/y.ts",
        "import foo from \"foo/bar\";\nimport \"./local\";\nimport util from \"./local\";\n",
    );

    let (stdout, _stderr, code) = run_extmods(project.path(), &[]);
    assert_eq!(code, Some(0));

    let report: Vec<&str> = stdout.lines().take_while(|l| !l.is_empty()).collect();
    assert_eq!(report.len(), 1, "expected one entry: {}", stdout);
    assert!(report[0].starts_with("foo "), "{}", report[0]);
    assert!(
        report[0].contains("a/x.ts") || report[0].contains("a\\x.ts"),
        "citation should come from a/x.ts: {}",
        report[0]
    );
    assert!(stdout.ends_with("[\"foo\"]\n"));
    assert!(!stdout.contains("local\"]"));
}

#[test]
fn test_builtins_are_not_reported() {
    let project = TestProject::new();
    project.add_source(
        "io.ts",
        "import fs from 'fs';\nimport { join } from 'path';\nimport { readFile } from 'node:fs/promises';\nimport fse from 'fs-extra';\n",
    );

    let (stdout, _stderr, code) = run_extmods(project.path(), &[]);
    assert_eq!(code, Some(0));
    assert!(stdout.ends_with("[\"fs-extra\"]\n"), "{}", stdout);
}

#[test]
fn test_sorted_scoped_and_plain() {
    let project = TestProject::new();
    project.add_source("z.ts", "import lodash from 'lodash/fp';");
    project.add_source("y.ts", "import { Injectable } from '@nestjs/common/decorators';");
    project.add_source("x.ts", "import axios from 'axios';");

    let (stdout, _stderr, code) = run_extmods(project.path(), &[]);
    assert_eq!(code, Some(0));
    assert!(
        stdout.ends_with("[\"@nestjs/common\",\"axios\",\"lodash\"]\n"),
        "{}",
        stdout
    );
}

#[test]
fn test_json_output() {
    let project = TestProject::new();
    project.add_source("app.ts", "import express from 'express';");

    let (stdout, _stderr, code) = run_extmods(project.path(), &["--json"]);
    assert_eq!(code, Some(0));

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value[0]["name"], "express");
    assert_eq!(value[0]["found_in"], "app.ts");
    assert_eq!(value[0]["line"], "import express from 'express';");
}

#[test]
fn test_explicit_root() {
    let project = TestProject::new();
    project.add_file("web/src/ui.ts", "import React from 'react';");

    let (stdout, _stderr, code) = run_extmods(project.path(), &["scan", "--root", "web/src"]);
    assert_eq!(code, Some(0));
    assert!(stdout.ends_with("[\"react\"]\n"), "{}", stdout);
}

#[test]
fn test_empty_tree() {
    let project = TestProject::new();
    project.add_source("plain.ts", "export const answer = 42;");

    let (stdout, _stderr, code) = run_extmods(project.path(), &[]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout, "\nassumed external modules:\n[]\n");
}

#[test]
fn test_missing_root_fails() {
    let project = TestProject::new();

    Command::cargo_bin("extmods")
        .unwrap()
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("extmods: cannot read directory"));
}

#[test]
fn test_subset_missing_key_fails_before_writing() {
    let project = TestProject::new();
    project.add_file("package.json", r#"{ "dependencies": { "express": "^4.18.0" } }"#);
    project.add_file("package-lock.json", "{}");

    Command::cargo_bin("extmods")
        .unwrap()
        .current_dir(project.path())
        .env_remove("DIRECTORY_NAME")
        .args(["subset", "--installer", "extmods-no-such-installer"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("backendRunOnlyDependencies"));

    assert!(!project.path().join("backend-only-dependencies").exists());
}

#[test]
fn test_subset_unknown_dependency_fails() {
    let project = TestProject::new();
    project.add_file(
        "package.json",
        r#"{ "backendRunOnlyDependencies": ["left-pad"], "dependencies": { "express": "^4.18.0" } }"#,
    );
    project.add_file("package-lock.json", "{}");

    Command::cargo_bin("extmods")
        .unwrap()
        .current_dir(project.path())
        .env_remove("DIRECTORY_NAME")
        .args(["subset", "--installer", "extmods-no-such-installer"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("left-pad"));

    assert!(
        !project
            .path()
            .join("backend-only-dependencies/package.json")
            .exists()
    );
}

#[cfg(unix)]
#[test]
fn test_subset_uses_directory_name_env() {
    let project = TestProject::new();
    project.add_file(
        "package.json",
        r#"{ "backendRunOnlyDependencies": ["express"], "dependencies": { "express": "^4.18.0", "vite": "^5.0.0" } }"#,
    );
    project.add_file("package-lock.json", "{\"lockfileVersion\": 3}");

    Command::cargo_bin("extmods")
        .unwrap()
        .current_dir(project.path())
        .env("DIRECTORY_NAME", "run-deps")
        .args(["subset", "--installer", "true"])
        .assert()
        .success();

    let manifest = fs::read_to_string(project.path().join("run-deps/package.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "dependencies": { "express": "^4.18.0" } })
    );
    assert!(project.path().join("run-deps/package-lock.json").exists());
}

#[cfg(unix)]
#[test]
fn test_subset_propagates_installer_exit_code() {
    let project = TestProject::new();
    project.add_file(
        "package.json",
        r#"{ "backendRunOnlyDependencies": [], "dependencies": {} }"#,
    );
    project.add_file("package-lock.json", "{}");

    Command::cargo_bin("extmods")
        .unwrap()
        .current_dir(project.path())
        .env_remove("DIRECTORY_NAME")
        .args(["subset", "--installer", "false"])
        .assert()
        .code(1);

    // `sh -c "exit 3"` cannot be passed through whitespace splitting, so use a script
    project.add_file("installer.sh", "exit 3\n");
    let script = project.path().join("installer.sh");
    Command::cargo_bin("extmods")
        .unwrap()
        .current_dir(project.path())
        .env_remove("DIRECTORY_NAME")
        .args(["subset", "--installer"])
        .arg(format!("sh {}", script.display()))
        .assert()
        .code(3);
}
