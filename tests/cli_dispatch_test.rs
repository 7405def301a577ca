// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// 辅助函数，避免重复。HOME 指向临时目录，配置与日志不会写入真实主目录
fn main_command(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1");
    cmd
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"))
        .stdout(predicate::str::contains("--download-videos"));
}

#[test]
fn test_missing_mode_shows_help() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_input_mode_requires_column() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .arg("--input")
        .arg("cells.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--column"));
}

#[test]
fn test_invalid_column_letter() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .args(["-i", "cells.txt", "-c", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("不是有效的列字母"));
}

#[test]
fn test_modes_are_exclusive() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .args(["--url", "https://example.com/a.mp4", "--download-images", "x.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// --- 测试核心分发逻辑 ---

#[test]
fn test_single_url_mode_dispatch() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .args(["--url", "https://example.com/video.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[VIDEO]"))
        .stdout(predicate::str::contains("https://example.com/video.mp4"))
        .stdout(predicate::str::contains("direct"));

    // 首次运行会生成默认配置文件
    assert!(home.path().join(".sheet-links").join("config.json").is_file());
}

#[test]
fn test_missing_input_file_fails() {
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();
    main_command(home.path())
        .args(["-i", "does-not-exist.txt", "-c", "B", "-o"])
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("无法读取输入文件"));
}

#[test]
fn test_input_mode_dispatch_offline() {
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();
    let input = home.path().join("cells.txt");
    fs::write(
        &input,
        "https://example.com/a.mp4, https://example.com/b.png\n\nhttps://www.youtube.com/watch?v=1\n",
    )
    .unwrap();

    main_command(home.path())
        .arg("-i")
        .arg(&input)
        .args(["-c", "b", "--start-row", "10", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("B10_1"))
        .stdout(predicate::str::contains("B12_1"));

    let videos = fs::read_to_string(out.path().join("video_links.txt")).unwrap();
    assert!(videos.contains("B10_1 : https://example.com/a.mp4"));
    assert!(videos.contains("B12_1 : https://www.youtube.com/watch?v=1"));
    let images = fs::read_to_string(out.path().join("image_links.txt")).unwrap();
    assert!(images.contains("B10_2 : https://example.com/b.png"));
    assert!(!out.path().join("news_links.txt").exists());
}

#[test]
fn test_download_images_with_empty_records() {
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();
    let records = home.path().join("image_links.txt");
    fs::write(&records, "# category: image\n\n").unwrap();

    main_command(home.path())
        .arg("--download-images")
        .arg(&records)
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();
    assert!(out.path().join("images").is_dir());
}
